// SPDX-License-Identifier: MPL-2.0
//! Supabase REST (PostgREST) insert into the saved-images table.

use crate::application::port::{BackendCredentials, GatewayError};
use crate::config::SAVED_IMAGES_TABLE;
use crate::domain::session::SavedViewerRecord;
use reqwest::Client;
use serde::Serialize;

/// Row layout of the saved-images table.
#[derive(Debug, Serialize)]
struct SavedImageRow<'a> {
    user_id: &'a str,
    image_data: &'a str,
    scale: f32,
    position_x: f32,
    position_y: f32,
    enhancement_level: u8,
}

impl<'a> From<&'a SavedViewerRecord> for SavedImageRow<'a> {
    fn from(record: &'a SavedViewerRecord) -> Self {
        Self {
            user_id: &record.user_id,
            image_data: &record.image_data,
            scale: record.scale,
            position_x: record.position_x,
            position_y: record.position_y,
            enhancement_level: record.enhancement_level,
        }
    }
}

/// Inserts one record as the signed-in user.
pub async fn insert_saved_image(
    client: &Client,
    credentials: &BackendCredentials,
    access_token: &str,
    record: &SavedViewerRecord,
) -> Result<(), GatewayError> {
    let rows = [SavedImageRow::from(record)];
    let response = client
        .post(format!("{}/rest/v1/{SAVED_IMAGES_TABLE}", credentials.url))
        .header("apikey", &credentials.anon_key)
        .header("Prefer", "return=minimal")
        .bearer_auth(access_token)
        .json(&rows)
        .send()
        .await
        .map_err(|e| GatewayError::Persistence(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Persistence(format!("{status}: {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_serializes_with_snake_case_columns() {
        let record = SavedViewerRecord {
            user_id: "user-1".into(),
            image_data: "data:image/png;base64,AA==".into(),
            scale: 1.5,
            position_x: 10.0,
            position_y: -4.0,
            enhancement_level: 3,
        };

        let json = serde_json::to_value([SavedImageRow::from(&record)]).expect("serialize");
        let row = &json[0];
        assert_eq!(row["user_id"], "user-1");
        assert_eq!(row["image_data"], "data:image/png;base64,AA==");
        assert_eq!(row["scale"], 1.5);
        assert_eq!(row["position_x"], 10.0);
        assert_eq!(row["position_y"], -4.0);
        assert_eq!(row["enhancement_level"], 3);
        assert_eq!(row.as_object().map(|o| o.len()), Some(6));
    }
}
