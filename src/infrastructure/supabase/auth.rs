// SPDX-License-Identifier: MPL-2.0
//! Supabase Auth (GoTrue) endpoints: authorize URL, PKCE exchange, logout.

use super::callback::CALLBACK_PATH;
use crate::application::port::{BackendCredentials, GatewayError};
use crate::domain::session::SessionIdentity;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct PkceExchange<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Loopback address the provider redirects to.
#[must_use]
pub fn redirect_uri(port: u16) -> String {
    format!("http://127.0.0.1:{port}{CALLBACK_PATH}")
}

/// Builds the provider sign-in URL opened in the browser.
pub fn authorize_url(
    credentials: &BackendCredentials,
    challenge: &str,
) -> Result<Url, GatewayError> {
    let redirect = redirect_uri(credentials.redirect_port);
    Url::parse_with_params(
        &format!("{}/auth/v1/authorize", credentials.url),
        &[
            ("provider", credentials.oauth_provider.as_str()),
            ("redirect_to", redirect.as_str()),
            ("code_challenge", challenge),
            ("code_challenge_method", "s256"),
        ],
    )
    .map_err(|e| GatewayError::Auth(format!("invalid backend URL: {e}")))
}

/// Trades the authorization code for a session.
pub async fn exchange_code(
    client: &Client,
    credentials: &BackendCredentials,
    code: &str,
    verifier: &str,
) -> Result<SessionIdentity, GatewayError> {
    let response = client
        .post(format!("{}/auth/v1/token", credentials.url))
        .query(&[("grant_type", "pkce")])
        .header("apikey", &credentials.anon_key)
        .json(&PkceExchange {
            auth_code: code,
            code_verifier: verifier,
        })
        .send()
        .await
        .map_err(|e| GatewayError::Auth(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Auth(format!("token exchange {status}: {body}")));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| GatewayError::Auth(format!("unexpected token response: {e}")))?;

    Ok(SessionIdentity::new(
        token.user.id,
        token.user.email,
        token.access_token,
    ))
}

/// Revokes the session's token on the server.
pub async fn logout(
    client: &Client,
    credentials: &BackendCredentials,
    access_token: &str,
) -> Result<(), GatewayError> {
    let response = client
        .post(format!("{}/auth/v1/logout", credentials.url))
        .header("apikey", &credentials.anon_key)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| GatewayError::Auth(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Auth(format!("logout {status}: {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> BackendCredentials {
        BackendCredentials {
            url: "https://project.supabase.co".into(),
            anon_key: "anon".into(),
            oauth_provider: "google".into(),
            redirect_port: 54321,
        }
    }

    #[test]
    fn authorize_url_carries_pkce_parameters() {
        let url = authorize_url(&credentials(), "challenge-value").expect("url");

        assert_eq!(url.path(), "/auth/v1/authorize");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("provider".into(), "google".into())));
        assert!(pairs.contains(&(
            "redirect_to".into(),
            "http://127.0.0.1:54321/callback".into()
        )));
        assert!(pairs.contains(&("code_challenge".into(), "challenge-value".into())));
        assert!(pairs.contains(&("code_challenge_method".into(), "s256".into())));
    }

    #[test]
    fn authorize_url_rejects_invalid_base() {
        let mut creds = credentials();
        creds.url = "not a url".into();
        assert!(matches!(
            authorize_url(&creds, "c"),
            Err(GatewayError::Auth(_))
        ));
    }

    #[test]
    fn token_response_parses_user() {
        let json = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "user": { "id": "uuid-1", "email": "me@example.com" }
        }"#;
        let token: TokenResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(token.access_token, "jwt");
        assert_eq!(token.user.id, "uuid-1");
        assert_eq!(token.user.email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn exchange_body_uses_pkce_field_names() {
        let body = serde_json::to_value(PkceExchange {
            auth_code: "code",
            code_verifier: "verifier",
        })
        .expect("serialize");
        assert_eq!(body["auth_code"], "code");
        assert_eq!(body["code_verifier"], "verifier");
    }
}
