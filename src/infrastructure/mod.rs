// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`supabase`]: Sign-in and persistence against Supabase (implements [`SessionGateway`])
//! - [`unconfigured`]: Fail-fast gateway when credentials are missing
//! - [`dialog_export`]: Save-dialog download (implements [`ByteExporter`])
//! - [`browser`]: System browser launcher used by the sign-in flow
//!
//! [`SessionGateway`]: crate::application::port::SessionGateway
//! [`ByteExporter`]: crate::application::port::ByteExporter

pub mod browser;
pub mod dialog_export;
pub mod supabase;
pub mod unconfigured;

// Re-export main types for convenience
pub use dialog_export::DialogExporter;
pub use supabase::SupabaseGateway;
pub use unconfigured::UnconfiguredGateway;

use crate::application::port::{GatewayConfig, SessionGateway};
use std::sync::Arc;

/// Builds the gateway variant selected by `config`.
///
/// A configured backend whose client cannot be built degrades to the
/// unconfigured variant.
#[must_use]
pub fn build_gateway(config: GatewayConfig) -> Arc<dyn SessionGateway> {
    match config {
        GatewayConfig::Configured(credentials) => {
            tracing::info!(url = %credentials.url, "backend configured");
            match SupabaseGateway::new(credentials) {
                Ok(gateway) => Arc::new(gateway),
                Err(_) => Arc::new(UnconfiguredGateway),
            }
        }
        GatewayConfig::Unconfigured => Arc::new(UnconfiguredGateway),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{BackendCredentials, GatewayError};

    #[tokio::test]
    async fn unconfigured_gateway_fails_every_operation() {
        let gateway = build_gateway(GatewayConfig::Unconfigured);
        assert!(!gateway.is_configured());
        assert_eq!(gateway.login().await, Err(GatewayError::Configuration));
        assert_eq!(gateway.logout().await, Err(GatewayError::Configuration));
    }

    #[test]
    fn configured_credentials_build_supabase_gateway() {
        let gateway = build_gateway(GatewayConfig::Configured(BackendCredentials {
            url: "https://project.supabase.co".into(),
            anon_key: "anon".into(),
            oauth_provider: "google".into(),
            redirect_port: 54321,
        }));
        assert!(gateway.is_configured());
    }
}
