// SPDX-License-Identifier: MPL-2.0
//! Gateway used when no backend credentials are present.

use crate::application::port::{GatewayError, SessionGateway, SessionListener, SubscriptionHandle};
use crate::domain::session::ViewerSnapshot;
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt as _;

/// Every operation fails fast with [`GatewayError::Configuration`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredGateway;

impl UnconfiguredGateway {
    fn refuse() -> BoxFuture<'static, Result<(), GatewayError>> {
        future::ready(Err(GatewayError::Configuration)).boxed()
    }
}

impl SessionGateway for UnconfiguredGateway {
    fn login(&self) -> BoxFuture<'static, Result<(), GatewayError>> {
        Self::refuse()
    }

    fn logout(&self) -> BoxFuture<'static, Result<(), GatewayError>> {
        Self::refuse()
    }

    fn save(&self, _snapshot: ViewerSnapshot) -> BoxFuture<'static, Result<(), GatewayError>> {
        Self::refuse()
    }

    fn subscribe(&self, _listener: SessionListener) -> SubscriptionHandle {
        SubscriptionHandle::inert()
    }

    fn is_configured(&self) -> bool {
        false
    }
}
