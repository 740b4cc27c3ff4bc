// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window file drops, notification timers and the gateway's session stream
//! are routed here. Pointer input for the image is handled by the image
//! widget itself.

use super::Message;
use crate::application::port::{GatewayError, SessionGateway};
use crate::domain::session::SessionChange;
use crate::ui::editor::SessionOperation;
use iced::futures::{SinkExt, Stream};
use iced::{event, stream, time, Subscription};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Routes window file drops to the application.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(iced::window::Event::FileDropped(path)) = event {
            return Some(Message::FileDropped(path));
        }
        None
    })
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Gateway identity used to key the session stream.
///
/// Two handles are equal when they point at the same gateway, so iced keeps
/// one stream running across view rebuilds.
#[derive(Clone)]
struct GatewayHandle(Arc<dyn SessionGateway>);

impl GatewayHandle {
    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl Hash for GatewayHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl PartialEq for GatewayHandle {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for GatewayHandle {}

/// Forwards gateway session changes as messages.
///
/// The listener stays registered for as long as the subscription runs;
/// when iced drops the stream the handle is dropped with it and the listener
/// is removed from the gateway.
pub fn create_session_subscription(gateway: Arc<dyn SessionGateway>) -> Subscription<Message> {
    Subscription::run_with(GatewayHandle(gateway), session_stream)
}

fn session_stream(handle: &GatewayHandle) -> impl Stream<Item = Message> {
    let gateway = Arc::clone(&handle.0);
    stream::channel(16, move |mut output: iced::futures::channel::mpsc::Sender<Message>| async move {
        let (tx, mut rx) = mpsc::unbounded_channel::<SessionChange>();
        let _handle = gateway.subscribe(Arc::new(move |change: SessionChange| {
            // The receiver only goes away with the stream.
            let _ = tx.send(change);
        }));

        while let Some(change) = rx.recv().await {
            if output.send(session_message(change)).await.is_err() {
                break;
            }
        }
    })
}

/// A failed background sign-in finishes the login operation with an error.
fn session_message(change: SessionChange) -> Message {
    match change.login_error {
        Some(reason) => Message::SessionOperationFinished {
            operation: SessionOperation::Login,
            result: Err(GatewayError::Auth(reason)),
        },
        None => Message::SessionChanged {
            signed_in: change.identity.is_some(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{ListenerRegistry, SessionListener, SubscriptionHandle};
    use crate::domain::session::{SessionIdentity, ViewerSnapshot};
    use crate::ui::editor;
    use futures_util::future::{self, BoxFuture};
    use futures_util::{FutureExt as _, StreamExt as _};

    #[derive(Default)]
    struct ListeningGateway {
        listeners: ListenerRegistry,
    }

    impl SessionGateway for ListeningGateway {
        fn login(&self) -> BoxFuture<'static, Result<(), GatewayError>> {
            future::ready(Ok(())).boxed()
        }

        fn logout(&self) -> BoxFuture<'static, Result<(), GatewayError>> {
            future::ready(Ok(())).boxed()
        }

        fn save(&self, _: ViewerSnapshot) -> BoxFuture<'static, Result<(), GatewayError>> {
            future::ready(Ok(())).boxed()
        }

        fn subscribe(&self, listener: SessionListener) -> SubscriptionHandle {
            self.listeners.register(listener)
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    async fn wait_for_listener(gateway: &ListeningGateway) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while gateway.listeners.is_empty() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("stream registered a listener");
    }

    #[tokio::test]
    async fn session_stream_forwards_sign_in() {
        let gateway = Arc::new(ListeningGateway::default());
        let mut messages = Box::pin(session_stream(&GatewayHandle(gateway.clone())));
        let next = tokio::spawn(async move { messages.next().await });

        wait_for_listener(&gateway).await;
        gateway
            .listeners
            .notify(&SessionChange::new(Some(SessionIdentity::new(
                "u".into(),
                None,
                "t".into(),
            ))));

        let message = tokio::time::timeout(Duration::from_secs(2), next)
            .await
            .expect("message in time")
            .expect("stream task");
        assert!(matches!(
            message,
            Some(Message::SessionChanged { signed_in: true })
        ));
    }

    #[tokio::test]
    async fn dropping_the_stream_unsubscribes() {
        let gateway = Arc::new(ListeningGateway::default());
        let mut messages = Box::pin(session_stream(&GatewayHandle(gateway.clone())));
        let pending = tokio::spawn(async move { messages.next().await });

        wait_for_listener(&gateway).await;
        pending.abort();
        let _ = pending.await;
        assert!(gateway.listeners.is_empty());
    }

    #[test]
    fn failed_login_shows_login_error() {
        let message = session_message(SessionChange::login_failed(None, "access_denied"));
        let Message::SessionOperationFinished { operation, result } = message else {
            panic!("unexpected message: {message:?}");
        };
        assert_eq!(operation, SessionOperation::Login);
        assert_eq!(result, Err(GatewayError::Auth("access_denied".into())));

        let mut editor = editor::State::new();
        editor.update(editor::Message::Login);
        let notification = editor
            .operation_finished(operation, result)
            .expect("error notification");
        assert_eq!(notification.message_key(), "notification-login-error");
    }

    #[test]
    fn handles_to_the_same_gateway_are_equal() {
        let gateway: Arc<dyn SessionGateway> = Arc::new(ListeningGateway::default());
        let other: Arc<dyn SessionGateway> = Arc::new(ListeningGateway::default());
        assert!(GatewayHandle(Arc::clone(&gateway)) == GatewayHandle(Arc::clone(&gateway)));
        assert!(GatewayHandle(gateway) != GatewayHandle(other));
    }
}
