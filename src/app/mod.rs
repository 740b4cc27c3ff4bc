// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires together the editor, localization, preferences and
//! the two injected capabilities (session gateway and byte exporter), and
//! translates editor effects into asynchronous tasks. The gateway and the
//! exporter are built once at boot and only reached through their traits.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::{ByteExporter, GatewayConfig, SessionGateway};
use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::infrastructure::{self, DialogExporter};
use crate::media;
use crate::ui::editor;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state that bridges UI components, localization, and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    editor: editor::State,
    theme_mode: ThemeMode,
    /// Loaded preferences, written back when the theme changes.
    config: Config,
    gateway: Arc<dyn SessionGateway>,
    exporter: Arc<dyn ByteExporter>,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("editor", &self.editor)
            .field("theme_mode", &self.theme_mode)
            .field("backend_configured", &self.gateway.is_configured())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 640;
pub const MIN_WINDOW_WIDTH: u32 = 720;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn with_capabilities(
        i18n: I18n,
        config: Config,
        gateway: Arc<dyn SessionGateway>,
        exporter: Arc<dyn ByteExporter>,
    ) -> Self {
        Self {
            i18n,
            editor: editor::State::new(),
            theme_mode: config.general.theme_mode,
            config,
            gateway,
            exporter,
            notifications: notifications::Manager::new(),
        }
    }

    /// Loads preferences, builds the gateway from the backend settings and
    /// optionally kicks off loading the image passed on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir.clone());
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), flags.i18n_dir.clone(), &config);

        let gateway_config = GatewayConfig::resolve(&config.backend.clone().with_env_overrides());
        let gateway = infrastructure::build_gateway(gateway_config);

        let mut app = Self::with_capabilities(i18n, config, gateway, Arc::new(DialogExporter));

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        let task = match flags.file_path {
            Some(path) => Task::perform(
                media::load(Some(PathBuf::from(path))),
                Message::ImageLoaded,
            ),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub =
            subscription::create_tick_subscription(self.notifications.has_notifications());
        let session_sub = subscription::create_session_subscription(Arc::clone(&self.gateway));

        Subscription::batch([event_sub, tick_sub, session_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            editor: &mut self.editor,
            theme_mode: &mut self.theme_mode,
            config: &mut self.config,
            gateway: &self.gateway,
            exporter: &self.exporter,
            notifications: &mut self.notifications,
        };
        update::update(&mut ctx, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            editor: &self.editor,
            is_dark: self.theme_mode.is_dark(),
            backend_configured: self.gateway.is_configured(),
            notifications: &self.notifications,
        })
    }
}
