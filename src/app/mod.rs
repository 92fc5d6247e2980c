mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use iced::{Size, Theme, window};

/// Launch the reading assistant, optionally preloading the editor.
pub fn run_app(config: AppConfig, initial_text: Option<String>) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(1100.0, 760.0),
        ..window::Settings::default()
    };

    iced::application("Chinese Reading Assistant", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, crate::config::ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, initial_text))
}
