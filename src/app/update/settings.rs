use super::super::state::{
    App, MAX_FONT_SIZE, MAX_LINE_SPACING, MAX_TRAILING_MS_PER_CHAR, MIN_FONT_SIZE,
    MIN_LINE_SPACING, MIN_TRAILING_MS_PER_CHAR,
};
use crate::config::ThemeMode;
use tracing::info;

impl App {
    pub(super) fn handle_toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        };
        info!(theme = ?self.config.theme, "Switched theme");
    }

    pub(super) fn handle_font_size_changed(&mut self, size: u32) {
        self.config.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    pub(super) fn handle_line_spacing_changed(&mut self, spacing: f32) {
        if spacing.is_finite() {
            self.config.line_spacing = spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING);
        }
    }

    pub(super) fn handle_trailing_ms_per_char_changed(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let clamped = value.clamp(MIN_TRAILING_MS_PER_CHAR, MAX_TRAILING_MS_PER_CHAR);
        self.config.trailing_ms_per_char = clamped;
        self.playback.synchronizer.set_trailing_ms_per_char(clamped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn theme_toggle_flips_between_modes() {
        let (mut app, _task) = App::bootstrap(AppConfig::default(), None);
        assert!(matches!(app.config.theme, ThemeMode::Day));
        app.handle_toggle_theme();
        assert!(matches!(app.config.theme, ThemeMode::Night));
        app.handle_toggle_theme();
        assert!(matches!(app.config.theme, ThemeMode::Day));
    }

    #[test]
    fn font_size_is_clamped() {
        let (mut app, _task) = App::bootstrap(AppConfig::default(), None);
        app.handle_font_size_changed(4);
        assert_eq!(app.config.font_size, MIN_FONT_SIZE);
        app.handle_font_size_changed(500);
        assert_eq!(app.config.font_size, MAX_FONT_SIZE);
    }

    #[test]
    fn trailing_window_rejects_non_finite_values() {
        let (mut app, _task) = App::bootstrap(AppConfig::default(), None);
        let before = app.config.trailing_ms_per_char;
        app.handle_trailing_ms_per_char_changed(f64::NAN);
        assert_eq!(app.config.trailing_ms_per_char, before);
        app.handle_trailing_ms_per_char_changed(80.0);
        assert_eq!(app.config.trailing_ms_per_char, 80.0);
    }
}
