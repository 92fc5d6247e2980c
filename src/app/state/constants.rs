use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Limits for reader controls.
pub(crate) const MIN_FONT_SIZE: u32 = 10;
pub(crate) const MAX_FONT_SIZE: u32 = 72;
pub(crate) const MIN_LINE_SPACING: f32 = 0.8;
pub(crate) const MAX_LINE_SPACING: f32 = 3.0;
pub(crate) const MIN_TRAILING_MS_PER_CHAR: f64 = 1.0;
pub(crate) const MAX_TRAILING_MS_PER_CHAR: f64 = 1000.0;
pub(crate) static TEXT_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("reading-scroll"));
