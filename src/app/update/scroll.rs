use super::super::state::App;
use iced::widget::scrollable::RelativeOffset;
use tracing::debug;

/// Fraction of the viewport kept above a highlighted phrase when scrolling
/// without centering, so the reader sees some preceding context.
const TOP_CONTEXT_FRACTION: f32 = 0.2;

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset: RelativeOffset,
        viewport_height: f32,
        content_height: f32,
    ) {
        self.scroll.last_offset = sanitize_offset(offset);
        if viewport_height.is_finite() && viewport_height > 0.0 {
            self.scroll.viewport_height = viewport_height;
        }
        if content_height.is_finite() && content_height > 0.0 {
            self.scroll.content_height = content_height;
        }
    }

    /// Where to scroll so the given phrase is visible, or `None` when it
    /// already is (or the geometry is unknown).
    ///
    /// The reading column has no per-line layout information, so the phrase's
    /// vertical position is estimated from its share of the text: characters
    /// are weighted equally and line breaks count like a character of their
    /// own line. The estimate only has to be good enough to land the phrase
    /// inside the viewport.
    pub(in crate::app) fn scroll_offset_for_phrase(
        &self,
        phrase_idx: usize,
    ) -> Option<RelativeOffset> {
        if phrase_idx >= self.reader.phrases.len() {
            return None;
        }
        let viewport = self.scroll.viewport_height;
        let content = self.scroll.content_height;
        if viewport <= 0.0 || content <= viewport {
            return None;
        }

        let mut before: f32 = 0.0;
        let mut target: f32 = 0.0;
        let mut total: f32 = 0.0;
        for (idx, phrase) in self.reader.phrases.iter().enumerate() {
            let weight = phrase.text.chars().count().max(1) as f32;
            if idx < phrase_idx {
                before += weight;
            } else if idx == phrase_idx {
                target = weight;
            }
            total += weight;
        }
        if total <= 0.0 {
            return None;
        }

        // Estimated pixel position of the phrase's midpoint in the content.
        let midpoint = (before + target / 2.0) / total * content;

        let max_scroll = content - viewport;
        let window_top = self.scroll.last_offset.y.clamp(0.0, 1.0) * max_scroll;
        let window_bottom = window_top + viewport;
        if midpoint >= window_top && midpoint <= window_bottom {
            return None;
        }

        let desired_top = if self.config.center_highlight {
            midpoint - viewport / 2.0
        } else {
            midpoint - viewport * TOP_CONTEXT_FRACTION
        };
        let y = (desired_top / max_scroll).clamp(0.0, 1.0);
        debug!(phrase_idx, y, "Auto-scrolling to highlighted phrase");
        Some(RelativeOffset { x: 0.0, y })
    }
}

fn sanitize_offset(offset: RelativeOffset) -> RelativeOffset {
    let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    RelativeOffset {
        x: clamp(offset.x),
        y: clamp(offset.y),
    }
}
