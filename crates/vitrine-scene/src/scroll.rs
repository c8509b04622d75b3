//! Page scroll position, active section and one-way reveals.
//!
//! Offsets and heights are in the same unit as the viewport height (terminal
//! rows in the app). A section's visible fraction is measured against the
//! smaller of its own height and the viewport, so sections taller than the
//! screen still reach every threshold.

use crate::section::ModelKind;

/// Offset past which the navbar switches to its compact "scrolled" style.
pub const NAVBAR_SCROLL_THRESHOLD: f32 = 20.0;
/// Visible fraction that reveals a section's 3D model.
pub const MODEL_REVEAL_THRESHOLD: f32 = 0.3;
/// Visible fraction that reveals a section's text.
pub const TEXT_REVEAL_THRESHOLD: f32 = 0.1;

/// The page sections, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    About,
    Skills,
    Projects,
    Resume,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Resume,
        SectionId::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Resume => "Resume",
            SectionId::Contact => "Contact",
        }
    }

    /// The decorative model shown beside this section, if any.
    pub fn model(self) -> Option<ModelKind> {
        match self {
            SectionId::Skills => Some(ModelKind::Skills),
            SectionId::Projects => Some(ModelKind::Laptop),
            SectionId::Resume => Some(ModelKind::Resume),
            SectionId::Contact => Some(ModelKind::Contact),
            SectionId::Home | SectionId::About => None,
        }
    }
}

/// Placement and reveal state of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub id: SectionId,
    pub top: f32,
    pub height: f32,
    text_revealed: bool,
    model_revealed: bool,
}

impl SectionSpan {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }

    pub fn is_text_revealed(&self) -> bool {
        self.text_revealed
    }

    pub fn is_model_revealed(&self) -> bool {
        self.model_revealed
    }
}

/// Tracks the scroll offset over a stack of sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTracker {
    spans: Vec<SectionSpan>,
    offset: f32,
    viewport_height: f32,
}

impl ScrollTracker {
    pub fn new(sections: &[(SectionId, f32)], viewport_height: f32) -> Self {
        let mut tracker = Self {
            spans: Vec::new(),
            offset: 0.0,
            viewport_height: viewport_height.max(0.0),
        };
        tracker.relayout(sections);
        tracker
    }

    /// Restack sections with new heights. Reveals already granted are kept.
    pub fn relayout(&mut self, sections: &[(SectionId, f32)]) {
        let mut top = 0.0;
        let spans = sections
            .iter()
            .map(|&(id, height)| {
                let height = height.max(0.0);
                let previous = self.span(id).copied();
                let span = SectionSpan {
                    id,
                    top,
                    height,
                    text_revealed: previous.is_some_and(|s| s.text_revealed),
                    model_revealed: previous.is_some_and(|s| s.model_revealed),
                };
                top += height;
                span
            })
            .collect();
        self.spans = spans;
        self.offset = self.offset.clamp(0.0, self.max_offset());
        self.refresh_reveals();
    }

    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn span(&self, id: SectionId) -> Option<&SectionSpan> {
        self.spans.iter().find(|s| s.id == id)
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn page_height(&self) -> f32 {
        self.spans.last().map_or(0.0, SectionSpan::bottom)
    }

    pub fn max_offset(&self) -> f32 {
        (self.page_height() - self.viewport_height).max(0.0)
    }

    /// Jump to `offset`, clamped to the page. Returns the applied offset.
    pub fn scroll_to(&mut self, offset: f32) -> f32 {
        self.offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            self.offset
        };
        self.refresh_reveals();
        self.offset
    }

    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.scroll_to(self.offset + delta)
    }

    /// Offset that brings `id` to the top of the viewport.
    pub fn offset_of(&self, id: SectionId) -> Option<f32> {
        self.span(id).map(|s| s.top.min(self.max_offset()))
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
        self.refresh_reveals();
    }

    /// Section containing the upper third of the viewport.
    pub fn active(&self) -> Option<SectionId> {
        let probe = self.offset + self.viewport_height / 3.0;
        self.spans
            .iter()
            .find(|s| s.contains(probe))
            .or(self.spans.last())
            .map(|s| s.id)
    }

    pub fn is_navbar_scrolled(&self) -> bool {
        self.offset > NAVBAR_SCROLL_THRESHOLD
    }

    /// Fraction of `id` currently on screen, in `[0, 1]`.
    pub fn visible_fraction(&self, id: SectionId) -> f32 {
        self.span(id)
            .map_or(0.0, |s| visible_fraction(s, self.offset, self.viewport_height))
    }

    pub fn is_text_revealed(&self, id: SectionId) -> bool {
        self.span(id).is_some_and(SectionSpan::is_text_revealed)
    }

    pub fn is_model_revealed(&self, id: SectionId) -> bool {
        self.span(id).is_some_and(SectionSpan::is_model_revealed)
    }

    fn refresh_reveals(&mut self) {
        let (offset, viewport) = (self.offset, self.viewport_height);
        for span in &mut self.spans {
            let fraction = visible_fraction(span, offset, viewport);
            if !span.text_revealed && fraction >= TEXT_REVEAL_THRESHOLD {
                span.text_revealed = true;
                tracing::trace!(section = span.id.title(), "text revealed");
            }
            if !span.model_revealed
                && span.id.model().is_some()
                && fraction >= MODEL_REVEAL_THRESHOLD
            {
                span.model_revealed = true;
                tracing::debug!(section = span.id.title(), "model revealed");
            }
        }
    }
}

fn visible_fraction(span: &SectionSpan, offset: f32, viewport: f32) -> f32 {
    let basis = span.height.min(viewport);
    if basis <= 0.0 {
        return 0.0;
    }
    let top = span.top.max(offset);
    let bottom = span.bottom().min(offset + viewport);
    ((bottom - top).max(0.0) / basis).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ScrollTracker {
        let sections: Vec<_> = SectionId::ALL.iter().map(|&id| (id, 30.0)).collect();
        ScrollTracker::new(&sections, 24.0)
    }

    #[test]
    fn test_offset_is_clamped_to_page() {
        let mut t = tracker();
        assert_eq!(t.scroll_to(-10.0), 0.0);
        assert_eq!(t.scroll_to(1.0e9), 180.0 - 24.0);
        assert_eq!(t.scroll_to(f32::NAN), 156.0);
    }

    #[test]
    fn test_active_section_uses_upper_third() {
        let mut t = tracker();
        assert_eq!(t.active(), Some(SectionId::Home));
        t.scroll_to(22.0);
        assert_eq!(t.active(), Some(SectionId::About));
        t.scroll_to(t.max_offset());
        assert_eq!(t.active(), Some(SectionId::Contact));
    }

    #[test]
    fn test_navbar_threshold() {
        let mut t = tracker();
        t.scroll_to(20.0);
        assert!(!t.is_navbar_scrolled());
        t.scroll_to(20.5);
        assert!(t.is_navbar_scrolled());
    }

    #[test]
    fn test_reveals_are_one_way() {
        let mut t = tracker();
        assert!(t.is_text_revealed(SectionId::Home));
        assert!(!t.is_text_revealed(SectionId::Skills));

        t.scroll_to(60.0);
        assert!(t.is_text_revealed(SectionId::Skills));
        assert!(t.is_model_revealed(SectionId::Skills));

        t.scroll_to(0.0);
        assert!(t.is_model_revealed(SectionId::Skills));
        assert!(!t.is_model_revealed(SectionId::Contact));
    }

    #[test]
    fn test_text_reveals_before_model() {
        let mut t = tracker();
        // Skills starts at 60; the viewport bottom sits 4 rows into it.
        t.scroll_to(40.0);
        assert!((t.visible_fraction(SectionId::Skills) - 4.0 / 24.0).abs() < 1e-6);
        assert!(t.is_text_revealed(SectionId::Skills));
        assert!(!t.is_model_revealed(SectionId::Skills));
    }

    #[test]
    fn test_sections_without_models_never_reveal_one() {
        let mut t = tracker();
        t.scroll_to(30.0);
        assert!(!t.is_model_revealed(SectionId::About));
    }

    #[test]
    fn test_relayout_keeps_reveals() {
        let mut t = tracker();
        t.scroll_to(60.0);
        let sections: Vec<_> = SectionId::ALL.iter().map(|&id| (id, 50.0)).collect();
        t.relayout(&sections);
        t.scroll_to(0.0);
        assert!(t.is_model_revealed(SectionId::Skills));
        assert_eq!(t.offset_of(SectionId::About), Some(50.0));
    }
}
