//! Minimal page document model: named style elements plus the body filter.
//!
//! Content listeners mutate a [`Document`] the way a content script
//! mutates the real page: append a `<style>` element with a fixed id,
//! remove it by id, set an inline `filter` on the body. Nothing here knows
//! about themes.

/// A `<style>` element: its element id plus its CSS text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    pub id: String,
    pub css: String,
}

/// One page's mutable surface.
#[derive(Debug, Clone, Default)]
pub struct Document {
    styles: Vec<StyleElement>,
    body_filter: String,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a style element. Duplicate ids are not rejected here; callers
    /// that need uniqueness remove the id first.
    pub fn append_style(&mut self, style: StyleElement) {
        self.styles.push(style);
    }

    /// Remove every style element with `id`. Returns whether any existed.
    pub fn remove_style(&mut self, id: &str) -> bool {
        let before = self.styles.len();
        self.styles.retain(|style| style.id != id);
        self.styles.len() != before
    }

    /// First style element with `id`, if present.
    #[must_use]
    pub fn style(&self, id: &str) -> Option<&StyleElement> {
        self.styles.iter().find(|style| style.id == id)
    }

    /// Number of style elements carrying `id`.
    #[must_use]
    pub fn style_count(&self, id: &str) -> usize {
        self.styles.iter().filter(|style| style.id == id).count()
    }

    /// All style elements in insertion order.
    #[must_use]
    pub fn styles(&self) -> &[StyleElement] {
        &self.styles
    }

    /// Set the inline `filter` on the body element.
    pub fn set_body_filter(&mut self, filter: impl Into<String>) {
        self.body_filter = filter.into();
    }

    /// Inline `filter` on the body element. Empty until first set.
    #[must_use]
    pub fn body_filter(&self) -> &str {
        &self.body_filter
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "dom_test.rs"]
mod tests;
