//! Popup controller: the user-facing theme picker.
//!
//! DESIGN
//! ======
//! The popup owns no truth. It renders a local copy of the theme for
//! immediate feedback, and every authoritative change goes through the
//! background as an `APPLY_THEME` request. On open it asks the background
//! for the stored theme so the radio selection matches reality.
//!
//! The popup's own body takes the theme's raw filter value, so the picker
//! previews the inversion it is asking for.

use tracing::{info, warn};

use crate::bus::{MessageBus, SendError};
use crate::dom::Document;
use crate::message::Message;
use crate::theme::Theme;

/// The two options the picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
}

impl ThemeChoice {
    /// The theme a choice stands for.
    #[must_use]
    pub fn theme(self) -> Theme {
        match self {
            ThemeChoice::Dark => Theme::dark_inverted(),
            ThemeChoice::Light => Theme::default(),
        }
    }
}

/// One open popup window.
pub struct Popup {
    bus: MessageBus,
    theme: Theme,
    document: Document,
}

impl Popup {
    /// Open the popup and sync its selection with the stored theme.
    ///
    /// A failed sync keeps the light default; the picker stays usable.
    pub async fn open(bus: MessageBus) -> Self {
        let mut popup = Self { bus, theme: Theme::default(), document: Document::new() };
        popup.sync_with_background().await;
        popup
    }

    async fn sync_with_background(&mut self) {
        match self.bus.send_to_background(Message::init_request()).await {
            Ok(Message::InitTheme { theme: Some(theme), .. }) => {
                self.theme = theme;
            }
            Ok(response) => {
                warn!(action = response.action(), "popup: init response carried no theme, keeping default");
            }
            Err(e) => {
                warn!(error = %e, "popup: init query failed, keeping default");
            }
        }
        self.render();
        info!(dark = self.theme.dark, "popup: opened");
    }

    /// Pick a theme: render it locally, then ask the background to apply
    /// it everywhere.
    ///
    /// The local render happens before the request resolves, so the picker
    /// mirrors the user's intent even while a rejection is being shown.
    ///
    /// # Errors
    /// The background's rejection or a transport failure, unchanged from
    /// [`MessageBus::request`].
    pub async fn select(&mut self, choice: ThemeChoice) -> Result<Message, SendError> {
        let theme = choice.theme();
        self.theme = theme.clone();
        self.render();
        info!(?choice, "popup: selection");

        self.bus
            .send_to_background(Message::apply(theme))
            .await
            .inspect_err(|e| warn!(error = %e, "popup: apply request failed"))
    }

    fn render(&mut self) {
        self.document.set_body_filter(self.theme.filter.value.clone());
    }

    /// Which radio is selected.
    #[must_use]
    pub fn selection(&self) -> ThemeChoice {
        if self.theme.dark { ThemeChoice::Dark } else { ThemeChoice::Light }
    }

    /// The popup's local copy of the theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Pretty-printed JSON of the current theme, as shown in the picker's
    /// debug pane.
    #[must_use]
    pub fn preview_json(&self) -> String {
        serde_json::to_string_pretty(&self.theme).unwrap_or_default()
    }

    /// The popup's own document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "popup_test.rs"]
mod tests;
