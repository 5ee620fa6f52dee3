//! Message — the envelope every surface speaks.
//!
//! ARCHITECTURE
//! ============
//! Popup, background, and content pages communicate by request/response
//! messaging, never by shared state. The popup and each content page
//! address the background; the background forwards applies to content
//! pages. Every request is answered with an envelope of the same shape.
//!
//! DESIGN
//! ======
//! - Closed vocabulary: exactly two actions. Anything else fails to parse
//!   at the edge, so a misspelled action surfaces as an error instead of
//!   being silently dropped.
//! - Responses reuse the request's action tag. `INIT_THEME` answers carry
//!   the resolved theme; `APPLY_THEME` answers echo the applied envelope.
//! - `tabId` is optional targeting metadata: absent means "the active tab".

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Host tab identifier. Real tabs are strictly positive.
pub type TabId = i64;

/// Wire envelope, tagged by `action`.
///
/// `INIT_THEME` requests carry no payload; responses fill `theme`.
/// `APPLY_THEME` always carries the theme to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    InitTheme {
        #[serde(skip_serializing_if = "Option::is_none")]
        theme: Option<Theme>,
        #[serde(rename = "tabId", skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
    },
    ApplyTheme {
        theme: Theme,
        #[serde(rename = "tabId", skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
    },
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

impl Message {
    /// Ask for the current theme. Sent by the popup and by every content
    /// page on startup.
    #[must_use]
    pub fn init_request() -> Self {
        Self::InitTheme { theme: None, tab_id: None }
    }

    /// Answer an init request with the resolved theme.
    #[must_use]
    pub fn init_response(theme: Theme) -> Self {
        Self::InitTheme { theme: Some(theme), tab_id: None }
    }

    /// Ask for a theme to be applied everywhere.
    #[must_use]
    pub fn apply(theme: Theme) -> Self {
        Self::ApplyTheme { theme, tab_id: None }
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

impl Message {
    /// Target a specific tab instead of the active one.
    #[must_use]
    pub fn with_tab(mut self, tab: TabId) -> Self {
        match &mut self {
            Self::InitTheme { tab_id, .. } | Self::ApplyTheme { tab_id, .. } => *tab_id = Some(tab),
        }
        self
    }
}

// =============================================================================
// ACCESSORS
// =============================================================================

impl Message {
    /// Wire name of the action tag.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::InitTheme { .. } => "INIT_THEME",
            Self::ApplyTheme { .. } => "APPLY_THEME",
        }
    }

    /// The theme carried by this envelope, if any.
    #[must_use]
    pub fn theme(&self) -> Option<&Theme> {
        match self {
            Self::InitTheme { theme, .. } => theme.as_ref(),
            Self::ApplyTheme { theme, .. } => Some(theme),
        }
    }

    /// Explicit tab target, if any.
    #[must_use]
    pub fn tab_id(&self) -> Option<TabId> {
        match self {
            Self::InitTheme { tab_id, .. } | Self::ApplyTheme { tab_id, .. } => *tab_id,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
