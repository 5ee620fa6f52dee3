//! Toolbar badge: the glanceable indicator of the persisted theme.
//!
//! The badge shows `D` on black while dark mode is active and `L` on white
//! otherwise, and is rewritten on every init and apply. Updates are
//! idempotent, so replayed applies leave it unchanged.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::theme::Theme;

/// Badge text while dark mode is active.
pub const DARK_BADGE_TEXT: &str = "D";
/// Badge background while dark mode is active.
pub const DARK_BADGE_COLOR: &str = "#000000";
/// Badge text while light mode is active.
pub const LIGHT_BADGE_TEXT: &str = "L";
/// Badge background while light mode is active.
pub const LIGHT_BADGE_COLOR: &str = "#FFFFFF";

/// Text plus background color, as the host toolbar shows them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BadgeState {
    pub text: String,
    pub color: String,
}

impl BadgeState {
    /// The badge a theme maps to. Depends only on the `dark` flag.
    #[must_use]
    pub fn for_theme(theme: &Theme) -> Self {
        if theme.dark {
            Self { text: DARK_BADGE_TEXT.into(), color: DARK_BADGE_COLOR.into() }
        } else {
            Self { text: LIGHT_BADGE_TEXT.into(), color: LIGHT_BADGE_COLOR.into() }
        }
    }
}

/// Handle on the host toolbar badge. Clones share one badge.
#[derive(Clone, Default)]
pub struct Badge {
    state: Arc<RwLock<BadgeState>>,
}

impl Badge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the badge text.
    pub async fn set_text(&self, text: &str) {
        self.state.write().await.text = text.to_owned();
    }

    /// Replace the badge background color.
    pub async fn set_background(&self, color: &str) {
        self.state.write().await.color = color.to_owned();
    }

    /// Current badge contents. Blank until the first update.
    pub async fn snapshot(&self) -> BadgeState {
        self.state.read().await.clone()
    }
}

/// Point the badge at `theme`. Safe to call repeatedly with the same theme.
pub async fn update_badge(badge: &Badge, theme: &Theme) {
    let next = BadgeState::for_theme(theme);
    badge.set_text(&next.text).await;
    badge.set_background(&next.color).await;
    debug!(text = %next.text, color = %next.color, "badge: updated");
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "badge_test.rs"]
mod tests;
