//! Theme record and CSS filter vocabulary.
//!
//! DESIGN
//! ======
//! `Theme` is the single persisted record: a `dark` flag plus the CSS
//! filter that realizes it. Popup selection, toolbar badge, and page
//! overrides are all derived from this one value, so the surfaces can
//! never disagree about what mode the user picked.
//!
//! Wire shape and stored shape are identical:
//! `{"dark": bool, "filter": {"type": ..., "value": ...}}`.

use serde::{Deserialize, Serialize};

// =============================================================================
// FILTER
// =============================================================================

/// CSS filter function families a theme can name.
///
/// The built-in themes only produce `Invert` and `None`; the rest exist so
/// stored records naming them survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterKind {
    Blur,
    Brightness,
    Contrast,
    DropShadow,
    Grayscale,
    HueRotate,
    Invert,
    None,
    Opacity,
    Saturate,
    Sepia,
    Url,
}

impl FilterKind {
    /// Wire name of the filter family.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Blur => "BLUR",
            FilterKind::Brightness => "BRIGHTNESS",
            FilterKind::Contrast => "CONTRAST",
            FilterKind::DropShadow => "DROP_SHADOW",
            FilterKind::Grayscale => "GRAYSCALE",
            FilterKind::HueRotate => "HUE_ROTATE",
            FilterKind::Invert => "INVERT",
            FilterKind::None => "NONE",
            FilterKind::Opacity => "OPACITY",
            FilterKind::Saturate => "SATURATE",
            FilterKind::Sepia => "SEPIA",
            FilterKind::Url => "URL",
        }
    }
}

/// A concrete CSS filter: the function family plus the literal CSS text
/// that content pages and the popup body render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub value: String,
}

impl Filter {
    /// The identity filter (`none`).
    #[must_use]
    pub fn none() -> Self {
        Self { kind: FilterKind::None, value: "none".into() }
    }

    /// Full color inversion (`invert(1)`).
    #[must_use]
    pub fn invert() -> Self {
        Self { kind: FilterKind::Invert, value: "invert(1)".into() }
    }
}

// =============================================================================
// THEME
// =============================================================================

/// The persisted theme preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub dark: bool,
    pub filter: Filter,
}

impl Theme {
    /// Built-in dark theme: inversion plus the hue rotation the stylesheet
    /// pairs with it.
    #[must_use]
    pub fn dark_inverted() -> Self {
        Self { dark: true, filter: Filter::invert() }
    }
}

/// Light theme. What every surface assumes until a stored record says
/// otherwise.
impl Default for Theme {
    fn default() -> Self {
        Self { dark: false, filter: Filter::none() }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;
