//! Dark-mode override stylesheet.
//!
//! DESIGN
//! ======
//! Dark pages come from inverting the whole page and rotating hue by 180°,
//! which flips luminance while colors keep their identity. Embedded media
//! get the same double transform a second time, so it cancels out and
//! photos and video look normal. A handful of element overrides pin
//! readable colors on pages that hardcode their own.

use crate::theme::Filter;

/// Element id of the injected override `<style>`. Fixed, so a re-apply can
/// find and replace the previous one.
pub const OVERRIDE_STYLE_ID: &str = "theme-switcher-style";

/// Page background forced onto html and body.
const SURFACE: &str = "#121212";
/// Body text color against the dark surface.
const SURFACE_TEXT: &str = "#e0e0e0";
/// Block background; inversion turns this near-black.
const BLOCK_SURFACE: &str = "#ededed";
/// Text and form ink; inversion turns this near-white.
const INK: &str = "rgba(0,0,0,0.8)";
/// Link color; inversion turns this light blue.
const LINK: &str = "#123456";
/// Second half of the dark transform, always paired with the theme filter.
const HUE_ROTATE: &str = "hue-rotate(180deg)";
/// Class fragment marking video player chrome that keeps its own colors.
const PLAYER_CHROME: &str = "ytp";

/// CSS text of the override block for `filter`.
#[must_use]
pub fn override_block(filter: &Filter) -> String {
    let value = &filter.value;
    format!(
        r#"html {{
    filter: {value} {HUE_ROTATE};
    background: {SURFACE} !important;
}}
body {{
    background: {SURFACE} !important;
    color: {SURFACE_TEXT} !important;
}}
img, video, iframe, object, embed {{
    filter: {value} {HUE_ROTATE} !important;
}}
input, textarea {{
    color: {INK} !important;
}}
div:not(div[class*="{PLAYER_CHROME}"]) {{
    background-color: {BLOCK_SURFACE} !important;
}}
p, span {{
    color: {INK} !important;
}}
a {{
    color: {LINK} !important;
}}
"#
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "stylesheet_test.rs"]
mod tests;
