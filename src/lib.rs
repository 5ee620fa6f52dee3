//! `PageShade`: dark/light page theming, coordinated the way a browser
//! extension does it.
//!
//! ARCHITECTURE
//! ============
//! Three surfaces talk over a point-to-point request/response bus:
//! - The [`popup`] picker turns a user choice into an `APPLY_THEME`
//!   request.
//! - The [`background`] coordinator owns storage, the toolbar badge, and
//!   forwarding; every request flows through it.
//! - [`content`] listeners mutate one page each and answer by echoing the
//!   instruction they applied.
//!
//! The persisted [`theme::Theme`] record is the single source of truth;
//! badge, popup selection, and page overrides are all derived from it.
//! [`runtime::Runtime`] wires the surfaces together over pluggable
//! storage.

pub mod background;
pub mod badge;
pub mod bus;
pub mod content;
pub mod dom;
pub mod message;
pub mod popup;
pub mod runtime;
pub mod storage;
pub mod stylesheet;
pub mod tabs;
pub mod theme;

pub use bus::{MessageBus, Rejection, SendError};
pub use message::{Message, TabId};
pub use runtime::{PageHandle, Runtime};
pub use theme::{Filter, FilterKind, Theme};
