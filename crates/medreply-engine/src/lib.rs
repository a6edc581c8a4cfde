//! Reply rendering engine for the medical assistant chat.
//!
//! The UI layer depends on three operations:
//!
//! - [`to_markup`]: raw reply (rich text, markdown or plain) to markup
//! - [`emphasize`]: highlight clinically salient terms in a line of text
//! - [`icon_for`]: decoration icon for a section heading
//!
//! All three are pure and safe to call from any thread.

pub mod emphasis;
pub mod error;
pub mod icons;
pub mod rtf;
pub mod transform;

// Re-export key types for easier usage
pub use emphasis::{TermStyle, emphasize};
pub use error::TransformError;
pub use icons::icon_for;
pub use transform::{
    Fragment, ItemStyle, ListKind, ParserState, ReplyBuilder, WrapperKind, fallback_markup,
    parse_reply, to_markup, try_to_markup,
};
