//! UniFFI bindings for the medreply chat screens
//!
//! Exposes the reply engine to the Kotlin and Swift apps. Every call is a
//! pure function of its arguments, so no handle objects cross the boundary.

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Transform error: {reason}")]
    TransformError { reason: String },
}

impl From<medreply_engine::TransformError> for FfiError {
    fn from(e: medreply_engine::TransformError) -> Self {
        Self::TransformError {
            reason: e.to_string(),
        }
    }
}

// ============ Rendering ============

/// Highlight clinically salient terms in a line of reply text.
#[uniffi::export]
pub fn emphasize(text: String) -> String {
    medreply_engine::emphasize(&text)
}

/// Convert a raw reply into markup. Falls back to escaped plain text.
#[uniffi::export]
pub fn to_markup(raw: String) -> String {
    medreply_engine::to_markup(&raw)
}

/// Convert a raw reply into markup, reporting failures instead of falling back.
#[uniffi::export]
pub fn try_to_markup(raw: String) -> Result<String, FfiError> {
    Ok(medreply_engine::try_to_markup(&raw)?)
}

/// Icon shown in front of a section heading, empty when none applies.
#[uniffi::export]
pub fn icon_for(heading: String) -> String {
    medreply_engine::icon_for(&heading).to_string()
}

/// Wrap a plain-text reply in a minimal rich-text document.
#[uniffi::export]
pub fn wrap_plain_text_as_rtf(text: String) -> String {
    medreply_engine::rtf::wrap_plain_text(&text)
}
