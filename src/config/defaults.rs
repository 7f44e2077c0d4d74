//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [template] Section Defaults
// ============================================================================

pub mod template {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        ".".into()
    }
}

// ============================================================================
// [remote] Section Defaults
// ============================================================================

pub mod remote {
    pub fn user_agent() -> String {
        concat!("folio/", env!("CARGO_PKG_VERSION")).into()
    }
}
