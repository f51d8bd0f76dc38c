//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [budget] Section Defaults
// ============================================================================

pub mod budget {
    use super::super::Caps;

    pub fn ceiling() -> String {
        "25MB".into()
    }

    pub fn warn_threshold() -> String {
        "128KB".into()
    }

    pub fn text_limit() -> usize {
        50_000
    }

    pub fn critical_paths() -> Vec<String> {
        vec!["/".into(), "/info".into()]
    }

    pub fn critical() -> Caps {
        Caps {
            sections: 5,
            collections: 5,
            section_refs: 3,
        }
    }

    pub fn standard() -> Caps {
        Caps {
            sections: 2,
            collections: 3,
            section_refs: 2,
        }
    }
}
