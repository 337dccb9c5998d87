//! UI-state store registry errors.

use std::fmt;

/// Registry lookups that cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A concern name is already registered with a different payload type.
    TypeMismatch {
        concern: String,
        expected: &'static str,
    },

    /// A concern name is registered as a flag store and requested as a
    /// data-carrying one, or the reverse.
    KindMismatch {
        concern: String,
        registered_as_flag: bool,
    },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::TypeMismatch { .. } => "E_STORE_TYPE",
            StoreError::KindMismatch { .. } => "E_STORE_KIND",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::TypeMismatch { concern, expected } => write!(
                f,
                "Store '{}' is registered with a payload type other than {}",
                concern, expected
            ),
            StoreError::KindMismatch {
                concern,
                registered_as_flag,
            } => write!(
                f,
                "Store '{}' is registered as a {} store",
                concern,
                if *registered_as_flag { "flag" } else { "data" }
            ),
        }
    }
}

impl std::error::Error for StoreError {}
