//! Typed storage-area error taxonomy.

use thiserror::Error;

/// Error raised by storage-area operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The underlying store could not service the request.
    #[error("storage unavailable: {detail}")]
    Unavailable {
        /// Backend-provided failure detail.
        detail: String,
    },
    /// A write was rejected because the area has reached its size limit.
    #[error("storage quota exceeded: {detail}")]
    QuotaExceeded {
        /// Backend-provided failure detail.
        detail: String,
    },
    /// A value could not be encoded or decoded.
    #[error("storage serialization failed: {detail}")]
    Serialization {
        /// Underlying serializer message.
        detail: String,
    },
}

impl StorageError {
    /// Builds an [`StorageError::Unavailable`] error.
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable {
            detail: detail.into(),
        }
    }

    /// Builds a [`StorageError::QuotaExceeded`] error.
    pub fn quota_exceeded(detail: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            detail: detail.into(),
        }
    }

    /// Builds a [`StorageError::Serialization`] error.
    pub fn serialization(detail: impl Into<String>) -> Self {
        Self::Serialization {
            detail: detail.into(),
        }
    }

    /// Returns whether this error is a quota rejection.
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_terse_and_prefixed() {
        assert_eq!(
            StorageError::unavailable("backend gone").to_string(),
            "storage unavailable: backend gone"
        );
        assert_eq!(
            StorageError::quota_exceeded("94 bytes needed, quota 64").to_string(),
            "storage quota exceeded: 94 bytes needed, quota 64"
        );
        assert!(StorageError::quota_exceeded("full").is_quota_exceeded());
        assert!(!StorageError::unavailable("gone").is_quota_exceeded());
    }

    #[test]
    fn json_errors_convert_to_serialization() {
        let err = serde_json::from_str::<u32>("not json").expect_err("parse");
        assert!(matches!(
            StorageError::from(err),
            StorageError::Serialization { .. }
        ));
    }
}
