use tint_color::ColorParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TintError>;

/// Errors returned by the public [`Tinter`](crate::Tinter) API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TintError {
    #[error("invalid color format: {input}")]
    InvalidColorFormat {
        input: String,
        #[source]
        source: ColorParseError,
    },
}

impl TintError {
    /// Wrap a parse failure for the caller-supplied `input`.
    #[must_use]
    pub fn invalid_color(input: impl Into<String>, source: ColorParseError) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
            source,
        }
    }
}

/// Failures reported by document collaborators.
///
/// The engine never surfaces these to its caller: inaccessible resources are
/// skipped and stale writes are logged per fixup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("resource is not accessible: {reason}")]
    Inaccessible { reason: String },

    #[error("style declaration no longer backs a live rule")]
    StaleStyle,
}

impl DocumentError {
    #[must_use]
    pub fn inaccessible(reason: impl Into<String>) -> Self {
        Self::Inaccessible {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_color_keeps_source() {
        let parse = tint_color::parse_hex("#xyz").unwrap_err();
        let err = TintError::invalid_color("#xyz", parse.clone());
        assert_eq!(err.to_string(), "invalid color format: #xyz");
        assert_eq!(err.source().map(ToString::to_string), Some(parse.to_string()));
    }

    #[test]
    fn document_error_messages() {
        assert_eq!(
            DocumentError::inaccessible("cross-origin").to_string(),
            "resource is not accessible: cross-origin"
        );
        assert_eq!(
            DocumentError::StaleStyle.to_string(),
            "style declaration no longer backs a live rule"
        );
    }
}
