//! Error types raised while rendering.

use std::fmt;

use crate::constants::{
    CONTAINER_NOT_FOUND_MSG, INVALID_TAG_NAME_MSG, MALFORMED_TAG_MSG, MAX_DEPTH_MSG,
    MULTIPLE_IDS_MSG, NULL_VALUE_MSG, SKIP_HINT_MSG, SPACES_NOT_ALLOWED_MSG, UNDEFINED_VALUE_MSG,
};

pub type RenderResult<T> = Result<T, RenderError>;

/// Errors produced by the tag selector parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("{}: '{}'", INVALID_TAG_NAME_MSG, .0)]
    InvalidTagName(String),

    #[error("{reason}: '{selector}'")]
    InvalidTagFormat {
        selector: String,
        reason: FormatIssue,
    },

    #[error("{}: '{}'", MULTIPLE_IDS_MSG, .0)]
    MultipleIds(String),
}

/// Why a selector was rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    /// Whitespace somewhere in the selector
    Spaces,
    /// Empty id/class segment or otherwise ungrammatical
    Malformed,
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatIssue::Spaces => f.write_str(SPACES_NOT_ALLOWED_MSG),
            FormatIssue::Malformed => f.write_str(MALFORMED_TAG_MSG),
        }
    }
}

/// Where an invalid value was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueLocation {
    Element,
    Attribute(String),
}

impl fmt::Display for ValueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueLocation::Element => f.write_str("in element position"),
            ValueLocation::Attribute(key) => write!(f, "for attribute '{key}'"),
        }
    }
}

/// Errors that abort a render call.
///
/// Every variant is fatal: no markup is returned once one is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("{} {location}; {}", NULL_VALUE_MSG, SKIP_HINT_MSG)]
    NullValue { location: ValueLocation },

    #[error("{} {location}; {}", UNDEFINED_VALUE_MSG, SKIP_HINT_MSG)]
    UndefinedValue { location: ValueLocation },

    #[error("{} ({max_depth})", MAX_DEPTH_MSG)]
    MaxDepthExceeded { max_depth: usize },

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("{}: {}", CONTAINER_NOT_FOUND_MSG, .0)]
    ContainerNotFound(String),
}

impl RenderError {
    pub(crate) fn null_attribute(key: &str) -> Self {
        RenderError::NullValue {
            location: ValueLocation::Attribute(key.to_string()),
        }
    }

    pub(crate) fn undefined_attribute(key: &str) -> Self {
        RenderError::UndefinedValue {
            location: ValueLocation::Attribute(key.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_attribute_message_names_key() {
        let err = RenderError::null_attribute("title");

        assert_eq!(
            err.to_string(),
            "Null is not a valid value for attribute 'title'; use false to render nothing"
        );
    }

    #[test]
    fn selector_errors_pass_through() {
        let err: RenderError = SelectorError::InvalidTagFormat {
            selector: "div .a".to_string(),
            reason: FormatIssue::Spaces,
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Spaces are not allowed in tag selectors: 'div .a'"
        );
    }
}
