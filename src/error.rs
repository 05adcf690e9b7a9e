//! Error handling

use thiserror::Error;

use crate::logic::features::Feature;

/// Error taxonomy shared by the validator and the submission flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input not coercible to a number
    TypeError,
    /// Input outside the declared bounds of its field
    RangeError,
    /// Request could not be sent or no response was received
    NetworkError,
    /// Response received with a non-success status
    ServerError,
    /// Response body does not match a prediction result
    ResponseShapeError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeViolation {
    BelowMinimum,
    AboveMaximum,
}

/// Validation failure attached to one form field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{message}")]
    NotANumber { feature: Feature, message: String },

    #[error("{message}")]
    OutOfRange {
        feature: Feature,
        violation: RangeViolation,
        message: String,
    },
}

impl FieldError {
    pub fn feature(&self) -> Feature {
        match self {
            Self::NotANumber { feature, .. } | Self::OutOfRange { feature, .. } => *feature,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotANumber { .. } => ErrorKind::TypeError,
            Self::OutOfRange { .. } => ErrorKind::RangeError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotANumber { message, .. } | Self::OutOfRange { message, .. } => message,
        }
    }
}

/// Every invalid field of a form, in field order. Never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Error for a specific field, if it failed
    pub fn get(&self, feature: Feature) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.feature() == feature)
    }
}

/// Failure of a submission after validation passed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    ResponseShape(String),
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::NetworkError,
            Self::Server { .. } => ErrorKind::ServerError,
            Self::ResponseShape(_) => ErrorKind::ResponseShapeError,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid bounds for {feature}: min {min} is greater than max {max}")]
    InvalidBounds { feature: Feature, min: f64, max: f64 },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
