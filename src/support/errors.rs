use std::fmt;

use thiserror::Error;

/// The two query parameters that drive offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Offset,
    Limit,
}

impl ParameterKind {
    /// Query parameter name used when a handler does not rename it.
    pub fn default_name(&self) -> &'static str {
        match self {
            ParameterKind::Offset => "offset",
            ParameterKind::Limit => "limit",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Why a raw offset/limit value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Not an integer at all.
    Type,
    /// An integer, but outside the allowed range.
    Value,
    /// In range, but not spelled canonically (sign, leading zeros).
    Format,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Type => "type",
            FailureKind::Value => "value",
            FailureKind::Format => "format",
        }
    }
}

/// A rejected offset or limit value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParameterError {
    kind: ParameterKind,
    failure: FailureKind,
    field: String,
    raw: String,
    message: String,
}

impl ParameterError {
    pub(crate) fn new(kind: ParameterKind, failure: FailureKind, raw: &str) -> Self {
        Self::build(kind, failure, kind.default_name().to_string(), raw.to_string())
    }

    fn build(kind: ParameterKind, failure: FailureKind, field: String, raw: String) -> Self {
        let message = match (failure, kind) {
            (FailureKind::Type, _) => {
                format!("Invalid type for '{}': {} - int is required.", field, raw)
            }
            (FailureKind::Value, ParameterKind::Limit) => format!(
                "Invalid value for '{}': {} - value between 1 and 100 is required.",
                field, raw
            ),
            (FailureKind::Value, ParameterKind::Offset) => format!(
                "Invalid value for '{}': {} - positive value or zero required.",
                field, raw
            ),
            (FailureKind::Format, _) => format!(
                "Invalid format for '{}': {} - digits without sign or leading zeros are required.",
                field, raw
            ),
        };
        Self {
            kind,
            failure,
            field,
            raw,
            message,
        }
    }

    /// Re-labels the error with the query parameter name the request actually used.
    pub fn for_field(self, field: &str) -> Self {
        if self.field == field {
            return self;
        }
        Self::build(self.kind, self.failure, field.to_string(), self.raw)
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn failure(&self) -> FailureKind {
        self.failure
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Invalid pagination parameter declarations for a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("more than one parameter is marked as the pagination {0} parameter")]
    DuplicateMarker(ParameterKind),

    #[error("parameter marked as the pagination {0} parameter is not bound to a query parameter")]
    UnboundMarker(ParameterKind),

    #[error("more than one query parameter is named '{name}'")]
    AmbiguousParameter { kind: ParameterKind, name: String },

    #[error("pagination {0} parameter name must not be empty")]
    EmptyName(ParameterKind),

    #[error("offset and limit cannot share the query parameter name '{0}'")]
    SharedName(String),

    #[error("invalid default for '{name}': {source}")]
    InvalidDefault {
        name: String,
        #[source]
        source: ParameterError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),

    #[error("cannot compute the last page with a limit of 0 ({total_results} total results)")]
    ZeroLimit { total_results: u64 },

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl PaginationError {
    /// HTTP status for the failure. Bad request values are the client's
    /// fault; invalid parameter declarations are a server error.
    pub fn status_code(&self) -> u16 {
        match self {
            PaginationError::Context(_) => 500,
            _ => 400,
        }
    }
}
