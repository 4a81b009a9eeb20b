use thiserror::Error;

pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "Failed to retrieve temperature data.";
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "Failed to retrieve products.";
pub const INTERNAL_FAILURE_MESSAGE: &str = "An unexpected internal error occurred.";

/// Rejections of a recommendation request before any I/O happens.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid JSON payload.")]
    MalformedInput { detail: String },
    #[error("{} is required.", capitalize(.field))]
    MissingField { field: &'static str },
    #[error("Date must be 'today', 'tomorrow' or a number between 1 and 14.")]
    InvalidDate,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("weather data unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::Internal { .. } => 500,
        }
    }

    /// Message safe to return to the client.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } | Self::Internal { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } | Self::Internal { correlation_id, .. } => {
                correlation_id
            }
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(domain) => Self::BadRequest {
                message: domain.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::UpstreamUnavailable(_) => Self::Internal {
                message: UPSTREAM_UNAVAILABLE_MESSAGE.to_owned(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Persistence(_) => Self::Internal {
                message: PERSISTENCE_FAILURE_MESSAGE.to_owned(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Configuration(_) => Self::Internal {
                message: INTERNAL_FAILURE_MESSAGE.to_owned(),
                correlation_id: "unassigned".to_owned(),
            },
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
