//! Translation of handler failures into envelopes.

use crate::envelope::ApiResult;
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use stocklens_core::ServiceError;

/// Failure raised while serving one request.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// A blocking lookup task that did not complete.
    Internal(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Internal(_) => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl ApiError {
    /// Maps the failure to its envelope code.
    ///
    /// `operation` prefixes the message of unclassified failures, which are
    /// passed through to the caller verbatim.
    pub fn into_envelope<T>(self, operation: &str) -> ApiResult<T> {
        match self {
            Self::Service(ServiceError::InvalidArgument(message)) => {
                warn!("event={operation} module=api status=bad_request error={message}");
                ApiResult::bad_request(message)
            }
            Self::Service(ServiceError::NotFound(symbol)) => {
                warn!("event={operation} module=api status=not_found symbol={symbol}");
                ApiResult::stock_not_found(&symbol)
            }
            other => {
                error!("event={operation} module=api status=error error={other}");
                ApiResult::system_error(format!("{operation} failed: {other}"))
            }
        }
    }
}
