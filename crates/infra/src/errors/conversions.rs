//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use carbonwise_domain::CarbonError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CarbonError);

impl From<InfraError> for CarbonError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CarbonError> for InfraError {
    fn from(value: CarbonError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCarbonError {
    fn into_carbon(self) -> CarbonError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CarbonError */
/* -------------------------------------------------------------------------- */

impl IntoCarbonError for HttpError {
    fn into_carbon(self) -> CarbonError {
        if self.is_timeout() {
            return CarbonError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return CarbonError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return CarbonError::Internal(format!("HTTP response body could not be decoded: {self}"));
        }

        if self.is_builder() {
            return CarbonError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => CarbonError::Auth(message),
                404 => CarbonError::NotFound(message),
                400..=499 => CarbonError::InvalidInput(message),
                _ => CarbonError::Network(message),
            };
        }

        CarbonError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_carbon())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → CarbonError */
/* -------------------------------------------------------------------------- */

impl IntoCarbonError for IoError {
    fn into_carbon(self) -> CarbonError {
        match self.kind() {
            ErrorKind::NotFound => CarbonError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                CarbonError::Storage(format!("permission denied: {self}"))
            }
            _ => CarbonError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_carbon())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → CarbonError */
/* -------------------------------------------------------------------------- */

impl IntoCarbonError for JsonError {
    fn into_carbon(self) -> CarbonError {
        if self.is_io() {
            CarbonError::Storage(format!("JSON I/O failure: {self}"))
        } else {
            CarbonError::InvalidInput(format!("malformed JSON: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_carbon())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
