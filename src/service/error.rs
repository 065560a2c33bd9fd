use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    /// Input rejected before any request left the client.
    Validation,
    /// Network/connection failure; surfaced as a generic retry message.
    Transport,
    /// Non-success status with an optional server-supplied message.
    Server,
    /// Distinguished quota signal; routed to an upgrade prompt, never an
    /// error banner.
    QuotaExceeded,
    /// A success response whose body cannot produce a canonical model.
    MalformedPayload,
    /// History delete/clear failure; the cache is left untouched.
    HistoryOp,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
    pub http_status: Option<u16>,
    pub server_code: Option<String>,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
            server_code: None,
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_server_code(mut self, code: impl Into<String>) -> Self {
        self.server_code = Some(code.into());
        self
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.http_status, &self.server_code) {
            (Some(status), Some(code)) => {
                write!(f, "{} (status={}, code={})", self.message, status, code)
            }
            (Some(status), None) => write!(f, "{} (status={})", self.message, status),
            (None, Some(code)) => write!(f, "{} (code={})", self.message, code),
            (None, None) => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ServiceError {}

pub fn validation_error(message: impl Into<String>) -> ServiceError {
    ServiceError::new(ServiceErrorKind::Validation, message)
}

pub fn transport_error(message: impl Into<String>) -> ServiceError {
    ServiceError::new(ServiceErrorKind::Transport, message)
}

pub fn server_error(message: impl Into<String>) -> ServiceError {
    ServiceError::new(ServiceErrorKind::Server, message)
}

pub fn quota_exceeded(message: impl Into<String>) -> ServiceError {
    ServiceError::new(ServiceErrorKind::QuotaExceeded, message)
}

pub fn malformed_payload(message: impl Into<String>) -> ServiceError {
    ServiceError::new(ServiceErrorKind::MalformedPayload, message)
}

pub fn history_op_error(message: impl Into<String>) -> ServiceError {
    ServiceError::new(ServiceErrorKind::HistoryOp, message)
}

pub fn internal_error(message: impl Into<String>) -> ServiceError {
    ServiceError::new(ServiceErrorKind::Internal, message)
}
