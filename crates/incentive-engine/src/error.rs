use crate::config::ConfigError;
use crate::payouts::policy::PolicyError;
use crate::payouts::roster::RosterImportError;
use crate::payouts::scoring::ScoringError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Policy(PolicyError),
    Scoring(ScoringError),
    Roster(RosterImportError),
    EmployeeNotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Policy(err) => write!(f, "policy error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Roster(err) => write!(f, "roster error: {}", err),
            AppError::EmployeeNotFound(id) => write!(f, "employee '{}' not found in roster", id),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Policy(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Roster(err) => Some(err),
            AppError::EmployeeNotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Roster(_) => StatusCode::BAD_REQUEST,
            AppError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Policy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<PolicyError> for AppError {
    fn from(value: PolicyError) -> Self {
        Self::Policy(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::Roster(value)
    }
}
