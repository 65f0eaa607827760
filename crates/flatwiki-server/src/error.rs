use crate::routes::RouteError;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use flatwiki_engine::{StoreError, TemplateError};

/// Failures that end a request with an error status.
///
/// A missing page is not one of these: the view and edit handlers recover
/// from it locally.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("404 page not found")]
    NotFound,
    #[error("405 method not allowed")]
    MethodNotAllowed(Method),
    #[error("{0}")]
    Save(#[from] StoreError),
    #[error("{0}")]
    Template(#[from] TemplateError),
    #[error("Bad form submission: {0}")]
    BadForm(String),
    #[error("Request worker failed: {0}")]
    Worker(String),
}

impl WikiError {
    pub fn status(&self) -> StatusCode {
        match self {
            WikiError::NotFound => StatusCode::NOT_FOUND,
            WikiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            WikiError::Save(_) | WikiError::Template(_) | WikiError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WikiError::BadForm(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<RouteError> for WikiError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NotFound => WikiError::NotFound,
            RouteError::MethodNotAllowed(allowed) => WikiError::MethodNotAllowed(allowed),
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            WikiError::MethodNotAllowed(allowed) => (
                status,
                [(header::ALLOW, allowed.as_str().to_string())],
                message,
            )
                .into_response(),
            _ => (status, message).into_response(),
        }
    }
}
