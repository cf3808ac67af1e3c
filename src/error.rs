// src/error.rs

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

/// Validation failures raised by the view engine and the task lifecycle.
///
/// These are never coerced into a default answer: a task whose end date
/// cannot be parsed is an error, not "not vital".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A date or clock-time field failed to parse.
    #[error("invalid {field} {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// A value outside one of the closed enumerations (priority, status,
    /// sort key, status filter).
    #[error("invalid {kind} {value:?}")]
    InvalidEnumValue { kind: &'static str, value: String },

    /// The task would end before it starts.
    #[error("task ends ({end}) before it starts ({start})")]
    ScheduleOutOfOrder { start: String, end: String },
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Engine(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Database(e) => {
                error!("Store failure: {}", e);
                "Error talking to the task store".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

/// Body extractor settings: a malformed or unknown-keyed JSON body answers
/// with the same `{"error": ...}` shape as the handlers.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Query extractor settings, same error shape as [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::TaskFilterOptions;
    use crate::models::CreateTaskRequest;
    use actix_web::{test as actix_test, App};
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(ApiError::NotFound("task".into()), StatusCode::NOT_FOUND)]
    #[case(ApiError::BadRequest("no fields".into()), StatusCode::BAD_REQUEST)]
    #[case(
        ApiError::Engine(EngineError::InvalidEnumValue { kind: "priority", value: "Urgent".into() }),
        StatusCode::BAD_REQUEST
    )]
    fn maps_errors_to_status_codes(#[case] err: ApiError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
        assert_eq!(err.error_response().status(), expected);
    }

    #[test]
    fn engine_errors_name_the_offending_value() {
        let err = EngineError::InvalidDate { field: "endDate", value: "2024-13-01".into() };
        assert_eq!(err.to_string(), "invalid endDate \"2024-13-01\"");
    }

    async fn accept_filter(_query: web::Query<TaskFilterOptions>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn accept_task(_payload: web::Json<CreateTaskRequest>) -> HttpResponse {
        HttpResponse::Created().finish()
    }

    #[rstest]
    #[case("/tasks?sort=title", "title")]
    #[case("/tasks?status=archived", "archived")]
    #[case("/tasks?page=2", "page")]
    #[actix_web::test]
    async fn bad_query_answers_json_error(#[case] uri: &str, #[case] mentions: &str) {
        let app = actix_test::init_service(
            App::new()
                .app_data(query_config())
                .route("/tasks", web::get().to(accept_filter)),
        )
        .await;
        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains(mentions), "{}", message);
    }

    #[rstest]
    #[case(serde_json::json!({
        "title": "Ship", "priority": "Urgent", "startDate": "2024-05-01", "endDate": "2024-05-02"
    }), "Urgent")]
    #[case(serde_json::json!({
        "title": "Ship", "priority": "Low", "startDate": "2024-05-01", "endDate": "2024-05-02",
        "isBookmarked": true
    }), "isBookmarked")]
    #[actix_web::test]
    async fn bad_body_answers_json_error(
        #[case] payload: serde_json::Value,
        #[case] mentions: &str,
    ) {
        let app = actix_test::init_service(
            App::new()
                .app_data(json_config())
                .route("/tasks", web::post().to(accept_task)),
        )
        .await;
        let req = actix_test::TestRequest::post().uri("/tasks").set_json(payload).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains(mentions), "{}", message);
    }

    #[actix_web::test]
    async fn valid_body_passes_through() {
        let app = actix_test::init_service(
            App::new()
                .app_data(json_config())
                .route("/tasks", web::post().to(accept_task)),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/tasks")
            .set_json(serde_json::json!({
                "title": "Ship", "priority": "Low", "startDate": "2024-05-01", "endDate": "2024-05-02"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
