use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::warn;

use super::dispatcher::{DispatchError, ReportDispatcher};
use super::mailer::Mailer;
use super::request::ReportRequest;

pub const SEND_REPORT_PATH: &str = "/api/send-report";

/// Router exposing the report submission endpoint.
pub fn report_router<M>(dispatcher: Arc<ReportDispatcher<M>>) -> Router
where
    M: Mailer + 'static,
{
    Router::new()
        .route(SEND_REPORT_PATH, post(send_report_handler::<M>))
        .with_state(dispatcher)
}

pub(crate) async fn send_report_handler<M>(
    State(dispatcher): State<Arc<ReportDispatcher<M>>>,
    payload: Result<axum::Json<ReportRequest>, JsonRejection>,
) -> Response
where
    M: Mailer + 'static,
{
    let request = match payload {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected report payload");
            let payload = json!({ "message": rejection.body_text() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match dispatcher.dispatch(request).await {
        Ok(_) => (StatusCode::OK, axum::Json(json!({ "ok": true }))).into_response(),
        Err(error) => {
            let status = dispatch_status(&error);
            let payload = json!({ "message": error.user_message() });
            (status, axum::Json(payload)).into_response()
        }
    }
}

fn dispatch_status(error: &DispatchError) -> StatusCode {
    if error.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
