use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};
use crate::errors::{Disposition, VultesterError};

impl IntoResponse for VultesterError {
    fn into_response(self) -> axum::response::Response {
        let class = self.classify();
        let status = match (&self, class.disposition) {
            (VultesterError::NotFound(_), _) => StatusCode::NOT_FOUND,
            (_, Disposition::Rejected) => StatusCode::BAD_REQUEST,
            (_, Disposition::Fatal) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, error_type = class.error_type, "Request failed");
        } else {
            warn!(error = %self, error_type = class.error_type, "Request rejected");
        }

        (status, Json(json!({"error": self.to_string(), "type": class.error_type}))).into_response()
    }
}
