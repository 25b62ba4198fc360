use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Serializable payload with a status code, 200 unless stated otherwise
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: StatusCode::OK,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            data,
            status_code: StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "msg": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response();
            }
        };

        (self.status_code, Json(value)).into_response()
    }
}

/// Body of every write: a human-readable message plus the new row id
#[derive(Debug, Serialize)]
pub struct Created {
    pub msg: &'static str,
    pub id: i64,
}

impl ApiResponse<Created> {
    pub fn created_row(msg: &'static str, id: i64) -> Self {
        Self::created(Created { msg, id })
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
