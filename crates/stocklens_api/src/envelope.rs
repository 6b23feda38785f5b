//! Uniform `{code, msg, data?}` response envelope.
//!
//! # Invariants
//! - Code values are part of the public contract and never change.
//! - `data` is left out of the JSON body when absent; it is never `null`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Serialize, Serializer};

pub const SUCCESS_MSG: &str = "success";

/// Outcome codes carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    BadRequest,
    SystemError,
    StockNotFound,
    /// Reserved: external data source failure.
    DataSourceError,
    /// Reserved: downstream service timeout.
    ServiceTimeout,
}

impl ResultCode {
    pub const fn value(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::BadRequest => 400,
            Self::SystemError => 500,
            Self::StockNotFound => 1001,
            Self::DataSourceError => 2001,
            Self::ServiceTimeout => 3001,
        }
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.value())
    }
}

/// Response wrapper returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResult<T> {
    pub code: ResultCode,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message(SUCCESS_MSG, data)
    }

    /// Success carrying a caller-facing note, e.g. for empty search results.
    pub fn success_with_message(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: ResultCode::Success,
            msg: msg.into(),
            data: Some(data),
        }
    }

    pub fn error(code: ResultCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::error(ResultCode::BadRequest, msg)
    }

    pub fn system_error(msg: impl Into<String>) -> Self {
        Self::error(ResultCode::SystemError, msg)
    }

    pub fn stock_not_found(symbol: &str) -> Self {
        Self::error(ResultCode::StockNotFound, format!("stock not found: {symbol}"))
    }
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiResult, ResultCode};
    use serde_json::json;

    #[test]
    fn codes_keep_their_wire_values() {
        let codes = [
            (ResultCode::Success, 200),
            (ResultCode::BadRequest, 400),
            (ResultCode::SystemError, 500),
            (ResultCode::StockNotFound, 1001),
            (ResultCode::DataSourceError, 2001),
            (ResultCode::ServiceTimeout, 3001),
        ];
        for (code, value) in codes {
            assert_eq!(code.value(), value);
            assert_eq!(serde_json::to_value(code).unwrap(), json!(value));
        }
    }

    #[test]
    fn success_carries_data_and_default_message() {
        let body = serde_json::to_value(ApiResult::success(vec![1, 2])).unwrap();
        assert_eq!(body, json!({"code": 200, "msg": "success", "data": [1, 2]}));
    }

    #[test]
    fn custom_success_message_keeps_empty_data() {
        let body =
            serde_json::to_value(ApiResult::success_with_message("nothing here", Vec::<u8>::new()))
                .unwrap();
        assert_eq!(body, json!({"code": 200, "msg": "nothing here", "data": []}));
    }

    #[test]
    fn errors_omit_the_data_key() {
        let body = serde_json::to_value(ApiResult::<String>::stock_not_found("TSLA")).unwrap();
        assert_eq!(body, json!({"code": 1001, "msg": "stock not found: TSLA"}));
        assert!(body.get("data").is_none());

        let text = serde_json::to_string(&ApiResult::<()>::bad_request("bad")).unwrap();
        assert!(!text.contains("data"));
    }
}
