//! Types shared by every document and flow.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A latitude/longitude pair as stored on documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,
    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A document persisted in a named collection.
///
/// Implementors own their identifier field; the store fills it on insert
/// when empty and stamps server-managed timestamps on every write.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn document_id(&self) -> &str;

    fn set_document_id(&mut self, id: String);

    /// Fills server timestamps. `created` is true on the first write.
    fn stamp(&mut self, _now: DateTime<Utc>, _created: bool) {}
}

/// Tri-state result of an asynchronous load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> LoadState<T> {
    /// Calls `on_success` or `on_error`; `Loading` calls neither.
    pub fn fold<S, E>(self, on_success: S, on_error: E)
    where
        S: FnOnce(T),
        E: FnOnce(String),
    {
        match self {
            LoadState::Success(value) => on_success(value),
            LoadState::Error(message) => on_error(message),
            LoadState::Loading => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LoadState<U> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Success(value) => LoadState::Success(f(value)),
            LoadState::Error(message) => LoadState::Error(message),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for LoadState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Success(value),
            Err(e) => LoadState::Error(e.to_string()),
        }
    }
}

/// Response envelope used by the mobile client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error_code: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Successful response that carries only a message.
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error_code: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn error(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error_code: Some(error_code.into()),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(48.1486, 17.1077).validate().is_ok());
        assert!(GeoPoint::new(91.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_load_state_fold() {
        let mut seen = None;
        LoadState::Success(5).fold(|v| seen = Some(v), |_| panic!("unexpected error"));
        assert_eq!(seen, Some(5));

        let mut message = String::new();
        LoadState::<i32>::Error("boom".into()).fold(|_| panic!("unexpected value"), |m| message = m);
        assert_eq!(message, "boom");

        LoadState::<i32>::Loading.fold(|_| panic!("loading"), |_| panic!("loading"));
    }

    #[test]
    fn test_load_state_from_result() {
        let ok: LoadState<u8> = Ok::<u8, String>(1).into();
        assert_eq!(ok, LoadState::Success(1));

        let err: LoadState<u8> = Err::<u8, String>("nope".into()).into();
        assert_eq!(err, LoadState::Error("nope".into()));
        assert_eq!(LoadState::Success(2).map(|v| v * 2), LoadState::Success(4));
    }

    #[test]
    fn test_api_response_serialization() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("errorCode").is_none());
        assert!(json["timestamp"].as_i64().unwrap() > 0);

        let json = serde_json::to_value(ApiResponse::<()>::error("not_found", "Pet not found"))
            .unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errorCode"], "not_found");
        assert_eq!(json["message"], "Pet not found");

        let json = serde_json::to_value(ApiResponse::<()>::acknowledged("Done")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Done");
        assert!(json.get("data").is_none());
    }
}
