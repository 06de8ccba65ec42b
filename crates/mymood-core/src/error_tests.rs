//! Error module tests

use std::path::PathBuf;

use crate::error::{Error, Result};

#[test]
fn test_image_not_found_error() {
    let error = Error::ImageNotFound(PathBuf::from("selfie.jpg"));
    assert_eq!(error.code(), "E001");
    assert_eq!(error.to_string(), "Image file selfie.jpg does not exist.");
    assert_eq!(
        error.suggestion(),
        Some("Check that selfie.jpg exists and is readable".to_string())
    );
    assert!(error.is_local());
    assert_eq!(error.status(), None);
}

#[test]
fn test_image_read_error() {
    let error = Error::ImageReadError("selfie.jpg: permission denied".to_string());
    assert_eq!(error.code(), "E002");
    assert!(error.is_local());
    assert!(error.to_string().contains("permission denied"));
}

#[test]
fn test_unauthorized_error() {
    let error = Error::Unauthorized {
        status: 401,
        body: "invalid token".to_string(),
    };
    assert_eq!(error.code(), "E101");
    assert_eq!(error.status(), Some(401));
    assert!(!error.is_local());
    assert_eq!(
        error.suggestion(),
        Some("Set MYMOOD_API_KEY or pass --api-key".to_string())
    );
    assert!(error.to_string().contains("invalid token"));
}

#[test]
fn test_resource_not_found_error() {
    let error = Error::ResourceNotFound("https://api.example.com/order/9/status".to_string());
    assert_eq!(error.code(), "E102");
    assert_eq!(error.status(), Some(404));
    assert_eq!(error.suggestion(), None);
    assert!(error.to_string().contains("order/9/status"));
}

#[test]
fn test_rate_limited_error() {
    let error = Error::RateLimited("slow down".to_string());
    assert_eq!(error.code(), "E103");
    assert_eq!(error.status(), Some(429));
    assert!(error.suggestion().is_some());
}

#[test]
fn test_api_error() {
    let error = Error::ApiError {
        status: 500,
        body: "internal".to_string(),
    };
    assert_eq!(error.code(), "E104");
    assert_eq!(error.status(), Some(500));
    assert_eq!(error.to_string(), "API error (HTTP 500): internal");
}

#[test]
fn test_invalid_response_error() {
    let error = Error::InvalidResponse("expected value at line 1".to_string());
    assert_eq!(error.code(), "E105");
    assert!(!error.is_local());
    assert_eq!(error.status(), None);
}

#[test]
fn test_config_error() {
    let error = Error::ConfigError("bad base URL".to_string());
    assert_eq!(error.code(), "E600");
    assert!(error.is_local());
    assert_eq!(error.suggestion(), Some("mymood config".to_string()));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("payload".to_string());
    assert_eq!(error.code(), "E800");
    assert!(error.is_local());
}

#[test]
fn test_result_alias() {
    fn fails() -> Result<u64> {
        Err(Error::InvalidInput("nope".to_string()))
    }
    assert!(fails().is_err());
}
