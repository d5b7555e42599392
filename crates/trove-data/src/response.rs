//! Buffered responses.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::FetchError;

/// A response whose body has been read to the end.
///
/// Non-2xx statuses are still `Ok` from the transport; callers decide with
/// [`Response::error_for_status`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response, as the store API sends them.
    pub fn from_json(status: u16, value: &serde_json::Value) -> Self {
        let headers = HashMap::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);
        // Serializing a `Value` cannot fail.
        Self::new(status, headers, serde_json::to_vec(value).unwrap_or_default())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Empty or whitespace-only body, e.g. a 204 acknowledgment.
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> Result<&str, FetchError> {
        std::str::from_utf8(&self.body)
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Header lookup, ignoring ASCII case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }

    /// Turn a non-2xx status into [`FetchError::HttpError`] carrying the body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::HttpError {
            status: self.status,
            message: String::from_utf8_lossy(&self.body).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reply(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_success_range() {
        assert!(reply(200, b"").is_success());
        assert!(reply(204, b"").is_success());
        assert!(!reply(304, b"").is_success());
        assert!(!reply(404, b"").is_success());
    }

    #[test]
    fn test_blank_bodies() {
        assert!(reply(204, b"").is_blank());
        assert!(reply(200, b" \n").is_blank());
        assert!(!reply(200, b"{}").is_blank());
    }

    #[test]
    fn test_json_ack() {
        #[derive(serde::Deserialize)]
        struct Ack {
            message: String,
        }

        let ack: Ack = reply(200, br#"{"message": "Product removed from cart."}"#)
            .json()
            .unwrap();
        assert_eq!(ack.message, "Product removed from cart.");
    }

    #[test]
    fn test_json_rejects_html() {
        let result: Result<serde_json::Value, _> = reply(200, b"<html>oops</html>").json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        assert!(reply(200, &[0xff, 0xfe]).text().is_err());
        assert_eq!(reply(200, b"ok").text().unwrap(), "ok");
    }

    #[test]
    fn test_from_json_sets_content_type() {
        let resp = Response::from_json(200, &json!([{"sku_id": 1}]));
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.bytes(), br#"[{"sku_id":1}]"#);
    }

    #[test]
    fn test_error_for_status_carries_trimmed_body() {
        let err = reply(404, b"Product not found\n")
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpError {
                status: 404,
                message: "Product not found".to_string()
            }
        );
        assert!(reply(200, b"[]").error_for_status().is_ok());
    }
}
