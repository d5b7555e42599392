//! Outbound request description.

use std::collections::HashMap;
use std::fmt;

/// The methods the store API speaks: reads are `GET`, every write is `PATCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// A fully described request, handed to a [`Transport`](crate::Transport).
///
/// Store requests carry no body; everything is in the path.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path and query: everything after the authority.
    pub fn path(&self) -> &str {
        let Some(idx) = self.url.find("://") else {
            return &self.url;
        };
        let rest = &self.url[idx + 3..];
        rest.find('/').map_or("/", |slash| &rest[slash..])
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_strips_authority() {
        let req = RequestBuilder::new(Method::Get, "http://10.0.2.2:8080/api/Mobile%20Phones");
        assert_eq!(req.path(), "/api/Mobile%20Phones");
    }

    #[test]
    fn test_path_of_bare_host_is_root() {
        let req = RequestBuilder::new(Method::Get, "http://10.0.2.2:8080");
        assert_eq!(req.path(), "/");
    }

    #[test]
    fn test_path_of_relative_url_is_itself() {
        assert_eq!(RequestBuilder::new(Method::Get, "/api").path(), "/api");
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
