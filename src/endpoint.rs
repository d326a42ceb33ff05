use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Base URL of the public GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Query parameters attached to an endpoint, keyed by parameter name.
pub type Params = HashMap<String, ParamValue>;

/// HTTP methods supported by [`Endpoint`] descriptions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP `GET`.
    #[default]
    Get,
    /// HTTP `POST`.
    Post,
}

impl HttpMethod {
    /// Uppercase wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
        }
    }
}

/// A scalar query parameter value.
///
/// Every variant has a string form via [`fmt::Display`], which is what ends
/// up in the query string.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::UInt(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        Self::UInt(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Declarative description of one API call.
///
/// Implementors only need to provide [`Endpoint::path`]; the base URL defaults
/// to [`DEFAULT_BASE_URL`], parameters default to none and the method defaults
/// to `GET`. No validation happens here: a malformed base URL or path is
/// reported when the request is built (see [`crate::build_request`]).
///
/// ```
/// use std::borrow::Cow;
/// use github_client::{Endpoint, Params};
///
/// struct SearchRepositories<'a> {
///     query: &'a str,
///     per_page: u32,
/// }
///
/// impl Endpoint for SearchRepositories<'_> {
///     fn path(&self) -> Cow<'_, str> {
///         Cow::Borrowed("/search/repositories")
///     }
///
///     fn params(&self) -> Params {
///         Params::from([
///             ("q".to_owned(), self.query.into()),
///             ("per_page".to_owned(), self.per_page.into()),
///         ])
///     }
/// }
/// ```
pub trait Endpoint {
    /// Base URL the path is resolved against.
    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(DEFAULT_BASE_URL)
    }

    /// Absolute path of the endpoint, for example `/users/octocat`.
    fn path(&self) -> Cow<'_, str>;

    /// Query parameters sent with the request.
    fn params(&self) -> Params {
        Params::new()
    }

    /// HTTP method used for the request.
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn base_url(&self) -> Cow<'_, str> {
        (**self).base_url()
    }

    fn path(&self) -> Cow<'_, str> {
        (**self).path()
    }

    fn params(&self) -> Params {
        (**self).params()
    }

    fn method(&self) -> HttpMethod {
        (**self).method()
    }
}
