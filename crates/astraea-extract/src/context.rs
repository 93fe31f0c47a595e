//! Request snapshot the extraction helpers read from.
//!
//! [`RequestContext`] is built once per request by the host-framework
//! adapter and then only read: all typed accessors are pure functions of the
//! snapshot. The context also owns the per-request trace id so that every
//! read within one request observes the same value.

use astraea_core::trace;
use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use smallvec::SmallVec;
use std::sync::OnceLock;

/// Path parameters stored inline for the common case of a handful of
/// variables per route.
const INLINE_PARAMS: usize = 4;

/// Path variables matched by the host router, as (name, value) pairs.
///
/// # Example
///
/// ```rust
/// use astraea_extract::PathParams;
///
/// let mut params = PathParams::new();
/// params.push("user_id", "42");
///
/// assert_eq!(params.get("user_id"), Some("42"));
/// assert_eq!(params.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParams {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl PathParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if no parameters were matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of matched parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

/// Read-only snapshot of one HTTP request.
///
/// Query pairs are decoded from the URI, form pairs from the body when the
/// request carries `application/x-www-form-urlencoded` content. Repeated
/// keys keep every occurrence; the named accessors return the first.
///
/// # Example
///
/// ```rust
/// use astraea_extract::RequestContext;
/// use astraea_extract::PathParams;
/// use bytes::Bytes;
/// use http::{HeaderMap, Method, Uri};
///
/// let ctx = RequestContext::new(
///     Method::GET,
///     Uri::from_static("/users/42?active=true"),
///     HeaderMap::new(),
///     Bytes::new(),
///     PathParams::new(),
/// );
///
/// assert_eq!(ctx.path(), "/users/42");
/// assert_eq!(ctx.query_param("active"), Some("true"));
/// ```
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    path_params: PathParams,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
    trace_id: OnceLock<String>,
}

impl RequestContext {
    /// Creates a context from the raw request parts. The body is decoded as
    /// form pairs only when the content type is
    /// `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        path_params: PathParams,
    ) -> Self {
        let query = uri
            .query()
            .map(decode_pairs)
            .unwrap_or_default();
        let form = if is_form_content(&headers) {
            decode_pairs(&String::from_utf8_lossy(&body))
        } else {
            Vec::new()
        };

        Self {
            method,
            uri,
            headers,
            path_params,
            query,
            form,
            trace_id: OnceLock::new(),
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the raw query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the matched path parameters.
    #[must_use]
    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    /// Returns a path parameter by name.
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name)
    }

    /// Returns the first query value for `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true when `name` appears in the query string at all, with or
    /// without a value (`?trace` and `?trace=1` both count).
    #[must_use]
    pub fn query_flag(&self, name: &str) -> bool {
        self.query.iter().any(|(n, _)| n == name)
    }

    /// Returns the first form field value for `name`.
    #[must_use]
    pub fn form_param(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the trace id for this request.
    ///
    /// Derived once: the inbound `x-request-id` header when present,
    /// otherwise a freshly generated id. Repeated calls return the same
    /// value.
    #[must_use]
    pub fn trace_id(&self) -> &str {
        self.trace_id.get_or_init(|| {
            self.header(trace::TRACE_ID_HEADER)
                .map(ToString::to_string)
                .unwrap_or_else(trace::trace_id)
        })
    }

    /// Returns the client address as reported by proxies: `x-real-ip`
    /// first, then the first `x-forwarded-for` element, else empty.
    #[must_use]
    pub fn client_ip(&self) -> &str {
        if let Some(ip) = self.header("x-real-ip") {
            return ip;
        }
        self.header("x-forwarded-for")
            .and_then(|xff| xff.split(',').next())
            .map(str::trim)
            .unwrap_or("")
    }
}

fn is_form_content(headers: &HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn decode_pairs(raw: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(raw).unwrap_or_default()
}

/// Builder for constructing a [`RequestContext`] piece by piece, used by
/// adapters and tests.
#[derive(Debug, Default)]
pub struct RequestContextBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
    path_params: PathParams,
}

impl RequestContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Adds a single header. Values that fail header validation are
    /// silently dropped.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a single path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Builds the context.
    ///
    /// # Panics
    ///
    /// Panics if method or uri were not set.
    #[must_use]
    pub fn build(self) -> RequestContext {
        RequestContext::new(
            self.method.expect("method is required"),
            self.uri.expect("uri is required"),
            self.headers,
            self.body,
            self.path_params,
        )
    }
}
