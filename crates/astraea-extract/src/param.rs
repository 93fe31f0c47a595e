//! Typed parameter accessors on [`RequestContext`].
//!
//! Every accessor is a pure function of the request snapshot: it resolves
//! the named raw string from its location, converts it, and raises a
//! [`ParamError`] on missing or malformed input.
//!
//! Boolean values: after trimming and lowercasing, exactly `true`, `1` and
//! `on` are truthy; any other present value is `false`. There is no
//! malformed-boolean failure kind.
//!
//! The `query_*_or` variants never raise: missing *and* malformed input
//! both yield the supplied default. This is intentional — the defaulted
//! form treats unusable input as absent.

use crate::context::RequestContext;
use crate::error::{ParamError, ParamSource};
use crate::pagination::Pageable;
use crate::sort::Sort;
use astraea_core::BizResult;
use std::str::FromStr;

impl RequestContext {
    fn raw_param(&self, source: ParamSource, name: &str) -> Option<&str> {
        match source {
            ParamSource::Path => self.path_param(name),
            ParamSource::Query => self.query_param(name),
            ParamSource::Form => self.form_param(name),
        }
    }

    fn required_param(&self, source: ParamSource, name: &str) -> Result<&str, ParamError> {
        match self.raw_param(source, name) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(ParamError::missing(source, name)),
        }
    }

    fn required_trimmed(&self, source: ParamSource, name: &str) -> Result<&str, ParamError> {
        match self.raw_param(source, name).map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(ParamError::missing(source, name)),
        }
    }

    fn bool_param(&self, source: ParamSource, name: &str) -> Result<bool, ParamError> {
        let v = self.required_trimmed(source, name)?.to_lowercase();
        Ok(matches!(v.as_str(), "true" | "1" | "on"))
    }

    fn parsed_param<T: FromStr>(
        &self,
        source: ParamSource,
        name: &str,
        type_name: &str,
    ) -> Result<T, ParamError> {
        let v = self.required_trimmed(source, name)?;
        v.parse().map_err(|_| {
            ParamError::malformed(source, name, format!(r#"cannot convert "{v}" to {type_name}"#))
        })
    }

    /// Returns a `path` parameter as a boolean.
    pub fn path_bool(&self, name: &str) -> Result<bool, ParamError> {
        self.bool_param(ParamSource::Path, name)
    }

    /// Returns a `path` parameter as an `i32`.
    pub fn path_i32(&self, name: &str) -> Result<i32, ParamError> {
        self.parsed_param(ParamSource::Path, name, "i32")
    }

    /// Returns a `path` parameter as an `i64`.
    pub fn path_i64(&self, name: &str) -> Result<i64, ParamError> {
        self.parsed_param(ParamSource::Path, name, "i64")
    }

    /// Returns a `path` parameter as an `f64`.
    pub fn path_f64(&self, name: &str) -> Result<f64, ParamError> {
        self.parsed_param(ParamSource::Path, name, "f64")
    }

    /// Returns a non-empty `path` parameter.
    pub fn path_str(&self, name: &str) -> Result<&str, ParamError> {
        self.required_param(ParamSource::Path, name)
    }

    /// Returns a `path` parameter trimmed of surrounding whitespace.
    pub fn path_trimmed(&self, name: &str) -> Result<&str, ParamError> {
        self.required_trimmed(ParamSource::Path, name)
    }

    /// Returns a `query` parameter as a boolean.
    pub fn query_bool(&self, name: &str) -> Result<bool, ParamError> {
        self.bool_param(ParamSource::Query, name)
    }

    /// Returns a `query` parameter as an `i32`.
    pub fn query_i32(&self, name: &str) -> Result<i32, ParamError> {
        self.parsed_param(ParamSource::Query, name, "i32")
    }

    /// Returns a `query` parameter as an `i64`.
    pub fn query_i64(&self, name: &str) -> Result<i64, ParamError> {
        self.parsed_param(ParamSource::Query, name, "i64")
    }

    /// Returns a `query` parameter as an `f64`.
    pub fn query_f64(&self, name: &str) -> Result<f64, ParamError> {
        self.parsed_param(ParamSource::Query, name, "f64")
    }

    /// Returns a non-empty `query` parameter.
    pub fn query_str(&self, name: &str) -> Result<&str, ParamError> {
        self.required_param(ParamSource::Query, name)
    }

    /// Returns a `query` parameter trimmed of surrounding whitespace.
    pub fn query_trimmed(&self, name: &str) -> Result<&str, ParamError> {
        self.required_trimmed(ParamSource::Query, name)
    }

    /// Returns a `query` boolean, or `default` when the parameter is
    /// absent.
    #[must_use]
    pub fn query_bool_or(&self, name: &str, default: bool) -> bool {
        self.query_bool(name).unwrap_or(default)
    }

    /// Returns a `query` `i32`, or `default` when the parameter is absent
    /// or malformed.
    #[must_use]
    pub fn query_i32_or(&self, name: &str, default: i32) -> i32 {
        self.query_i32(name).unwrap_or(default)
    }

    /// Returns a `query` `i64`, or `default` when the parameter is absent
    /// or malformed.
    #[must_use]
    pub fn query_i64_or(&self, name: &str, default: i64) -> i64 {
        self.query_i64(name).unwrap_or(default)
    }

    /// Returns a `query` `f64`, or `default` when the parameter is absent
    /// or malformed.
    #[must_use]
    pub fn query_f64_or(&self, name: &str, default: f64) -> f64 {
        self.query_f64(name).unwrap_or(default)
    }

    /// Returns a `form` field as a boolean.
    pub fn form_bool(&self, name: &str) -> Result<bool, ParamError> {
        self.bool_param(ParamSource::Form, name)
    }

    /// Returns a `form` field as an `i32`.
    pub fn form_i32(&self, name: &str) -> Result<i32, ParamError> {
        self.parsed_param(ParamSource::Form, name, "i32")
    }

    /// Returns a `form` field as an `i64`.
    pub fn form_i64(&self, name: &str) -> Result<i64, ParamError> {
        self.parsed_param(ParamSource::Form, name, "i64")
    }

    /// Returns a `form` field as an `f64`.
    pub fn form_f64(&self, name: &str) -> Result<f64, ParamError> {
        self.parsed_param(ParamSource::Form, name, "f64")
    }

    /// Returns a non-empty `form` field.
    pub fn form_str(&self, name: &str) -> Result<&str, ParamError> {
        self.required_param(ParamSource::Form, name)
    }

    /// Returns a `form` field trimmed of surrounding whitespace.
    pub fn form_trimmed(&self, name: &str) -> Result<&str, ParamError> {
        self.required_trimmed(ParamSource::Form, name)
    }

    /// Builds a [`Pageable`] from the required `page` and `size` query
    /// parameters.
    pub fn pageable(&self) -> BizResult<Pageable> {
        let page = self.query_i32(ParamNames::PAGE).map_err(param_to_biz)?;
        let size = self.query_i32(ParamNames::SIZE).map_err(param_to_biz)?;
        Pageable::new(clamp_to_u32(page), clamp_to_u32(size))
    }

    /// Parses the optional `sort` query parameter.
    #[must_use]
    pub fn sort(&self) -> Sort {
        Sort::parse(self.query_param(ParamNames::SORT))
    }
}

/// Conventional query parameter names used by the pagination helpers.
struct ParamNames;

impl ParamNames {
    const PAGE: &'static str = "page";
    const SIZE: &'static str = "size";
    const SORT: &'static str = "sort";
}

fn param_to_biz(err: ParamError) -> astraea_core::BizError {
    astraea_core::BizError::with_message(astraea_core::BizCode::PARAM, err.to_string())
}

// Negative page/size values fail Pageable validation the same way zero does.
fn clamp_to_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
