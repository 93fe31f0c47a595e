//! # Astraea Core
//!
//! Business error codes and the typed carrier error shared by every Astraea
//! crate.
//!
//! The two central types are [`BizCode`] — an immutable `(code, message,
//! status)` triple identifying a recognized failure category — and
//! [`BizError`] — the error value business logic raises when a rule is
//! violated. A `BizError` pairs exactly one `BizCode` with an optional
//! developer-facing message and an optional wrapped cause, and is resolved
//! into an HTTP error payload by `astraea-problem`.
//!
//! ## Example
//!
//! ```rust
//! use astraea_core::{BizCode, BizError, BizResult};
//!
//! fn rename_user(name: &str) -> BizResult<()> {
//!     if name.is_empty() {
//!         return Err(BizError::with_message(BizCode::PARAM, "name must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! let err = rename_user("").unwrap_err();
//! assert_eq!(err.code(), BizCode::PARAM);
//! assert_eq!(err.message(), "name must not be empty");
//! ```
//!
//! Codes below 1000 are reserved for the generic catalog defined on
//! [`BizCode`]; domain crates extend the space with `BizCode::new` and codes
//! of 1000 or above.

#![doc(html_root_url = "https://docs.rs/astraea-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod biz;
pub mod trace;

pub use biz::{BizCode, BizError, BizResult};
