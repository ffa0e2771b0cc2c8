//! # codebox-error
//!
//! Unified error handling for codebox, following OpenDAL's error handling practices.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., SandboxFailed, InferenceFailed)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use codebox_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ConfigMissing, "OPENAI_API_KEY not set")
//!         .with_operation("settings::from_env")
//!         .with_context("variable", "OPENAI_API_KEY"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, codebox_error::Error>`
//! - Transport errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using codebox Error
pub type Result<T> = std::result::Result<T, Error>;
