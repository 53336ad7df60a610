//! # archviz-error
//!
//! Unified error handling for archviz.
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidFormat`, `FieldCoercion`)
//! - **Operation**: which pipeline step raised it (e.g. `graph::build`)
//! - **Context**: key/value pairs locating the cause (node index, path, ...)
//! - **Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use archviz_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::FieldCoercion, "layer is not an integer")
//!         .with_operation("graph::build")
//!         .with_context("node", "svc:api")
//!         .with_context("layer", "\"top\""))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, archviz_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - The process exit status is derived from the kind, see [`ErrorKind::exit_code`]

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using archviz Error
pub type Result<T> = std::result::Result<T, Error>;
