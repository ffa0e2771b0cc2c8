//! # codebox-sandbox
//!
//! Talks to a remote code-interpreter service: one `execute` call runs a
//! snippet of Python, JavaScript or Bash and returns a status plus the ordered
//! stdout/stderr items it produced.
//!
//! On top of the client sit the two pieces the agent tools need:
//! - [`report`]: flattening an [`ExecutionResult`] into the single text value
//!   handed back to a language model
//! - [`transfer`]: pulling a binary file out of the sandbox over stdout
//!
//! ```no_run
//! # async fn example() -> codebox_sandbox::Result<()> {
//! use codebox_sandbox::{Language, ReportStyle, SandboxClient};
//!
//! let client = SandboxClient::builder().api_key("cgk_...").build()?;
//! let outcome = client.execute("print(6 * 7)", Language::Python, false).await;
//! println!("{}", ReportStyle::plain().render_outcome(&outcome));
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod report;
pub mod script;
pub mod transfer;
mod types;

pub use client::{SandboxClient, SandboxClientBuilder};
pub use error::{error_from_status, Result, SandboxError};
pub use report::ReportStyle;
pub use types::{ExecuteRequest, ExecutionResult, ExecutionStatus, Language, OutputItem, OutputKind};
