//! Common imports for contracts built on the host.
pub use crate::{CallResult, Context, Error, Host, Program};
