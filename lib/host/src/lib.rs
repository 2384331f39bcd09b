//! # Host - In-memory EVM-like execution environment
//!
//! This crate provides the services contracts expect from the chain they run
//! on: deploying a unit, reading an account's nonce, executing a call against
//! an address and observing its success or failure and return data.
//!
//! Everything lives in one owned [`Host`] value and executes sequentially, so
//! a test drives a whole deployment the same way a node would process a block
//! of transactions:
//!
//! ```rust,ignore
//! let mut host = Host::new();
//! let alice = Host::eoa("alice");
//!
//! let counter = host.deploy(alice, Counter::default())?;
//! host.transact(alice, counter, &ICounter::incrementCall {}.abi_encode())?;
//! ```
//!
//! Contracts implement [`Program`] and interact with the world through a
//! [`Context`], which models a single call frame: storage access is scoped to
//! the frame's address, nested calls open nested frames, and every frame is
//! rolled back when it reverts.
mod context;
mod error;
mod event;
mod host;
mod program;
mod world;

pub mod prelude;

pub use context::Context;
pub use error::Error;
pub use host::Host;
pub use program::{CallResult, Program};
pub use world::{CONTRACT_NONCE_BASE, MAX_CALL_DEPTH};
