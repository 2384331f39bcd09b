//! Failures raised by the host itself, as opposed to reverts raised by
//! contract code.
use alloy_primitives::Address;
use alloy_sol_types::{Revert, SolError};
use derive_more::Display;

/// An error raised by the execution environment.
///
/// When surfaced to contract code it is encoded as a plain `Error(string)`
/// revert, so callers observe it like any other failed call.
#[derive(Clone, Debug, Display, derive_more::Error, PartialEq, Eq)]
pub enum Error {
    /// A storage write, log or deployment was attempted inside a static frame.
    #[display("state modification in static frame of {_0}")]
    StaticStateChange(#[error(not(source))] Address),
    /// The maximum call depth was exceeded.
    #[display("max call depth exceeded")]
    DepthExceeded,
    /// A deployment targeted an address that is already in use.
    #[display("contract address collision at {_0}")]
    AddressCollision(#[error(not(source))] Address),
    /// The nonce of `account` cannot be incremented any further.
    #[display("nonce overflow for {_0}")]
    NonceOverflow(#[error(not(source))] Address),
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        Revert { reason: value.to_string() }.abi_encode()
    }
}
