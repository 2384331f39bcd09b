//! Authorization policies gating administrative operations.
//!
//! A policy is injected into the contract it protects at construction, rather
//! than being mixed into it. The contract asks the policy whether the caller
//! is authorized and forwards to it any calldata it does not recognize, so the
//! policy can expose its own management functions.
use alloy_primitives::Address;
use host::{CallResult, Context};

pub mod council;
pub mod ownable;

pub use council::{Council, Error as CouncilError};
pub use ownable::{Error as OwnableError, Ownable};

/// Policy deciding which accounts may perform administrative operations.
pub trait IAuthority: 'static {
    /// The error type associated to this policy.
    type Error: Into<Vec<u8>>;

    /// Sets up the policy's state. Runs in the constructor of the protected
    /// contract, so [`Context::msg_sender`] is its deployer.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Frame of the contract being deployed.
    ///
    /// # Errors
    ///
    /// If the policy is misconfigured.
    fn initialize(&self, ctx: &mut Context<'_>) -> Result<(), Self::Error>;

    /// Checks that `account` is authorized.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Read access to the protected contract's state.
    /// * `account` - Account to check, usually [`Context::msg_sender`].
    ///
    /// # Errors
    ///
    /// If `account` is not authorized.
    fn authorize(
        &self,
        ctx: &Context<'_>,
        account: Address,
    ) -> Result<(), Self::Error>;

    /// Handles `calldata` addressed to the policy's own functions.
    ///
    /// Returns [`None`] when `calldata` is not one of them.
    fn route(
        &self,
        ctx: &mut Context<'_>,
        calldata: &[u8],
    ) -> Option<CallResult>;
}
