//! The interface every deployable unit implements.
use crate::Context;

/// Outcome of a call: return data on success, revert data on failure.
pub type CallResult = Result<Vec<u8>, Vec<u8>>;

/// Code that can be installed at an address.
///
/// A [`Program`] value plays the role of deployed bytecode: it may carry
/// immutables fixed at construction, while mutable state lives in the storage
/// of the account it executes for ([`Context::sload`], [`Context::sstore`]).
/// The same program can therefore run for a different account through
/// [`Context::delegate_call`].
pub trait Program: 'static {
    /// Runs once when the program is deployed, before its code is installed.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Frame of the account being created.
    ///
    /// # Errors
    ///
    /// Revert data aborts the deployment. The deployer's nonce stays consumed.
    fn constructor(&self, ctx: &mut Context<'_>) -> Result<(), Vec<u8>> {
        let _ = ctx;
        Ok(())
    }

    /// Handles a call with the given `calldata`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Frame the call executes in.
    /// * `calldata` - Raw, ABI-encoded input.
    ///
    /// # Errors
    ///
    /// Revert data rolls back every state change of the frame.
    fn call(&self, ctx: &mut Context<'_>, calldata: &[u8]) -> CallResult;
}
