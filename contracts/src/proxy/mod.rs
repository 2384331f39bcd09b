//! This is a low-level set of contracts implementing different proxy patterns
//! with and without upgradeability.
use alloy_primitives::Address;
use host::{CallResult, Context};

pub mod beacon;
pub mod erc1967;

/// This trait provides a fallback function that delegates all calls to another
/// contract using the EVM instruction `delegatecall`. We refer to the second
/// contract as the _implementation_ behind the proxy, and it has to be
/// specified by overriding the virtual [`IProxy::implementation`] function.
///
/// Additionally, delegation to the implementation can be triggered manually
/// through the [`IProxy::do_fallback`] function, or to a different contract
/// through the [`IProxy::delegate`] function.
///
/// The success and return data of the delegated call will be returned back
/// to the caller of the proxy.
pub trait IProxy {
    /// Delegates the current call to `implementation`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Frame of the proxy.
    /// * `implementation` - The address of the implementation contract.
    /// * `calldata` - The calldata to delegate to the implementation contract.
    ///
    /// # Errors
    ///
    /// Revert data of the implementation, unmodified.
    fn delegate(
        &self,
        ctx: &mut Context<'_>,
        implementation: Address,
        calldata: &[u8],
    ) -> CallResult {
        ctx.delegate_call(implementation, calldata)
    }

    /// This is a virtual function that should be overridden so it
    /// returns the address to which the fallback function and
    /// [`IProxy::do_fallback`] should delegate.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Frame of the proxy.
    ///
    /// # Errors
    ///
    /// If the implementation cannot be determined.
    fn implementation(&self, ctx: &mut Context<'_>) -> Result<Address, Vec<u8>>;

    /// Fallback function that delegates calls to the address returned
    /// by [`IProxy::implementation`].
    ///
    /// # Arguments
    ///
    /// * `ctx` - Frame of the proxy.
    /// * `calldata` - The calldata to delegate to the implementation contract.
    ///
    /// # Errors
    ///
    /// If the implementation cannot be determined, or the revert data of the
    /// implementation.
    fn do_fallback(
        &self,
        ctx: &mut Context<'_>,
        calldata: &[u8],
    ) -> CallResult {
        let implementation = self.implementation(ctx)?;
        self.delegate(ctx, implementation, calldata)
    }
}
