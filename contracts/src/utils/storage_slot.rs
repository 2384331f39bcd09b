//! Helper for reading and writing primitive types to specific storage slots.
use alloy_primitives::{keccak256, Address, B256, U256};
use host::{Context, Error};

/// Helper for reading and writing primitive types to specific storage slots.
///
/// Storage slots are often used to avoid storage conflict when dealing with
/// upgradeable contracts. This library helps with reading and writing to such
/// slots without the need for low-level operations.
///
/// Example usage to set ERC-1967 implementation slot:
///
/// ```rust,ignore
/// const IMPLEMENTATION_SLOT: U256 = uint!(
///     0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc_U256
/// );
///
/// fn set_implementation(
///     ctx: &mut Context<'_>,
///     new_implementation: Address,
/// ) -> Result<(), host::Error> {
///     StorageSlot::set_address(ctx, IMPLEMENTATION_SLOT, new_implementation)
/// }
/// ```
pub struct StorageSlot;

impl StorageSlot {
    /// Returns the slot derived from the namespace `id`, i.e.
    /// `keccak256(id) - 1`, the way [ERC-1967] derives its slots.
    ///
    /// [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
    #[must_use]
    pub fn namespaced(id: &str) -> U256 {
        U256::from_be_bytes(keccak256(id.as_bytes()).0)
            .wrapping_sub(U256::from(1))
    }

    /// Reads the [`Address`] stored at `slot`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Read access to the frame's storage.
    /// * `slot` - The slot to get the address from.
    #[must_use]
    pub fn get_address(ctx: &Context<'_>, slot: U256) -> Address {
        Address::from_word(B256::from(ctx.sload(slot).to_be_bytes::<32>()))
    }

    /// Writes `value` to `slot`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Write access to the frame's storage.
    /// * `slot` - The slot to write to.
    /// * `value` - The address to store.
    ///
    /// # Errors
    ///
    /// * [`Error::StaticStateChange`] - If called from a static frame.
    pub fn set_address(
        ctx: &mut Context<'_>,
        slot: U256,
        value: Address,
    ) -> Result<(), Error> {
        ctx.sstore(slot, U256::from_be_slice(value.as_slice()))
    }

    /// Reads the [`U256`] stored at `slot`.
    #[must_use]
    pub fn get_uint(ctx: &Context<'_>, slot: U256) -> U256 {
        ctx.sload(slot)
    }

    /// Writes `value` to `slot`.
    ///
    /// # Errors
    ///
    /// * [`Error::StaticStateChange`] - If called from a static frame.
    pub fn set_uint(
        ctx: &mut Context<'_>,
        slot: U256,
        value: U256,
    ) -> Result<(), Error> {
        ctx.sstore(slot, value)
    }
}
