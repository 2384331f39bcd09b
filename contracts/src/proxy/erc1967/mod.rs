//! Proxy storage slots and the events as defined in
//! the [ERC-1967].
//!
//! [ERC-1967]: <https://eips.ethereum.org/EIPS/eip-1967>
use alloy_primitives::{uint, U256};
pub use sol::*;

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the implementation is upgraded.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        event Upgraded(address indexed implementation);

        /// Emitted when the beacon is changed.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        event BeaconUpgraded(address indexed beacon);
    }

    sol! {
        /// Indicates an error related to the fact that the `beacon`
        /// of the proxy is invalid.
        ///
        /// * `beacon` - Address of the invalid `beacon` of the proxy.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error ERC1967InvalidBeacon(address beacon);
    }
}

/// Storage slot with the address of the current implementation.
/// This is the keccak-256 hash of "eip1967.proxy.implementation" subtracted by
/// 1.
pub const IMPLEMENTATION_SLOT: U256 = uint!(
    0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc_U256
);
