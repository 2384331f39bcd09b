//! Immutable snapshot of a beacon's implementation.
//!
//! A [`BeaconCache`] is deployed by its beacon, so it lives at the address
//! `CREATE` derives from the beacon's address and nonce at publish time. It
//! keeps answering the implementation it was created with forever; once the
//! beacon moves on, proxies simply stop looking at its address.
use alloy_primitives::Address;
use alloy_sol_types::{SolInterface, SolValue};
use host::{CallResult, Context, Program};

use crate::proxy::beacon::IBeaconInterface::IBeaconInterfaceCalls;

/// Cache of a beacon version. Has no storage.
#[derive(Clone, Copy, Debug)]
pub struct BeaconCache {
    implementation: Address,
}

impl BeaconCache {
    /// Creates a cache answering `implementation`.
    #[must_use]
    pub fn new(implementation: Address) -> Self {
        Self { implementation }
    }
}

impl Program for BeaconCache {
    fn call(&self, _ctx: &mut Context<'_>, calldata: &[u8]) -> CallResult {
        match IBeaconInterfaceCalls::abi_decode(calldata) {
            Ok(IBeaconInterfaceCalls::implementation(_)) => {
                Ok(self.implementation.abi_encode())
            }
            Err(_) => Err(Vec::new()),
        }
    }
}
