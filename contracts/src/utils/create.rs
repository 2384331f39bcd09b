//! Prediction of `CREATE` deployment addresses.
//!
//! An address created by `CREATE` depends only on the deployer and the nonce
//! the deployment consumes:
//!
//! ```text
//! address = keccak256(rlp([deployer, nonce]))[12..]
//! ```
//!
//! Knowing both ahead of time is enough to reference a contract before it
//! exists, e.g. to hand an implementation the address of the beacon that will
//! later point at it.
use alloy_primitives::Address;
use tiny_keccak::{Hasher, Keccak};

use crate::utils::rlp;

/// Deterministic predictor of `CREATE` addresses.
pub struct AddressPredictor;

impl AddressPredictor {
    /// Returns the address a deployment from `deployer` consuming `nonce`
    /// will receive.
    ///
    /// # Arguments
    ///
    /// * `deployer` - Account performing the deployment.
    /// * `nonce` - Nonce of `deployer` the deployment consumes.
    #[must_use]
    pub fn predict(deployer: Address, nonce: u64) -> Address {
        let mut payload = Vec::with_capacity(30);
        rlp::encode_bytes(&mut payload, deployer.as_slice());
        rlp::encode_u64(&mut payload, nonce);

        let mut encoded = Vec::with_capacity(payload.len() + 1);
        rlp::encode_list(&mut encoded, &payload);

        let mut hasher = Keccak::v256();
        hasher.update(&encoded);
        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        Address::from_slice(&hash[12..])
    }

    /// Returns the address of the deployment `n` steps after the next one of
    /// `deployer`, whose current nonce is `next_nonce`.
    ///
    /// `n = 0` predicts the very next deployment, `n = 1` the one after it.
    /// Returns [`None`] if the nonce would overflow.
    ///
    /// # Arguments
    ///
    /// * `deployer` - Account performing the deployment.
    /// * `next_nonce` - Current nonce of `deployer`.
    /// * `n` - Number of deployments of `deployer` that happen first.
    #[must_use]
    pub fn predict_nth(
        deployer: Address,
        next_nonce: u64,
        n: u64,
    ) -> Option<Address> {
        next_nonce.checked_add(n).map(|nonce| Self::predict(deployer, nonce))
    }
}
