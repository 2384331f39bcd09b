#![allow(dead_code)]
use alloy_primitives::Address;
use host::prelude::*;

const ADDRESS_LEN: usize = 20;

/// Stand-in for a multisig wallet: accepts `target ++ payload` from any of
/// its signers and calls `target` with `payload` as itself.
pub struct Forwarder {
    signers: Vec<Address>,
}

impl Forwarder {
    pub fn new(signers: impl IntoIterator<Item = Address>) -> Self {
        Self { signers: signers.into_iter().collect() }
    }

    pub fn encode(target: Address, payload: &[u8]) -> Vec<u8> {
        [target.as_slice(), payload].concat()
    }
}

impl Program for Forwarder {
    fn call(&self, ctx: &mut Context<'_>, calldata: &[u8]) -> CallResult {
        if !self.signers.contains(&ctx.msg_sender()) {
            return Err(b"not a signer".to_vec());
        }
        if calldata.len() < ADDRESS_LEN {
            return Err(Vec::new());
        }
        let (target, payload) = calldata.split_at(ADDRESS_LEN);
        ctx.call(Address::from_slice(target), payload)
    }
}
