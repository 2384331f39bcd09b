#![allow(dead_code)]
use alloy_primitives::{uint, Address, U256};
use alloy_sol_types::{SolCall, SolError, SolInterface, SolValue};
use host::prelude::*;
use openzeppelin_cacheable_beacon::{
    proxy::beacon::IBeaconInterface, utils::StorageSlot,
};

alloy_sol_macro::sol! {
    #[allow(missing_docs)]
    interface ITestImpl {
        function version() external view returns (string);
        function counter() external view returns (uint256);
        function test() external;
        function fail(uint256 code) external;
    }

    #[derive(Debug, PartialEq)]
    error TestImplFailure(uint256 code);
}

/// Implementation that checks, when called through a proxy, that it is the
/// implementation its beacon currently answers.
pub struct TestImpl {
    beacon: Address,
    version: &'static str,
}

impl TestImpl {
    pub fn v1(beacon: Address) -> Self {
        Self { beacon, version: "v1" }
    }

    pub fn v2(beacon: Address) -> Self {
        Self { beacon, version: "v2" }
    }

    fn counter_slot() -> U256 {
        StorageSlot::namespaced("mock.test_impl.counter")
    }

    fn test(&self, ctx: &mut Context<'_>) -> Result<(), Vec<u8>> {
        if ctx.address() == ctx.code_address() {
            return Err(b"not delegated".to_vec());
        }

        let call = IBeaconInterface::implementationCall {};
        let output = ctx.static_call(self.beacon, &call.abi_encode())?;
        let current =
            IBeaconInterface::implementationCall::abi_decode_returns(&output)
                .map_err(|_| b"garbled beacon answer".to_vec())?;
        if current != ctx.code_address() {
            return Err(b"stale implementation".to_vec());
        }

        let counter =
            StorageSlot::get_uint(ctx, Self::counter_slot()) + uint!(1_U256);
        StorageSlot::set_uint(ctx, Self::counter_slot(), counter)?;
        Ok(())
    }
}

impl Program for TestImpl {
    fn call(&self, ctx: &mut Context<'_>, calldata: &[u8]) -> CallResult {
        let call = ITestImpl::ITestImplCalls::abi_decode(calldata)
            .map_err(|_| Vec::new())?;
        match call {
            ITestImpl::ITestImplCalls::version(_) => {
                Ok(self.version.to_string().abi_encode())
            }
            ITestImpl::ITestImplCalls::counter(_) => {
                let counter = StorageSlot::get_uint(ctx, Self::counter_slot());
                Ok(counter.abi_encode())
            }
            ITestImpl::ITestImplCalls::test(_) => {
                self.test(ctx).map(|()| vec![])
            }
            ITestImpl::ITestImplCalls::fail(call) => {
                Err(TestImplFailure { code: call.code }.abi_encode())
            }
        }
    }
}
