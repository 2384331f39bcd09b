//! Proxy whose implementation address is resolved through a
//! [`super::CacheableBeacon`], preferring the beacon's caches.
//!
//! On every call the proxy reads the beacon's nonce and predicts the address
//! of the beacon's most recent deployment. When a contract lives there and
//! answers a non-zero implementation, that is the beacon's cache of its
//! current version. Otherwise the proxy asks the beacon itself.
use alloy_primitives::Address;
use alloy_sol_types::{SolCall, SolError};
use host::{CallResult, Context, Program, CONTRACT_NONCE_BASE};
pub use sol::*;
use tracing::{debug, trace};

use crate::{
    proxy::{
        beacon::IBeaconInterface,
        erc1967::{BeaconUpgraded, ERC1967InvalidBeacon},
        IProxy,
    },
    utils::AddressPredictor,
};

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Neither the beacon nor its latest cache answered a usable
        /// implementation.
        ///
        /// * `beacon` - Address of the beacon of the proxy.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error BeaconProxyResolutionFailure(address beacon);
    }
}

/// An error that occurred in the implementation of a
/// [`CacheableBeaconProxy`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The beacon of the proxy is not a contract.
    InvalidBeacon(ERC1967InvalidBeacon),
    /// No implementation could be resolved.
    ResolutionFailure(BeaconProxyResolutionFailure),
    /// The host refused a state change.
    Host(host::Error),
}

impl From<host::Error> for Error {
    fn from(value: host::Error) -> Self {
        Error::Host(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::InvalidBeacon(e) => e.abi_encode(),
            Error::ResolutionFailure(e) => e.abi_encode(),
            Error::Host(e) => e.into(),
        }
    }
}

/// Where a [`Resolution`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// The cache at the given address.
    Cache(Address),
    /// The beacon itself.
    Beacon,
}

/// Outcome of resolving the implementation of a proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Target of the delegate call.
    pub implementation: Address,
    /// Contract that answered the implementation.
    pub source: Source,
}

/// Proxy delegating to the implementation of a cacheable beacon.
///
/// The beacon address is part of the proxy's code, so the proxy has no
/// storage of its own and never collides with its implementation's layout.
#[derive(Clone, Copy, Debug)]
pub struct CacheableBeaconProxy {
    beacon: Address,
}

impl CacheableBeaconProxy {
    /// Creates a proxy bound to `beacon`.
    #[must_use]
    pub fn new(beacon: Address) -> Self {
        Self { beacon }
    }

    /// Returns the address of the beacon's most recent deployment, where the
    /// cache of its current version would be, or [`None`] if the beacon has
    /// never deployed anything.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Read access to the host.
    #[must_use]
    pub fn cache_candidate(&self, ctx: &Context<'_>) -> Option<Address> {
        let next_nonce = ctx.nonce(self.beacon);
        if next_nonce <= CONTRACT_NONCE_BASE {
            return None;
        }
        Some(AddressPredictor::predict(self.beacon, next_nonce - 1))
    }

    /// Resolves the implementation calls should be delegated to.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Frame of the proxy.
    ///
    /// # Errors
    ///
    /// * [`Error::ResolutionFailure`] - If neither the latest cache nor
    ///   the beacon answer a non-zero implementation.
    pub fn resolve(&self, ctx: &mut Context<'_>) -> Result<Resolution, Error> {
        if let Some(cache) = self.cache_candidate(ctx) {
            if let Some(implementation) = Self::query(ctx, cache) {
                trace!(
                    proxy = %ctx.address(),
                    %cache,
                    %implementation,
                    "resolved implementation through cache"
                );
                return Ok(Resolution {
                    implementation,
                    source: Source::Cache(cache),
                });
            }
        }

        let Some(implementation) = Self::query(ctx, self.beacon) else {
            debug!(
                proxy = %ctx.address(),
                beacon = %self.beacon,
                "beacon did not answer an implementation"
            );
            return Err(Error::ResolutionFailure(
                BeaconProxyResolutionFailure { beacon: self.beacon },
            ));
        };
        debug!(
            proxy = %ctx.address(),
            beacon = %self.beacon,
            %implementation,
            "resolved implementation through beacon"
        );
        Ok(Resolution { implementation, source: Source::Beacon })
    }

    /// Asks `target` for its implementation, in a static frame.
    ///
    /// Returns [`None`] if `target` has no code, reverts, answers something
    /// that does not decode as an address, or answers [`Address::ZERO`].
    fn query(ctx: &mut Context<'_>, target: Address) -> Option<Address> {
        if !ctx.has_code(target) {
            return None;
        }
        let calldata = IBeaconInterface::implementationCall {}.abi_encode();
        let output = ctx.static_call(target, &calldata).ok()?;
        IBeaconInterface::implementationCall::abi_decode_returns(&output)
            .ok()
            .filter(|implementation| !implementation.is_zero())
    }
}

impl IProxy for CacheableBeaconProxy {
    fn implementation(
        &self,
        ctx: &mut Context<'_>,
    ) -> Result<Address, Vec<u8>> {
        Ok(self.resolve(ctx)?.implementation)
    }
}

impl Program for CacheableBeaconProxy {
    fn constructor(&self, ctx: &mut Context<'_>) -> Result<(), Vec<u8>> {
        if !ctx.has_code(self.beacon) {
            return Err(Error::InvalidBeacon(ERC1967InvalidBeacon {
                beacon: self.beacon,
            })
            .into());
        }
        ctx.emit(&BeaconUpgraded { beacon: self.beacon })
            .map_err(Error::from)?;
        Ok(())
    }

    fn call(&self, ctx: &mut Context<'_>, calldata: &[u8]) -> CallResult {
        self.do_fallback(ctx, calldata)
    }
}
