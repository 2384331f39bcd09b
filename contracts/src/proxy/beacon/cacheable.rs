//! Beacon that can publish immutable caches of its current implementation.
//!
//! Besides holding the implementation, the beacon can deploy a
//! [`BeaconCache`] for its current version. Because the cache is created with
//! `CREATE`, its address is a pure function of the beacon's address and
//! nonce, which lets [`super::CacheableBeaconProxy`] find it without a
//! registry.
//!
//! The beacon maintains one invariant for its proxies: its most recent
//! deployment is either the cache of the current version or a code-less
//! account. Upgrading away from a cached version first burns a nonce on an
//! empty account, so the stale cache is never the latest deployment.
use alloy_primitives::{uint, Address, U256};
use alloy_sol_types::{SolError, SolInterface, SolValue};
use host::{CallResult, Context, Program};
pub use sol::*;
use tracing::debug;

use crate::{
    access::{IAuthority, Ownable},
    proxy::{
        beacon::{
            BeaconCache, BeaconConfig, CachePolicy, RepublishPolicy,
        },
        erc1967::{Upgraded, IMPLEMENTATION_SLOT},
    },
    utils::storage_slot::StorageSlot,
};

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Functions exposed by a [`super::CacheableBeacon`].
        #[allow(missing_docs)]
        interface ICacheableBeacon {
            function implementation() external view returns (address);
            function version() external view returns (uint256);
            function cache() external view returns (address);
            function upgradeTo(address newImplementation) external;
            function deployCache() external returns (address);
        }
    }

    sol! {
        /// Emitted when a cache is published for the current version.
        ///
        /// * `cache` - Address of the new cache contract.
        /// * `implementation` - Implementation the cache answers.
        /// * `version` - Version the cache belongs to.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        event CacheDeployed(address indexed cache, address indexed implementation, uint256 version);
    }

    sol! {
        /// The `implementation` of the beacon is invalid.
        ///
        /// * `implementation` - Address of the invalid implementation.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error BeaconInvalidImplementation(address implementation);

        /// The current version already has a cache.
        ///
        /// * `cache` - Address of the existing cache.
        /// * `version` - Current version of the beacon.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error BeaconAlreadyCached(address cache, uint256 version);
    }
}

/// An error that occurred in the implementation of a [`CacheableBeacon`].
///
/// `E` is the error of the beacon's authorization policy.
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// The caller is not authorized to perform the operation.
    Unauthorized(E),
    /// The `implementation` of the beacon is invalid.
    InvalidImplementation(BeaconInvalidImplementation),
    /// The current version already has a cache.
    AlreadyCached(BeaconAlreadyCached),
    /// A nested deployment or state change failed.
    Revert(Vec<u8>),
}

impl<E> From<host::Error> for Error<E> {
    fn from(value: host::Error) -> Self {
        Error::Revert(value.into())
    }
}

impl<E: Into<Vec<u8>>> From<Error<E>> for Vec<u8> {
    fn from(value: Error<E>) -> Vec<u8> {
        match value {
            Error::Unauthorized(e) => e.into(),
            Error::InvalidImplementation(e) => e.abi_encode(),
            Error::AlreadyCached(e) => e.abi_encode(),
            Error::Revert(data) => data,
        }
    }
}

/// Slot of the version counter.
fn version_slot() -> U256 {
    StorageSlot::namespaced("openzeppelin.proxy.beacon.cacheable.version")
}

/// Slot of the cache of the current version.
fn cache_slot() -> U256 {
    StorageSlot::namespaced("openzeppelin.proxy.beacon.cacheable.cache")
}

/// Beacon whose implementation is changed through its authorization policy
/// `A`, and which can publish caches of its current implementation.
#[derive(Clone, Debug)]
pub struct CacheableBeacon<A = Ownable> {
    authority: A,
    config: BeaconConfig,
    initial_implementation: Option<Address>,
}

impl CacheableBeacon<Ownable> {
    /// Creates an empty beacon owned by its deployer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_authority(Ownable::default(), BeaconConfig::default())
    }

    /// Creates a beacon owned by its deployer, initialized with
    /// `implementation` as version 1.
    #[must_use]
    pub fn with_implementation(implementation: Address) -> Self {
        Self::new().initialized_with(implementation)
    }
}

impl Default for CacheableBeacon<Ownable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: IAuthority> CacheableBeacon<A> {
    /// Creates an empty beacon guarded by `authority`.
    #[must_use]
    pub fn with_authority(authority: A, config: BeaconConfig) -> Self {
        Self { authority, config, initial_implementation: None }
    }

    /// Makes the constructor install `implementation` as version 1.
    #[must_use]
    pub fn initialized_with(mut self, implementation: Address) -> Self {
        self.initial_implementation = Some(implementation);
        self
    }

    /// Returns the current implementation, or [`Address::ZERO`] if none was
    /// ever set.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Read access to the contract's state.
    #[must_use]
    pub fn implementation(&self, ctx: &Context<'_>) -> Address {
        StorageSlot::get_address(ctx, IMPLEMENTATION_SLOT)
    }

    /// Returns the number of implementations set so far.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Read access to the contract's state.
    #[must_use]
    pub fn version(&self, ctx: &Context<'_>) -> U256 {
        StorageSlot::get_uint(ctx, version_slot())
    }

    /// Returns the cache of the current version, or [`Address::ZERO`] if it
    /// has none.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Read access to the contract's state.
    #[must_use]
    pub fn cache(&self, ctx: &Context<'_>) -> Address {
        StorageSlot::get_address(ctx, cache_slot())
    }

    /// Upgrades the beacon to a new implementation.
    ///
    /// If the current version has a cache, an empty account is created first
    /// so the stale cache stops being the beacon's latest deployment. A
    /// failed upgrade reverts the whole frame, marker included.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Write access to the contract's state.
    /// * `new_implementation` - Address of the new implementation.
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If the authorization policy rejects the
    ///   caller.
    /// * [`Error::InvalidImplementation`] - If `new_implementation` is not a
    ///   contract.
    /// * [`Error::Revert`] - If invalidating the cache fails.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    pub fn upgrade_to(
        &self,
        ctx: &mut Context<'_>,
        new_implementation: Address,
    ) -> Result<(), Error<A::Error>> {
        let sender = ctx.msg_sender();
        self.authority.authorize(ctx, sender).map_err(Error::Unauthorized)?;
        self.invalidate_cache(ctx)?;
        self._set_implementation(ctx, new_implementation)
    }

    /// Deploys a [`BeaconCache`] for the current version and records it.
    ///
    /// Returns the existing cache instead when the current version already
    /// has one and the beacon is configured with
    /// [`RepublishPolicy::Ignore`].
    ///
    /// # Arguments
    ///
    /// * `ctx` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::Unauthorized`] - If caches are restricted to authorized
    ///   accounts and the caller is not one.
    /// * [`Error::InvalidImplementation`] - If no implementation was set yet.
    /// * [`Error::AlreadyCached`] - If a cache exists and the beacon is
    ///   configured with [`RepublishPolicy::Reject`].
    /// * [`Error::Revert`] - If the deployment fails.
    ///
    /// # Events
    ///
    /// * [`CacheDeployed`].
    pub fn deploy_cache(
        &self,
        ctx: &mut Context<'_>,
    ) -> Result<Address, Error<A::Error>> {
        if self.config.cache_policy == CachePolicy::Authorized {
            let sender = ctx.msg_sender();
            self.authority
                .authorize(ctx, sender)
                .map_err(Error::Unauthorized)?;
        }

        let implementation = self.implementation(ctx);
        if implementation.is_zero() {
            return Err(Error::InvalidImplementation(
                BeaconInvalidImplementation { implementation },
            ));
        }

        let version = self.version(ctx);
        let existing = self.cache(ctx);
        if !existing.is_zero() {
            return match self.config.republish {
                RepublishPolicy::Ignore => Ok(existing),
                RepublishPolicy::Reject => {
                    Err(Error::AlreadyCached(BeaconAlreadyCached {
                        cache: existing,
                        version,
                    }))
                }
            };
        }

        let cache = ctx
            .deploy(BeaconCache::new(implementation))
            .map_err(Error::Revert)?;
        StorageSlot::set_address(ctx, cache_slot(), cache)?;
        ctx.emit(&CacheDeployed { cache, implementation, version })?;
        debug!(
            beacon = %ctx.address(),
            %cache,
            %implementation,
            %version,
            "deployed beacon cache"
        );

        Ok(cache)
    }

    /// Sets the implementation and starts a new version, without access
    /// restriction.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `new_implementation` is not a
    ///   contract.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    fn _set_implementation(
        &self,
        ctx: &mut Context<'_>,
        new_implementation: Address,
    ) -> Result<(), Error<A::Error>> {
        self.check_implementation(ctx, new_implementation)?;
        StorageSlot::set_address(ctx, IMPLEMENTATION_SLOT, new_implementation)?;
        let version = self.version(ctx) + uint!(1_U256);
        StorageSlot::set_uint(ctx, version_slot(), version)?;
        ctx.emit(&Upgraded { implementation: new_implementation })?;
        debug!(
            beacon = %ctx.address(),
            implementation = %new_implementation,
            %version,
            "upgraded beacon"
        );
        Ok(())
    }

    fn check_implementation(
        &self,
        ctx: &Context<'_>,
        implementation: Address,
    ) -> Result<(), Error<A::Error>> {
        if !ctx.has_code(implementation) {
            return Err(Error::InvalidImplementation(
                BeaconInvalidImplementation { implementation },
            ));
        }
        Ok(())
    }

    /// Retires the cache of the current version, if any.
    fn invalidate_cache(
        &self,
        ctx: &mut Context<'_>,
    ) -> Result<(), Error<A::Error>> {
        let cache = self.cache(ctx);
        if cache.is_zero() {
            return Ok(());
        }

        let marker = ctx.deploy_empty().map_err(Error::Revert)?;
        StorageSlot::set_address(ctx, cache_slot(), Address::ZERO)?;
        debug!(beacon = %ctx.address(), %cache, %marker, "retired cache");
        Ok(())
    }
}

impl<A: IAuthority> Program for CacheableBeacon<A> {
    fn constructor(&self, ctx: &mut Context<'_>) -> Result<(), Vec<u8>> {
        if let Err(e) = self.authority.initialize(ctx) {
            return Err(e.into());
        }
        if let Some(implementation) = self.initial_implementation {
            self._set_implementation(ctx, implementation)?;
        }
        Ok(())
    }

    fn call(&self, ctx: &mut Context<'_>, calldata: &[u8]) -> CallResult {
        use ICacheableBeacon::ICacheableBeaconCalls as Calls;

        let Ok(call) = Calls::abi_decode(calldata) else {
            return self.authority.route(ctx, calldata).unwrap_or(Err(vec![]));
        };

        match call {
            Calls::implementation(_) => {
                Ok(self.implementation(ctx).abi_encode())
            }
            Calls::version(_) => {
                Ok(self.version(ctx).abi_encode())
            }
            Calls::cache(_) => {
                Ok(self.cache(ctx).abi_encode())
            }
            Calls::upgradeTo(call) => self
                .upgrade_to(ctx, call.newImplementation)
                .map(|()| vec![])
                .map_err(Into::into),
            Calls::deployCache(_) => self
                .deploy_cache(ctx)
                .map(|cache| cache.abi_encode())
                .map_err(Into::into),
        }
    }
}
