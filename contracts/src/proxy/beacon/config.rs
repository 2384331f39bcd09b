//! Deployment-time policy choices of a [`super::CacheableBeacon`].
use serde::{Deserialize, Serialize};

/// Who may publish a cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Only accounts the beacon's authority accepts.
    #[default]
    Authorized,
    /// Anyone. Publishing only snapshots the current implementation, so it
    /// cannot change what proxies resolve.
    Open,
}

/// What publishing a cache does when the current version already has one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepublishPolicy {
    /// Succeed without deploying, returning the existing cache.
    #[default]
    Ignore,
    /// Fail with [`super::cacheable::BeaconAlreadyCached`].
    Reject,
}

/// Configuration of a [`super::CacheableBeacon`], fixed at deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    /// Who may call `deployCache`.
    pub cache_policy: CachePolicy,
    /// Behaviour of `deployCache` when a cache already exists.
    pub republish: RepublishPolicy,
}

impl BeaconConfig {
    /// Sets who may publish a cache.
    #[must_use]
    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    /// Sets what republishing a cache does.
    #[must_use]
    pub fn with_republish(mut self, republish: RepublishPolicy) -> Self {
        self.republish = republish;
        self
    }
}
