/*!
# OpenZeppelin Cacheable Beacon

Beacon proxies whose implementation lookup is usually answered by a small,
immutable cache contract instead of the beacon itself.

A [`CacheableBeacon`] holds the authoritative implementation. Its owner can
publish a [`BeaconCache`] for the current version; the cache is deployed with
`CREATE`, so its address is a pure function of the beacon's address and nonce
([`AddressPredictor`]). A [`CacheableBeaconProxy`] predicts that address on
every call, reads the implementation from the cache when one exists for the
current version, and falls back to the beacon otherwise.

Upgrades never touch published caches. They invalidate them structurally:
the beacon's most recent deployment is always either a cache of the current
version or an empty marker, so a stale cache is never at the address a proxy
looks at.

```ignore
use openzeppelin_cacheable_beacon::proxy::beacon::{
    CacheableBeacon, CacheableBeaconProxy,
};

let beacon = host.deploy(admin, CacheableBeacon::with_implementation(v1))?;
let proxy = host.deploy(admin, CacheableBeaconProxy::new(beacon))?;

// Slow path: no cache published yet.
host.call(user, proxy, &calldata)?;

let publish = ICacheableBeacon::deployCacheCall {}.abi_encode();
host.transact(admin, beacon, &publish)?;

// Fast path: the proxy reads the implementation from the cache.
host.call(user, proxy, &calldata)?;
```

> This project is still in a very early and experimental phase. It has never
> been audited nor thoroughly reviewed for security vulnerabilities. Do not use
> in production.

[`CacheableBeacon`]: crate::proxy::beacon::CacheableBeacon
[`BeaconCache`]: crate::proxy::beacon::BeaconCache
[`CacheableBeaconProxy`]: crate::proxy::beacon::CacheableBeaconProxy
[`AddressPredictor`]: crate::utils::create::AddressPredictor
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod access;
pub mod proxy;
pub mod utils;
