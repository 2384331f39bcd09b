//! Beacon proxies whose implementation lookup is served by cache contracts.
//!
//! [`CacheableBeacon`] is the authoritative registry. [`BeaconCache`] is the
//! immutable snapshot of one of its versions, and [`CacheableBeaconProxy`]
//! forwards calls to whichever implementation the two of them resolve.
pub mod cache;
pub mod cacheable;
pub mod config;
pub mod proxy;

pub use beacon::IBeaconInterface;
pub use cache::BeaconCache;
pub use cacheable::{CacheableBeacon, Error, ICacheableBeacon};
pub use config::{BeaconConfig, CachePolicy, RepublishPolicy};
pub use proxy::{CacheableBeaconProxy, Resolution, Source};

mod beacon {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Read surface shared by beacons and their caches, which is all
        /// [`super::CacheableBeaconProxy`] queries.
        interface IBeaconInterface {
            function implementation() external view returns (address);
        }
    }
}
