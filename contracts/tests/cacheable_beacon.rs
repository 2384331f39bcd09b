use alloy_primitives::{hex, uint, Address, U256};
use alloy_sol_types::{SolCall, SolError};
use eyre::{bail, eyre, Result};
use host::Host;
use mock::{
    forwarder::Forwarder,
    test_impl::{ITestImpl, TestImpl, TestImplFailure},
};
use openzeppelin_cacheable_beacon::{
    access::{
        council::CouncilUnauthorizedAccount,
        ownable::{IOwnable, OwnableUnauthorizedAccount},
        Council, Ownable,
    },
    proxy::beacon::{
        cacheable::{BeaconAlreadyCached, CacheDeployed},
        proxy::BeaconProxyResolutionFailure,
        BeaconConfig, CachePolicy, CacheableBeacon, CacheableBeaconProxy,
        ICacheableBeacon, IBeaconInterface, RepublishPolicy, Resolution,
        Source,
    },
    utils::AddressPredictor,
};

mod mock;

fn reverted(data: Vec<u8>) -> eyre::Report {
    eyre!("reverted with 0x{}", hex::encode(data))
}

fn upgrade_to(
    host: &mut Host,
    from: Address,
    beacon: Address,
    new_implementation: Address,
) -> Result<(), Vec<u8>> {
    let call = ICacheableBeacon::upgradeToCall {
        newImplementation: new_implementation,
    };
    host.transact(from, beacon, &call.abi_encode()).map(|_| ())
}

fn deploy_cache(
    host: &mut Host,
    from: Address,
    beacon: Address,
) -> Result<Address, Vec<u8>> {
    let call = ICacheableBeacon::deployCacheCall {};
    let output = host.transact(from, beacon, &call.abi_encode())?;
    Ok(ICacheableBeacon::deployCacheCall::abi_decode_returns(&output)
        .expect("deployCache should return an address"))
}

fn beacon_version(host: &Host, beacon: Address) -> Result<U256> {
    let call = ICacheableBeacon::versionCall {};
    let output = host
        .call(Address::ZERO, beacon, &call.abi_encode())
        .map_err(reverted)?;
    Ok(ICacheableBeacon::versionCall::abi_decode_returns(&output)?)
}

fn version(host: &Host, proxy: Address) -> Result<String> {
    let call = ITestImpl::versionCall {};
    let output = host
        .call(Address::ZERO, proxy, &call.abi_encode())
        .map_err(reverted)?;
    Ok(ITestImpl::versionCall::abi_decode_returns(&output)?)
}

fn counter(host: &Host, proxy: Address) -> Result<U256> {
    let call = ITestImpl::counterCall {};
    let output = host
        .call(Address::ZERO, proxy, &call.abi_encode())
        .map_err(reverted)?;
    Ok(ITestImpl::counterCall::abi_decode_returns(&output)?)
}

fn run_test(host: &mut Host, from: Address, proxy: Address) -> Result<()> {
    let call = ITestImpl::testCall {};
    host.transact(from, proxy, &call.abi_encode()).map_err(reverted)?;
    Ok(())
}

fn resolve(host: &Host, proxy: Address, beacon: Address) -> Result<Resolution> {
    host.inspect(Address::ZERO, proxy, |ctx| {
        CacheableBeaconProxy::new(beacon).resolve(ctx)
    })
    .map_err(|e| reverted(e.into()))
}

struct Deployment {
    host: Host,
    admin: Address,
    user: Address,
    beacon: Address,
    proxy: Address,
    v1: Address,
}

/// Empty beacon, `v1` installed with `upgradeTo`, then a proxy.
fn deploy(config: BeaconConfig) -> Result<Deployment> {
    let mut host = Host::new();
    let admin = Host::eoa("admin");
    let user = Host::eoa("user");

    let beacon = CacheableBeacon::with_authority(Ownable::default(), config);
    let beacon = host.deploy(admin, beacon).map_err(reverted)?;
    let v1 = host.deploy(admin, TestImpl::v1(beacon)).map_err(reverted)?;
    upgrade_to(&mut host, admin, beacon, v1).map_err(reverted)?;
    let proxy = host
        .deploy(admin, CacheableBeaconProxy::new(beacon))
        .map_err(reverted)?;

    Ok(Deployment { host, admin, user, beacon, proxy, v1 })
}

#[test]
fn works_without_cache() -> Result<()> {
    let Deployment { mut host, user, beacon, proxy, v1, .. } =
        deploy(BeaconConfig::default())?;

    assert_eq!(version(&host, proxy)?, "v1");
    run_test(&mut host, user, proxy)?;

    assert_eq!(
        resolve(&host, proxy, beacon)?,
        Resolution { implementation: v1, source: Source::Beacon }
    );
    assert_eq!(counter(&host, proxy)?, uint!(1_U256));
    Ok(())
}

#[test]
fn works_with_cache() -> Result<()> {
    let Deployment { mut host, admin, user, beacon, proxy, v1 } =
        deploy(BeaconConfig::default())?;

    let cache = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    assert_eq!(version(&host, proxy)?, "v1");
    run_test(&mut host, user, proxy)?;
    assert_eq!(
        resolve(&host, proxy, beacon)?,
        Resolution { implementation: v1, source: Source::Cache(cache) }
    );
    Ok(())
}

#[test]
fn upgrades_through_cache_lifecycle() -> Result<()> {
    let Deployment { mut host, admin, user, beacon, proxy, .. } =
        deploy(BeaconConfig::default())?;
    let first_cache = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    let v2 = host.deploy(admin, TestImpl::v2(beacon)).map_err(reverted)?;
    upgrade_to(&mut host, admin, beacon, v2).map_err(reverted)?;

    assert_eq!(beacon_version(&host, beacon)?, uint!(2_U256));
    assert_eq!(version(&host, proxy)?, "v2");
    run_test(&mut host, user, proxy)?;
    assert_eq!(
        resolve(&host, proxy, beacon)?,
        Resolution { implementation: v2, source: Source::Beacon }
    );

    let second_cache =
        deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    assert_ne!(first_cache, second_cache);
    assert_eq!(version(&host, proxy)?, "v2");
    run_test(&mut host, user, proxy)?;
    assert_eq!(
        resolve(&host, proxy, beacon)?,
        Resolution { implementation: v2, source: Source::Cache(second_cache) }
    );
    assert!(host.emitted_by(
        beacon,
        &CacheDeployed {
            cache: second_cache,
            implementation: v2,
            version: uint!(2_U256),
        }
    ));
    assert_eq!(counter(&host, proxy)?, uint!(2_U256));
    Ok(())
}

#[test]
fn retired_cache_keeps_its_snapshot() -> Result<()> {
    let Deployment { mut host, admin, beacon, v1, .. } =
        deploy(BeaconConfig::default())?;
    let cache = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;
    let v2 = host.deploy(admin, TestImpl::v2(beacon)).map_err(reverted)?;

    upgrade_to(&mut host, admin, beacon, v2).map_err(reverted)?;

    let call = IBeaconInterface::implementationCall {};
    let output = host
        .call(Address::ZERO, cache, &call.abi_encode())
        .map_err(reverted)?;
    let snapshot =
        IBeaconInterface::implementationCall::abi_decode_returns(&output)?;
    assert_eq!(snapshot, v1);
    Ok(())
}

#[test]
fn cache_lands_at_predicted_address() -> Result<()> {
    let Deployment { mut host, admin, beacon, .. } =
        deploy(BeaconConfig::default())?;
    let predicted = AddressPredictor::predict(beacon, host.nonce(beacon));

    let cache = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    assert_eq!(cache, predicted);
    Ok(())
}

#[test]
fn unauthorized_upgrade_leaves_state_unchanged() -> Result<()> {
    let Deployment { mut host, admin, user, beacon, proxy, .. } =
        deploy(BeaconConfig::default())?;
    deploy_cache(&mut host, admin, beacon).map_err(reverted)?;
    let nonce = host.nonce(beacon);
    let v2 = host.deploy(user, TestImpl::v2(beacon)).map_err(reverted)?;

    let err = upgrade_to(&mut host, user, beacon, v2).unwrap_err();

    assert_eq!(err, OwnableUnauthorizedAccount { account: user }.abi_encode());
    assert_eq!(host.nonce(beacon), nonce);
    assert_eq!(beacon_version(&host, beacon)?, uint!(1_U256));
    assert_eq!(version(&host, proxy)?, "v1");
    Ok(())
}

#[test]
fn unauthorized_cache_deployment_reverts() -> Result<()> {
    let Deployment { mut host, user, beacon, .. } =
        deploy(BeaconConfig::default())?;

    let err = deploy_cache(&mut host, user, beacon).unwrap_err();

    assert_eq!(err, OwnableUnauthorizedAccount { account: user }.abi_encode());
    Ok(())
}

#[test]
fn open_policy_lets_anyone_publish() -> Result<()> {
    let config = BeaconConfig::default().with_cache_policy(CachePolicy::Open);
    let Deployment { mut host, user, beacon, proxy, v1, .. } = deploy(config)?;

    let cache = deploy_cache(&mut host, user, beacon).map_err(reverted)?;

    run_test(&mut host, user, proxy)?;
    assert_eq!(
        resolve(&host, proxy, beacon)?,
        Resolution { implementation: v1, source: Source::Cache(cache) }
    );
    Ok(())
}

#[test]
fn republishing_is_idempotent_by_default() -> Result<()> {
    let Deployment { mut host, admin, beacon, proxy, .. } =
        deploy(BeaconConfig::default())?;
    let first = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    let second = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    assert_eq!(first, second);
    assert_eq!(resolve(&host, proxy, beacon)?.source, Source::Cache(first));
    Ok(())
}

#[test]
fn republishing_reverts_when_rejected() -> Result<()> {
    let config =
        BeaconConfig::default().with_republish(RepublishPolicy::Reject);
    let Deployment { mut host, admin, beacon, proxy, .. } = deploy(config)?;
    let cache = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    let err = deploy_cache(&mut host, admin, beacon).unwrap_err();

    assert_eq!(
        err,
        BeaconAlreadyCached { cache, version: uint!(1_U256) }.abi_encode()
    );
    assert_eq!(resolve(&host, proxy, beacon)?.source, Source::Cache(cache));
    Ok(())
}

#[test]
fn forwards_revert_data_verbatim() -> Result<()> {
    let Deployment { mut host, admin, user, beacon, proxy, .. } =
        deploy(BeaconConfig::default())?;
    deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    let call = ITestImpl::failCall { code: uint!(42_U256) };
    let err = host.transact(user, proxy, &call.abi_encode()).unwrap_err();

    assert_eq!(err, TestImplFailure { code: uint!(42_U256) }.abi_encode());
    Ok(())
}

#[test]
fn empty_beacon_fails_resolution() -> Result<()> {
    let mut host = Host::new();
    let admin = Host::eoa("admin");
    let beacon =
        host.deploy(admin, CacheableBeacon::new()).map_err(reverted)?;
    let proxy = host
        .deploy(admin, CacheableBeaconProxy::new(beacon))
        .map_err(reverted)?;

    let call = ITestImpl::versionCall {};
    let err = host.transact(admin, proxy, &call.abi_encode()).unwrap_err();

    assert_eq!(err, BeaconProxyResolutionFailure { beacon }.abi_encode());
    Ok(())
}

#[test]
fn bootstraps_with_predicted_beacon_address() -> Result<()> {
    let mut host = Host::new();
    let admin = Host::eoa("admin");
    let user = Host::eoa("user");
    let Some(predicted) =
        AddressPredictor::predict_nth(admin, host.nonce(admin), 1)
    else {
        bail!("admin nonce overflowed");
    };

    let v1 = host.deploy(admin, TestImpl::v1(predicted)).map_err(reverted)?;
    let beacon = host
        .deploy(admin, CacheableBeacon::with_implementation(v1))
        .map_err(reverted)?;
    let proxy = host
        .deploy(admin, CacheableBeaconProxy::new(beacon))
        .map_err(reverted)?;

    assert_eq!(beacon, predicted);
    assert_eq!(beacon_version(&host, beacon)?, uint!(1_U256));
    run_test(&mut host, user, proxy)?;
    Ok(())
}

#[test]
fn ownership_transfer_moves_upgrade_rights() -> Result<()> {
    let Deployment { mut host, admin, user, beacon, .. } =
        deploy(BeaconConfig::default())?;
    let v2 = host.deploy(admin, TestImpl::v2(beacon)).map_err(reverted)?;

    let call = IOwnable::transferOwnershipCall { newOwner: user };
    host.transact(admin, beacon, &call.abi_encode()).map_err(reverted)?;

    let err = upgrade_to(&mut host, admin, beacon, v2).unwrap_err();
    assert_eq!(err, OwnableUnauthorizedAccount { account: admin }.abi_encode());
    upgrade_to(&mut host, user, beacon, v2).map_err(reverted)?;
    assert_eq!(beacon_version(&host, beacon)?, uint!(2_U256));
    Ok(())
}

#[test]
fn multisig_owner_upgrades_through_its_wallet() -> Result<()> {
    let mut host = Host::new();
    let admin = Host::eoa("admin");
    let signer = Host::eoa("signer");
    let multisig =
        host.deploy(admin, Forwarder::new([signer])).map_err(reverted)?;
    let beacon = CacheableBeacon::with_authority(
        Ownable::new(multisig),
        BeaconConfig::default(),
    );
    let beacon = host.deploy(admin, beacon).map_err(reverted)?;
    let v1 = host.deploy(admin, TestImpl::v1(beacon)).map_err(reverted)?;

    let err = upgrade_to(&mut host, admin, beacon, v1).unwrap_err();
    assert_eq!(err, OwnableUnauthorizedAccount { account: admin }.abi_encode());

    let call = ICacheableBeacon::upgradeToCall { newImplementation: v1 };
    let calldata = Forwarder::encode(beacon, &call.abi_encode());
    host.transact(signer, multisig, &calldata).map_err(reverted)?;

    assert_eq!(beacon_version(&host, beacon)?, uint!(1_U256));
    Ok(())
}

#[test]
fn council_members_manage_beacon() -> Result<()> {
    let mut host = Host::new();
    let admin = Host::eoa("admin");
    let carol = Host::eoa("carol");
    let mallory = Host::eoa("mallory");
    let beacon = CacheableBeacon::with_authority(
        Council::new([admin, carol]),
        BeaconConfig::default(),
    );
    let beacon = host.deploy(admin, beacon).map_err(reverted)?;
    let v1 = host.deploy(admin, TestImpl::v1(beacon)).map_err(reverted)?;
    let proxy = host
        .deploy(admin, CacheableBeaconProxy::new(beacon))
        .map_err(reverted)?;

    let err = upgrade_to(&mut host, mallory, beacon, v1).unwrap_err();
    assert_eq!(
        err,
        CouncilUnauthorizedAccount { account: mallory }.abi_encode()
    );

    upgrade_to(&mut host, carol, beacon, v1).map_err(reverted)?;
    let cache = deploy_cache(&mut host, admin, beacon).map_err(reverted)?;

    run_test(&mut host, mallory, proxy)?;
    assert_eq!(
        resolve(&host, proxy, beacon)?,
        Resolution { implementation: v1, source: Source::Cache(cache) }
    );
    Ok(())
}

#[test]
fn implementation_rejects_direct_calls() -> Result<()> {
    let Deployment { mut host, user, v1, .. } =
        deploy(BeaconConfig::default())?;

    let call = ITestImpl::testCall {};
    let Err(err) = host.transact(user, v1, &call.abi_encode()) else {
        bail!("direct call should revert");
    };

    assert_eq!(err, b"not delegated".to_vec());
    Ok(())
}
