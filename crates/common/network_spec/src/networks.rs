use std::sync::{Arc, LazyLock, Once, OnceLock};

use alloy_primitives::{aliases::B32, fixed_bytes};
use serde::Deserialize;

pub static HAS_NETWORK_SPEC_BEEN_INITIALIZED: Once = Once::new();

pub fn initialize_test_network_spec() {
    HAS_NETWORK_SPEC_BEEN_INITIALIZED.call_once(|| {
        set_beacon_network_spec(DEV.clone());
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Holesky,
    Dev,
    Custom(String),
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "holesky" => Ok(Network::Holesky),
            "dev" => Ok(Network::Dev),
            custom => Ok(Network::Custom(custom.to_string())),
        }
    }
}

static BEACON_NETWORK_SPEC: OnceLock<Arc<BeaconNetworkSpec>> = OnceLock::new();

/// Registers the process-wide [BeaconNetworkSpec]. Call once during startup,
/// before anything reads the spec through [beacon_network_spec].
///
/// # Panics
///
/// Panics on a second call.
pub fn set_beacon_network_spec(network_spec: Arc<BeaconNetworkSpec>) {
    BEACON_NETWORK_SPEC
        .set(network_spec)
        .expect("BeaconNetworkSpec should be set only once at the start of the application");
}

/// The [BeaconNetworkSpec] registered via [set_beacon_network_spec].
///
/// # Panics
///
/// Panics if no spec has been registered yet.
pub fn beacon_network_spec() -> Arc<BeaconNetworkSpec> {
    BEACON_NETWORK_SPEC
        .get()
        .expect("BeaconNetworkSpec wasn't set")
        .clone()
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BeaconNetworkSpec {
    pub preset_base: String,
    #[serde(rename = "CONFIG_NAME")]
    pub network: Network,

    // Genesis
    pub min_genesis_active_validator_count: u64,
    pub min_genesis_time: u64,
    #[serde(with = "crate::b32_hex")]
    pub genesis_fork_version: B32,
    pub genesis_delay: u64,

    // Forking
    #[serde(with = "crate::b32_hex")]
    pub electra_fork_version: B32,
    pub electra_fork_epoch: u64,

    // Time parameters
    pub seconds_per_slot: u64,

    // Block proposal
    pub max_attestations: u64,

    // Attestation gossip
    pub attestation_propagation_slot_range: u64,
    pub attestation_subnet_count: u64,
    pub maximum_gossip_clock_disparity: u64,
}

pub static MAINNET: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        preset_base: "mainnet".to_string(),
        network: Network::Mainnet,
        min_genesis_active_validator_count: 16384,
        min_genesis_time: 1606824000,
        genesis_fork_version: fixed_bytes!("0x00000000"),
        genesis_delay: 604800,
        electra_fork_version: fixed_bytes!("0x05000000"),
        electra_fork_epoch: 364032,
        seconds_per_slot: 12,
        max_attestations: 8,
        attestation_propagation_slot_range: 32,
        attestation_subnet_count: 64,
        maximum_gossip_clock_disparity: 500,
    }
    .into()
});

pub static HOLESKY: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        preset_base: "mainnet".to_string(),
        network: Network::Holesky,
        min_genesis_active_validator_count: 16384,
        min_genesis_time: 1695902100,
        genesis_fork_version: fixed_bytes!("0x01017000"),
        genesis_delay: 300,
        electra_fork_version: fixed_bytes!("0x06017000"),
        electra_fork_epoch: 115968,
        seconds_per_slot: 12,
        max_attestations: 8,
        attestation_propagation_slot_range: 32,
        attestation_subnet_count: 64,
        maximum_gossip_clock_disparity: 500,
    }
    .into()
});

pub static DEV: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        preset_base: "mainnet".to_string(),
        network: Network::Dev,
        min_genesis_active_validator_count: 16384,
        min_genesis_time: 1606824000,
        genesis_fork_version: fixed_bytes!("0x00000000"),
        genesis_delay: 604800,
        electra_fork_version: fixed_bytes!("0x05000000"),
        electra_fork_epoch: 364032,
        seconds_per_slot: 12,
        max_attestations: 8,
        attestation_propagation_slot_range: 32,
        attestation_subnet_count: 64,
        maximum_gossip_clock_disparity: 500,
    }
    .into()
});
