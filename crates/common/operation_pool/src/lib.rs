pub mod attestations;

#[cfg(test)]
pub(crate) mod test_utils;

use std::collections::HashMap;

use alloy_primitives::B256;
use parking_lot::RwLock;
use strand_consensus::attestation::Attestation;
use strand_network_spec::networks::beacon_network_spec;
use tracing::debug;
use tree_hash::TreeHash;

use crate::attestations::{AttestationList, ProcessAttestation};

/// Aggregate attestations received from gossip, waiting to be packed into a
/// block.
#[derive(Debug, Default)]
pub struct AttestationPool {
    aggregates: RwLock<HashMap<B256, Attestation>>,
}

impl AttestationPool {
    pub fn insert_aggregate(&self, attestation: Attestation) {
        self.aggregates
            .write()
            .insert(attestation.tree_hash_root(), attestation);
    }

    /// Snapshot of the pooled aggregates, in no particular order.
    pub fn aggregates(&self) -> Vec<Attestation> {
        self.aggregates.read().values().cloned().collect()
    }

    pub fn remove_aggregate(&self, root: B256) {
        self.aggregates.write().remove(&root);
    }

    /// Drops aggregates that failed the proposal validity check.
    pub fn prune_invalid(&self, invalid: &[Attestation]) {
        let mut aggregates = self.aggregates.write();
        for attestation in invalid {
            aggregates.remove(&attestation.tree_hash_root());
        }
    }

    /// Attestations for a new block body: the pooled aggregates that are
    /// valid against `state`, most profitable first, capped to the per-block
    /// maximum of the active network. Aggregates that fail the validity
    /// check are pruned from the pool.
    pub fn attestations_for_proposal<S>(&self, state: &S) -> Vec<Attestation>
    where
        S: ProcessAttestation + Clone,
    {
        let candidates = AttestationList::from(self.aggregates());
        let (valid, invalid) = candidates.split_for_proposer(state);
        if !invalid.is_empty() {
            debug!(
                "Pruning {} aggregates no longer valid for proposal",
                invalid.len()
            );
            self.prune_invalid(&invalid);
        }
        valid
            .sort_by_profitability()
            .limit_to_max_attestations(beacon_network_spec().max_attestations as usize)
            .into()
    }
}
