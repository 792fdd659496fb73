use ssz_types::{BitVector, typenum::U64};

use crate::constants::SLOTS_PER_EPOCH;

/// Epoch containing the given slot.
pub fn compute_epoch_at_slot(slot: u64) -> u64 {
    slot / SLOTS_PER_EPOCH
}

/// First slot of the given epoch.
pub fn compute_start_slot_at_epoch(epoch: u64) -> u64 {
    epoch * SLOTS_PER_EPOCH
}

/// Indices of the committees covered by an aggregate's committee bitfield.
pub fn get_committee_indices(committee_bits: &BitVector<U64>) -> Vec<u64> {
    committee_bits
        .iter()
        .enumerate()
        .filter_map(|(index, bit)| bit.then_some(index as u64))
        .collect()
}
