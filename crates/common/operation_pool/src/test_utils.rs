use alloy_primitives::B256;
use ssz_types::{
    BitList, BitVector,
    typenum::{U64, U131072},
};
use strand_bls::BlsSignature;
use strand_consensus::{
    attestation::Attestation, attestation_data::AttestationData, checkpoint::Checkpoint,
    constants::TARGET_COMMITTEE_SIZE, misc::compute_epoch_at_slot,
};

/// Aggregate for `slot` with the first `attesters` committee bits set.
pub fn aggregate(slot: u64, attesters: usize) -> Attestation {
    let mut aggregation_bits: BitList<U131072> =
        BitList::with_capacity(TARGET_COMMITTEE_SIZE as usize)
            .expect("the committee bitfield capacity is within bounds");
    for index in 0..attesters {
        aggregation_bits
            .set(index, true)
            .expect("the attester index is within the committee bitfield");
    }

    let mut committee_bits: BitVector<U64> = BitVector::new();
    committee_bits
        .set(0, true)
        .expect("the committee index is within bounds");

    Attestation {
        aggregation_bits,
        data: AttestationData {
            slot,
            index: 0,
            beacon_block_root: B256::ZERO,
            source: Checkpoint::default(),
            target: Checkpoint {
                epoch: compute_epoch_at_slot(slot),
                root: B256::ZERO,
            },
        },
        signature: BlsSignature::default(),
        committee_bits,
    }
}
