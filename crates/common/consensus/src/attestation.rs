use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{
    BitList, BitVector,
    typenum::{U64, U131072},
};
use strand_bls::BlsSignature;
use tree_hash_derive::TreeHash;

use crate::{attestation_data::AttestationData, misc::get_committee_indices};

/// An aggregate vote on the chain head and the FFG checkpoints, carrying the
/// combined signature of the committee members marked in `aggregation_bits`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Attestation {
    pub aggregation_bits: BitList<U131072>,
    pub data: AttestationData,
    pub signature: BlsSignature,
    pub committee_bits: BitVector<U64>,
}

impl Attestation {
    /// Number of distinct validators whose signatures were folded into this
    /// aggregate.
    pub fn num_attesting_validators(&self) -> usize {
        self.aggregation_bits.num_set_bits()
    }

    pub fn committee_indices(&self) -> Vec<u64> {
        get_committee_indices(&self.committee_bits)
    }
}
