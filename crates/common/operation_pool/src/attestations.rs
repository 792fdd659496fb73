use std::ops::Deref;

use strand_consensus::attestation::Attestation;

/// State-backed validity check for a single attestation.
///
/// Implemented by the chain-state type of the state-transition layer: an
/// attestation is includable in a block iff applying it to the state
/// succeeds. Why a given attestation fails (stale slot, bad signature,
/// unknown target, inconsistent state root) is the state transition's
/// business; the selection logic treats every error the same way.
pub trait ProcessAttestation {
    fn process_attestation(&mut self, attestation: &Attestation) -> anyhow::Result<()>;
}

/// An ordered list of aggregate attestations.
///
/// Input order is arrival order from the pool and carries no meaning; after
/// [sort_by_profitability](Self::sort_by_profitability) the order is the
/// inclusion order for a block body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttestationList(Vec<Attestation>);

impl AttestationList {
    /// Separates the list into attestations that pass `validate` and the rest.
    ///
    /// Every element lands in exactly one of the two output lists, without
    /// being copied, and relative order within each list is the input order.
    /// `validate` is invoked exactly once per attestation, sequentially and
    /// in input order; a panic in `validate` propagates to the caller.
    pub fn split_validate<F>(self, mut validate: F) -> (Self, Self)
    where
        F: FnMut(&Attestation) -> bool,
    {
        let mut valid = Vec::with_capacity(self.0.len());
        let mut invalid = Vec::new();
        for attestation in self.0 {
            if validate(&attestation) {
                valid.push(attestation);
            } else {
                invalid.push(attestation);
            }
        }
        (Self(valid), Self(invalid))
    }

    /// Separates the list into attestations a proposer may include and those
    /// that should be deleted from the pool.
    ///
    /// Each attestation is checked against its own transient clone of
    /// `state`, so the caller's snapshot is never mutated and one check
    /// cannot leak into the next.
    pub fn split_for_proposer<S>(self, state: &S) -> (Self, Self)
    where
        S: ProcessAttestation + Clone,
    {
        self.split_validate(|attestation| {
            let mut trial_state = state.clone();
            trial_state.process_attestation(attestation).is_ok()
        })
    }

    /// Orders attestations by highest slot, then by highest attester count.
    ///
    /// A later slot carries fresher information about the head; among equal
    /// slots a larger aggregate covers more of its committee per entry of
    /// block space. The sort is stable, so attestations equal on both keys
    /// keep their relative input order.
    pub fn sort_by_profitability(mut self) -> Self {
        if self.0.len() < 2 {
            return self;
        }
        self.0.sort_by(|a, b| {
            b.data.slot.cmp(&a.data.slot).then_with(|| {
                b.num_attesting_validators()
                    .cmp(&a.num_attesting_validators())
            })
        });
        self
    }

    /// Keeps the first `limit` attestations and drops the rest.
    ///
    /// A no-op when the list is already within the limit. Never reorders, so
    /// it must run after [sort_by_profitability](Self::sort_by_profitability)
    /// to keep the most profitable attestations.
    pub fn limit_to_max_attestations(mut self, limit: usize) -> Self {
        if self.0.len() > limit {
            self.0.truncate(limit);
        }
        self
    }
}

impl Deref for AttestationList {
    type Target = [Attestation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Attestation>> for AttestationList {
    fn from(attestations: Vec<Attestation>) -> Self {
        Self(attestations)
    }
}

impl From<AttestationList> for Vec<Attestation> {
    fn from(list: AttestationList) -> Self {
        list.0
    }
}

impl FromIterator<Attestation> for AttestationList {
    fn from_iter<I: IntoIterator<Item = Attestation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AttestationList {
    type Item = Attestation;
    type IntoIter = std::vec::IntoIter<Attestation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::ensure;
    use rstest::rstest;
    use strand_consensus::constants::MIN_ATTESTATION_INCLUSION_DELAY;

    use super::*;
    use crate::test_utils::aggregate;

    fn slots(list: &AttestationList) -> Vec<u64> {
        list.iter().map(|attestation| attestation.data.slot).collect()
    }

    #[test]
    fn split_validate_partitions_without_loss_or_reorder() {
        let input_slots = [5u64, 0, 7, 1, 3, 0, 8, 2, 9, 4];
        let list: AttestationList = input_slots
            .iter()
            .map(|&slot| aggregate(slot, 1))
            .collect();

        let (valid, invalid) = list.split_validate(|attestation| attestation.data.slot >= 2);

        assert_eq!(valid.len() + invalid.len(), input_slots.len());
        assert_eq!(slots(&valid), vec![5, 7, 3, 8, 2, 9, 4]);
        assert_eq!(slots(&invalid), vec![0, 1, 0]);
    }

    #[test]
    fn split_validate_calls_the_predicate_once_per_attestation_in_order() {
        let list: AttestationList = [4u64, 2, 9]
            .iter()
            .map(|&slot| aggregate(slot, 1))
            .collect();

        let mut seen = Vec::new();
        let (valid, invalid) = list.split_validate(|attestation| {
            seen.push(attestation.data.slot);
            attestation.data.slot % 2 == 0
        });

        assert_eq!(seen, vec![4, 2, 9]);
        assert_eq!(slots(&valid), vec![4, 2]);
        assert_eq!(slots(&invalid), vec![9]);
    }

    #[test]
    fn split_validate_on_empty_list() {
        let (valid, invalid) = AttestationList::default().split_validate(|_| true);
        assert!(valid.is_empty());
        assert!(invalid.is_empty());
    }

    /// Applying an attestation advances the trial state, like the real state
    /// transition does. With per-check clones this must stay invisible
    /// across checks.
    #[derive(Clone)]
    struct TrialState {
        min_slot: u64,
    }

    impl ProcessAttestation for TrialState {
        fn process_attestation(&mut self, attestation: &Attestation) -> anyhow::Result<()> {
            ensure!(
                attestation.data.slot >= self.min_slot,
                "Attestation targets a slot below the inclusion window"
            );
            self.min_slot = attestation.data.slot + MIN_ATTESTATION_INCLUSION_DELAY;
            Ok(())
        }
    }

    #[test]
    fn split_for_proposer_checks_each_attestation_against_a_fresh_state() {
        let list: AttestationList = [5u64, 5, 1, 3]
            .iter()
            .map(|&slot| aggregate(slot, 1))
            .collect();
        let state = TrialState { min_slot: 2 };

        let (valid, invalid) = list.split_for_proposer(&state);

        // A shared state would have raised the bar after the first success.
        assert_eq!(slots(&valid), vec![5, 5, 3]);
        assert_eq!(slots(&invalid), vec![1]);
        assert_eq!(state.min_slot, 2);
    }

    #[test]
    fn sort_by_profitability_orders_by_slot_then_attester_count() {
        let list = AttestationList::from(vec![
            aggregate(5, 3),
            aggregate(7, 1),
            aggregate(7, 9),
        ]);

        let sorted = list.sort_by_profitability();

        let keys: Vec<_> = sorted
            .iter()
            .map(|attestation| (attestation.data.slot, attestation.num_attesting_validators()))
            .collect();
        assert_eq!(keys, vec![(7, 9), (7, 1), (5, 3)]);

        let capped = sorted.limit_to_max_attestations(2);
        let keys: Vec<_> = capped
            .iter()
            .map(|attestation| (attestation.data.slot, attestation.num_attesting_validators()))
            .collect();
        assert_eq!(keys, vec![(7, 9), (7, 1)]);
    }

    #[test]
    fn sort_by_profitability_holds_for_every_adjacent_pair() {
        let list: AttestationList = [(3u64, 4usize), (11, 1), (7, 7), (11, 30), (3, 4), (0, 2)]
            .iter()
            .map(|&(slot, attesters)| aggregate(slot, attesters))
            .collect();

        let sorted = list.sort_by_profitability();

        for pair in sorted.windows(2) {
            let earlier = (pair[0].data.slot, pair[0].num_attesting_validators());
            let later = (pair[1].data.slot, pair[1].num_attesting_validators());
            assert!(
                earlier.0 > later.0 || (earlier.0 == later.0 && earlier.1 >= later.1),
                "{earlier:?} must not rank below {later:?}"
            );
        }
    }

    #[test]
    fn sort_by_profitability_leaves_trivial_lists_unchanged() {
        let empty = AttestationList::default();
        assert_eq!(empty.clone().sort_by_profitability(), empty);

        let single = AttestationList::from(vec![aggregate(3, 2)]);
        assert_eq!(single.clone().sort_by_profitability(), single);
    }

    #[test]
    fn sort_by_profitability_keeps_input_order_on_full_ties() {
        let mut first = aggregate(6, 2);
        first.data.index = 1;
        let mut second = aggregate(6, 2);
        second.data.index = 2;

        let sorted =
            AttestationList::from(vec![first.clone(), second.clone()]).sort_by_profitability();

        assert_eq!(Vec::from(sorted), vec![first, second]);
    }

    #[rstest]
    #[case::under_the_limit(3, 8, 3)]
    #[case::exactly_at_the_limit(5, 5, 5)]
    #[case::over_the_limit(9, 4, 4)]
    #[case::zero_limit(6, 0, 0)]
    fn limit_to_max_attestations_truncates(
        #[case] len: usize,
        #[case] limit: usize,
        #[case] expected_len: usize,
    ) {
        let list: AttestationList = (0..len as u64).map(|slot| aggregate(slot, 1)).collect();

        let capped = list.clone().limit_to_max_attestations(limit);

        assert_eq!(capped.len(), expected_len);
        assert_eq!(slots(&capped), slots(&list)[..expected_len].to_vec());

        // Idempotent: capping an already capped list changes nothing.
        assert_eq!(capped.clone().limit_to_max_attestations(limit), capped);
    }
}
