use crate::model::{Participant, ParticipantId};
use fxhash::FxHashMap;

/// Participants of one calculation in canonical `(sort_order, id)` order.
///
/// Positions handed out by [`ParticipantIndex::position`] follow that order, so
/// sorting positions ascending is the same as sorting participants canonically.
pub struct ParticipantIndex<'a> {
    ordered: Vec<&'a Participant>,
    positions: FxHashMap<ParticipantId, usize>,
}

impl<'a> ParticipantIndex<'a> {
    pub fn new(participants: &'a [Participant]) -> Self {
        let mut sorted: Vec<&'a Participant> = participants.iter().collect();
        sorted.sort_by_key(|participant| participant.canonical_key());

        let mut ordered = Vec::with_capacity(sorted.len());
        let mut positions =
            FxHashMap::with_capacity_and_hasher(sorted.len(), Default::default());
        for participant in sorted {
            if positions.contains_key(&participant.id) {
                continue;
            }
            positions.insert(participant.id, ordered.len());
            ordered.push(participant);
        }

        if ordered.len() != participants.len() {
            tracing::warn!(
                duplicate_count = participants.len() - ordered.len(),
                "Duplicate participant ids in bill snapshot; keeping the first in canonical order"
            );
        }

        Self { ordered, positions }
    }

    pub fn position(&self, id: ParticipantId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn id_at(&self, position: usize) -> ParticipantId {
        self.ordered[position].id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn participant(id: u64, sort_order: i32) -> Participant {
        Participant {
            id: ParticipantId(id),
            name: format!("P{id}"),
            sort_order,
        }
    }

    #[rstest]
    #[case::by_sort_order(
        vec![participant(1, 2), participant(2, 0), participant(3, 1)],
        vec![2, 3, 1]
    )]
    #[case::id_breaks_ties(
        vec![participant(9, 0), participant(4, 0), participant(7, -1)],
        vec![7, 4, 9]
    )]
    #[case::empty(vec![], vec![])]
    fn orders_canonically(#[case] participants: Vec<Participant>, #[case] expected: Vec<u64>) {
        let index = ParticipantIndex::new(&participants);
        let ids: Vec<u64> = (0..index.len()).map(|position| index.id_at(position).0).collect();
        assert_eq!(ids, expected);
        for (position, id) in expected.iter().enumerate() {
            assert_eq!(index.position(ParticipantId(*id)), Some(position));
        }
    }

    #[test]
    fn unknown_participant_has_no_position() {
        let participants = [participant(1, 0)];
        let index = ParticipantIndex::new(&participants);
        assert_eq!(index.position(ParticipantId(2)), None);
    }

    #[test]
    fn duplicate_ids_are_collapsed() {
        let participants = [participant(1, 5), participant(2, 1), participant(1, 0)];
        let index = ParticipantIndex::new(&participants);
        assert_eq!(index.len(), 2);
        assert_eq!(index.position(ParticipantId(1)), Some(0));
        assert_eq!(index.position(ParticipantId(2)), Some(1));
    }
}
