// SPDX-License-Identifier: MIT

//! Challenge ranking aggregation.
//!
//! Pure read-time computation over already-fetched participant records;
//! re-run on every ranking request, never cached or persisted.

use crate::models::{ChallengeParticipant, RankedParticipant};

/// How many ranked entries the podium shows.
pub const PODIUM_SIZE: usize = 3;

/// Order participants and assign competition ranks.
///
/// Sort is descending by check-in count with ties broken by ascending
/// name, compared byte-wise over UTF-8 (accented initials sort after
/// ASCII). Tied counts share a rank; the next distinct count takes its
/// 1-based position, so counts [10, 10, 7] rank as [1, 1, 3].
pub fn rank_participants(mut participants: Vec<ChallengeParticipant>) -> Vec<RankedParticipant> {
    participants.sort_by(|a, b| {
        b.checkins
            .cmp(&a.checkins)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    let mut current_rank = 0u32;
    let mut last_checkins: Option<u32> = None;

    participants
        .into_iter()
        .enumerate()
        .map(|(index, p)| {
            if last_checkins != Some(p.checkins) {
                current_rank = index as u32 + 1;
            }
            last_checkins = Some(p.checkins);
            RankedParticipant {
                user_id: p.user_id,
                display_name: p.display_name,
                avatar_url: p.avatar_url,
                checkins: p.checkins,
                rank: current_rank,
            }
        })
        .collect()
}

/// Split a ranked list into the top-3 podium and the remainder.
pub fn split_podium(ranked: &[RankedParticipant]) -> (&[RankedParticipant], &[RankedParticipant]) {
    ranked.split_at(ranked.len().min(PODIUM_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str, checkins: u32) -> ChallengeParticipant {
        ChallengeParticipant {
            challenge_id: "c1".to_string(),
            user_id: format!("uid-{}", name),
            display_name: name.to_string(),
            avatar_url: None,
            checkins,
        }
    }

    #[test]
    fn test_competition_ranking_with_ties() {
        let ranked = rank_participants(vec![
            participant("a", 10),
            participant("b", 10),
            participant("c", 7),
            participant("d", 7),
            participant("e", 3),
        ]);

        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3, 3, 5]);
    }

    #[test]
    fn test_ties_ordered_by_name() {
        let ranked = rank_participants(vec![
            participant("Ana", 5),
            participant("Caio", 8),
            participant("Bia", 8),
            participant("Davi", 2),
        ]);

        let order: Vec<(&str, u32)> = ranked
            .iter()
            .map(|r| (r.display_name.as_str(), r.rank))
            .collect();
        assert_eq!(
            order,
            vec![("Bia", 1), ("Caio", 1), ("Ana", 3), ("Davi", 4)]
        );
    }

    #[test]
    fn test_rank_one_goes_to_max_count() {
        let ranked = rank_participants(vec![
            participant("x", 1),
            participant("y", 42),
            participant("z", 17),
        ]);
        assert_eq!(ranked[0].checkins, 42);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank_participants(vec![]);
        assert!(ranked.is_empty());
        let (podium, rest) = split_podium(&ranked);
        assert!(podium.is_empty());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_podium_split() {
        let ranked = rank_participants(vec![
            participant("a", 4),
            participant("b", 3),
            participant("c", 2),
            participant("d", 1),
        ]);
        let (podium, rest) = split_podium(&ranked);
        assert_eq!(podium.len(), 3);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].display_name, "d");
    }

    #[test]
    fn test_podium_with_fewer_than_three() {
        let ranked = rank_participants(vec![participant("a", 4), participant("b", 3)]);
        let (podium, rest) = split_podium(&ranked);
        assert_eq!(podium.len(), 2);
        assert!(rest.is_empty());
    }
}
