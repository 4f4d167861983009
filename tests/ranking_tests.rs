// SPDX-License-Identifier: MIT

//! Ranking aggregation properties.

use gymbox_api::models::ChallengeParticipant;
use gymbox_api::services::ranking::{rank_participants, split_podium};

fn participant(name: &str, checkins: u32) -> ChallengeParticipant {
    ChallengeParticipant {
        challenge_id: "winter-2026".to_string(),
        user_id: format!("uid-{}", name),
        display_name: name.to_string(),
        avatar_url: None,
        checkins,
    }
}

#[test]
fn test_rank_sequence_with_tied_pairs() {
    // counts [10, 10, 7, 7, 3] -> ranks [1, 1, 3, 3, 5]
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
fn test_tied_leaders_name_sorted() {
    // {A:5, B:8, C:8, D:2} -> B/C tied at 1 (name order), A rank 3, D rank 4
    let ranked = rank_participants(vec![
        participant("A", 5),
        participant("B", 8),
        participant("C", 8),
        participant("D", 2),
    ]);

    let order: Vec<(&str, u32)> = ranked
        .iter()
        .map(|r| (r.display_name.as_str(), r.rank))
        .collect();
    assert_eq!(order, vec![("B", 1), ("C", 1), ("A", 3), ("D", 4)]);
}

#[test]
fn test_tie_break_is_utf8_byte_order() {
    // Names compare byte-wise: "Á" (0xC3 0x81) sorts after every ASCII
    // initial, so "Ávila" lands behind "Zeca" at the same count.
    let ranked = rank_participants(vec![participant("Ávila", 6), participant("Zeca", 6)]);

    let names: Vec<&str> = ranked.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, vec!["Zeca", "Ávila"]);
    assert!(ranked.iter().all(|r| r.rank == 1));
}

#[test]
fn test_max_count_always_rank_one() {
    for counts in [vec![3u32], vec![0, 0, 0], vec![9, 1, 5, 9]] {
        let participants = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| participant(&format!("p{}", i), c))
            .collect();
        let ranked = rank_participants(participants);
        let max = counts.iter().max().copied().unwrap();
        assert_eq!(ranked[0].checkins, max);
        assert_eq!(ranked[0].rank, 1);
    }
}

#[test]
fn test_equal_counts_equal_ranks() {
    let ranked = rank_participants(vec![
        participant("a", 4),
        participant("b", 4),
        participant("c", 4),
    ]);
    assert!(ranked.iter().all(|r| r.rank == 1));
}

#[test]
fn test_empty_ranking_has_no_podium() {
    let ranked = rank_participants(vec![]);
    let (podium, rest) = split_podium(&ranked);
    assert!(podium.is_empty());
    assert!(rest.is_empty());
}

#[test]
fn test_podium_holds_at_most_three() {
    let ranked = rank_participants((0..10).map(|i| participant(&format!("p{}", i), i)).collect());
    let (podium, rest) = split_podium(&ranked);
    assert_eq!(podium.len(), 3);
    assert_eq!(rest.len(), 7);
    // Remainder continues where the podium left off
    assert!(rest[0].rank >= podium[2].rank);
}
