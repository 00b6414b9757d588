use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::types::ScoreEntry;

/// Output of the greedy walk.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyAssignment {
    /// Committed entries in commit order (highest score first).
    pub matched: Vec<ScoreEntry>,
    /// Candidate ids left without a slot, in `candidate_ids` input order.
    pub unmatched: Vec<String>,
}

/// Greedy maximum-score-first assignment.
///
/// Sorts the full score set by score descending — ties broken by candidate
/// id, then slot id, ascending, so the result reproduces across
/// differently-ordered inputs — and walks it once. Each entry is committed
/// unless its candidate is already placed or its slot is out of seats. The
/// walk stops early once every seat is taken; that short-circuit never
/// changes the result versus walking the full list.
///
/// Capacity handling: a slot id missing from `capacities`, or mapped to 0,
/// counts as capacity 1 — never 0.
///
/// This is a heuristic, not an optimal matcher: committing the single best
/// remaining pair at each step can cost total score elsewhere, and no
/// backtracking happens. Guarantees that *do* hold: at most one slot per
/// candidate, at most `capacity` candidates per slot, and
/// `matched ∪ unmatched` covers `candidate_ids` exactly.
pub fn greedy_assign(
    candidate_ids: &[String],
    mut entries: Vec<ScoreEntry>,
    capacities: &HashMap<String, usize>,
) -> GreedyAssignment {
    // Stable sort: entries with fully equal keys keep generation order.
    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
            .then_with(|| a.slot_id.cmp(&b.slot_id))
    });

    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for entry in &entries {
        remaining.entry(entry.slot_id.as_str()).or_insert_with(|| {
            capacities
                .get(entry.slot_id.as_str())
                .copied()
                .unwrap_or(1)
                .max(1)
        });
    }
    let mut open: usize = remaining.values().sum();

    let mut assigned: HashSet<&str> = HashSet::with_capacity(candidate_ids.len());
    let mut matched = Vec::new();

    for entry in &entries {
        if open == 0 {
            break;
        }
        if assigned.contains(entry.candidate_id.as_str()) {
            continue;
        }
        let Some(seats) = remaining.get_mut(entry.slot_id.as_str()) else {
            continue;
        };
        if *seats == 0 {
            continue;
        }
        *seats -= 1;
        open -= 1;
        assigned.insert(entry.candidate_id.as_str());
        matched.push(entry.clone());
    }

    let unmatched = candidate_ids
        .iter()
        .filter(|id| !assigned.contains(id.as_str()))
        .cloned()
        .collect();

    GreedyAssignment { matched, unmatched }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(candidate: &str, slot: &str, score: f32) -> ScoreEntry {
        ScoreEntry {
            candidate_id: candidate.into(),
            slot_id: slot.into(),
            score,
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn caps(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(id, c)| (id.to_string(), *c)).collect()
    }

    #[test]
    fn three_candidates_two_single_seat_slots() {
        // A takes X outright; B's best (X) is full so B lands on Y; C finds
        // every seat taken.
        let entries = vec![
            entry("A", "X", 0.9),
            entry("A", "Y", 0.5),
            entry("B", "X", 0.8),
            entry("B", "Y", 0.7),
            entry("C", "X", 0.1),
            entry("C", "Y", 0.1),
        ];
        let result = greedy_assign(
            &ids(&["A", "B", "C"]),
            entries,
            &caps(&[("X", 1), ("Y", 1)]),
        );

        assert_eq!(result.matched.len(), 2);
        assert_eq!(result.matched[0].candidate_id, "A");
        assert_eq!(result.matched[0].slot_id, "X");
        assert_eq!(result.matched[1].candidate_id, "B");
        assert_eq!(result.matched[1].slot_id, "Y");
        assert_eq!(result.unmatched, vec!["C".to_string()]);
    }

    #[test]
    fn total_capacity_bounds_assignment_count() {
        // 5 candidates into 2 total seats: exactly 2 assigned, 3 unmatched,
        // whatever the scores say.
        let candidates = ids(&["c1", "c2", "c3", "c4", "c5"]);
        let mut entries = Vec::new();
        for (i, candidate) in candidates.iter().enumerate() {
            entries.push(entry(candidate, "s1", 0.9 - i as f32 * 0.1));
            entries.push(entry(candidate, "s2", 0.8 - i as f32 * 0.1));
        }
        let result = greedy_assign(&candidates, entries, &caps(&[("s1", 1), ("s2", 1)]));

        assert_eq!(result.matched.len(), 2);
        assert_eq!(result.unmatched.len(), 3);
    }

    #[test]
    fn slot_capacity_is_respected() {
        let entries = vec![
            entry("A", "X", 0.9),
            entry("B", "X", 0.8),
            entry("C", "X", 0.7),
        ];
        let result = greedy_assign(&ids(&["A", "B", "C"]), entries, &caps(&[("X", 2)]));

        assert_eq!(result.matched.len(), 2);
        assert!(result
            .matched
            .iter()
            .all(|m| m.slot_id == "X"));
        assert_eq!(result.unmatched, vec!["C".to_string()]);
    }

    #[test]
    fn each_candidate_gets_at_most_one_slot() {
        let entries = vec![
            entry("A", "X", 0.9),
            entry("A", "Y", 0.8),
            entry("A", "Z", 0.7),
        ];
        let result = greedy_assign(
            &ids(&["A"]),
            entries,
            &caps(&[("X", 1), ("Y", 1), ("Z", 1)]),
        );

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].slot_id, "X");
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn ties_break_by_candidate_id_then_slot_id() {
        // Every score equal: candidate ordering decides who picks first, and
        // slot ordering decides what they pick.
        let entries = vec![
            entry("b", "s2", 0.5),
            entry("b", "s1", 0.5),
            entry("a", "s2", 0.5),
            entry("a", "s1", 0.5),
        ];
        let result = greedy_assign(
            &ids(&["b", "a"]),
            entries,
            &caps(&[("s1", 1), ("s2", 1)]),
        );

        assert_eq!(result.matched.len(), 2);
        assert_eq!(result.matched[0].candidate_id, "a");
        assert_eq!(result.matched[0].slot_id, "s1");
        assert_eq!(result.matched[1].candidate_id, "b");
        assert_eq!(result.matched[1].slot_id, "s2");
    }

    #[test]
    fn tie_break_is_input_order_independent() {
        let forward = vec![
            entry("a", "s1", 0.4),
            entry("a", "s2", 0.4),
            entry("b", "s1", 0.4),
            entry("b", "s2", 0.4),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let capacities = caps(&[("s1", 1), ("s2", 1)]);
        let lhs = greedy_assign(&ids(&["a", "b"]), forward, &capacities);
        let rhs = greedy_assign(&ids(&["a", "b"]), reversed, &capacities);
        assert_eq!(lhs.matched, rhs.matched);
    }

    #[test]
    fn missing_capacity_reads_as_one() {
        let entries = vec![entry("A", "X", 0.9), entry("B", "X", 0.8)];
        let result = greedy_assign(&ids(&["A", "B"]), entries, &HashMap::new());

        // Unknown slot gets a single seat, never zero.
        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].candidate_id, "A");
        assert_eq!(result.unmatched, vec!["B".to_string()]);
    }

    #[test]
    fn zero_capacity_reads_as_one() {
        let entries = vec![entry("A", "X", 0.9), entry("B", "X", 0.8)];
        let result = greedy_assign(&ids(&["A", "B"]), entries, &caps(&[("X", 0)]));

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.unmatched, vec!["B".to_string()]);
    }

    #[test]
    fn empty_entries_leave_everyone_unmatched() {
        let result = greedy_assign(&ids(&["A", "B"]), Vec::new(), &caps(&[("X", 1)]));
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched, ids(&["A", "B"]));
    }

    #[test]
    fn unmatched_preserves_input_order() {
        let entries = vec![entry("m", "X", 0.9)];
        let result = greedy_assign(
            &ids(&["z", "m", "a", "k"]),
            entries,
            &caps(&[("X", 1)]),
        );
        assert_eq!(result.unmatched, ids(&["z", "a", "k"]));
    }

    #[test]
    fn early_exit_matches_full_walk() {
        // One seat, a long tail of entries after it fills. The short-circuit
        // must produce the same result as walking everything.
        let mut entries = vec![entry("A", "X", 0.99)];
        for i in 0..100 {
            entries.push(entry(&format!("c{i:03}"), "X", 0.5));
        }
        let mut candidates = vec!["A".to_string()];
        candidates.extend((0..100).map(|i| format!("c{i:03}")));

        let result = greedy_assign(&candidates, entries, &caps(&[("X", 1)]));
        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].candidate_id, "A");
        assert_eq!(result.unmatched.len(), 100);
    }

    #[test]
    fn matched_is_ordered_best_first() {
        let entries = vec![
            entry("A", "X", 0.3),
            entry("B", "Y", 0.9),
            entry("C", "Z", 0.6),
        ];
        let result = greedy_assign(
            &ids(&["A", "B", "C"]),
            entries,
            &caps(&[("X", 1), ("Y", 1), ("Z", 1)]),
        );
        let scores: Vec<f32> = result.matched.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.9, 0.6, 0.3]);
    }

    #[test]
    fn greedy_is_not_globally_optimal() {
        // A edges out B on X; B's only alternative is weak. A swap (A→Y,
        // B→X) would score higher in total. Documented heuristic behavior.
        let entries = vec![
            entry("A", "X", 0.90),
            entry("A", "Y", 0.89),
            entry("B", "X", 0.88),
            entry("B", "Y", 0.10),
        ];
        let result = greedy_assign(
            &ids(&["A", "B"]),
            entries,
            &caps(&[("X", 1), ("Y", 1)]),
        );

        let total: f32 = result.matched.iter().map(|m| m.score).sum();
        assert_eq!(result.matched[0].candidate_id, "A");
        assert_eq!(result.matched[0].slot_id, "X");
        // Greedy total (0.90 + 0.10) loses to the optimal 0.89 + 0.88.
        assert!(total < 0.89 + 0.88);
    }
}
