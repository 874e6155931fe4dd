use std::collections::{HashMap, HashSet};

use game_types::PlayerId;

/// Canonical form used to compare answers: surrounding whitespace dropped, case folded.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Chemistry means every submitted answer normalizes to the same value.
/// An empty round never counts as a match.
pub fn is_chemistry<'a, I>(answers: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let mut distinct = HashSet::new();
    for answer in answers {
        distinct.insert(normalize_answer(answer));
        if distinct.len() > 1 {
            return false;
        }
    }
    distinct.len() == 1
}

pub struct ScoringEngine;

impl ScoringEngine {
    pub const MATCH_POINTS: u32 = 1;

    /// Points each player earns for the round. Only players with a recorded
    /// answer can score.
    pub fn round_points(answers: &HashMap<PlayerId, String>) -> (bool, Vec<(PlayerId, u32)>) {
        if !is_chemistry(answers.values()) {
            return (false, Vec::new());
        }

        let awards = answers
            .keys()
            .map(|player_id| (player_id.clone(), Self::MATCH_POINTS))
            .collect();
        (true, awards)
    }
}
