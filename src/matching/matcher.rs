use std::collections::HashMap;

use log::debug;

use super::similarity::similarity;
use crate::config::settings::MatchSettings;
use crate::domain::{Athlete, MatchStatus};

/// Best roster candidate for one imported name.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome<'a> {
    /// Highest-confidence athlete, only set when it reaches the threshold.
    pub athlete: Option<&'a Athlete>,
    /// Best confidence seen, even when no athlete was accepted.
    pub confidence: u8,
    /// Every athlete at or above the threshold, in roster order.
    pub similar_athletes: Vec<&'a Athlete>,
}

impl MatchOutcome<'_> {
    pub fn status(&self, settings: &MatchSettings) -> MatchStatus {
        classify(self.confidence, self.athlete.is_some(), settings)
    }
}

pub fn classify(confidence: u8, matched: bool, settings: &MatchSettings) -> MatchStatus {
    if matched && confidence >= settings.exact_threshold {
        MatchStatus::Exact
    } else if matched && confidence >= settings.similar_threshold {
        MatchStatus::Similar
    } else {
        MatchStatus::Unknown
    }
}

/// Fuzzy matcher for imported names against a roster.
///
/// Every query compares against every roster athlete twice (both name orders),
/// so one lookup costs O(roster size x name length²). Rosters in the low
/// thousands are fine synchronously. Pair similarities are memoized for the
/// lifetime of the matcher, so reuse one instance across a batch.
pub struct AthleteMatcher {
    settings: MatchSettings,
    memo: HashMap<(String, String), u8>,
}

impl AthleteMatcher {
    pub fn new(settings: MatchSettings) -> Self {
        Self {
            settings,
            memo: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn find_best_match<'a>(
        &mut self,
        first_name: &str,
        last_name: &str,
        roster: &'a [Athlete],
        birth_year: Option<i32>,
    ) -> MatchOutcome<'a> {
        let min_similarity = self.settings.min_similarity;
        self.find_best_match_with(first_name, last_name, roster, birth_year, min_similarity)
    }

    pub fn find_best_match_with<'a>(
        &mut self,
        first_name: &str,
        last_name: &str,
        roster: &'a [Athlete],
        birth_year: Option<i32>,
        min_similarity: u8,
    ) -> MatchOutcome<'a> {
        let query = normalized_name(first_name, last_name);

        let mut best: Option<&'a Athlete> = None;
        let mut best_confidence = 0u8;
        let mut similar_athletes = Vec::new();

        for athlete in roster {
            let confidence = self.confidence_for(&query, athlete, birth_year);

            if confidence >= min_similarity {
                similar_athletes.push(athlete);
            }

            // strict comparison: the first athlete in roster order wins ties
            if confidence > best_confidence {
                best_confidence = confidence;
                best = Some(athlete);
            }
        }

        let athlete = best.filter(|_| best_confidence >= min_similarity);
        debug!(
            "Matched '{}' -> {:?} ({}%, {} similar)",
            query,
            athlete.map(|a| a.id.as_str()),
            best_confidence,
            similar_athletes.len()
        );

        MatchOutcome {
            athlete,
            confidence: best_confidence,
            similar_athletes,
        }
    }

    fn confidence_for(&mut self, query: &str, athlete: &Athlete, birth_year: Option<i32>) -> u8 {
        let forward = normalized_name(&athlete.first_name, &athlete.last_name);
        let reversed = normalized_name(&athlete.last_name, &athlete.first_name);

        let name_similarity = self
            .cached_similarity(query, &forward)
            .max(self.cached_similarity(query, &reversed));

        if birth_year == Some(athlete.birth_year) {
            name_similarity.saturating_add(self.settings.birth_year_bonus).min(100)
        } else {
            name_similarity
        }
    }

    fn cached_similarity(&mut self, query: &str, candidate: &str) -> u8 {
        let key = (query.to_string(), candidate.to_string());
        *self
            .memo
            .entry(key)
            .or_insert_with(|| similarity(query, candidate))
    }
}

impl Default for AthleteMatcher {
    fn default() -> Self {
        Self::new(MatchSettings::default())
    }
}

/// One-shot lookup with default settings and a custom threshold.
pub fn find_best_match<'a>(
    first_name: &str,
    last_name: &str,
    roster: &'a [Athlete],
    birth_year: Option<i32>,
    min_similarity: u8,
) -> MatchOutcome<'a> {
    AthleteMatcher::default().find_best_match_with(first_name, last_name, roster, birth_year, min_similarity)
}

fn normalized_name(first: &str, second: &str) -> String {
    format!("{} {}", first, second).trim().to_lowercase()
}
