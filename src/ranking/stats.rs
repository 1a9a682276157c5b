use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{Placement, Tournament, TournamentResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteResultDetail {
    pub result: TournamentResult,
    pub tournament_name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionPoint {
    pub date: NaiveDate,
    pub cumulative_points: i32,
    pub tournament_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteStats {
    pub total_tournaments: usize,
    pub total_points: i32,
    /// Rounded to one decimal.
    pub average_placement: f64,
    pub best_placement: Option<Placement>,
    pub results_by_year: BTreeMap<i32, Vec<AthleteResultDetail>>,
    pub points_progression: Vec<ProgressionPoint>,
}

/// Career overview for one athlete, `None` when they have no results yet.
///
/// Results pointing at unknown tournaments are ignored.
pub fn athlete_stats(
    athlete_id: &str,
    results: &[TournamentResult],
    tournaments: &[Tournament],
) -> Option<AthleteStats> {
    let tournaments_by_id: HashMap<&str, &Tournament> =
        tournaments.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut details: Vec<AthleteResultDetail> = results
        .iter()
        .filter(|r| r.athlete_id == athlete_id)
        .filter_map(|r| {
            tournaments_by_id.get(r.tournament_id.as_str()).map(|t| AthleteResultDetail {
                result: r.clone(),
                tournament_name: t.name.clone(),
                date: t.date,
            })
        })
        .collect();

    if details.is_empty() {
        return None;
    }
    details.sort_by_key(|d| d.date);

    let mut cumulative_points = 0;
    let points_progression = details
        .iter()
        .map(|d| {
            cumulative_points += d.result.points;
            ProgressionPoint {
                date: d.date,
                cumulative_points,
                tournament_name: d.tournament_name.clone(),
            }
        })
        .collect();

    let placement_sum: i64 = details.iter().map(|d| d.result.placement.value()).sum();
    let average = placement_sum as f64 / details.len() as f64;

    let mut results_by_year: BTreeMap<i32, Vec<AthleteResultDetail>> = BTreeMap::new();
    for detail in &details {
        results_by_year
            .entry(detail.date.year())
            .or_default()
            .push(detail.clone());
    }

    Some(AthleteStats {
        total_tournaments: details.len(),
        total_points: cumulative_points,
        average_placement: (average * 10.0).round() / 10.0,
        best_placement: details.iter().map(|d| d.result.placement).min(),
        results_by_year,
        points_progression,
    })
}
