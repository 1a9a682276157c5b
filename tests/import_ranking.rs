use std::collections::HashMap;

use chrono::NaiveDate;

use judo_ranking::config::AppConfig;
use judo_ranking::domain::{
    Athlete, Gender, MatchStatus, PointSchedule, RankingFilters, Tournament, TournamentLevel,
};
use judo_ranking::import::{ImportDecision, RawRow};
use judo_ranking::services::{DecisionOverrides, ImportService, RankingService, SeedService, Snapshot};
use judo_ranking::storage::{MemoryStore, SqliteStore, Store};

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>()
}

fn athlete(id: &str, first: &str, last: &str, birth_year: i32, gender: Gender) -> Athlete {
    Athlete {
        id: id.to_string(),
        import_id: String::new(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        birth_year,
        gender,
        club: Some("JC Musterstadt".to_string()),
        district: None,
    }
}

fn snapshot() -> Snapshot {
    let level = TournamentLevel {
        id: "BEM".to_string(),
        name: "Bezirkseinzelmeisterschaft".to_string(),
        schedule: PointSchedule {
            points_place_1: 8,
            points_place_2: 6,
            points_place_3: 4,
            points_place_5: 2,
            points_place_7: 1,
        },
    };
    let spring = Tournament::from_level(
        "t-spring",
        "Frühjahrsturnier",
        &level,
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        Some("U15".to_string()),
    );
    let autumn = Tournament::from_level(
        "t-autumn",
        "Herbstturnier",
        &level,
        NaiveDate::from_ymd_opt(2024, 10, 12).unwrap(),
        Some("U15".to_string()),
    );

    Snapshot {
        levels: vec![level],
        athletes: vec![
            athlete("a-anna", "Anna", "Muster", 2010, Gender::Female),
            athlete("a-berta", "Berta", "Beispiel", 2011, Gender::Female),
            athlete("a-carl", "Carl", "Probe", 2010, Gender::Male),
        ],
        tournaments: vec![spring, autumn],
        results: Vec::new(),
    }
}

fn run_scenario(store: &dyn Store) {
    let config = AppConfig::default();
    SeedService::new(store).load(&snapshot()).unwrap();
    let import = ImportService::new(store, &config);

    let spring_rows = vec![
        row(&[("Nachname", "Muster"), ("Vorname", "Anna"), ("Jahrgang", "2010"), ("Platz", "3")]),
        row(&[("Name", "Berta Beispiel"), ("Jahrgang", "11"), ("Platz", "1.")]),
        row(&[("Name", "Carl Probe"), ("Platz", "3")]),
        row(&[("Name", "Nobody Here"), ("Platz", "4")]),
    ];
    let preview = import.preview("t-spring", &spring_rows).unwrap();

    let anna = &preview.rows[0];
    assert_eq!(anna.matched_athlete.as_ref().map(|a| a.id.as_str()), Some("a-anna"));
    assert_eq!(anna.confidence, 100);
    assert_eq!(anna.match_status, MatchStatus::Exact);
    assert_eq!(anna.points, 4);
    assert!(anna.warnings.is_empty());
    assert!(anna.conflict.is_none());
    assert_eq!(preview.skipped.len(), 1);

    let summary = import.apply(&preview).unwrap();
    assert_eq!(summary.imported, 3);
    assert!(summary.errors.is_empty());

    let autumn_rows = vec![
        row(&[("Vorname", "Ana"), ("Nachname", "Muster"), ("Platz", "1")]),
        row(&[("Vorname", "Carl"), ("Nachname", "Probe"), ("Platz", "5")]),
        row(&[
            ("Vorname", "Dora"),
            ("Nachname", "Neu"),
            ("Jahrgang", "2012"),
            ("Geschlecht", "w"),
            ("Platz", "2"),
        ]),
    ];
    let mut preview = import.preview("t-autumn", &autumn_rows).unwrap();
    assert_eq!(preview.rows[0].match_status, MatchStatus::Similar);
    assert_eq!(preview.rows[2].match_status, MatchStatus::Unknown);
    import
        .apply_overrides(&mut preview, &DecisionOverrides::from([(3, ImportDecision::Create)]))
        .unwrap();
    let summary = import.apply(&preview).unwrap();
    assert_eq!(summary.imported, 3);
    assert_eq!(summary.created, 1);

    let ranking = RankingService::new(store);
    let entries = ranking.ranking(&RankingFilters::default()).unwrap();
    let table: Vec<(&str, i32, usize)> = entries
        .iter()
        .map(|e| (e.athlete.last_name.as_str(), e.total_points, e.rank))
        .collect();
    // Anna 4 + 8, Berta 8, Carl 4 + 2, Dora 6
    assert_eq!(
        table,
        vec![("Muster", 12, 1), ("Beispiel", 8, 2), ("Probe", 6, 3), ("Neu", 6, 3)]
    );

    let girls = ranking
        .ranking(&RankingFilters {
            gender: Some(Gender::Female),
            birth_year_max: Some(2011),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(girls.len(), 2);
    assert_eq!(ranking.years().unwrap(), vec![2024]);

    let stats = ranking.athlete_stats("a-anna").unwrap().unwrap();
    assert_eq!(stats.total_tournaments, 2);
    assert_eq!(stats.average_placement, 2.0);
}

#[test]
fn test_import_and_rank_in_memory() {
    run_scenario(&MemoryStore::new());
}

#[test]
fn test_import_and_rank_in_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ranking.db");

    {
        let store = SqliteStore::open(path.to_str().unwrap()).unwrap();
        run_scenario(&store);
    }

    // data survives reopening the file
    let reopened = SqliteStore::open(path.to_str().unwrap()).unwrap();
    assert_eq!(reopened.list_results().unwrap().len(), 6);
    assert_eq!(reopened.list_athletes().unwrap().len(), 4);
}
