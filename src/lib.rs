pub mod api;
pub mod camps;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod import;
pub mod matching;
pub mod ranking;
pub mod scoring;
pub mod services;
pub mod storage;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::Cli;
use log::info;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::{Gender, RankingFilters};
use crate::import::ImportPreview;
use crate::services::{
    load_overrides, load_rows, ImportService, RankingService, SeedService, ServerService, Snapshot,
};
use crate::storage::SqliteStore;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_seed(file: &Path) -> Result<()> {
    let config = AppConfig::new();
    let snapshot = Snapshot::load(file)?;
    let store = SqliteStore::open(&config.storage.database_path)?;
    store.reset()?;
    SeedService::new(&store).load(&snapshot)
}

pub fn handle_snapshot(file: &Path) -> Result<()> {
    let config = AppConfig::new();
    let store = SqliteStore::open(&config.storage.database_path)?;
    Snapshot::capture(&store)?.save(file)
}

pub fn handle_import(tournament_id: &str, file: &Path, apply: bool, decisions: Option<&Path>) -> Result<()> {
    let config = AppConfig::new();
    let store = SqliteStore::open(&config.storage.database_path)?;
    let service = ImportService::new(&store, &config);

    let rows = load_rows(file)?;
    let mut preview = service.preview(tournament_id, &rows)?;
    if let Some(path) = decisions {
        service.apply_overrides(&mut preview, &load_overrides(path)?)?;
    }
    print_preview(&preview);

    if !apply {
        info!("Dry run, nothing written. Pass --apply to store the results.");
        return Ok(());
    }

    let summary = service.apply(&preview)?;
    println!(
        "Imported: {}, overwritten: {}, athletes created: {}, skipped: {}, duplicates: {}",
        summary.imported, summary.overwritten, summary.created, summary.skipped, summary.duplicates
    );
    for error in &summary.errors {
        println!("  ! {}", error);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_rank(
    year: Option<i32>,
    gender: Option<&str>,
    tournament: Option<&str>,
    levels: &[String],
    birth_year_min: Option<i32>,
    birth_year_max: Option<i32>,
    age_group: Option<&str>,
    export: Option<&PathBuf>,
) -> Result<()> {
    let gender = gender
        .map(|value| Gender::parse(value).ok_or_else(|| anyhow!("Unknown gender '{}'", value)))
        .transpose()?;
    let filters = RankingFilters {
        year,
        tournament_id: tournament.map(str::to_string),
        tournament_levels: levels.to_vec(),
        gender,
        birth_year_min,
        birth_year_max,
        age_group: age_group.map(str::to_string),
    };

    let config = AppConfig::new();
    let store = SqliteStore::open(&config.storage.database_path)?;
    let service = RankingService::new(&store);

    if let Some(path) = export {
        let count = service.export(&filters, path)?;
        println!("Exported {} entries to {}", count, path.display());
        return Ok(());
    }

    for entry in service.ranking(&filters)? {
        println!(
            "{:>4}. {:<32} {:>4} {:>5} P ({} Turniere)",
            entry.rank,
            entry.athlete.display_name(),
            entry.athlete.birth_year,
            entry.total_points,
            entry.tournament_count
        );
    }
    Ok(())
}

fn print_preview(preview: &ImportPreview) {
    for row in &preview.rows {
        let matched = row
            .matched_athlete
            .as_ref()
            .map(|a| format!("{} ({}%)", a.display_name(), row.confidence))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}: {} {} | {} | {} -> {} P | {}",
            row.row_index + 1,
            row.first_name,
            row.last_name,
            row.placement.label(),
            matched,
            row.points,
            row.decision.as_str()
        );
        for warning in &row.warnings {
            println!("     warning: {:?}", warning);
        }
        if let Some(existing) = &row.conflict {
            println!("     existing result: {} ({} P)", existing.placement.label(), existing.points);
        }
    }
    for skipped in &preview.skipped {
        println!("{:>3}: skipped ({})", skipped.row_index + 1, skipped.reason);
    }
}
