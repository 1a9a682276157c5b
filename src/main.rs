use anyhow::Result;

use judo_ranking::cli::Command;
use judo_ranking::{handle_import, handle_rank, handle_seed, handle_serve, handle_snapshot, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Seed { file } => handle_seed(file),
        Command::Snapshot { file } => handle_snapshot(file),
        Command::Import { tournament, file, apply, decisions } => {
            handle_import(tournament, file, *apply, decisions.as_deref())
        }
        Command::Rank {
            year,
            gender,
            tournament,
            levels,
            birth_year_min,
            birth_year_max,
            age_group,
            export,
        } => handle_rank(
            *year,
            gender.as_deref(),
            tournament.as_deref(),
            levels,
            *birth_year_min,
            *birth_year_max,
            age_group.as_deref(),
            export.as_ref(),
        ),
        Command::Serve { port } => handle_serve(*port),
    }
}
