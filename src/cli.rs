use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "judo ranking backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Reset the database and load a JSON snapshot into it
    Seed {
        /// Snapshot with levels, athletes, tournaments and results
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Write the whole database to a JSON snapshot
    Snapshot {
        /// Target file, overwritten if it exists
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Match a JSON file of result rows against the roster
    Import {
        /// Tournament the rows belong to
        #[arg(short, long)]
        tournament: String,
        /// JSON array of row objects keyed by column header
        #[arg(short, long)]
        file: PathBuf,
        /// Write the results instead of only printing the preview
        #[arg(long, default_value_t = false)]
        apply: bool,
        /// JSON object mapping row numbers to import/skip/create/overwrite
        #[arg(long)]
        decisions: Option<PathBuf>,
    },
    /// Print the ranking, optionally exporting it as CSV
    Rank {
        #[arg(long)]
        year: Option<i32>,
        /// m, w, d or the full word
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        tournament: Option<String>,
        /// Tournament level id, repeatable
        #[arg(long = "level")]
        levels: Vec<String>,
        #[arg(long)]
        birth_year_min: Option<i32>,
        #[arg(long)]
        birth_year_max: Option<i32>,
        #[arg(long)]
        age_group: Option<String>,
        /// Write a semicolon-separated export to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}
