//! `qbctl` — operator CLI for ad-hoc query execution and schema dumps
//! against a configured QueryBench target, without going through the
//! HTTP surface.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use queryeval_core::Config;
use tracing::Level;

#[derive(Parser)]
#[command(name = "qbctl", version, about = "QueryBench operator CLI")]
struct Cli {
    /// Connection string for the target database. Defaults to
    /// PRIMARY_CONN so a single env setup works for both the API and
    /// this CLI.
    #[arg(long, env = "PRIMARY_CONN")]
    conn: String,

    /// Repeat for more verbose logging (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single ad-hoc query and print the result as a table.
    Run {
        /// Path to a file containing the SQL to run.
        sql: PathBuf,
    },
    /// Dump the target database's schema (tables, columns, keys).
    Schema,
    /// Compare a participant query against a solution query through the
    /// full evaluation pipeline, without a catalog or HTTP server.
    Check {
        /// Path to the curator's solution query.
        solution: PathBuf,
        /// Path to the participant's query.
        participant: PathBuf,
        /// User id attributed to the participant run.
        #[arg(long, default_value = "curator")]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = Config::new(cli.conn.clone());

    match cli.command {
        Command::Run { sql } => {
            let query = std::fs::read_to_string(&sql)?;
            commands::run_command::execute(&cli.conn, &query, &config).await?;
        }
        Command::Schema => {
            commands::schema_command::execute(&cli.conn).await?;
        }
        Command::Check {
            solution,
            participant,
            user_id,
        } => {
            commands::check_command::execute(&cli.conn, &solution, &participant, &user_id, &config).await?;
        }
    }

    Ok(())
}
