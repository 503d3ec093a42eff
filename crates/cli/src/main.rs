// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use std::io::BufRead;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use intel_platform_domain::{IncidentStatus, NewIncident, Role};
use intel_platform_persistence::{DEFAULT_DATABASE_PATH, PersistenceError, Store, StoreConfig};
use serde::Serialize;
use tracing::{error, info};

/// Intel Platform - incident tracking and credential store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. Created on first use.
    #[arg(short, long, default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// bcrypt cost factor for newly hashed passwords
    #[arg(long)]
    hash_cost: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the store and its tables if missing
    Init,
    /// Register a new account
    Register {
        username: String,
        /// Password; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "user")]
        role: Role,
    },
    /// Check a username and password
    Login {
        username: String,
        /// Password; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Import a legacy `username,password_hash` credential file
    ImportUsers { path: PathBuf },
    /// Append a CSV file to a table
    LoadCsv { path: PathBuf, table: String },
    /// Incident operations
    #[command(subcommand)]
    Incident(IncidentCommand),
    /// Aggregate views over incidents
    #[command(subcommand)]
    Stats(StatsCommand),
}

#[derive(Subcommand, Debug)]
enum IncidentCommand {
    /// Record a new incident
    Add {
        /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
        #[arg(long)]
        timestamp: String,
        #[arg(long)]
        severity: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "Open")]
        status: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        reported_by: Option<String>,
    },
    /// Change the status of an incident
    UpdateStatus { incident_id: i64, status: IncidentStatus },
    /// Delete an incident
    Delete { incident_id: i64 },
    /// List all incidents
    List,
    /// Show one incident
    Show { incident_id: i64 },
}

#[derive(Subcommand, Debug)]
enum StatsCommand {
    /// Incident counts per category
    ByCategory,
    /// High severity incident counts per status
    HighSeverity,
    /// Categories with more than `min_count` incidents
    AboveThreshold { min_count: i64 },
    /// Incident counts per month and category
    Monthly,
}

/// Row count returned by mutating commands.
#[derive(Debug, Serialize)]
struct Affected {
    affected: usize,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Returns the password flag, or reads one line from stdin.
fn resolve_password(password: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(password) = password {
        return Ok(password);
    }

    let mut line: String = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn run_incident(
    store: &mut Store,
    command: IncidentCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        IncidentCommand::Add {
            timestamp,
            severity,
            category,
            status,
            description,
            reported_by,
        } => {
            let incident: NewIncident = NewIncident::parse(
                &timestamp,
                &severity,
                &category,
                &status,
                description.as_deref(),
                reported_by.as_deref(),
            )?;
            let incident_id: i64 = store.incidents().insert(&incident)?;
            print_json(&serde_json::json!({ "incident_id": incident_id }))
        }
        IncidentCommand::UpdateStatus {
            incident_id,
            status,
        } => {
            let affected: usize = store.incidents().update_status(incident_id, status)?;
            print_json(&Affected { affected })
        }
        IncidentCommand::Delete { incident_id } => {
            let affected: usize = store.incidents().delete(incident_id)?;
            print_json(&Affected { affected })
        }
        IncidentCommand::List => print_json(&store.incidents().list_all()?),
        IncidentCommand::Show { incident_id } => match store.incidents().get(incident_id)? {
            Some(incident) => print_json(&incident),
            None => Err(PersistenceError::NotFound(format!("Incident {incident_id}")).into()),
        },
    }
}

fn run_stats(store: &mut Store, command: StatsCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        StatsCommand::ByCategory => print_json(&store.incidents().count_by_category()?),
        StatsCommand::HighSeverity => {
            print_json(&store.incidents().count_high_severity_by_status()?)
        }
        StatsCommand::AboveThreshold { min_count } => {
            print_json(&store.incidents().categories_above_threshold(min_count)?)
        }
        StatsCommand::Monthly => print_json(&store.incidents().count_by_month_and_category()?),
    }
}

fn run(store: &mut Store, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Init => print_json(&store.table_names()?),
        Command::Register {
            username,
            password,
            role,
        } => {
            let password: String = resolve_password(password)?;
            let user_id: i64 = store.users().register(&username, &password, role)?;
            print_json(&serde_json::json!({ "user_id": user_id, "username": username }))
        }
        Command::Login { username, password } => {
            let password: String = resolve_password(password)?;
            let session = store.users().authenticate(&username, &password)?;
            print_json(&serde_json::json!({
                "user_id": session.user_id,
                "username": session.username,
                "role": session.role,
            }))
        }
        Command::ImportUsers { path } => {
            print_json(&store.users().import_legacy_credentials_file(&path)?)
        }
        Command::LoadCsv { path, table } => {
            let appended: usize = store.load_csv(&path, &table)?;
            print_json(&serde_json::json!({ "table": table, "appended": appended }))
        }
        Command::Incident(command) => run_incident(store, command),
        Command::Stats(command) => run_stats(store, command),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config: StoreConfig = StoreConfig::file(&args.database);
    if let Some(hash_cost) = args.hash_cost {
        config = config.with_hash_cost(hash_cost);
    }

    info!("Using database at: {}", args.database.display());
    let mut store: Store = Store::open(&config)?;

    let result = run(&mut store, args.command);
    store.close();

    if let Err(e) = &result {
        error!("Command failed: {e}");
    }
    result
}
