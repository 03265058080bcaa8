// SPDX-License-Identifier: PMPL-1.0-or-later
//! adhoc: convert cross-filter clauses into ad-hoc filters.
//!
//! Reads one clause object or an array of clauses as JSON from a file or
//! stdin and writes the converted filters (or their SQL) to stdout. Logs go
//! to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};

use adhoc_filter::{AdapterConfig, Clause, Column, FilterAdapter, FilterClause};
use adhoc_sql::{translate_to_sql, OperatorId, SimpleExpression};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "adhoc", version = VERSION, about = "Cross-filter clause to ad-hoc filter converter")]
struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// JSON adapter configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert clauses into ad-hoc filter JSON.
    Convert {
        /// Input file; stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Target clause (where or having); defaults to the configured clause.
        #[arg(long)]
        clause: Option<Clause>,

        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,
    },
    /// Print the SQL fragment for each clause.
    Sql {
        /// Input file; stdin when omitted or `-`.
        input: Option<PathBuf>,
    },
    /// List the operator table.
    Operators {
        /// Emit JSON instead of a text table.
        #[arg(long)]
        json: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AdapterConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AdapterConfig::default(),
    };

    match cli.command {
        Command::Convert {
            input,
            clause,
            pretty,
        } => {
            let (clauses, is_array) = read_clauses(input.as_deref())?;
            let target = clause.unwrap_or(config.default_clause);
            let adapter = FilterAdapter::new(config)?;
            tracing::info!(count = clauses.len(), clause = %target, "Converting clauses");

            let filters = clauses
                .iter()
                .map(|c| adapter.simple_filter_to_adhoc(c, target).to_json())
                .collect::<Result<Vec<Value>, _>>()?;
            let output = if is_array {
                Value::Array(filters)
            } else {
                filters.into_iter().next().unwrap_or(Value::Null)
            };
            print_json(&output, pretty)?;
        }
        Command::Sql { input } => {
            let (clauses, _) = read_clauses(input.as_deref())?;
            for clause in clauses {
                println!("{}", clause_sql(&clause, &config));
            }
        }
        Command::Operators { json } => print_operators(json)?,
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Parse a single clause object or an array of clauses. The flag records
/// whether the input was an array so output keeps the same shape.
fn read_clauses(path: Option<&Path>) -> Result<(Vec<FilterClause>, bool)> {
    let raw = read_input(path)?;
    parse_clauses(&raw)
}

fn parse_clauses(raw: &str) -> Result<(Vec<FilterClause>, bool)> {
    let value: Value = serde_json::from_str(raw).context("input is not valid JSON")?;
    match value {
        Value::Array(items) => {
            let clauses = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value(item)
                        .with_context(|| format!("clause #{i} is malformed"))
                })
                .collect::<Result<Vec<FilterClause>>>()?;
            Ok((clauses, true))
        }
        single => {
            let clause = serde_json::from_value(single).context("clause is malformed")?;
            Ok((vec![clause], false))
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

/// SQL for a clause. Computed columns are parenthesised the same way the
/// adapter does; plain columns use the bare name.
fn clause_sql(clause: &FilterClause, config: &AdapterConfig) -> String {
    let subject = match &clause.col {
        Column::Adhoc(col) => format!("({})", col.sql_expression),
        Column::Physical(name) => name.clone(),
    };
    translate_to_sql(
        &SimpleExpression {
            subject,
            operator: Some(clause.op),
            comparator: clause.val.clone(),
        },
        &config.sql,
    )
}

fn print_operators(json: bool) -> Result<()> {
    if json {
        let rows: Vec<Value> = OperatorId::ALL
            .into_iter()
            .map(|id| {
                let d = id.descriptor();
                serde_json::json!({
                    "id": id,
                    "operation": d.operation,
                    "display": d.display,
                })
            })
            .collect();
        return print_json(&Value::Array(rows), true);
    }

    for id in OperatorId::ALL {
        let d = id.descriptor();
        println!("{:<22} {:<17} {}", id.as_str(), d.operation.as_str(), d.display);
    }
    Ok(())
}
