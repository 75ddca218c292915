//! Command implementations for the drought monitor CLI.
//!
//! Each subcommand runs one piece of the dashboard pipeline over a region
//! dataset saved as JSON (the payload the region picker delivers), so the
//! numbers on screen can be reproduced and scripted.

use anyhow::Context;
use clap::Subcommand;
use dm_core::config::DashboardConfig;
use dm_core::region::RegionDataset;
use std::fs::File;
use std::io::{self, Write};

pub mod inspect;
pub mod report;

#[derive(Subcommand)]
pub enum Command {
    /// Region average for every timestamp, as CSV (time,mean)
    Summarize {
        /// Region dataset JSON
        #[arg(short, long)]
        input: String,

        /// Variable to read (defaults to the config's variable)
        #[arg(long)]
        variable: Option<String>,

        /// Output CSV path (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Histogram of the region at one time, as CSV (edge,percent)
    Histogram {
        #[arg(short, long)]
        input: String,

        #[arg(long)]
        variable: Option<String>,

        /// Canonical time, e.g. 2020-06-01
        #[arg(short, long)]
        time: String,

        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write the bar-chart download file for one time
    Export {
        #[arg(short, long)]
        input: String,

        #[arg(long)]
        variable: Option<String>,

        #[arg(short, long)]
        time: String,

        /// Output path (defaults to bar-chart-{time}.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Resolve a `zoom`/`center` query string the way the dashboard does on load
    ResolveUrl {
        /// Query string, e.g. "zoom=3&center=10,20"
        query: String,
    },

    /// List the selectable periods of each year and whether data is published
    Periods {
        /// Only this year
        #[arg(short, long)]
        year: Option<i32>,
    },
}

pub fn run(config_path: Option<&str>, command: Command) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    match command {
        Command::Summarize {
            input,
            variable,
            output,
        } => {
            let variable = variable.unwrap_or_else(|| config.variable.clone());
            let dataset = load_dataset(&input, &variable)?;
            report::summarize(&dataset, &variable, &mut open_output(output.as_deref())?)
        }
        Command::Histogram {
            input,
            variable,
            time,
            output,
        } => {
            let variable = variable.unwrap_or_else(|| config.variable.clone());
            let dataset = load_dataset(&input, &variable)?;
            report::histogram(&config, &dataset, &time, &mut open_output(output.as_deref())?)
        }
        Command::Export {
            input,
            variable,
            time,
            output,
        } => {
            let variable = variable.unwrap_or_else(|| config.variable.clone());
            let dataset = load_dataset(&input, &variable)?;
            let doc = report::export_document(&config, &dataset, &time, chrono::Utc::now())?;
            let path = output.unwrap_or_else(|| doc.file_name());
            let json = doc.to_pretty_json()?;
            std::fs::write(&path, json).with_context(|| format!("writing {path}"))?;
            log::info!("Export written to {}", path);
            Ok(())
        }
        Command::ResolveUrl { query } => inspect::resolve_url(&query, &mut io::stdout()),
        Command::Periods { year } => inspect::periods(&config, year, &mut io::stdout()),
    }
}

/// The built-in drought product, or a JSON config file.
pub fn load_config(path: Option<&str>) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(path) => {
            let json =
                std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
            DashboardConfig::from_json(&json).with_context(|| format!("parsing config {path}"))
        }
        None => Ok(DashboardConfig::default()),
    }
}

pub fn load_dataset(path: &str, variable: &str) -> anyhow::Result<RegionDataset> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let dataset = RegionDataset::from_json(&json, variable)
        .with_context(|| format!("parsing region dataset {path}"))?;
    log::info!(
        "Loaded {} timestamps of {} from {}",
        dataset.times().len(),
        variable,
        path
    );
    Ok(dataset)
}

fn open_output(path: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path).with_context(|| format!("creating {path}"))?),
        None => Box::new(io::stdout()),
    })
}
