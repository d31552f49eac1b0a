//! Command implementations for the CDS CLI.
//!
//! Every command loads both tables from disk first; a `DataLoadError` ends
//! the command before anything is printed.

use cds_db::Database;
use clap::{Args, Subcommand};

pub mod inspect;
pub mod render;

/// Locations of the two source tables.
#[derive(Args, Debug, Clone)]
pub struct DataPaths {
    /// Aggregated (per-district) CSV
    #[arg(long, global = true, default_value = cds_core::AGGREGATED_PATH)]
    pub aggregated: String,

    /// Unaggregated (per-observation) CSV
    #[arg(long, global = true, default_value = cds_core::UNAGGREGATED_PATH)]
    pub unaggregated: String,
}

impl DataPaths {
    pub fn open(&self) -> anyhow::Result<Database> {
        log::info!("Loading {} and {}", self.aggregated, self.unaggregated);
        Ok(Database::from_paths(&self.aggregated, &self.unaggregated)?)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Load both tables and report row counts and dangling references
    Validate,

    /// Print the pie chart model as JSON
    Pie {
        /// Restrict to one district (e.g. cd1)
        #[arg(short, long)]
        district: Option<String>,
    },

    /// Print the choropleth model as JSON
    Map {
        /// Restrict to districts with this aggregated metric label
        #[arg(short, long)]
        metric: Option<String>,
    },

    /// Click a district, then its largest slice, and print both renders
    ClickThrough {
        /// District to click on the map
        #[arg(short, long, default_value = cds_core::DEFAULT_DISTRICT)]
        district: String,
    },
}

pub fn run(paths: &DataPaths, command: Command) -> anyhow::Result<()> {
    let db = paths.open()?;
    match command {
        Command::Validate => {
            let report = inspect::validate(&db)?;
            print!("{}", report);
            Ok(())
        }
        Command::Pie { district } => {
            let chart = cds_view::render_pie(&db, district.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&chart)?);
            Ok(())
        }
        Command::Map { metric } => {
            let chart = cds_view::render_map(&db, metric.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&chart)?);
            Ok(())
        }
        Command::ClickThrough { district } => {
            let walk = render::click_through(db, &district)?;
            println!("{}", serde_json::to_string_pretty(&walk)?);
            Ok(())
        }
    }
}
