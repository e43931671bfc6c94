//! Command implementations for the nationality dashboard CLI.
//!
//! Provides subcommands to inspect the three filing datasets from a
//! terminal and to serve the dashboard bundle with its JSON API.

use clap::{Args, Subcommand};
use nat_data::views::{TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN};
use nat_db::DatasetKind;
use std::path::PathBuf;

pub mod data;
pub mod report;
pub mod serve;

/// Where the three dataset CSV files are read from.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory holding the three dataset CSV files
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Auto-entrepreneur CSV (overrides --data-dir)
    #[arg(long)]
    pub auto_csv: Option<PathBuf>,

    /// Company CSV (overrides --data-dir)
    #[arg(long)]
    pub societe_csv: Option<PathBuf>,

    /// Combined CSV (overrides --data-dir)
    #[arg(long)]
    pub tout_csv: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print record, nationality and year coverage of every dataset
    Summary {
        #[command(flatten)]
        data: DataArgs,
    },

    /// List the nationality options of a dataset and its default selection
    Nationalities {
        #[command(flatten)]
        data: DataArgs,

        /// Dataset token: auto, societe or tout
        #[arg(short, long, default_value = "tout")]
        dataset: DatasetKind,
    },

    /// Rank nationalities by mean iteration count
    Top {
        #[command(flatten)]
        data: DataArgs,

        /// Dataset token: auto, societe or tout
        #[arg(short, long, default_value = "tout")]
        dataset: DatasetKind,

        /// Number of nationalities to keep
        #[arg(
            short,
            long,
            default_value_t = TOP_N_DEFAULT,
            value_parser = clap::value_parser!(u32).range(TOP_N_MIN as i64..=TOP_N_MAX as i64)
        )]
        n: u32,

        /// Print the chart figure as JSON instead of the ranking table
        #[arg(long)]
        json: bool,
    },

    /// Describe the selected-nationalities chart (all nationalities if none given)
    Selected {
        #[command(flatten)]
        data: DataArgs,

        /// Dataset token: auto, societe or tout
        #[arg(short, long, default_value = "tout")]
        dataset: DatasetKind,

        /// Nationalities to chart
        nationalities: Vec<String>,

        /// Print the chart figure as JSON instead of the series table
        #[arg(long)]
        json: bool,
    },

    /// Serve the dashboard bundle and its JSON API
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value_t = 8050)]
        port: u16,

        /// Directory of the built web bundle
        #[arg(long, default_value = "dist")]
        dist: PathBuf,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    match command {
        Command::Summary { data } => {
            let dashboard = data::load_dashboard(&data)?;
            report::write_summary(&dashboard, &mut stdout)
        }
        Command::Nationalities { data, dataset } => {
            let dashboard = data::load_dashboard(&data)?;
            report::write_nationalities(&dashboard, dataset, &mut stdout)
        }
        Command::Top {
            data,
            dataset,
            n,
            json,
        } => {
            let dashboard = data::load_dashboard(&data)?;
            report::write_top(&dashboard, dataset, n, json, &mut stdout)
        }
        Command::Selected {
            data,
            dataset,
            nationalities,
            json,
        } => {
            let dashboard = data::load_dashboard(&data)?;
            report::write_selected(&dashboard, dataset, &nationalities, json, &mut stdout)
        }
        Command::Serve {
            data,
            host,
            port,
            dist,
        } => {
            drop(stdout);
            let loaded = data::load_data(&data)?;
            serve::run_serve(loaded, &host, port, dist).await
        }
    }
}
