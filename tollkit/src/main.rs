//! tollkit CLI - transformations over toll network CSV files
//!
//! # Vehicle dataset (`id_1`, `id_2`, `route`, `car`, `bus`, `truck`, ...)
//!
//! ```bash
//! tollkit car-matrix dataset-1.csv        # car values as an id x id matrix
//! tollkit type-count dataset-1.csv        # low / medium / high counts
//! tollkit bus-indexes dataset-1.csv       # rows with bus > 2x mean
//! tollkit filter-routes dataset-1.csv     # routes with mean truck > 7
//! tollkit multiply-matrix dataset-1.csv   # conditionally scaled car matrix
//! ```
//!
//! # Interval dataset (`id`, `id_2`, `startDay`, `startTime`, `endDay`, `endTime`)
//!
//! ```bash
//! tollkit time-check dataset-2.csv        # full-week coverage per pair
//! ```
//!
//! # Distance dataset (`id_start`, `id_end`, `distance`)
//!
//! ```bash
//! tollkit distance-matrix dataset-3.csv   # symmetric shortest distances
//! tollkit unroll dataset-3.csv            # long-form rows
//! tollkit threshold dataset-3.csv         # prompts for the reference id
//! tollkit toll-rates dataset-3.csv        # per-vehicle toll rates
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tollkit::error::{PipelineError, PipelineResult};
use tollkit::logs::{self, log_info, log_warning};
use tollkit::render::{
    render_counts, render_coverage, render_distance_rows, render_list, render_matrix, render_toll_rows,
};
use tollkit::transform::pipeline::{self, LongFormSource};
use tollkit::{Id, OutputFormat, Settings, ThresholdBasis};

#[derive(Parser)]
#[command(name = "tollkit")]
#[command(about = "Transform toll network CSV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON settings file (thresholds, rates)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Matrix of car values indexed by id_1 x id_2
    CarMatrix {
        /// Input CSV file
        input: PathBuf,
    },

    /// Count values per category (low < 15 <= medium < 25 <= high)
    TypeCount {
        /// Input CSV file
        input: PathBuf,

        /// Numeric column to categorize
        #[arg(long, default_value = "car")]
        column: String,
    },

    /// Row indexes whose value exceeds twice the column mean
    BusIndexes {
        /// Input CSV file
        input: PathBuf,

        /// Numeric column to compare
        #[arg(long, default_value = "bus")]
        column: String,
    },

    /// Routes whose mean value exceeds the route threshold
    FilterRoutes {
        /// Input CSV file
        input: PathBuf,

        /// Grouping column
        #[arg(long, default_value = "route")]
        key: String,

        /// Numeric column to average
        #[arg(long, default_value = "truck")]
        column: String,
    },

    /// Car matrix with cells > 20 scaled by 0.75, others by 1.25
    MultiplyMatrix {
        /// Input CSV file
        input: PathBuf,
    },

    /// Check that each (id, id_2) pair covers the full week
    TimeCheck {
        /// Input CSV file
        input: PathBuf,
    },

    /// All-pairs shortest distance matrix
    DistanceMatrix {
        /// Input CSV file of edges
        input: PathBuf,
    },

    /// Distance matrix unrolled into (id_start, id_end, distance) rows
    Unroll {
        /// Input CSV file of edges
        input: PathBuf,
    },

    /// Ids whose mean distance lies within the percentage band of a reference id
    Threshold {
        /// Input CSV file of edges (or long-form rows with --unrolled)
        input: PathBuf,

        /// Reference id (prompted on stdin if omitted)
        #[arg(short, long)]
        reference_id: Option<Id>,

        /// Compare individual row distances instead of per-id means
        #[arg(long)]
        per_row: bool,

        /// Input is already long-form
        #[arg(long)]
        unrolled: bool,
    },

    /// Per-vehicle toll rates for every long-form row
    TollRates {
        /// Input CSV file of edges (or long-form rows with --unrolled)
        input: PathBuf,

        /// Input is already long-form
        #[arg(long)]
        unrolled: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logs::init(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> PipelineResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let format = cli.format;

    let rendered = match cli.command {
        Commands::CarMatrix { input } => render_matrix(&pipeline::car_matrix(&input)?, format)?,

        Commands::TypeCount { input, column } => {
            render_counts(&pipeline::type_count(&input, &column, &settings)?, format)?
        }

        Commands::BusIndexes { input, column } => {
            render_list(&pipeline::bus_indexes(&input, &column, &settings)?, "index", format)?
        }

        Commands::FilterRoutes { input, key, column } => {
            render_list(&pipeline::filter_routes(&input, &key, &column, &settings)?, &key, format)?
        }

        Commands::MultiplyMatrix { input } => render_matrix(&pipeline::multiply_matrix(&input, &settings)?, format)?,

        Commands::TimeCheck { input } => render_coverage(&pipeline::time_check(&input)?, format)?,

        Commands::DistanceMatrix { input } => render_matrix(&pipeline::distance_matrix(&input)?, format)?,

        Commands::Unroll { input } => {
            render_distance_rows(&pipeline::long_form_rows(&input, LongFormSource::Edges)?, format)?
        }

        Commands::Threshold {
            input,
            reference_id,
            per_row,
            unrolled,
        } => {
            let reference_id = match reference_id {
                Some(id) => id,
                None => prompt_reference_id()?,
            };
            let basis = if per_row {
                ThresholdBasis::RowDistance
            } else {
                ThresholdBasis::GroupMean
            };
            let ids = pipeline::threshold_ids(&input, source(unrolled), reference_id, basis, &settings)?;
            if ids.is_empty() {
                log_warning("No ids within the threshold");
            }
            render_list(&ids, "id_start", format)?
        }

        Commands::TollRates { input, unrolled } => {
            render_toll_rows(&pipeline::toll_rates(&input, source(unrolled), &settings)?, format)?
        }
    };

    write_output(&rendered, cli.output.as_deref())
}

fn source(unrolled: bool) -> LongFormSource {
    if unrolled {
        LongFormSource::Unrolled
    } else {
        LongFormSource::Edges
    }
}

fn prompt_reference_id() -> PipelineResult<Id> {
    eprint!("Enter the reference_id: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let raw = line.trim();
    raw.parse::<Id>()
        .map_err(|_| PipelineError::InvalidInput(format!("reference id must be an integer, got '{}'", raw)))
}

fn write_output(content: &str, path: Option<&Path>) -> PipelineResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            log_info(format!("Output written to: {}", p.display()));
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
