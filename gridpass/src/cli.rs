//! Process command-line options and run one generation.
//!
//! # Examples
//!
//! Generate a 10×10 grid with letters and digits only, print it with index
//! headers and keep a copy:
//!
//! ```text
//! $ gridpass -s 10 --no-symbols --headers -o grid.csv
//! ```
//!
//! Derive another password from the stored grid:
//!
//! ```text
//! $ gridpass -g grid.csv
//! ```

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gridpass_core::{CharGrid, GridConfig, RenderOptions, SymbolSet, render};
use gridpass_gen::{Derivation, GenerateError, Generated, Generator, PersistError, load, save};
use gridpass_paths::CostModel;
use log::{LevelFilter, debug};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

/// Derive a memorable password from a path across a random character grid.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Side length of the generated grid
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(2..))]
    size: u16,

    /// Use letters and digits only
    #[arg(long, default_value_t = false)]
    no_symbols: bool,

    /// Derive a new password from a stored grid instead of generating one
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["size", "no_symbols"])]
    grid: Option<PathBuf>,

    /// Store the grid to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Seed the random source for a reproducible result
    #[arg(long)]
    seed: Option<u64>,

    /// Print row and column indices around the grid
    #[arg(long, default_value_t = false)]
    headers: bool,

    /// Reward a character class on its first occurrence instead of its
    /// second
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    fn grid_config(&self) -> GridConfig {
        let symbols = if self.no_symbols {
            SymbolSet::NoSpecial
        } else {
            SymbolSet::All
        };
        GridConfig::new(usize::from(self.size), symbols)
    }

    fn cost_model(&self) -> CostModel {
        if self.strict {
            CostModel::strict()
        } else {
            CostModel::default()
        }
    }
}

/// Failure of a command-line run.
#[derive(Debug)]
enum CliError {
    Generate(GenerateError),
    Persist(PersistError),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate(e) => write!(f, "{e}"),
            Self::Persist(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "cannot encode result: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<GenerateError> for CliError {
    fn from(e: GenerateError) -> Self {
        Self::Generate(e)
    }
}

impl From<PersistError> for CliError {
    fn from(e: PersistError) -> Self {
        Self::Persist(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// JSON shape of a run.
#[derive(Serialize)]
struct Report<'a> {
    grid: &'a CharGrid,
    #[serde(flatten)]
    derivation: &'a Derivation,
}

/// Parse the command line, run, and map the outcome to an exit code.
pub fn run() -> ExitCode {
    let args = Args::parse();
    init_logger(args.debug);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn execute(args: &Args) -> Result<(), CliError> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut generator = Generator::new(rng).with_cost_model(args.cost_model());

    let (grid, derivation) = match &args.grid {
        Some(path) => {
            let grid = load(path)?;
            let derivation = generator.generate_from_existing(&grid)?;
            (grid, derivation)
        }
        None => {
            let config = args.grid_config();
            debug!("generating with {config:?}");
            let Generated { grid, derivation } = generator.generate_new(&config)?;
            (grid, derivation)
        }
    };

    if let Some(path) = &args.save {
        save(&grid, path)?;
    }

    print!("{}", format_report(&grid, &derivation, args)?);
    Ok(())
}

fn format_report(grid: &CharGrid, derivation: &Derivation, args: &Args) -> Result<String, CliError> {
    if args.json {
        let report = Report { grid, derivation };
        return Ok(serde_json::to_string_pretty(&report)? + "\n");
    }
    let opts = if args.headers {
        RenderOptions::with_headers()
    } else {
        RenderOptions::default()
    };
    Ok(format!(
        "{}\n{}\npassword: {}\n",
        render(grid, opts),
        derivation.anchors,
        derivation.password
    ))
}
