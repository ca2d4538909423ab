use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tsresolve_core::{TsConfig, TsConfigCache};

mod config;
mod reporter;
mod scan;

use config::Config;

#[derive(Parser)]
#[command(name = "tsresolve")]
#[command(about = "Resolve tsconfig files the way a build-file generator sees them", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the effective configuration of a tsconfig file
    Show {
        /// tsconfig file, relative to the workspace root
        config: PathBuf,
    },
    /// List the candidate paths of a module specifier, most specific first
    Expand {
        /// tsconfig file, relative to the workspace root
        config: PathBuf,
        /// Module specifier as written in source
        specifier: String,
        /// Directory of the importing file, relative to the tsconfig directory
        #[arg(long, default_value = ".")]
        from: String,
    },
    /// Map source files to their compiled output paths
    OutPath {
        /// tsconfig file, relative to the workspace root
        config: PathBuf,
        /// Source files, relative to the tsconfig directory
        #[arg(required = true)]
        files: Vec<String>,
        /// Map to declaration output instead of JavaScript output
        #[arg(long)]
        declaration: bool,
    },
    /// Resolve every tsconfig file in the workspace
    Scan,
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let mut cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();
    cli.config.initialize()?;
    let cfg = cli.config;
    let root = cfg.root()?.clone();

    let load = |config: &PathBuf| -> Result<Arc<TsConfig>> {
        let config_path = cfg.workspace_relative(config)?;
        let resolver = cfg.extends_resolver()?;
        TsConfigCache::new()
            .load(resolver.as_ref(), &root, &config_path)
            .with_context(|| format!("Failed to resolve {}", config_path))
    };

    match cli.command {
        Commands::Show { config } => {
            let tsconfig = load(&config)?;
            reporter::print_config(&mut stdout, &tsconfig)?;
        }
        Commands::Expand { config, specifier, from } => {
            let tsconfig = load(&config)?;
            let candidates = tsconfig.expand_paths(&from, &specifier);
            reporter::print_candidates(&mut stdout, &specifier, &candidates)?;
        }
        Commands::OutPath { config, files, declaration } => {
            let tsconfig = load(&config)?;
            let mapped: Vec<(String, String)> = files
                .into_iter()
                .map(|file| {
                    let output = if declaration {
                        tsconfig.to_declaration_out_dir(&file)
                    } else {
                        tsconfig.to_out_dir(&file)
                    };
                    (file, output)
                })
                .collect();
            reporter::print_out_paths(&mut stdout, &mapped)?;
        }
        Commands::Scan => {
            let num_threads = rayon::current_num_threads();
            info!("Running tsconfig scan (using {} threads)", num_threads);

            let result = scan::run_scan(&cfg)?;
            reporter::print_scan_summary(&mut stdout, &result)?;

            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                start.elapsed().as_millis().to_string().cyan(),
                (result.resolved.len() + result.failures.len()).to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            if !result.failures.is_empty() {
                // Non-zero exit to fail CI
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
