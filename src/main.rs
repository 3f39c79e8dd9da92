// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line front end for the decoration generator.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use deco_search::constants::{MAX_FACTOR, MAX_SIZE};
use deco_search::search::{run, SearchConfig};
use deco_search::state::Counter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "decogen")]
#[command(about = "Generate all double decorations with a given factor, without isomorphic duplicates")]
struct Cmd {
    /// Generate decorations with factor FACTOR (or smaller with -a)
    factor: Option<String>,

    /// Write decocode to stdout or outfile
    #[arg(short = 'd', long = "decocode")]
    decocode: bool,

    /// Generate decorations with smaller factors
    #[arg(short, long)]
    all: bool,

    /// Generate decorations with connectivity 1/2/3
    #[arg(short, long, default_value_t = 3)]
    connectivity: i64,

    /// Write to OUTFILE instead of stdout
    #[arg(short, long, value_name = "OUTFILE")]
    output: Option<PathBuf>,

    /// Number of residue classes of a partitioned run
    #[arg(short = 'm', long = "mod", default_value_t = 1)]
    modulus: u64,

    /// Residue class to generate in a partitioned run
    #[arg(short = 'r', long = "res", default_value_t = 0)]
    residue: u64,

    /// Search depth at which a partitioned run splits
    #[arg(short = 's', long = "split", default_value_t = 3)]
    split_level: u32,

    /// Write the planar code of every predecoration
    #[arg(short = 'p', long = "predeco")]
    predeco: bool,

    /// Only count completions accepted by the lsp filter
    #[arg(short = 'l', long = "lsp")]
    lsp: bool,
}

#[derive(Debug, Error)]
enum UsageError {
    #[error("Connectivity has to be 1, 2 or 3.")]
    Connectivity,
    #[error("\"{0}\" is no positive numeric value.")]
    Factor(String),
    #[error("inflation rates higher than {0} are not supported.")]
    FactorTooLarge(usize),
    #[error("-d and -p are mutually exclusive")]
    ConflictingOutputs,
}

fn parse_config(cmd: &Cmd, factor: &str) -> Result<SearchConfig, UsageError> {
    if !(1..=3).contains(&cmd.connectivity) {
        return Err(UsageError::Connectivity);
    }
    if cmd.decocode && cmd.predeco {
        return Err(UsageError::ConflictingOutputs);
    }
    let parsed: i64 = factor.parse().unwrap_or(0);
    if parsed < 1 {
        return Err(UsageError::Factor(factor.to_string()));
    }
    if parsed as usize > MAX_FACTOR {
        return Err(UsageError::FactorTooLarge(MAX_SIZE / 2));
    }

    let mut config = SearchConfig::new(parsed as usize);
    config.connectivity = cmd.connectivity as u32;
    config.all = cmd.all;
    config.deco_output = cmd.decocode;
    config.predeco_output = cmd.predeco;
    config.filter_lsp = cmd.lsp;
    config.modulus = cmd.modulus;
    config.residue = cmd.residue;
    config.split_level = cmd.split_level;
    Ok(config)
}

/// Options that are accepted for compatibility but do not change what
/// gets generated; see DESIGN.md.
fn warn_inert_options(cmd: &Cmd) {
    if cmd.all {
        tracing::warn!("--all is accepted but does not change the generated set");
    }
    if cmd.connectivity != 3 {
        tracing::warn!(
            connectivity = cmd.connectivity,
            "connectivity selection is accepted but not applied"
        );
    }
    if cmd.modulus != 1 || cmd.residue != 0 || cmd.split_level != 3 {
        tracing::warn!("--mod/--res/--split are accepted but do not partition the output");
    }
    if cmd.decocode {
        tracing::warn!("decocode output is not wired; no structures will be written");
    }
}

fn generate(config: &SearchConfig, output: Option<&Path>) -> Result<()> {
    let stats = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open {} for writing", path.display()))?;
            let mut out = BufWriter::new(file);
            let stats = run(config, &mut out)?;
            out.flush()?;
            stats
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let stats = run(config, &mut out)?;
            out.flush()?;
            stats
        }
    };

    eprintln!(
        "{} decorations ({} predecorations)",
        stats.decorations(),
        stats.get(Counter::Predecorations)
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cmd = Cmd::parse();
    let Some(factor) = cmd.factor.clone() else {
        let _ = Cmd::command().write_help(&mut io::stderr());
        let _ = io::stderr().write_all(b"\n");
        return ExitCode::FAILURE;
    };

    let config = match parse_config(&cmd, &factor) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    warn_inert_options(&cmd);

    match generate(&config, cmd.output.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
