// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Command-line inspection tool for native VSS tree files.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! `vsstree`: load a native VSS tree and query, export or rewrite it.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, LevelFilter};
use vss_tree::export::{subtree_json, write_leaf_list};
use vss_tree::{save_tree, search, Tree, TreeConfig};

/// Native VSS tree inspection tool.
#[derive(Debug, Parser)]
#[command(author = "Lukas Bower", version, about = "Native VSS tree inspection tool", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tree file, overriding the configuration.
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a dotted path and print matches.
    Search {
        /// Path such as `Vehicle.Cabin.*`.
        path: String,
        /// Expand a trailing wildcard to every leaf below it.
        #[arg(long, default_value_t = false)]
        all_depths: bool,
        /// Result capacity; defaults to the configured value.
        #[arg(long)]
        max_found: Option<usize>,
    },
    /// Write the sorted leaf path list.
    Leaves {
        /// Output file; defaults to the configured leaf list path.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a JSON document for the subtree a path resolves to.
    Json {
        /// Path of the subtree root.
        path: String,
        /// Levels to render; 0 renders everything.
        #[arg(long, default_value_t = 0)]
        depth: usize,
    },
    /// Re-encode the tree into another file.
    Rewrite {
        /// Output file.
        out: PathBuf,
    },
    /// Print node count, leaf count and depth.
    Stats,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn resolve_config(cli: &Cli) -> Result<TreeConfig> {
    let mut config = match &cli.config {
        Some(path) => TreeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let mut config = TreeConfig::default();
            config.apply_env();
            config
        }
    };
    if let Some(tree) = &cli.tree {
        config.tree_path = tree.clone();
    }
    Ok(config)
}

fn run_search(tree: &Tree, path: &str, max_found: usize, all_depths: bool) -> Result<()> {
    let results = search(tree, path, tree.root(), max_found, all_depths)?;
    for found in results.matches() {
        println!("{}", found.path);
    }
    if results.is_exhausted() {
        eprintln!("result capacity {max_found} reached; more matches may exist");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = resolve_config(&cli)?;
    let tree = config
        .load_tree()
        .with_context(|| format!("failed to load tree {}", config.tree_path.display()))?;

    match cli.cmd {
        Command::Search {
            path,
            all_depths,
            max_found,
        } => run_search(&tree, &path, max_found.unwrap_or(config.max_found), all_depths)?,
        Command::Leaves { out } => {
            let out = out
                .or(config.leaf_list_path.clone())
                .ok_or_else(|| anyhow!("no leaf list path configured"))?;
            let count = write_leaf_list(&tree, &out)?;
            info!("leaf list holds {count} paths");
        }
        Command::Json { path, depth } => {
            let document = subtree_json(&tree, tree.root(), &path, depth)?
                .ok_or_else(|| anyhow!("no node matches '{path}'"))?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Command::Rewrite { out } => save_tree(&out, &tree, tree.root())?,
        Command::Stats => {
            let stats = tree.stats();
            println!(
                "nodes={} leaves={} max_depth={}",
                stats.nodes, stats.leaves, stats.max_depth
            );
        }
    }
    Ok(())
}
