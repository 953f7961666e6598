// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dotlink::{
    path::{default_config_path, home_dir, working_dir},
    install, status, InstallEnv, LinkMapping, Reconciler, StdFs,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::exit};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "dotlink [options] [<command>]",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Path to link mapping file [default: config.json next to program].
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Directory to resolve source paths against [default: current directory].
    #[arg(short, long, global = true, value_name = "path")]
    pub source_dir: Option<PathBuf>,

    /// Directory to place links in [default: home directory].
    #[arg(short = 'H', long, global = true, value_name = "path")]
    pub home_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = match self.config {
            Some(path) => path,
            None => default_config_path()?,
        };
        let mapping = LinkMapping::load(&config)?;

        let env = InstallEnv::new(
            match self.source_dir {
                Some(path) => path,
                None => working_dir()?,
            },
            match self.home_dir {
                Some(path) => path,
                None => home_dir()?,
            },
        );

        match self.command.unwrap_or(Command::Link) {
            Command::Link => run_link(env, mapping),
            Command::Status => run_status(env, mapping),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Create or repair every link in link mapping (default).
    #[command(override_usage = "dotlink link [options]")]
    Link,

    /// Show current state of every link without changing anything.
    #[command(override_usage = "dotlink status [options]")]
    Status,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}

fn run_link(env: InstallEnv, mapping: LinkMapping) -> Result<()> {
    install(env, &mapping, &Reconciler::new(StdFs::new())).context("cannot finish linking")?;

    Ok(())
}

fn run_status(env: InstallEnv, mapping: LinkMapping) -> Result<()> {
    for (pair, state) in status(env, &mapping, &Reconciler::new(StdFs::new())) {
        let mark = if state.is_linked_to(&pair.source_path) {
            "ok"
        } else {
            "!!"
        };
        println!("[{mark}] {pair} ({state})");
    }

    Ok(())
}
