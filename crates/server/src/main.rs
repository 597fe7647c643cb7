// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! nk-server: HTTP service for notekeep notes.
//!
//! Stores accounts and their notes in SQLite. Exposes registration, login
//! and note create, list, fetch, update and delete over JSON.

mod accounts;
mod auth;
mod config;
mod error;
mod hasher;
mod routes;
mod server;
mod service;
mod state;
#[cfg(test)]
mod test_support;
mod token;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Config;

/// nk-server: notekeep note service
#[derive(Parser, Debug)]
#[command(name = "nk-server")]
#[command(about = "HTTP service for notekeep notes")]
struct Args {
    /// Address to bind the server to [default: 0.0.0.0:5000]
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Directory for the note database [default: .]
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// TOML config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_overrides(args.bind, args.data, args.verbose);

    let default_level = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting nk-server");
    info!("  Bind address: {}", config.bind);
    info!("  Data directory: {}", config.data_dir.display());
    if !config.cors_origins.is_empty() {
        info!("  CORS origins: {}", config.cors_origins.join(", "));
    }

    if config.require_token {
        info!("  Bearer tokens required on note routes");
    }

    let state = state::ServerState::open(&config)?;
    server::run(&config, state).await?;

    Ok(())
}
