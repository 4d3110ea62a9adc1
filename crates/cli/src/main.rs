// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rounds: read-only operational checks for databases, clusters, and
//! services, built on external CLI tools (argocd, kubectl, psql,
//! redis-cli, systemctl).

mod color;
mod commands;
mod exit_error;
mod output;
mod render;

use clap::{Parser, Subcommand};

use crate::exit_error::ExitError;
use crate::render::Renderer;

#[derive(Parser)]
#[command(
    name = "rounds",
    version,
    about = "Read-only operational checks for databases, clusters, and services",
    arg_required_else_help = true,
    styles = color::styles()
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Argo CD application status (read-only)
    #[command(subcommand)]
    Argocd(commands::argocd::ArgocdCommand),
    /// Kubernetes cluster diagnostics (read-only)
    #[command(subcommand)]
    Kube(commands::kube::KubeCommand),
    /// PostgreSQL health and parameter checks
    Postgres(commands::postgres::PostgresArgs),
    /// Redis health and parameter checks
    Redis(commands::redis::RedisArgs),
    /// systemd service checks
    Service(commands::service::ServiceArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let renderer = Renderer::new(color::should_colorize());

    if let Err(err) = dispatch(cli, &renderer).await {
        match err.downcast::<ExitError>() {
            Ok(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                std::process::exit(exit.code);
            }
            Err(other) => {
                eprintln!("Error: {other:#}");
                std::process::exit(1);
            }
        }
    }
}

async fn dispatch(cli: Cli, renderer: &Renderer) -> anyhow::Result<()> {
    match cli.command {
        Commands::Argocd(cmd) => commands::argocd::handle(cmd, renderer).await,
        Commands::Kube(cmd) => commands::kube::handle(cmd, renderer).await,
        Commands::Postgres(args) => commands::postgres::handle(args, renderer).await,
        Commands::Redis(args) => commands::redis::handle(args, renderer).await,
        Commands::Service(args) => commands::service::handle(args, renderer).await,
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
