//! Carbonwise - carbon footprint calculator
//!
//! Command-line entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use carbonwise_app::utils::logging::{init_tracing, LogFormat};
use carbonwise_app::{calculate, history, login, logout, read_form, register, status, AppContext};
use carbonwise_domain::{BusinessRegistration, Credentials, SubjectKind};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "carbonwise", version, about = "Estimate annual carbon footprints")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate a footprint from a JSON file of form fields
    Calculate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = SubjectKind::Organization)]
        subject: SubjectKind,
        /// Skip the remote API
        #[arg(long)]
        local: bool,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a business account and sign it in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        industry: String,
        /// small, medium or large
        #[arg(long, default_value = "small")]
        size: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in business and API reachability
    Status,
    /// List calculations stored by the server
    History,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env must be read before the configuration is loaded
    let dotenv = dotenvy::dotenv();

    init_tracing(if cli.json_logs { LogFormat::Json } else { LogFormat::Text });
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    let ctx = AppContext::new().await.context("failed to initialize carbonwise")?;

    match cli.command {
        Command::Calculate { input, subject, local } => {
            let mut form = read_form(&input, subject)?;
            let outcome = calculate(&ctx, &mut form, local).await?;
            print_json(&outcome)?;
        }
        Command::Login { email, password } => {
            let business = login(&ctx, &Credentials::new(email, password)).await?;
            print_json(&business)?;
        }
        Command::Register { name, email, password, industry, size } => {
            let registration = BusinessRegistration {
                name,
                email,
                password,
                industry,
                size,
                address: serde_json::Map::new(),
            };
            let business = register(&ctx, &registration).await?;
            print_json(&business)?;
        }
        Command::Logout => logout(&ctx).await?,
        Command::Status => {
            print_json(&status(&ctx).await)?;
        }
        Command::History => {
            print_json(&history(&ctx).await?)?;
        }
    }

    Ok(())
}
