//! sonar-report CLI - Quality reports from a SonarQube-compatible server.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sonar_report::builder::ProjectBuilder;
use sonar_report::cli::Cli;
use sonar_report::config::Config;
use sonar_report::report::Renderer;
use sonar_report::ws::{Credentials, WsClient};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> sonar_report::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    };

    // CLI flags override file and environment settings
    if let Some(server) = &cli.server {
        config.server.url = server.clone();
    }
    if let Some(username) = &cli.username {
        config.server.username = username.clone();
    }
    if let Some(password) = &cli.password {
        config.server.password = password.clone();
    }
    if let Some(kind) = cli.kind {
        config.report.kind = kind;
    }

    let credentials = Credentials::new(&config.server.username, &config.server.password);
    let client = WsClient::connect(&config.server.url, credentials);

    let builder = ProjectBuilder::new(
        &client,
        config.report.table_limit,
        config.report.details_limit,
    );
    let project = builder.build(&cli.project)?;

    let output = cli.output_path();
    let renderer = Renderer::new()?;
    renderer.render_to_file(&project, config.report.kind, &output)?;
    info!(path = %output.display(), "report written");

    Ok(())
}
