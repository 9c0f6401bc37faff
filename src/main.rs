//! ORS Monitor
//!
//! Main entry point: runs the scoring server or drives the dashboard and
//! research views from the terminal.

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use ors_monitor::client::HttpScoringClient;
use ors_monitor::core::ScoringService;
use ors_monitor::ui::{terminal, DashboardView, ResearchView};
use ors_monitor::{api, config, utils};

#[derive(Parser)]
#[command(name = "ors-monitor", about = "Optic Risk Score monitoring for prone-position surgery")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scoring server
    Serve,
    /// Submit parameters and print the dashboard
    Calculate {
        /// Override a form value, e.g. `--set spo2=92`. Repeatable.
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        overrides: Vec<String>,
    },
    /// Print the research portal
    Research,
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = config::load_config().context("Failed to load configuration")?;
    utils::init_tracing(config.logging.json);

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Calculate { overrides } => calculate(&config, &overrides).await,
        Commands::Research => research(&config).await,
    }
}

async fn serve(config: config::Config) -> Result<()> {
    let service = web::Data::new(ScoringService::default());
    let bind = (config.server.host.clone(), config.server.port);
    info!(host = %bind.0, port = bind.1, "Starting ORS scoring server");

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(api::middleware::request_tracing())
            .wrap(api::middleware::cors())
            .configure(api::configure)
    })
    .bind(bind)
    .context("Failed to bind scoring server")?
    .run()
    .await
    .context("Scoring server terminated")
}

async fn calculate(config: &config::Config, overrides: &[String]) -> Result<()> {
    let client = HttpScoringClient::from_config(&config.client)?;
    let mut view = DashboardView::new();

    for entry in overrides {
        let (field, value) = entry
            .split_once('=')
            .with_context(|| format!("Expected FIELD=VALUE, got {:?}", entry))?;
        let field = field.trim();
        if !view.edit(field, value.trim()) {
            anyhow::bail!("Unknown parameter {:?}", field);
        }
        if let Some(reading) = view.form().get(field) {
            debug!(field, %reading, "Form value overridden");
        }
    }

    info!(base_url = %client.base_url(), "Submitting parameters");

    view.submit(&client).await;
    print!("{}", terminal::render_dashboard(&view));
    Ok(())
}

async fn research(config: &config::Config) -> Result<()> {
    let client = HttpScoringClient::from_config(&config.client)?;
    info!(base_url = %client.base_url(), "Fetching research snapshot");
    let mut view = ResearchView::new();
    view.load(&client).await;
    print!("{}", terminal::render_research(&view));
    Ok(())
}
