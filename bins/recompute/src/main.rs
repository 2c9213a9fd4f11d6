//! Recomputes project financial figures.
//!
//! Usage:
//!   recompute projects <ID>...   - Recompute the given projects
//!   recompute recent             - Recompute the most recent projects
//!   recompute teardown           - Drop the computed project columns

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kontor_db::{RecomputeService, RecomputedProject, connect_with, teardown};
use kontor_shared::types::ProjectId;
use kontor_shared::{AppConfig, AppError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "recompute")]
#[command(about = "Recompute project financial figures from the accounting records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recompute the given projects
    Projects {
        /// Project IDs
        #[arg(required = true)]
        ids: Vec<ProjectId>,
    },

    /// Recompute the most recently created projects
    Recent,

    /// Drop the computed columns from the projects table
    Teardown,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kontor=info,recompute=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Recompute failed");
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    match cli.command {
        Commands::Projects { ids } => {
            let service = RecomputeService::new(db, config.analytics);
            let results = service.recompute(&ids).await.map_err(AppError::from)?;
            report(&results);
        }
        Commands::Recent => {
            let service = RecomputeService::new(db, config.analytics);
            let count = service.refresh_recent().await;
            println!("Refreshed {count} project(s)");
        }
        Commands::Teardown => {
            teardown::drop_computed_columns(&db).await;
        }
    }

    Ok(())
}

fn report(results: &[RecomputedProject]) {
    for result in results {
        let project = &result.project;
        let f = &result.financials;
        println!(
            "{} ({})",
            project.name,
            project.partner_name.as_deref().unwrap_or("no client")
        );
        if let Some(lead) = project.user_name.as_deref() {
            println!("  head of project:   {lead}");
        }
        println!("  invoiced:          {}", f.customer_invoiced_amount);
        println!("  paid:              {}", f.customer_paid_amount);
        println!("  outstanding:       {}", f.customer_outstanding_amount);
        println!("  skonto granted:    {}", f.customer_skonto_taken);
        println!("  vendor bills:      {}", f.vendor_bills_total);
        println!("  skonto received:   {}", f.vendor_skonto_received);
        println!("  hours booked:      {}", f.total_hours_booked);
        println!("  labor costs:       {}", f.labor_costs);
        println!("  costs (net):       {}", f.total_costs_net);
        println!("  costs (with tax):  {}", f.total_costs_with_tax);
        println!("  profit/loss:       {}", f.profit_loss);
        println!("  negative diff.:    {}", f.negative_difference);
    }
}
