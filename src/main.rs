use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tour_planner::{chat, itinerary::Generator, languages, web_server};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the tour planner web UI.
    Serve {
        #[arg(long, default_value_t = 9900, help = "Port for the web server.")]
        port: u16,
    },
    /// Run the questionnaire as an interactive terminal session.
    Chat,
}

// The main entry point of the application, using tokio's async runtime
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for environment variables like API keys)
    dotenvy::dotenv().ok();

    // Initialize tracing (logging) subscriber
    // Reads log level from RUST_LOG environment variable (e.g., RUST_LOG=info,tour_planner=debug)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // The state machine walks every language's questions by shared index,
    // so the tables must agree before anything runs.
    languages::validate_packs().context("Language tables failed validation")?;

    // Parse command-line arguments
    let cli = Cli::parse();

    info!("Tour planner starting with command: {:?}", cli.command);

    match cli.command {
        Commands::Serve { port } => {
            info!("Starting web server on port {}...", port);
            let generator = Generator::from_env();

            let server = web_server::start_web_server(port, generator);
            tokio::pin!(server);

            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            tokio::select! {
                // Wait for Ctrl-C signal for graceful shutdown
                _ = &mut ctrl_c => {
                    info!("Ctrl-C received, shutting down.");
                }
                res = &mut server => {
                    res.context("Web server exited")?;
                    info!("Web server task completed unexpectedly.");
                }
            }
        }
        Commands::Chat => {
            info!("Starting interactive questionnaire session...");
            let generator = Generator::from_env();
            chat::run_questionnaire(&generator)
                .await
                .context("Questionnaire session failed")?;
            info!("Questionnaire session finished.");
        }
    }

    Ok(())
}
