use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exoplanet_kepler::api;
use exoplanet_kepler::archive::{ArchiveClient, CatalogCache};
use exoplanet_kepler::kepler::{compute_ratios, select_by_host};
use exoplanet_kepler::models::COLUMNS;
use exoplanet_kepler::render::{chart, ratio_message, ChartAxis, RenderOptions, ScatterChart};

#[derive(Parser)]
#[command(name = "kepler")]
#[command(about = "Check Kepler's third law against the NASA Exoplanet Archive")]
struct Cli {
    /// Archive TAP endpoint [env: EXOPLANET_ARCHIVE_URL]
    #[arg(long, global = true)]
    archive_url: Option<String>,

    /// Archive table to query [env: EXOPLANET_ARCHIVE_TABLE]
    #[arg(long, global = true)]
    table: Option<String>,

    /// What to plot against period² [env: KEPLER_CHART_AXIS]
    #[arg(long, global = true, value_enum)]
    chart_axis: Option<ChartAxis>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard server
    Serve {
        /// Port for the dashboard
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
    },
    /// List the host stars in the catalog
    Hosts,
    /// Print the planets of a host star and their period² / a³ ratios
    Check {
        /// Host star name, matched exactly
        host: String,
    },
    /// Write the Kepler chart of a host star as SVG
    Plot {
        /// Host star name, matched exactly
        host: String,

        /// Output file
        #[arg(short, long, default_value = "kepler.svg")]
        output: PathBuf,
    },
}

/// Initialize tracing with output to stderr (for terminal commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "exoplanet_kepler=info,tower_http=debug".into()),
    );

    if use_stderr {
        // Terminal commands print results on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

impl Cli {
    fn archive_client(&self) -> ArchiveClient {
        let from_env = ArchiveClient::from_env();
        ArchiveClient::new(
            self.archive_url
                .clone()
                .unwrap_or_else(|| from_env.base_url().to_string()),
            self.table
                .clone()
                .unwrap_or_else(|| from_env.table().to_string()),
        )
    }

    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::from_env();
        if let Some(axis) = self.chart_axis {
            options.chart_axis = axis;
        }
        options
    }
}

async fn serve(state: api::AppState, bind: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!(
        "Starting dashboard (chart axis: {})",
        state.options.chart_axis.as_str()
    );
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, port)).await?;
    tracing::info!("Dashboard listening on http://{}:{}", bind, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let cache = CatalogCache::new(cli.archive_client());
    let options = cli.render_options();

    match cli.command {
        Some(Commands::Serve { port, ref bind }) => {
            serve(api::AppState::new(cache, options), bind, port).await?;
        }
        Some(Commands::Hosts) => {
            let catalog = cache.load().await?;
            for host in catalog.host_names() {
                println!("{}", host);
            }
        }
        Some(Commands::Check { ref host }) => {
            let catalog = cache.load().await?;
            let selection = select_by_host(&catalog, host)?;

            println!("Planets in the {} system", selection.host_name);
            let labels: Vec<_> = COLUMNS.iter().map(|c| c.label).collect();
            println!("{}", labels.join(" | "));
            for record in &selection.records {
                println!("{}", record.cells().join(" | "));
            }
            println!();
            for result in compute_ratios(&selection)? {
                println!("{}", ratio_message(&result));
            }
        }
        Some(Commands::Plot {
            ref host,
            ref output,
        }) => {
            let catalog = cache.load().await?;
            let selection = select_by_host(&catalog, host)?;
            let scatter = ScatterChart::kepler(&selection, options.chart_axis);
            chart::write_svg(&scatter, chart::DEFAULT_SIZE, output)?;
            println!("Wrote {}", output.display());
        }
        None => {
            serve(api::AppState::new(cache, options), "127.0.0.1", 8501).await?;
        }
    }

    Ok(())
}
