mod lib;

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tiny_http::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::lib::fetch::{fetch_people, FetchConfig, DEFAULT_ENDPOINT, DEFAULT_RESULTS};
use crate::lib::render::render_page;
use crate::lib::server::serve;
use crate::lib::sort::ToggleMode;
use crate::lib::view::{ViewEvent, ViewModel};

#[derive(Parser)]
#[command(name = "locations-table", about = "Sortable, searchable table of random-user locations")]
struct Cli {
    #[command(flatten)]
    fetch: FetchArgs,

    /// How a header click advances that column's sort direction
    #[arg(long, value_enum, default_value = "conventional", global = true)]
    toggle: ToggleMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct FetchArgs {
    /// Random-user API endpoint
    #[arg(long, env = "LOCATIONS_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Number of people to request
    #[arg(long, env = "LOCATIONS_RESULTS", default_value_t = DEFAULT_RESULTS, global = true)]
    results: usize,

    /// Seed for a reproducible batch
    #[arg(long, env = "LOCATIONS_SEED", global = true)]
    seed: Option<String>,

    /// Request timeout in seconds (none by default)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

impl From<FetchArgs> for FetchConfig {
    fn from(args: FetchArgs) -> Self {
        FetchConfig {
            endpoint: args.endpoint,
            results: args.results,
            seed: args.seed,
            timeout: args.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Serve the interactive table over HTTP
    Serve {
        #[arg(long, env = "LOCATIONS_ADDR", default_value = "127.0.0.1:8080")]
        addr: String,
    },
    /// Fetch once, apply clicks and a query, print the result
    Render {
        /// Header to click; repeat to click several times, in order
        #[arg(long = "click")]
        clicks: Vec<String>,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, value_enum, default_value = "html")]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum Format {
    Html,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = FetchConfig::from(cli.fetch);

    let model = ViewModel::new(cli.toggle).apply(ViewEvent::FetchCompleted(fetch_people(&config)));

    match cli.command {
        Command::Serve { addr } => {
            let server = Server::http(&addr).map_err(|e| anyhow!("cannot listen on {}: {}", addr, e))?;
            serve(server, model);
        }
        Command::Render { clicks, query, format } => {
            let model = clicks
                .into_iter()
                .fold(model, |model, header| model.apply(ViewEvent::ColumnClicked(header)))
                .apply(ViewEvent::QueryChanged(query));

            let output = match format {
                Format::Html => render_page(&model),
                Format::Json => serde_json::to_string_pretty(&model.visible_rows())?,
            };
            println!("{}", output);
        }
    }

    Ok(())
}
