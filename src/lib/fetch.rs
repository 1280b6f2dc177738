use std::time::Duration;

use lazy_static::lazy_static;
use reqwest::blocking::Client;
use tracing::{instrument, Level};
use tracing_unwrap::ResultExt;
use url::Url;

use super::error::FetchError;
use super::models::{ApiResponse, Person};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/";
pub const DEFAULT_RESULTS: usize = 20;

lazy_static! {
    static ref HTTP_CLIENT: Client = Client::builder().user_agent(APP_USER_AGENT).build().unwrap_or_log();
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub endpoint: String,
    pub results: usize,
    pub seed: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            results: DEFAULT_RESULTS,
            seed: None,
            timeout: None,
        }
    }
}

impl FetchConfig {
    pub fn request_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("results", &self.results.to_string());
            if let Some(seed) = &self.seed {
                pairs.append_pair("seed", seed);
            }
        }
        Ok(url)
    }
}

/// Fetches one batch of people. Failures are logged and handed back as values.
#[instrument]
pub fn fetch_people(config: &FetchConfig) -> Result<Vec<Person>, FetchError> {
    let result = get_results(config);
    match &result {
        Ok(people) => tracing::info!("fetched {} people", people.len()),
        Err(error) => tracing::error!(%error, "fetching people failed"),
    }
    result
}

fn get_results(config: &FetchConfig) -> Result<Vec<Person>, FetchError> {
    let request_url = config.request_url()?;

    let mut request = HTTP_CLIENT.get(request_url);
    if let Some(timeout) = config.timeout {
        request = request.timeout(timeout);
    }

    let response = request.send()?;
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    tracing::event!(Level::DEBUG, "received {} bytes", body.len());

    let parsed: ApiResponse = serde_json::from_str(&body)?;
    Ok(parsed.results)
}
