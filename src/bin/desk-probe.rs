use anyhow::{bail, Context, Result};
use gap_desk::api::{HttpDeskClient, WatchlistStore};
use gap_desk::config::Config;
use gap_desk::intraday::IntradayController;
use gap_desk::lifecycle::Phase;
use gap_desk::logging::init_tracing;
use gap_desk::scanner::ScannerController;

#[derive(Debug)]
struct ProbeResult {
    surface: &'static str,
    status: ProbeStatus,
    detail: String,
}

#[derive(Debug, PartialEq, Eq)]
enum ProbeStatus {
    Ok,
    Empty,
    Failed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("failed to load config")?;
    init_tracing(&config.logging);
    let client = HttpDeskClient::new(&config.api)?;

    let results = vec![
        probe_scanner(&client, &config).await,
        probe_intraday(&client, &config).await,
        probe_watchlists(&client).await,
    ];

    println!("desk probe against {}", config.api.base_url);
    println!("=========================");

    let mut has_failure = false;
    for result in &results {
        let status = match result.status {
            ProbeStatus::Ok => "OK",
            ProbeStatus::Empty => "EMPTY",
            ProbeStatus::Failed => {
                has_failure = true;
                "FAILED"
            }
        };
        println!("- {:<10} {:<6} {}", result.surface, status, result.detail);
    }

    if has_failure {
        bail!("one or more probes failed");
    }
    Ok(())
}

async fn probe_scanner(client: &HttpDeskClient, config: &Config) -> ProbeResult {
    let mut scanner = ScannerController::from_config(&config.scanner);
    scanner.scan(client).await;
    let lifecycle = scanner.lifecycle();
    match lifecycle.phase() {
        Phase::Ready if lifecycle.results().is_empty() => ProbeResult {
            surface: "scanner",
            status: ProbeStatus::Empty,
            detail: "no gaps matched the default filters".to_string(),
        },
        Phase::Ready => ProbeResult {
            surface: "scanner",
            status: ProbeStatus::Ok,
            detail: format!(
                "{} rows on page {}/{}, total={}",
                lifecycle.results().len(),
                lifecycle.page(),
                lifecycle.total_pages(),
                lifecycle.total()
            ),
        },
        _ => ProbeResult {
            surface: "scanner",
            status: ProbeStatus::Failed,
            detail: lifecycle.error().unwrap_or("no response").to_string(),
        },
    }
}

async fn probe_intraday(client: &HttpDeskClient, config: &Config) -> ProbeResult {
    let mut intraday = IntradayController::from_config(&config.intraday);
    intraday.search(client).await;
    let lifecycle = intraday.lifecycle();
    match lifecycle.phase() {
        Phase::Ready if lifecycle.results().is_empty() => ProbeResult {
            surface: "intraday",
            status: ProbeStatus::Empty,
            detail: format!("no movers on {}", intraday.filters().date),
        },
        Phase::Ready => {
            let top = lifecycle
                .results()
                .first()
                .map(|m| format!("{} {:+.2}%", m.ticker, m.change_pct))
                .unwrap_or_default();
            ProbeResult {
                surface: "intraday",
                status: ProbeStatus::Ok,
                detail: format!(
                    "{} movers on {}, top {}",
                    lifecycle.total(),
                    intraday.filters().date,
                    top
                ),
            }
        }
        _ => ProbeResult {
            surface: "intraday",
            status: ProbeStatus::Failed,
            detail: lifecycle.error().unwrap_or("no response").to_string(),
        },
    }
}

async fn probe_watchlists(client: &HttpDeskClient) -> ProbeResult {
    match client.list_groups().await {
        Ok(groups) => ProbeResult {
            surface: "watchlist",
            status: if groups.is_empty() {
                ProbeStatus::Empty
            } else {
                ProbeStatus::Ok
            },
            detail: format!(
                "{} lists, {} tickers",
                groups.len(),
                groups.iter().map(|g| g.items.len()).sum::<usize>()
            ),
        },
        Err(err) => ProbeResult {
            surface: "watchlist",
            status: ProbeStatus::Failed,
            detail: err.to_string(),
        },
    }
}
