mod tui;

use anyhow::Result;
use newsdeck::config::Config;
use newsdeck::feed::articles_api::ArticlesApi;
use newsdeck::feed::normalize::normalize;
use newsdeck::feed::ArticleFeed;
use newsdeck::prefs::PrefsStore;
use newsdeck::session::Session;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{error, info};
use tui::{state::TuiState, FeedEvent};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(Path::new(&config_path))?;

    // The TUI owns the terminal, so logs go to a file.
    let log_file = std::fs::File::create(&config.storage.log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter("newsdeck=info")
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    info!(config = %config_path, feed = %config.feed.base_url, "starting newsdeck");

    let mut session = Session::new(PrefsStore::new(&config.storage.prefs_path));

    let api = ArticlesApi::new(&config.feed.base_url);
    let limit = config.fetch_limit();

    // Initial fetch happens before the terminal is taken over; a failure
    // renders as an error state instead of aborting.
    match api.fetch_articles(limit).await {
        Ok(batch) => session.set_articles(normalize(batch)),
        Err(err) => {
            error!(%err, "initial fetch failed");
            session.set_feed_failed(err.to_string());
        }
    }

    let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(4);
    let (feed_tx, feed_rx) = mpsc::channel::<FeedEvent>(4);

    // Fetch worker: serializes refresh requests and reports each outcome as
    // one event, so the UI loop never touches the network.
    tokio::spawn(async move {
        while refresh_rx.recv().await.is_some() {
            let feed_event = match api.fetch_articles(limit).await {
                Ok(batch) => FeedEvent::Batch(normalize(batch)),
                Err(err) => {
                    error!(%err, "refresh failed");
                    FeedEvent::Failed(err.to_string())
                }
            };
            if feed_tx.send(feed_event).await.is_err() {
                break;
            }
        }
    });

    tui::run_tui(TuiState::new(session), refresh_tx, feed_rx)?;

    info!("shutting down");
    Ok(())
}
