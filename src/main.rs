use std::process;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;

use roadtest_watcher::alerts::{AlertSink, PushoverSink};
use roadtest_watcher::cli::Cli;
use roadtest_watcher::config::Config;
use roadtest_watcher::logging::init_logging;
use roadtest_watcher::orchestrator::Orchestrator;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = Config::resolve(cli).unwrap_or_else(|err| {
        tracing::error!("{}", err);
        process::exit(1);
    });

    let sink: Option<Arc<dyn AlertSink + Send + Sync>> = match &config.pushover {
        Some(pushover) => {
            let sink = PushoverSink::new(pushover.token.clone(), pushover.user.clone())
                .unwrap_or_else(|err| {
                    tracing::error!("{}", err);
                    process::exit(1);
                });
            Some(Arc::new(sink))
        }
        None => {
            tracing::info!("no alert channel configured; found slots will only be logged");
            None
        }
    };

    let orchestrator = Orchestrator::new(config, sink).unwrap_or_else(|err| {
        tracing::error!("{}", err);
        process::exit(1);
    });

    match orchestrator.run().await {
        Ok(report) => {
            tracing::info!(
                "run complete: {} location(s) processed, {} notification(s) sent",
                report.locations.len(),
                report.notified()
            );
        }
        Err(err) => {
            tracing::error!("run aborted: {}", err);
            process::exit(1);
        }
    }
}
