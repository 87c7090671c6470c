//! `taskrank serve`

use anyhow::Result;
use clap::Args;

use crate::adapters::http::{AppState, TasksHttpConfig, TasksHttpServer};
use crate::domain::models::{Config, Strategy};
use crate::services::TaskAnalysisService;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let mut http_config = TasksHttpConfig::from(&config.server);
    if let Some(host) = args.host {
        http_config.host = host;
    }
    if let Some(port) = args.port {
        http_config.port = port;
    }

    let service = TaskAnalysisService::default().with_suggestion_limit(config.suggestion_limit);
    let state = AppState::new(
        service,
        Strategy::from_name(Some(config.default_strategy.as_str())),
    );

    TasksHttpServer::new(state, http_config)
        .serve_with_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
