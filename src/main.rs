use std::sync::Arc;

use clap::Parser;
use gist_gateway::{
    app,
    config::{Args, LogFormat},
    gists::GistService,
    state::AppState,
    upstream::GitHubClient,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments
    let args = Args::parse();
    init_tracing(args.log_format);

    let client = GitHubClient::new(&args.github_url, args.timeout())?;
    let service = GistService::new(Arc::new(client), args.cache_capacity);
    let state = AppState::new(service);

    let addr = args.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gist gateway running on http://{addr}");
    tracing::info!("Forwarding to GitHub API at {}", args.github_url);
    tracing::info!(
        "Cache capacity: {} entries, upstream timeout: {} seconds",
        args.cache_capacity,
        args.timeout_secs
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
