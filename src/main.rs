use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vote_gateway::{
    Markers, RateLimiter, VoteExtractor, app, config::Args, fetch::VoteSource, state::AppState,
};

// this is main async function with tokio
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // parse cli arguments
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // creating shared state
    let state = Arc::new(AppState {
        rate_limiter: RateLimiter::new(args.rate_limit, args.rate_window()),
        source: VoteSource::new(&args.vote_url, args.fetch_timeout())?,
        extractor: VoteExtractor::new(&Markers::default())?,
    });

    let app = app(state, &args.docs_dir);

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server is listening on {addr}");
    info!("Fetching votes from {}", args.vote_url);
    info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit, args.rate_window
    );
    info!("Serving docs from {}", args.docs_dir);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
