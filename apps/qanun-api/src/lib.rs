pub mod routes;
pub mod state;

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(version, about = "Qanun statute retrieval API", rename_all = "kebab")]
pub struct Args {
	/// Overrides QANUN_HTTP_BIND.
	#[arg(long, value_name = "ADDR")]
	pub bind: Option<String>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	init_tracing();

	let config = qanun_config::from_env();

	qanun_config::validate(&config)?;

	let bind = args.bind.unwrap_or_else(|| config.service.http_bind.clone());
	let addr: SocketAddr = bind.parse()?;
	let state = AppState::new(config).await?;
	let app = routes::router(state);
	let listener = TcpListener::bind(addr).await?;

	tracing::info!(%addr, "HTTP server listening.");

	axum::serve(listener, app).await?;

	Ok(())
}

fn init_tracing() {
	let filter =
		EnvFilter::try_from_env("QANUN_LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
