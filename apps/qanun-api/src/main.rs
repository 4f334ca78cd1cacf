use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = qanun_api::Args::parse();

	qanun_api::run(args).await
}
