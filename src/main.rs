use clap::Parser;
use tracing_subscriber::EnvFilter;

use post_search::cli::Args;
use post_search::db::DatabaseConfig;
use post_search::queries::SearchService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let ctx = args.exec_context();

    let backend = DatabaseConfig::resolve(args.db.as_deref())?.connect()?;
    let service = SearchService::new(backend.as_ref())?;

    let output = args.command.run(&service, &ctx, args.format)?;
    println!("{}", output);
    Ok(())
}
