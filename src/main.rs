use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::error;

use discogs_import::client::DiscogsClient;
use discogs_import::collection;
use discogs_import::logging;
use discogs_import::updater::ImportSession;

#[derive(Parser)]
#[command(name = "discogs_import")]
#[command(about = "Parse a record collection in CSV format and upload it to a user's Discogs collection")]
#[command(version = "0.1.0")]
struct Cli {
    /// Discogs username
    username: String,

    /// Collection file in CSV format. The file must contain the following
    /// fields: Artist, Title, Year
    filename: String,

    /// Limit operations to the first NUM records (default: 0/unlimited)
    #[arg(long, short = 'l', value_name = "NUM", default_value_t = 0)]
    limit: usize,

    /// Skip the first NUM data rows (default: 0)
    #[arg(long, short = 's', value_name = "NUM", default_value_t = 0)]
    skip: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let records = collection::read_collection(&cli.filename, cli.skip)?;
    if records.is_empty() {
        eprintln!("Unable to find any records in {}!", cli.filename);
        process::exit(1);
    }

    let client = match DiscogsClient::authenticate(&cli.username) {
        Ok(client) => client,
        Err(err) => {
            error!("Authentication failed: {}", err);
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let session = ImportSession::new(Arc::new(client), cli.username.clone(), cli.limit);
    let report = session.update_collection(&records).await?;

    println!("\n📊 Import results for {}:", cli.username);
    println!("   Records visited: {}", report.visited);
    println!("   Added: {}", report.added);
    println!("   Skipped: {}", report.skipped);
    println!("   Rate-limit pauses: {}", report.throttled);

    Ok(())
}
