use anyhow::Result;
use clap::Parser;

use faqd_cli::{ApiClient, run_menu};

#[derive(Parser)]
#[command(name = "faqd-client")]
#[command(about = "Interactive client for a running faqd server", long_about = None)]
struct Cli {
    /// Base URL of the faqd server
    #[arg(long, default_value = "http://127.0.0.1:7000")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url)?;
    run_menu(&client).await?;
    Ok(())
}
