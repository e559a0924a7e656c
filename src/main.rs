use clap::Parser;
use dotenv::dotenv;
use gigabridge::run_with_config_path;

/// Gigabridge - REST шлюз между 1С и GigaChat
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` file into std::env (optional)
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load config, init logging and run
    run_with_config_path(&args.config).await?;
    Ok(())
}
