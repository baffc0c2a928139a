use clap::Parser;
use odds_fetch::utils::logger;
use odds_fetch::{app, CliConfig, FetchError, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!(
        "CLI config: endpoint={}, regions={}, markets={}, config={:?}",
        config.endpoint,
        config.regions,
        config.markets,
        config.config
    );

    let mut stdout = std::io::stdout().lock();
    let result = match &config.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(file_config) => {
                let file_config = file_config.with_api_key_fallback(config.api_key.clone());
                app::run(&file_config, &mut stdout).await
            }
            Err(e) => Err(e),
        },
        None => app::run(&config, &mut stdout).await,
    };

    if let Err(e) = result {
        exit_with(e);
    }

    Ok(())
}

fn exit_with(e: FetchError) -> ! {
    tracing::error!("❌ Fetch failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
