use crate::adapters::http::HttpOddsSource;
use crate::config::validate_source;
use crate::core::fetcher::OddsFetcher;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use std::io::Write;

/// Validate the config, perform the single odds request and write the rendering to `out`.
pub async fn run<C: ConfigProvider, W: Write>(config: &C, out: &mut W) -> Result<()> {
    validate_source(config)?;

    let source = HttpOddsSource::from_config(config)?;
    tracing::info!(
        "Fetching odds from {} (regions={}, markets={})",
        source.endpoint(),
        config.regions(),
        config.markets()
    );

    let fetcher = OddsFetcher::new(source);
    fetcher.run(out).await?;

    tracing::info!("✅ Odds fetched successfully");
    Ok(())
}
