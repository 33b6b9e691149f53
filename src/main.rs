use exchange_core::types::raw::RawEventLog;
use exchange_core::ExchangeConfig;
use exchange_store::ExchangeStore;
use exchange_views::{counters, PipelineConfig, ViewPipeline};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("exchange_store=info".parse()?)
                .add_directive("exchange_views=info".parse()?),
        )
        .init();

    counters::init();

    let config = match ExchangeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    let pipeline_config = PipelineConfig::from_env()?;

    info!(
        base = ?config.pair.base,
        quote = ?config.pair.quote,
        account = ?config.account,
        interval = %pipeline_config.candle_interval,
        utc_offset = %pipeline_config.utc_offset,
        "Configuration loaded"
    );

    let store = Arc::new(ExchangeStore::new());
    match &config.snapshot_path {
        Some(path) => {
            let history = RawEventLog::load(path)?;
            let stats = store.ingest(history);
            info!(
                path = %path.display(),
                accepted = stats.accepted(),
                rejected = stats.rejected,
                "Snapshot loaded"
            );
        }
        None => warn!("SNAPSHOT_PATH not set, views will be empty"),
    }

    let pipeline = ViewPipeline::new(store, pipeline_config)
        .with_selection(config.pair, config.account);

    let report = json!({
        "orderBook": pipeline.order_book().as_deref(),
        "priceChart": pipeline.price_chart().as_deref(),
        "trades": pipeline.trade_tape().as_deref(),
        "myOpenOrders": pipeline.my_open_orders().as_deref(),
        "myFilledOrders": pipeline.my_filled_orders().as_deref(),
        "myEvents": pipeline.my_events().as_deref(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
