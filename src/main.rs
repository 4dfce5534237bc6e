use promptcanvas::{logger, server, Config, Pipeline};
use std::env;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let log_format = env::var("LOG_FORMAT").ok();
    logger::init_with_config(logger::LoggerConfig::for_format(log_format.as_deref()))?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            log::error!("❌ Set GEMINI_API_KEY and SORA_API_KEY before starting the server");
            return Err(e.into());
        }
    };

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);
    logger::log_config_info(&config);

    let pipeline = Pipeline::from_config(&config)?;
    log::info!("✅ Upstream clients initialized");

    server::run(&config, pipeline).await?;

    log::info!("👋 Server stopped");
    Ok(())
}
