//! Check-config command - prints the effective configuration

use crate::config::AppConfig;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Surface bad storage settings here rather than at serve time
    config.storage.to_storage_config()?;

    println!("{}", serde_json::to_string_pretty(&config.redacted())?);

    if config.uses_default_jwt_secret() {
        eprintln!("warning: auth.jwt_secret is the built-in default");
    }

    Ok(())
}
