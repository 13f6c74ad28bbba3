use anyhow::Context;
use onpbx_call_loader::{api, logger, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logger::init().context("initialize logger")?;

    match dotenv::dotenv() {
        Ok(path) => log::info!("loaded .env from {}", path.to_str().expect("utf-8")),
        Err(err) => log::warn!("couldn't load .env file: {:?}", err),
    };

    let config = Config::from_env().context("load configuration")?;
    let client = api::Client::new(&config.domain).context("build http client")?;

    let session = client
        .authenticate(&config.api_key)
        .await
        .context("credential exchange")?;

    log::info!("authenticated, key_id: {}", session.key_id);

    Ok(())
}
