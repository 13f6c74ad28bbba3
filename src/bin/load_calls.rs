use anyhow::Context;
use onpbx_call_loader::{api, logger, run, Config, Journal};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logger::init().context("initialize logger")?;

    match dotenv::dotenv() {
        Ok(path) => log::info!("loaded .env from {}", path.to_str().expect("utf-8")),
        Err(err) => log::warn!("couldn't load .env file: {:?}", err),
    };

    let config = Config::from_env().context("load configuration")?;
    let journal = Journal::new(&config.logs_path);
    let client = api::Client::new(&config.domain).context("build http client")?;

    // Failures past this point surface in the journal only; the scheduler
    // sees a normal exit either way.
    if let Err(err) = run(&client, &journal, &config).await {
        journal
            .append(&format!("Error: {}", err))
            .context("write journal")?;
        log::error!("run failed: {}", err);
    }

    Ok(())
}
