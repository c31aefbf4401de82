mod bluetooth;
mod config;
mod decoder;
mod models;
mod output;
mod poller;

use clap::Parser;
use log::{error, info, warn};
use tokio::sync::oneshot;
use tokio::time::Duration;

use bluetooth::sensor::EnvironmentalSensor;
use config::Args;
use poller::Poller;

async fn run(args: Args, shutdown: oneshot::Receiver<()>) -> Result<(), Box<dyn std::error::Error>> {
    let address: bluer::Address = args.address.parse()?;

    let session = bluer::Session::new().await?;
    let adapter = session.default_adapter().await?;
    adapter.set_powered(true).await?;

    let sensor = EnvironmentalSensor::connect(&adapter, address).await?;
    info!(
        "Connected to {}; polling every {} seconds ({:?} profile)",
        address, args.interval, args.profile
    );

    let mut poller = Poller::new(
        sensor,
        args.profile.profile(),
        Duration::from_secs(args.interval),
    );
    let result = poller.run(shutdown).await;

    // Best-effort disconnect, whether the loop ended cleanly or not
    if let Err(e) = poller.into_source().disconnect().await {
        warn!("Failed to disconnect cleanly: {}", e);
    }

    result.map_err(Into::into)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    // Handle Ctrl+C gracefully
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        let _ = tx.send(());
    });

    match run(args, rx).await {
        Ok(()) => {
            info!("Program terminated by user. Exiting gracefully.");
            Ok(())
        }
        Err(e) => {
            error!("Fatal error: {}", e);
            Err(e)
        }
    }
}
