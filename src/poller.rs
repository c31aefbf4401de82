/// Polling driver
///
/// Reads the four sensor channels once per cycle, decodes them through the
/// configured device profile and renders the result, sleeping a fixed
/// interval between cycles until the shutdown signal fires.
use log::info;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time::{sleep, Duration};

use crate::bluetooth::{
    SensorError, SensorSource, COLOR_CHARACTERISTIC, HUMIDITY_CHARACTERISTIC,
    PRESSURE_CHARACTERISTIC, TEMPERATURE_CHARACTERISTIC,
};
use crate::config::DeviceProfile;
use crate::decoder::{self, DecodeError};
use crate::models::EnvironmentReading;
use crate::output;

/// Transport and decode failures stay separate variants; neither is
/// retried, but a caller can tell transient link errors from malformed
/// device data.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("transport failure: {0}")]
    Sensor(#[from] SensorError),
    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),
}

pub struct Poller<S> {
    source: S,
    profile: DeviceProfile,
    interval: Duration,
}

impl<S: SensorSource> Poller<S> {
    pub fn new(source: S, profile: DeviceProfile, interval: Duration) -> Self {
        Self {
            source,
            profile,
            interval,
        }
    }

    /// Hand the transport back, e.g. for a clean disconnect.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Read and decode all four channels once.
    pub async fn poll_cycle(&mut self) -> Result<EnvironmentReading, PollError> {
        let byte_order = self.profile.byte_order;

        let raw = self.source.read_raw(TEMPERATURE_CHARACTERISTIC).await?;
        let temperature = decoder::scale_temperature(decoder::decode_integer(&raw, byte_order)?);

        let raw = self.source.read_raw(HUMIDITY_CHARACTERISTIC).await?;
        let humidity = decoder::scale_humidity(decoder::decode_integer(&raw, byte_order)?);

        let raw = self.source.read_raw(PRESSURE_CHARACTERISTIC).await?;
        let pressure = decoder::scale_pressure(decoder::decode_integer(&raw, byte_order)?);

        let payload = self.source.read_raw(COLOR_CHARACTERISTIC).await?;
        let color_text = decoder::color_text(&payload)?.to_string();
        let color = decoder::decode_color(&payload, self.profile.color_raw_max)?;

        Ok(EnvironmentReading {
            temperature,
            humidity,
            pressure,
            color_text,
            color,
        })
    }

    /// Poll and render until `shutdown` fires. Any transport or decode
    /// failure aborts the loop and propagates to the caller.
    pub async fn run(&mut self, mut shutdown: oneshot::Receiver<()>) -> Result<(), PollError> {
        loop {
            let reading = self.poll_cycle().await?;
            output::render(&reading);

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping polling loop");
                    return Ok(());
                }
            }
        }
    }
}
