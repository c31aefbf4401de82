/// Bluetooth Low Energy transport for the environmental sensing peripheral
pub mod sensor;

use bluer::Uuid;
use thiserror::Error;
use uuid::uuid;

/// Environmental Sensing service (assigned number 0x181A).
pub const ENVIRONMENTAL_SENSING_SERVICE: Uuid = uuid!("0000181a-0000-1000-8000-00805f9b34fb");

/// Temperature characteristic (assigned number 0x2A6E).
pub const TEMPERATURE_CHARACTERISTIC: Uuid = uuid!("00002a6e-0000-1000-8000-00805f9b34fb");

/// Humidity characteristic (assigned number 0x2A6F).
pub const HUMIDITY_CHARACTERISTIC: Uuid = uuid!("00002a6f-0000-1000-8000-00805f9b34fb");

/// Pressure characteristic (assigned number 0x2A6D).
pub const PRESSURE_CHARACTERISTIC: Uuid = uuid!("00002a6d-0000-1000-8000-00805f9b34fb");

/// Vendor-specific RGBA color/light characteristic.
pub const COLOR_CHARACTERISTIC: Uuid = uuid!("936b6a25-e503-4f7c-9349-bcc76c22b8c3");

/// Transport-level failures, kept distinct from decode failures so a retry
/// policy could treat transient link errors differently from malformed
/// data.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("bluetooth error: {0}")]
    Bluetooth(#[from] bluer::Error),
    #[error("device {0} not found during discovery")]
    DeviceNotFound(bluer::Address),
    #[error("environmental sensing service not found on peripheral")]
    ServiceNotFound,
    #[error("characteristic {0} not found on peripheral")]
    CharacteristicNotFound(Uuid),
}

/// Seam between the polling driver and the transport.
///
/// The driver only ever needs one operation: read the raw payload of a
/// characteristic identified by UUID. Tests substitute an in-memory
/// implementation.
#[allow(async_fn_in_trait)]
pub trait SensorSource {
    async fn read_raw(&mut self, characteristic: Uuid) -> Result<Vec<u8>, SensorError>;
}
