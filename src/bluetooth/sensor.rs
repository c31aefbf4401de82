/// GATT client for the environmental sensing peripheral
use futures_util::StreamExt;
use log::{debug, info, warn};
use std::collections::HashMap;
use tokio::time::{timeout, Duration};

use bluer::gatt::remote::Characteristic;
use bluer::{Adapter, AdapterEvent, Address, Device, Uuid};

use super::{SensorError, SensorSource, ENVIRONMENTAL_SENSING_SERVICE};

const DISCOVERY_TIMEOUT_SECS: u64 = 30;

/// A connected peripheral with the Environmental Sensing service resolved.
///
/// Characteristics are cached by UUID at connect time; each read afterwards
/// is a single blocking GATT read with no retry and no per-read timeout.
pub struct EnvironmentalSensor {
    device: Device,
    characteristics: HashMap<Uuid, Characteristic>,
}

impl EnvironmentalSensor {
    /// Discover and connect to the peripheral at `address`, then resolve
    /// the Environmental Sensing service and cache its characteristics.
    pub async fn connect(adapter: &Adapter, address: Address) -> Result<Self, SensorError> {
        wait_for_device(adapter, address).await?;

        let device = adapter.device(address)?;
        if !device.is_connected().await? {
            info!("Connecting to {}", address);
            device.connect().await?;
        }

        info!("Discovering services...");
        let mut characteristics = HashMap::new();
        let mut service_found = false;

        for service in device.services().await? {
            if service.uuid().await? != ENVIRONMENTAL_SENSING_SERVICE {
                continue;
            }
            service_found = true;

            for characteristic in service.characteristics().await? {
                let uuid = characteristic.uuid().await?;
                debug!("Found characteristic {}", uuid);
                characteristics.insert(uuid, characteristic);
            }
        }

        if !service_found {
            return Err(SensorError::ServiceNotFound);
        }

        Ok(Self {
            device,
            characteristics,
        })
    }

    pub async fn disconnect(self) -> Result<(), SensorError> {
        self.device.disconnect().await?;
        Ok(())
    }
}

impl SensorSource for EnvironmentalSensor {
    async fn read_raw(&mut self, characteristic: Uuid) -> Result<Vec<u8>, SensorError> {
        let characteristic = self
            .characteristics
            .get(&characteristic)
            .ok_or(SensorError::CharacteristicNotFound(characteristic))?;

        Ok(characteristic.read().await?)
    }
}

/// Wait until the adapter knows about the peripheral, scanning if needed.
async fn wait_for_device(adapter: &Adapter, address: Address) -> Result<(), SensorError> {
    // Already known to bluetoothd from an earlier scan
    if adapter.device_addresses().await?.contains(&address) {
        return Ok(());
    }

    // Configure discovery filter for Low Energy devices only
    let filter = bluer::DiscoveryFilter {
        transport: bluer::DiscoveryTransport::Le,
        duplicate_data: false,
        ..Default::default()
    };

    // Apply the discovery filter (warn if it fails, but continue)
    if let Err(e) = adapter.set_discovery_filter(filter).await {
        warn!("Failed to set discovery filter: {}", e);
    }

    info!("Scanning for {}...", address);
    let mut events = adapter.discover_devices().await?;

    let found = timeout(Duration::from_secs(DISCOVERY_TIMEOUT_SECS), async {
        while let Some(event) = events.next().await {
            debug!("Discovery event: {:?}", event);
            if let AdapterEvent::DeviceAdded(addr) = event {
                if addr == address {
                    return true;
                }
            }
        }
        false
    })
    .await
    .unwrap_or(false);

    if found {
        Ok(())
    } else {
        Err(SensorError::DeviceNotFound(address))
    }
}
