use clap::{Parser, ValueEnum};

use crate::decoder::ByteOrder;

/// Decoding parameters that differ between device firmware revisions.
///
/// The two known revisions disagree on integer byte order and on the raw
/// domain of the color sensor counts, so both are explicit configuration
/// rather than compile-time assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub byte_order: ByteOrder,
    /// Upper bound of a raw color count; counts map linearly onto [0, 255].
    pub color_raw_max: u32,
}

/// Known firmware revisions of the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FirmwareRevision {
    /// Little-endian integers, 16-bit color counts.
    Rev1,
    /// Big-endian integers, 12-bit color counts.
    Rev2,
}

impl FirmwareRevision {
    pub fn profile(self) -> DeviceProfile {
        match self {
            FirmwareRevision::Rev1 => DeviceProfile {
                byte_order: ByteOrder::Little,
                color_raw_max: 65535,
            },
            FirmwareRevision::Rev2 => DeviceProfile {
                byte_order: ByteOrder::Big,
                color_raw_max: 4097,
            },
        }
    }
}

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "nano-sense-reader")]
#[command(about = "Poll a BLE environmental sensing peripheral and print its readings")]
pub struct Args {
    /// MAC address of the peripheral to connect to (e.g. C8:5C:A2:1B:EE:4F)
    pub address: String,

    /// Firmware revision of the peripheral
    #[arg(long, value_enum, default_value = "rev1")]
    pub profile: FirmwareRevision,

    /// Seconds to sleep between polling cycles
    #[arg(long, default_value_t = 2)]
    pub interval: u64,
}
