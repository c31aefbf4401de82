/// Typed physical quantities produced by the decoder
///
/// Unit conversions live on the wrapper types so a Celsius value can never
/// be fed into code expecting Fahrenheit without an explicit conversion.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(pub f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fahrenheit(pub f64);

impl Celsius {
    pub fn to_fahrenheit(self) -> Fahrenheit {
        Fahrenheit(self.0 * 1.8 + 32.0)
    }
}

/// Relative humidity in percent. Nominally in [0, 100] but not clamped;
/// the firmware is trusted to report plausible values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeHumidity(pub f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pascals(pub f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kilopascals(pub f64);

impl Pascals {
    pub fn to_kilopascals(self) -> Kilopascals {
        Kilopascals(self.0 / 1000.0)
    }
}

/// 8-bit color sample from the peripheral's light sensor.
///
/// `intensity` is the clear-channel light reading; the presentation layer
/// reuses it for all three channels when rendering a grayscale swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub intensity: u8,
}

/// One full polling cycle's worth of decoded channels.
///
/// `color_text` keeps the raw comma-separated field string (sentinel
/// stripped) so the output can echo the 16-bit values as the device sent
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentReading {
    pub temperature: Fahrenheit,
    pub humidity: RelativeHumidity,
    pub pressure: Kilopascals,
    pub color_text: String,
    pub color: Rgba,
}
