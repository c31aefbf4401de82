/// Console rendering of decoded readings
///
/// Formatting is split from printing so the line formats can be tested
/// without capturing stdout. Measurement lines go to stdout; diagnostics
/// go through the log facade elsewhere.
use colored::{ColoredString, Colorize};

use crate::models::{EnvironmentReading, Fahrenheit, Kilopascals, RelativeHumidity, Rgba};

pub fn format_temperature(temperature: Fahrenheit) -> String {
    format!("Temperature: {:.2}°F", temperature.0)
}

pub fn format_humidity(humidity: RelativeHumidity) -> String {
    format!("Humidity: {:.2}%", humidity.0)
}

pub fn format_pressure(pressure: Kilopascals) -> String {
    format!("Barometric Pressure: {:.2} kPa", pressure.0)
}

pub fn format_color(color: Rgba) -> String {
    format!(
        " 8-bit Color values (r,g,b,a): {},{},{},{}",
        color.red, color.green, color.blue, color.intensity
    )
}

/// Two tab stops of background color, gray foreground like the reference
/// output.
fn color_swatch(color: Rgba) -> ColoredString {
    "\t\t"
        .truecolor(127, 127, 127)
        .on_truecolor(color.red, color.green, color.blue)
}

/// Grayscale swatch reusing the light-intensity value for all three
/// channels.
fn intensity_swatch(color: Rgba) -> ColoredString {
    "\t\t".on_truecolor(color.intensity, color.intensity, color.intensity)
}

/// Print one polling cycle: one line per channel, then the swatches.
pub fn render(reading: &EnvironmentReading) {
    println!();
    println!("{}", format_temperature(reading.temperature));
    println!("{}", format_humidity(reading.humidity));
    println!("{}", format_pressure(reading.pressure));
    println!("16-bit Color values (r,g,b,a): {}", reading.color_text);
    println!("{}", format_color(reading.color));
    println!("Color Swatch");
    println!("{}", color_swatch(reading.color));
    println!("{}", intensity_swatch(reading.color));
}
