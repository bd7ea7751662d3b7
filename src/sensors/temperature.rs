//! Die temperature conversion

/// Temperature sensitivity in LSB/°C
pub const TEMP_SENSITIVITY: f32 = 333.87;

/// Temperature at a raw reading of zero, in °C
pub const TEMP_OFFSET_C: f32 = 21.0;

/// Convert a raw `TEMP_OUT` value to degrees Celsius
///
/// `Temp_degC = (TEMP_OUT - RoomTemp_Offset) / Temp_Sensitivity + 21`, with a
/// room temperature offset of zero. The register is signed 16-bit, so the
/// highest reportable value is about 119.1 °C.
#[must_use]
pub fn temperature_to_celsius(raw: i16) -> f32 {
    counts_to_celsius(f32::from(raw))
}

/// Same conversion for a count that is already a float, e.g. an averaged sample
#[must_use]
pub fn counts_to_celsius(counts: f32) -> f32 {
    counts / TEMP_SENSITIVITY + TEMP_OFFSET_C
}
