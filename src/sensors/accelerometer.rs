//! Accelerometer sensor types and configuration
//!
//! Provides types, enums, and utility functions for the MPU-9250's 3-axis accelerometer.

use crate::device::AccelData;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    #[default]
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelFullScale {
    /// Get the sensitivity in LSB/g (Least Significant Bit per g)
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0, // LSB/g
            Self::G4 => 8192.0,  // LSB/g
            Self::G8 => 4096.0,  // LSB/g
            Self::G16 => 2048.0, // LSB/g
        }
    }

    /// Byte written to `ACCEL_CONFIG` for this range (`ACCEL_FS_SEL` in bits 4:3)
    #[must_use]
    pub const fn register_value(self) -> u8 {
        (self as u8) << 3
    }
}

/// Accelerometer Digital Low Pass Filter (DLPF) configuration
///
/// Written to `A_DLPFCFG` with `ACCEL_FCHOICE_B` cleared. Setting 0 is the
/// same 218 Hz filter as setting 1 and is not listed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelDlpf {
    /// 218.1 Hz bandwidth
    Hz218 = 1,
    /// 99 Hz bandwidth
    Hz99 = 2,
    /// 44.8 Hz bandwidth
    #[default]
    Hz45 = 3,
    /// 21.2 Hz bandwidth
    Hz21 = 4,
    /// 10.2 Hz bandwidth
    Hz10 = 5,
    /// 5.05 Hz bandwidth
    Hz5 = 6,
    /// 420 Hz bandwidth
    Hz420 = 7,
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw` - Raw X, Y, Z values
    /// * `scale` - g per LSB (the reciprocal of [`AccelFullScale::sensitivity`])
    #[must_use]
    pub fn from_raw(raw: AccelData, scale: f32) -> Self {
        Self {
            x: f32::from(raw.x) * scale,
            y: f32::from(raw.y) * scale,
            z: f32::from(raw.z) * scale,
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
