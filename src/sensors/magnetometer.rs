//! Magnetometer sensor types and configuration
//!
//! Provides types, enums, constants, and utility functions for the MPU-9250's
//! AK8963 3-axis magnetometer. The AK8963 is reached directly on the host bus
//! once bypass mode is enabled on the primary sensor.

use crate::device::MagData;

/// AK8963 magnetometer I2C address
pub const AK8963_I2C_ADDRESS: u8 = 0x0C;

/// Expected `WIA` value for AK8963
pub const AK8963_WIA_VALUE: u8 = 0x48;

/// Magnetometer operating mode, the `MODE` field of `CNTL1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagMode {
    /// Power-down mode
    PowerDown = 0x0,
    /// Single measurement mode
    Single = 0x1,
    /// Continuous measurement mode 1 (8 Hz)
    Continuous8Hz = 0x2,
    /// External trigger measurement mode
    ExternalTrigger = 0x4,
    /// Continuous measurement mode 2 (100 Hz)
    #[default]
    Continuous100Hz = 0x6,
    /// Self-test mode
    SelfTest = 0x8,
    /// Fuse ROM access mode
    FuseRom = 0xF,
}

/// Magnetometer output resolution, the `BIT` field of `CNTL1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagResolution {
    /// 14-bit output, 0.6 µT/LSB
    Bits14,
    /// 16-bit output, 0.15 µT/LSB
    #[default]
    Bits16,
}

impl MagResolution {
    /// Scale factor in µT/LSB
    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Bits14 => 0.6,
            Self::Bits16 => 0.15,
        }
    }

    /// Value of the `BIT` field in `CNTL1`
    #[must_use]
    pub const fn is_16_bit(self) -> bool {
        matches!(self, Self::Bits16)
    }
}

/// Factory sensitivity adjustment read from the AK8963 fuse ROM
///
/// Each factor is `(ASA + 128) / 256`, in the range 0.5 ..= ~1.496.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagAdjustment {
    /// X-axis factor
    pub x: f32,
    /// Y-axis factor
    pub y: f32,
    /// Z-axis factor
    pub z: f32,
}

impl Default for MagAdjustment {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl MagAdjustment {
    /// No correction
    pub const NEUTRAL: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// Compute the factors from the raw `ASAX`, `ASAY`, `ASAZ` bytes
    #[must_use]
    pub fn from_asa(asa: [u8; 3]) -> Self {
        Self {
            x: Self::factor(asa[0]),
            y: Self::factor(asa[1]),
            z: Self::factor(asa[2]),
        }
    }

    fn factor(asa: u8) -> f32 {
        (f32::from(asa) + 128.0) / 256.0
    }

    /// Apply the per-axis factors to a scaled reading
    #[must_use]
    pub fn apply(&self, data: &MagDataUT) -> MagDataUT {
        MagDataUT {
            x: data.x * self.x,
            y: data.y * self.y,
            z: data.z * self.z,
        }
    }
}

/// Magnetometer data in microteslas (µT)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataUT {
    /// X-axis magnetic field in µT
    pub x: f32,
    /// Y-axis magnetic field in µT
    pub y: f32,
    /// Z-axis magnetic field in µT
    pub z: f32,
}

impl MagDataUT {
    /// Create from raw sensor values, `scale` in µT/LSB
    #[must_use]
    pub fn from_raw(raw: MagData, scale: f32) -> Self {
        Self {
            x: f32::from(raw.x) * scale,
            y: f32::from(raw.y) * scale,
            z: f32::from(raw.z) * scale,
        }
    }

    /// Calculate the magnitude of the magnetic field vector
    ///
    /// Returns the magnitude in µT.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// One magnetometer reading, with and without the factory adjustment
///
/// Both are exposed so the caller decides whether the fuse ROM correction is
/// wanted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagReading {
    /// Raw value times the resolution scale
    pub scaled: MagDataUT,
    /// `scaled` multiplied by the per-axis [`MagAdjustment`]
    pub adjusted: MagDataUT,
}
