//! Gyroscope sensor types and configuration

use crate::device::GyroData;

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250°/s range
    #[default]
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl GyroFullScale {
    /// Get the sensitivity in LSB/(°/s)
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps250 => 131.0,
            Self::Dps500 => 65.5,
            Self::Dps1000 => 32.8,
            Self::Dps2000 => 16.4,
        }
    }

    /// Byte written to `GYRO_CONFIG` for this range (`GYRO_FS_SEL` in bits 4:3)
    #[must_use]
    pub const fn register_value(self) -> u8 {
        (self as u8) << 3
    }
}

/// Gyroscope and temperature Digital Low Pass Filter, the `DLPF_CFG` field of `CONFIG`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroDlpf {
    /// 250 Hz bandwidth, 8 kHz internal rate
    Hz250 = 0,
    /// 184 Hz bandwidth
    Hz184 = 1,
    /// 92 Hz bandwidth
    Hz92 = 2,
    /// 41 Hz bandwidth
    #[default]
    Hz41 = 3,
    /// 20 Hz bandwidth
    Hz20 = 4,
    /// 10 Hz bandwidth
    Hz10 = 5,
    /// 5 Hz bandwidth
    Hz5 = 6,
    /// 3600 Hz bandwidth, 8 kHz internal rate
    Hz3600 = 7,
}

impl GyroDlpf {
    /// Internal sample rate in Hz before `SMPLRT_DIV` is applied
    #[must_use]
    pub const fn internal_rate_hz(self) -> u32 {
        match self {
            Self::Hz250 | Self::Hz3600 => 8000,
            _ => 1000,
        }
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from raw sensor values, `scale` in (°/s)/LSB
    #[must_use]
    pub fn from_raw(raw: GyroData, scale: f32) -> Self {
        Self {
            x: f32::from(raw.x) * scale,
            y: f32::from(raw.y) * scale,
            z: f32::from(raw.z) * scale,
        }
    }
}
