//! Sensor modules for the MPU-9250
//!
//! This module provides types, enums, and configuration values for each sensor
//! in the MPU-9250:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//! - Die temperature
//! - Magnetometer (3-axis, AK8963)
//!
//! Raw reads are performed through `Mpu9250Driver`; conversion to physical
//! units happens in `ImuService`.

pub mod accelerometer;
pub mod gyroscope;
pub mod magnetometer;
pub mod temperature;

// Re-export main types
pub use accelerometer::{AccelDataG, AccelDlpf, AccelFullScale};
pub use gyroscope::{GyroDataDps, GyroDlpf, GyroFullScale};
pub use magnetometer::{MagAdjustment, MagDataUT, MagMode, MagReading, MagResolution};
pub use temperature::{counts_to_celsius, temperature_to_celsius};
