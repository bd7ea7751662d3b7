#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod registers;
pub mod sensors;
pub mod service;

// Re-export main types
pub use device::{
    AccelData, DriverConfig, DriverState, GyroData, MagData, Mpu9250Driver, RawData, RetryPolicy,
};
pub use interface::{DeviceInterface, I2cTransport};
pub use sensors::{
    AccelDataG, AccelDlpf, AccelFullScale, GyroDataDps, GyroDlpf, GyroFullScale, MagAdjustment,
    MagDataUT, MagMode, MagReading, MagResolution,
};
pub use service::{ImuData, ImuService, ScaleFactors};

/// MPU-9250 I2C address when AD0 pin is low (default: 0x68)
pub const MPU9250_ADDRESS_AD0_LOW: u8 = 0x68;

/// MPU-9250 I2C address when AD0 pin is high (alternative: 0x69)
pub const MPU9250_ADDRESS_AD0_HIGH: u8 = 0x69;

/// AK8963 I2C address, reachable once bypass mode is enabled
pub const AK8963_ADDRESS: u8 = sensors::magnetometer::AK8963_I2C_ADDRESS;

/// `WHO_AM_I` value of the MPU-9250
pub const WHO_AM_I_MPU9250: u8 = 0x71;

/// `WHO_AM_I` value of the MPU-9255
pub const WHO_AM_I_MPU9255: u8 = 0x73;

/// `WHO_AM_I` value of the MPU-6500 die without a magnetometer
pub const WHO_AM_I_MPU6500: u8 = 0x70;

/// Every `WHO_AM_I` value accepted as a connected device
pub const KNOWN_DEVICE_IDS: [u8; 3] = [WHO_AM_I_MPU9250, WHO_AM_I_MPU9255, WHO_AM_I_MPU6500];

/// Initialization stage that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStage {
    /// Settle delay and `WHO_AM_I` check
    Connection,
    /// Device reset through `PWR_MGMT_1`
    Reset,
    /// Clock source, full-scale ranges, filters and sample rate
    Configuration,
    /// Auxiliary bus bypass for the magnetometer
    Bypass,
    /// AK8963 power cycle, fuse ROM adjustment read and mode selection
    Magnetometer,
}

/// Driver errors
///
/// Every fallible operation returns one of these instead of a default value,
/// so a failed read can never be mistaken for a measured zero.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
    /// A bus transfer failed during initialization
    Init {
        /// Stage the sequence halted in
        stage: InitStage,
        /// Underlying bus error
        source: E,
    },
    /// AK8963 reported a magnetic sensor overflow; the sample was discarded
    MagOverflow,
    /// The operation is not allowed in the driver's current state
    InvalidState(DriverState),
}

impl<E> Error<E> {
    /// The initialization stage this error belongs to, if any
    #[must_use]
    pub const fn init_stage(&self) -> Option<InitStage> {
        match self {
            Self::Init { stage, .. } => Some(*stage),
            Self::InvalidDevice(_) => Some(InitStage::Connection),
            _ => None,
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
