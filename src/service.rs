//! Conversion of raw samples to physical units
//!
//! [`ImuService`] wraps a ready [`Mpu9250Driver`] and returns every channel in
//! physical units. Failures are always propagated: a failed read is reported
//! as an error and never turned into a zero reading.

use embedded_hal::i2c::I2c;

use crate::device::{AccelData, DriverConfig, GyroData, MagData, Mpu9250Driver, RawData};
use crate::sensors::{
    temperature_to_celsius, AccelDataG, GyroDataDps, MagAdjustment, MagDataUT, MagReading,
};
use crate::Error;

/// Raw-to-physical conversion factors
///
/// Derived from the [`DriverConfig`] that was programmed into the device, so
/// the factors always match the configured full-scale ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactors {
    /// g per LSB
    pub accel: f32,
    /// dps per LSB
    pub gyro: f32,
    /// µT per LSB
    pub mag: f32,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::from_config(&DriverConfig::default())
    }
}

impl ScaleFactors {
    /// Factors for the given configuration
    #[must_use]
    pub fn from_config(config: &DriverConfig) -> Self {
        Self {
            accel: 1.0 / config.accel_range.sensitivity(),
            gyro: 1.0 / config.gyro_range.sensitivity(),
            mag: config.mag_resolution.scale(),
        }
    }

    /// Convert a raw accelerometer sample to g
    #[must_use]
    pub fn accel(&self, raw: AccelData) -> AccelDataG {
        AccelDataG::from_raw(raw, self.accel)
    }

    /// Convert a raw gyroscope sample to degrees per second
    #[must_use]
    pub fn gyro(&self, raw: GyroData) -> GyroDataDps {
        GyroDataDps::from_raw(raw, self.gyro)
    }

    /// Convert a raw temperature sample to °C
    ///
    /// The temperature scale does not depend on the configuration.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn temperature(&self, raw: i16) -> f32 {
        temperature_to_celsius(raw)
    }

    /// Convert a raw magnetometer sample to µT, with and without `adjustment`
    #[must_use]
    pub fn mag(&self, raw: MagData, adjustment: &MagAdjustment) -> MagReading {
        let scaled = MagDataUT::from_raw(raw, self.mag);
        MagReading {
            scaled,
            adjusted: adjustment.apply(&scaled),
        }
    }

    /// Convert a full raw sample
    #[must_use]
    pub fn convert(&self, raw: &RawData, adjustment: &MagAdjustment) -> ImuData {
        ImuData {
            accel: self.accel(raw.accel),
            gyro: self.gyro(raw.gyro),
            temperature_c: self.temperature(raw.temperature),
            mag: self.mag(raw.mag, adjustment),
        }
    }
}

/// One sample of every channel in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuData {
    /// Acceleration in g
    pub accel: AccelDataG,
    /// Angular rate in dps
    pub gyro: GyroDataDps,
    /// Die temperature in °C
    pub temperature_c: f32,
    /// Magnetic field in µT
    pub mag: MagReading,
}

/// Physical-unit front end for a [`Mpu9250Driver`]
pub struct ImuService<I2C> {
    driver: Mpu9250Driver<I2C>,
    scale: ScaleFactors,
}

impl<I2C> ImuService<I2C> {
    /// Wrap a driver
    ///
    /// The scale factors are taken from the driver's configuration. The driver
    /// does not need to be ready yet, but every read fails with
    /// [`Error::InvalidState`] until it is.
    pub fn new(driver: Mpu9250Driver<I2C>) -> Self {
        let scale = ScaleFactors::from_config(driver.config());
        Self { driver, scale }
    }

    /// Scale factors in use
    #[must_use]
    pub const fn scale_factors(&self) -> &ScaleFactors {
        &self.scale
    }

    /// Access the wrapped driver
    #[must_use]
    pub const fn driver(&self) -> &Mpu9250Driver<I2C> {
        &self.driver
    }

    /// Mutable access to the wrapped driver, e.g. to re-run initialization
    pub fn driver_mut(&mut self) -> &mut Mpu9250Driver<I2C> {
        &mut self.driver
    }

    /// Unwrap the driver
    pub fn into_inner(self) -> Mpu9250Driver<I2C> {
        self.driver
    }
}

impl<I2C, E> ImuService<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Check that a known device answers on the bus
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_connected(&mut self) -> Result<bool, Error<E>> {
        self.driver.is_connected()
    }

    /// Read acceleration in g
    ///
    /// # Errors
    ///
    /// Propagates any error from the raw read.
    pub fn accelerometer(&mut self) -> Result<AccelDataG, Error<E>> {
        let raw = self.driver.read_accel_raw()?;
        Ok(self.scale.accel(raw))
    }

    /// Read angular rate in dps
    ///
    /// # Errors
    ///
    /// Propagates any error from the raw read.
    pub fn gyroscope(&mut self) -> Result<GyroDataDps, Error<E>> {
        let raw = self.driver.read_gyro_raw()?;
        Ok(self.scale.gyro(raw))
    }

    /// Read die temperature in °C
    ///
    /// # Errors
    ///
    /// Propagates any error from the raw read.
    pub fn temperature(&mut self) -> Result<f32, Error<E>> {
        let raw = self.driver.read_temp_raw()?;
        Ok(self.scale.temperature(raw))
    }

    /// Read the magnetic field in µT
    ///
    /// # Errors
    ///
    /// Propagates any error from the raw read, including
    /// [`Error::MagOverflow`].
    pub fn magnetometer(&mut self) -> Result<MagReading, Error<E>> {
        let raw = self.driver.read_mag_raw()?;
        Ok(self.scale.mag(raw, &self.driver.mag_adjustment()))
    }

    /// Read every channel
    ///
    /// # Errors
    ///
    /// Every group is read; the first failing group's error is returned and no
    /// partial sample is produced.
    pub fn all(&mut self) -> Result<ImuData, Error<E>> {
        let raw = self.driver.read_all_raw()?;
        Ok(self.scale.convert(&raw, &self.driver.mag_adjustment()))
    }
}
