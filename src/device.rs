//! High-level driver API for the MPU-9250
//!
//! This module sequences bring-up of the primary sensor and its AK8963
//! magnetometer and performs the raw burst reads of every measurement group.
//!
//! Bring-up is a strict state machine:
//!
//! ```text
//! Uninitialized -> BusConfigured -> DeviceReset -> DeviceConfigured
//!     -> SecondaryBypassEnabled -> SecondaryConfigured -> Ready
//! ```
//!
//! A failed step leaves the driver in the state it was in, so the caller can
//! retry that step alone or restart from [`Mpu9250Driver::begin`].
//! [`Mpu9250Driver::init_with_retry`] steps back one state where the failed
//! step depends on the one before it. Measurement reads are refused until the
//! driver is [`DriverState::Ready`].

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::interface::{DeviceInterface, I2cTransport};
use crate::registers::magnetometer::{self, Ak8963};
use crate::registers::{self, Mpu9250};
use crate::sensors::{
    AccelDlpf, AccelFullScale, GyroDlpf, GyroFullScale, MagAdjustment, MagMode, MagResolution,
};
use crate::{Error, InitStage, AK8963_ADDRESS, KNOWN_DEVICE_IDS, MPU9250_ADDRESS_AD0_LOW};

/// Settle time after the bus is brought up, before the first transfer
const BUS_SETTLE_MS: u32 = 10;

/// Time for `PWR_MGMT_1.H_RESET` to complete
const RESET_MS: u32 = 100;

/// Wait after clock source and full-scale range writes
const CONFIG_STEP_MS: u32 = 50;

/// Wait after every AK8963 mode change
const MAG_MODE_SWITCH_MS: u32 = 10;

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelData {
    /// Decode `XOUT_H, XOUT_L, YOUT_H, YOUT_L, ZOUT_H, ZOUT_L`
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 6]) -> Self {
        let [xh, xl, yh, yl, zh, zl] = bytes;
        Self {
            x: i16::from_be_bytes([xh, xl]),
            y: i16::from_be_bytes([yh, yl]),
            z: i16::from_be_bytes([zh, zl]),
        }
    }
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

impl GyroData {
    /// Decode `XOUT_H, XOUT_L, YOUT_H, YOUT_L, ZOUT_H, ZOUT_L`
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 6]) -> Self {
        let [xh, xl, yh, yl, zh, zl] = bytes;
        Self {
            x: i16::from_be_bytes([xh, xl]),
            y: i16::from_be_bytes([yh, yl]),
            z: i16::from_be_bytes([zh, zl]),
        }
    }
}

/// Magnetometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagData {
    /// X-axis magnetic field (raw)
    pub x: i16,
    /// Y-axis magnetic field (raw)
    pub y: i16,
    /// Z-axis magnetic field (raw)
    pub z: i16,
}

impl MagData {
    /// Decode `HXL, HXH, HYL, HYH, HZL, HZH` (the AK8963 is little-endian)
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        let [xl, xh, yl, yh, zl, zh] = bytes;
        Self {
            x: i16::from_le_bytes([xl, xh]),
            y: i16::from_le_bytes([yl, yh]),
            z: i16::from_le_bytes([zl, zh]),
        }
    }
}

/// One raw sample of every measurement group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawData {
    /// Accelerometer
    pub accel: AccelData,
    /// Gyroscope
    pub gyro: GyroData,
    /// Die temperature
    pub temperature: i16,
    /// Magnetometer
    pub mag: MagData,
}

/// Bring-up progress of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Nothing verified yet
    Uninitialized,
    /// Bus settled and `WHO_AM_I` matched a known device
    BusConfigured,
    /// Device reset issued
    DeviceReset,
    /// Clock, ranges, filters and sample rate written
    DeviceConfigured,
    /// AK8963 reachable on the host bus
    SecondaryBypassEnabled,
    /// AK8963 adjustment read and measurement mode set
    SecondaryConfigured,
    /// Measurement reads are allowed
    Ready,
}

impl DriverState {
    /// State a failed step is retried from
    const fn retry_from(self) -> Self {
        match self {
            // Configuration only applies to a freshly reset device
            Self::DeviceReset => Self::BusConfigured,
            // A glitch that broke the magnetometer may have dropped bypass too
            Self::SecondaryBypassEnabled => Self::DeviceConfigured,
            other => other,
        }
    }
}

/// Sensor configuration programmed during bring-up
///
/// The defaults reproduce the reference register values: `GYRO_CONFIG = 0x00`,
/// `ACCEL_CONFIG = 0x00`, `CONFIG = 0x03`, `SMPLRT_DIV = 0x04`,
/// `ACCEL_CONFIG2 = 0x03` and `CNTL1 = 0x16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Gyroscope full-scale range
    pub gyro_range: GyroFullScale,
    /// Accelerometer full-scale range
    pub accel_range: AccelFullScale,
    /// Gyroscope and temperature low pass filter
    pub gyro_dlpf: GyroDlpf,
    /// Sample rate divider
    /// Actual sample rate = internal rate / (1 + `sample_rate_div`)
    pub sample_rate_div: u8,
    /// Accelerometer low pass filter
    pub accel_dlpf: AccelDlpf,
    /// AK8963 measurement mode entered at the end of bring-up
    pub mag_mode: MagMode,
    /// AK8963 output resolution
    pub mag_resolution: MagResolution,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            gyro_range: GyroFullScale::Dps250,
            accel_range: AccelFullScale::G2,
            gyro_dlpf: GyroDlpf::Hz41,
            sample_rate_div: 4,
            accel_dlpf: AccelDlpf::Hz45,
            mag_mode: MagMode::Continuous100Hz,
            mag_resolution: MagResolution::Bits16,
        }
    }
}

impl DriverConfig {
    /// Calculate the effective output data rate in Hz
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_rate_hz(&self) -> f32 {
        self.gyro_dlpf.internal_rate_hz() as f32 / (1.0 + f32::from(self.sample_rate_div))
    }
}

/// How [`Mpu9250Driver::init_with_retry`] handles a failing step
///
/// The attempt bound is counted separately for each step over one call.
/// There is no backoff: every retry waits the same fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Attempts per step, `None` for no limit
    pub max_attempts: Option<u32>,
    /// Delay between attempts in milliseconds
    pub delay_ms: u32,
}

impl RetryPolicy {
    /// Give up on a step after `max_attempts` failures (at least one attempt is made)
    #[must_use]
    pub const fn bounded(max_attempts: u32, delay_ms: u32) -> Self {
        let max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self {
            max_attempts: Some(max_attempts),
            delay_ms,
        }
    }

    /// Retry forever
    ///
    /// With the sensor absent or miswired, [`Mpu9250Driver::init_with_retry`]
    /// never returns under this policy.
    #[must_use]
    pub const fn unbounded(delay_ms: u32) -> Self {
        Self {
            max_attempts: None,
            delay_ms,
        }
    }

    /// Whether another attempt is allowed after `failures` failed attempts
    #[must_use]
    pub const fn allows_retry(&self, failures: u32) -> bool {
        match self.max_attempts {
            Some(max) => failures < max,
            None => true,
        }
    }
}

/// Main driver for the MPU-9250
pub struct Mpu9250Driver<I2C> {
    transport: I2cTransport<I2C>,
    address: u8,
    config: DriverConfig,
    state: DriverState,
    mag_adjustment: MagAdjustment,
}

impl<I2C> Mpu9250Driver<I2C> {
    /// Create a driver for a sensor at the default address (0x68) with the
    /// default configuration
    ///
    /// No bus traffic happens until [`begin`](Self::begin) or
    /// [`init`](Self::init) is called.
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, MPU9250_ADDRESS_AD0_LOW, DriverConfig::default())
    }

    /// Create a driver with a custom address and configuration
    pub fn with_config(i2c: I2C, address: u8, config: DriverConfig) -> Self {
        Self {
            transport: I2cTransport::new(i2c),
            address,
            config,
            state: DriverState::Uninitialized,
            mag_adjustment: MagAdjustment::NEUTRAL,
        }
    }

    /// Current bring-up state
    #[must_use]
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Whether measurement reads are allowed
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == DriverState::Ready
    }

    /// Configuration this driver programs into the device
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// I2C address of the primary sensor
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Magnetometer sensitivity adjustment
    ///
    /// Neutral (1.0 on every axis) until magnetometer bring-up completes.
    #[must_use]
    pub const fn mag_adjustment(&self) -> MagAdjustment {
        self.mag_adjustment
    }

    /// Consume the driver and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.transport.release()
    }

    fn transition(&mut self, next: DriverState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("MPU-9250: {} -> {}", self.state, next);

        self.state = next;
    }
}

impl<I2C, E> Mpu9250Driver<I2C>
where
    I2C: I2c<Error = E>,
{
    fn primary(&mut self) -> Mpu9250<DeviceInterface<'_, I2C>> {
        Mpu9250::new(self.transport.device(self.address))
    }

    fn secondary(&mut self) -> Ak8963<DeviceInterface<'_, I2C>> {
        Ak8963::new(self.transport.device(AK8963_ADDRESS))
    }

    fn expect_state(&self, expected: DriverState) -> Result<(), Error<E>> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState(self.state))
        }
    }

    /// Run the whole bring-up sequence once
    ///
    /// Stops at the first failing step. The returned error carries the failing
    /// stage (see [`Error::init_stage`]) and [`state`](Self::state) shows how far
    /// the sequence got.
    ///
    /// # Errors
    ///
    /// Returns the error of the first step that failed.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        self.begin(delay)?;
        self.reset(delay)?;
        self.configure(delay)?;
        self.enable_bypass()?;
        self.init_magnetometer(delay)
    }

    /// Run bring-up, retrying failing steps according to `policy`
    ///
    /// Resumes from the current state: a driver that halted in
    /// [`DriverState::DeviceReset`] continues with configuration rather than
    /// starting over. Returns immediately if the driver is already ready.
    ///
    /// A failed configuration is retried after a fresh reset, and a failed
    /// magnetometer bring-up after re-enabling bypass. Other steps are retried
    /// on their own.
    ///
    /// # Errors
    ///
    /// Returns the last error once a step has used up its attempts. Never
    /// returns an error under [`RetryPolicy::unbounded`].
    pub fn init_with_retry<D>(&mut self, delay: &mut D, policy: RetryPolicy) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        // Failures per step, indexed by the state the step starts from
        let mut failures = [0u32; 7];

        while self.state != DriverState::Ready {
            let failed_in = self.state;
            if let Err(error) = self.step(delay) {
                let count = &mut failures[failed_in as usize];
                *count = count.saturating_add(1);

                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "MPU-9250: init failed in {} (stage {}), attempt {}",
                    failed_in,
                    error.init_stage(),
                    *count
                );

                if !policy.allows_retry(*count) {
                    return Err(error);
                }

                let restart = failed_in.retry_from();
                if restart != failed_in {
                    self.transition(restart);
                }
                delay.delay_ms(policy.delay_ms);
            }
        }

        Ok(())
    }

    fn step<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        match self.state {
            DriverState::Uninitialized => self.begin(delay),
            DriverState::BusConfigured => self.reset(delay),
            DriverState::DeviceReset => self.configure(delay),
            DriverState::DeviceConfigured => self.enable_bypass(),
            DriverState::SecondaryBypassEnabled => self.init_magnetometer(delay),
            DriverState::SecondaryConfigured => {
                self.transition(DriverState::Ready);
                Ok(())
            }
            DriverState::Ready => Ok(()),
        }
    }

    /// Wait for the bus to settle and verify the device identity
    ///
    /// Allowed from any state; restarts bring-up and clears the magnetometer
    /// adjustment. On success the driver is [`DriverState::BusConfigured`].
    ///
    /// # Errors
    ///
    /// - [`Error::Init`] with [`InitStage::Connection`] if `WHO_AM_I` cannot be read
    /// - [`Error::InvalidDevice`] if it reads back an unknown value
    pub fn begin<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        self.state = DriverState::Uninitialized;
        self.mag_adjustment = MagAdjustment::NEUTRAL;

        delay.delay_ms(BUS_SETTLE_MS);

        let who_am_i = self
            .who_am_i()
            .map_err(|source| Error::Init {
                stage: InitStage::Connection,
                source,
            })?;

        if !KNOWN_DEVICE_IDS.contains(&who_am_i) {
            #[cfg(feature = "defmt")]
            defmt::error!("MPU-9250: unexpected WHO_AM_I {=u8:#x}", who_am_i);

            return Err(Error::InvalidDevice(who_am_i));
        }

        self.transition(DriverState::BusConfigured);
        Ok(())
    }

    /// Issue a device reset and wait for it to complete
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the driver is [`DriverState::BusConfigured`],
    /// [`Error::Init`] with [`InitStage::Reset`] if the write fails.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        self.expect_state(DriverState::BusConfigured)?;

        self.primary()
            .pwr_mgmt_1()
            .write(|w| {
                w.set_h_reset(true);
            })
            .map_err(|source| Error::Init {
                stage: InitStage::Reset,
                source,
            })?;
        delay.delay_ms(RESET_MS);

        self.transition(DriverState::DeviceReset);
        Ok(())
    }

    /// Wake the device and program clock, ranges, filters and sample rate
    ///
    /// The first failing write aborts the sequence; the driver stays in
    /// [`DriverState::DeviceReset`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the driver is [`DriverState::DeviceReset`],
    /// [`Error::Init`] with [`InitStage::Configuration`] if any write fails.
    pub fn configure<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        self.expect_state(DriverState::DeviceReset)?;

        let config = self.config;
        let fail = |source| Error::Init {
            stage: InitStage::Configuration,
            source,
        };

        // Wake up, PLL referenced to the gyroscope
        self.primary()
            .pwr_mgmt_1()
            .write(|w| {
                w.set_clksel(1);
            })
            .map_err(fail)?;
        delay.delay_ms(CONFIG_STEP_MS);

        self.primary()
            .gyro_config()
            .write(|w| {
                w.set_gyro_fs_sel(config.gyro_range as u8);
            })
            .map_err(fail)?;
        delay.delay_ms(CONFIG_STEP_MS);

        self.primary()
            .accel_config()
            .write(|w| {
                w.set_accel_fs_sel(config.accel_range as u8);
            })
            .map_err(fail)?;
        delay.delay_ms(CONFIG_STEP_MS);

        // FSYNC disabled
        self.primary()
            .dlpf_config()
            .write(|w| {
                w.set_dlpf_cfg(config.gyro_dlpf as u8);
            })
            .map_err(fail)?;

        self.primary()
            .smplrt_div()
            .write(|w| {
                w.set_smplrt_div(config.sample_rate_div);
            })
            .map_err(fail)?;

        self.primary()
            .accel_config_2()
            .write(|w| {
                w.set_a_dlpfcfg(config.accel_dlpf as u8);
            })
            .map_err(fail)?;

        self.transition(DriverState::DeviceConfigured);
        Ok(())
    }

    /// Put the auxiliary bus in bypass so the AK8963 answers on the host bus
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the driver is [`DriverState::DeviceConfigured`],
    /// [`Error::Init`] with [`InitStage::Bypass`] if the write fails.
    pub fn enable_bypass(&mut self) -> Result<(), Error<E>> {
        self.expect_state(DriverState::DeviceConfigured)?;

        self.primary()
            .int_pin_cfg()
            .write(|w| {
                w.set_bypass_en(true);
            })
            .map_err(|source| Error::Init {
                stage: InitStage::Bypass,
                source,
            })?;

        self.transition(DriverState::SecondaryBypassEnabled);
        Ok(())
    }

    /// Read the AK8963 fuse ROM adjustment and start measuring
    ///
    /// Sequence: power down, fuse ROM mode, read `ASAX..ASAZ`, power down,
    /// measurement mode, with 10 ms after every mode change. The adjustment is
    /// stored only once every step has succeeded; until then it stays neutral.
    /// On success the driver passes through [`DriverState::SecondaryConfigured`]
    /// to [`DriverState::Ready`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the driver is
    /// [`DriverState::SecondaryBypassEnabled`], [`Error::Init`] with
    /// [`InitStage::Magnetometer`] if any transfer fails.
    pub fn init_magnetometer<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        self.expect_state(DriverState::SecondaryBypassEnabled)?;

        self.mag_adjustment = MagAdjustment::NEUTRAL;
        let config = self.config;
        let fail = |source| Error::Init {
            stage: InitStage::Magnetometer,
            source,
        };

        self.write_mag_mode(MagMode::PowerDown, MagResolution::Bits14)
            .map_err(fail)?;
        delay.delay_ms(MAG_MODE_SWITCH_MS);

        self.write_mag_mode(MagMode::FuseRom, MagResolution::Bits14)
            .map_err(fail)?;
        delay.delay_ms(MAG_MODE_SWITCH_MS);

        let mut asa = [0u8; 3];
        self.transport
            .read_registers(AK8963_ADDRESS, magnetometer::ASAX, &mut asa)
            .map_err(fail)?;
        let adjustment = MagAdjustment::from_asa(asa);

        // The mode must pass through power-down between fuse ROM and measurement
        self.write_mag_mode(MagMode::PowerDown, MagResolution::Bits14)
            .map_err(fail)?;
        delay.delay_ms(MAG_MODE_SWITCH_MS);

        self.write_mag_mode(config.mag_mode, config.mag_resolution)
            .map_err(fail)?;
        delay.delay_ms(MAG_MODE_SWITCH_MS);

        self.mag_adjustment = adjustment;

        #[cfg(feature = "defmt")]
        defmt::debug!("AK8963: adjustment {}", adjustment);

        self.transition(DriverState::SecondaryConfigured);
        self.transition(DriverState::Ready);
        Ok(())
    }

    fn write_mag_mode(&mut self, mode: MagMode, resolution: MagResolution) -> Result<(), E> {
        self.secondary().cntl_1().write(|w| {
            w.set_mode(mode as u8);
            w.set_bit(resolution.is_16_bit());
        })
    }

    fn who_am_i(&mut self) -> Result<u8, E> {
        let reg = self.primary().who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Allowed in any state.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<E>> {
        Ok(self.who_am_i()?)
    }

    /// Check that a known device answers at the configured address
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_connected(&mut self) -> Result<bool, Error<E>> {
        let who_am_i = self.read_who_am_i()?;
        Ok(KNOWN_DEVICE_IDS.contains(&who_am_i))
    }

    /// Read the AK8963 `WIA` register (0x48 on a genuine part)
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] before bypass is enabled, otherwise a bus error.
    pub fn read_magnetometer_id(&mut self) -> Result<u8, Error<E>> {
        if !matches!(
            self.state,
            DriverState::SecondaryBypassEnabled
                | DriverState::SecondaryConfigured
                | DriverState::Ready
        ) {
            return Err(Error::InvalidState(self.state));
        }

        let reg = self.secondary().wia().read()?;
        Ok(reg.device_id())
    }

    /// Read accelerometer data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes from one 6-byte burst.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] before bring-up completes, otherwise a bus error.
    pub fn read_accel_raw(&mut self) -> Result<AccelData, Error<E>> {
        self.expect_state(DriverState::Ready)?;

        let mut buffer = [0u8; 6];
        self.transport
            .read_registers(self.address, registers::ACCEL_XOUT_H, &mut buffer)?;

        Ok(AccelData::from_be_bytes(buffer))
    }

    /// Read gyroscope data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes from one 6-byte burst.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] before bring-up completes, otherwise a bus error.
    pub fn read_gyro_raw(&mut self) -> Result<GyroData, Error<E>> {
        self.expect_state(DriverState::Ready)?;

        let mut buffer = [0u8; 6];
        self.transport
            .read_registers(self.address, registers::GYRO_XOUT_H, &mut buffer)?;

        Ok(GyroData::from_be_bytes(buffer))
    }

    /// Read temperature sensor
    ///
    /// Returns the raw 16-bit signed value; see
    /// [`temperature_to_celsius`](crate::sensors::temperature_to_celsius).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] before bring-up completes, otherwise a bus error.
    pub fn read_temp_raw(&mut self) -> Result<i16, Error<E>> {
        self.expect_state(DriverState::Ready)?;

        let mut buffer = [0u8; 2];
        self.transport
            .read_registers(self.address, registers::TEMP_OUT_H, &mut buffer)?;

        Ok(i16::from_be_bytes(buffer))
    }

    /// Read magnetometer data
    ///
    /// Reads `HXL..HZH` and `ST2` in one 7-byte burst from the AK8963. Reading
    /// `ST2` releases the data lock for the next measurement.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] before bring-up completes, [`Error::MagOverflow`]
    /// if `ST2.HOFL` is set (the data bytes are discarded), otherwise a bus error.
    pub fn read_mag_raw(&mut self) -> Result<MagData, Error<E>> {
        self.expect_state(DriverState::Ready)?;

        let mut buffer = [0u8; 7];
        self.transport
            .read_registers(AK8963_ADDRESS, magnetometer::HXL, &mut buffer)?;

        let [xl, xh, yl, yh, zl, zh, st2] = buffer;
        if magnetometer::field_sets::St2::from([st2]).hofl() {
            #[cfg(feature = "defmt")]
            defmt::warn!("AK8963: magnetic sensor overflow");

            return Err(Error::MagOverflow);
        }

        Ok(MagData::from_le_bytes([xl, xh, yl, yh, zl, zh]))
    }

    /// Read every measurement group
    ///
    /// All four groups are always read. The call succeeds only if every read
    /// succeeds; otherwise the first error, in accel, gyro, temperature,
    /// magnetometer order, is returned and no partial sample is produced.
    ///
    /// # Errors
    ///
    /// Returns the error of the first group whose read failed.
    pub fn read_all_raw(&mut self) -> Result<RawData, Error<E>> {
        let accel = self.read_accel_raw();
        let gyro = self.read_gyro_raw();
        let temperature = self.read_temp_raw();
        let mag = self.read_mag_raw();

        Ok(RawData {
            accel: accel?,
            gyro: gyro?,
            temperature: temperature?,
            mag: mag?,
        })
    }
}
