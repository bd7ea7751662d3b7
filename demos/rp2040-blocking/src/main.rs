//! Nine-axis sensor reading example for MPU-9250 on Raspberry Pi Pico W (Blocking version)
//!
//! This example demonstrates:
//! - Bring-up with retries until the sensor answers
//! - Polling accelerometer, gyroscope, temperature and magnetometer at 10 Hz
//! - Raw and factory-adjusted magnetometer output
//!
//! Hardware connections (I2C0):
//! - SDA: GPIO0
//! - SCL: GPIO1
//! - VCC: 3.3V
//! - GND: GND
//! - AD0: GND (for address 0x68)

#![no_std]
#![no_main]

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::{
    config::Config,
    i2c::{Config as I2cConfig, I2c},
};
use embassy_time::{Delay, Duration};
use mpu9250::{Error, ImuService, Mpu9250Driver, RetryPolicy};
use panic_probe as _;

/// Wait between bring-up attempts
const RETRY_DELAY_MS: u32 = 500;

/// Polling period (10 Hz)
const POLL_PERIOD: Duration = Duration::from_millis(100);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("MPU-9250 Nine-Axis Reading Example (Blocking)");

    let p = embassy_rp::init(Config::default());

    // Configure I2C with 400kHz frequency and internal pull-ups
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    i2c_config.sda_pullup = true;
    i2c_config.scl_pullup = true;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c_config);

    // Using default address (0x68, AD0 pin LOW)
    // If your board has AD0 pulled HIGH, use:
    //   Mpu9250Driver::with_config(i2c, MPU9250_ADDRESS_AD0_HIGH, DriverConfig::default())
    let mut imu = Mpu9250Driver::new(i2c);

    info!("Initializing MPU-9250...");
    let mut delay = Delay;
    if let Err(e) = imu.init_with_retry(&mut delay, RetryPolicy::unbounded(RETRY_DELAY_MS)) {
        // Unreachable with an unbounded policy
        error!("Failed to initialize MPU-9250: {:?}", e);
        loop {
            embassy_time::block_for(Duration::from_millis(1000));
        }
    }

    info!("MPU-9250 initialized successfully!");
    info!("Sample rate: {} Hz", imu.config().sample_rate_hz());
    match imu.read_magnetometer_id() {
        Ok(id) => info!("AK8963 WIA: {=u8:#x}", id),
        Err(e) => warn!("Failed to read AK8963 WIA: {:?}", e),
    }
    let adj = imu.mag_adjustment();
    info!("Mag adjustment: X={} Y={} Z={}", adj.x, adj.y, adj.z);

    let mut imu = ImuService::new(imu);
    let mut sample_count: u32 = 0;

    // Main reading loop
    loop {
        sample_count = sample_count.wrapping_add(1);

        match imu.all() {
            Ok(data) => {
                info!("--- Sample #{} ---", sample_count);
                info!(
                    "Accel: X={}g Y={}g Z={}g |Mag|={}g",
                    data.accel.x,
                    data.accel.y,
                    data.accel.z,
                    data.accel.magnitude()
                );
                info!(
                    "Gyro: X={}°/s Y={}°/s Z={}°/s",
                    data.gyro.x, data.gyro.y, data.gyro.z
                );
                info!("Temp: {}°C", data.temperature_c);
                info!(
                    "Mag: X={}µT Y={}µT Z={}µT (adjusted X={}µT Y={}µT Z={}µT)",
                    data.mag.scaled.x,
                    data.mag.scaled.y,
                    data.mag.scaled.z,
                    data.mag.adjusted.x,
                    data.mag.adjusted.y,
                    data.mag.adjusted.z
                );
            }
            Err(Error::MagOverflow) => warn!("Magnetometer overflow, sample dropped"),
            Err(e) => error!("Failed to read sensors: {:?}", e),
        }

        embassy_time::block_for(POLL_PERIOD);
    }
}
