//! Integration tests for basic workflow scenarios

use crate::common::{assert_float_eq, MockDelay, MockI2c, MAG_ADDRESS, MPU_ADDRESS};
use mpu9250::{DriverState, ImuService, Mpu9250Driver, RetryPolicy};

#[test]
fn test_complete_initialization_workflow() {
    let bus = MockI2c::new();
    bus.set_who_am_i(0x71);
    bus.set_asa([0, 128, 255]);

    let mut driver = Mpu9250Driver::new(bus.clone());
    driver
        .init_with_retry(&mut MockDelay::new(), RetryPolicy::bounded(3, 500))
        .unwrap();
    assert_eq!(driver.state(), DriverState::Ready);

    let mut service = ImuService::new(driver);

    bus.set_accel_data(16384, 0, -16384);
    bus.set_gyro_data(131, 262, -393);
    bus.set_temperature_data(1335);
    bus.set_mag_data(200, 200, 200, 0x10);

    let data = service.all().unwrap();

    assert_float_eq(data.accel.x, 1.0, 1e-6);
    assert_float_eq(data.accel.z, -1.0, 1e-6);
    assert_float_eq(data.gyro.x, 1.0, 1e-5);
    assert_float_eq(data.gyro.y, 2.0, 1e-5);
    assert_float_eq(data.gyro.z, -3.0, 1e-5);
    assert!((data.temperature_c - 25.0).abs() < 0.1);
    assert_float_eq(data.mag.scaled.x, 30.0, 1e-4);
    assert_float_eq(data.mag.adjusted.x, 15.0, 1e-4);
    assert_float_eq(data.mag.adjusted.y, 30.0, 1e-4);
}

#[test]
fn test_error_recovery() {
    let bus = MockI2c::new();
    let mut service = {
        let mut driver = Mpu9250Driver::new(bus.clone());
        driver.init(&mut MockDelay::new()).unwrap();
        ImuService::new(driver)
    };

    // A failed poll does not poison the next one
    bus.fail_next_read();
    assert!(service.all().is_err());

    bus.set_accel_data(0, 0, 16384);
    let data = service.all().unwrap();
    assert_float_eq(data.accel.z, 1.0, 1e-6);
}

#[test]
fn test_reinit_after_device_loss() {
    let bus = MockI2c::new();
    let mut driver = Mpu9250Driver::new(bus.clone());
    driver.init(&mut MockDelay::new()).unwrap();

    // Power cycle: registers lose bypass and the device must be brought up again
    bus.set_register(MPU_ADDRESS, 0x37, 0x00);
    assert!(driver.read_mag_raw().is_err());

    driver.begin(&mut MockDelay::new()).unwrap();
    driver
        .init_with_retry(&mut MockDelay::new(), RetryPolicy::bounded(3, 10))
        .unwrap();

    bus.set_mag_data(1, 2, 3, 0x10);
    let mag = driver.read_mag_raw().unwrap();
    assert_eq!((mag.x, mag.y, mag.z), (1, 2, 3));
}

#[test]
fn test_polling_loop() {
    let bus = MockI2c::new();
    let mut driver = Mpu9250Driver::new(bus.clone());
    driver.init(&mut MockDelay::new()).unwrap();
    let mut service = ImuService::new(driver);
    bus.clear_operations();

    for i in 0..10i16 {
        bus.set_accel_data(i * 1638, 0, 0);
        let data = service.all().unwrap();
        assert_float_eq(data.accel.x, f32::from(i * 1638) / 16384.0, 1e-6);
    }

    // Four bursts per poll, no writes
    assert_eq!(bus.reads().len(), 40);
    assert!(bus.writes().is_empty());
    assert_eq!(
        bus.reads()[3],
        (MAG_ADDRESS, 0x03, 7),
        "magnetometer read last in each poll"
    );
}

#[test]
fn test_lent_bus() {
    let mut bus = MockI2c::new();
    let probe = bus.clone();
    {
        let mut driver = Mpu9250Driver::new(&mut bus);
        driver.init(&mut MockDelay::new()).unwrap();
        assert!(driver.is_ready());
    }
    assert_eq!(probe.get_register(MPU_ADDRESS, 0x37), 0x02);
}
