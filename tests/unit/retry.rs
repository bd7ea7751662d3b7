//! Unit tests for initialization with retries

use crate::common::{create_mock_driver, MockDelay, MAG_ADDRESS, MPU_ADDRESS};
use mpu9250::{DriverState, Error, InitStage, RetryPolicy};

#[test]
fn test_retry_succeeds_first_time() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();

    driver
        .init_with_retry(&mut delay, RetryPolicy::bounded(3, 500))
        .unwrap();

    assert!(driver.is_ready());
    assert!(!delay.delays_ms.contains(&500));
    assert_eq!(bus.writes().len(), 12);
}

#[test]
fn test_retry_only_failing_step() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    bus.fail_write_at(MPU_ADDRESS, 0x37, 2);

    driver
        .init_with_retry(&mut delay, RetryPolicy::bounded(3, 500))
        .unwrap();

    assert!(driver.is_ready());
    // Reset issued once, bypass retried until it went through
    let writes = bus.writes();
    assert_eq!(
        writes.iter().filter(|w| **w == (MPU_ADDRESS, 0x6B, 0x80)).count(),
        1
    );
    assert_eq!(
        writes.iter().filter(|w| **w == (MPU_ADDRESS, 0x37, 0x02)).count(),
        1
    );
    assert_eq!(delay.delays_ms.iter().filter(|ms| **ms == 500).count(), 2);
}

#[test]
fn test_retry_gives_up() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    bus.fail_write_at(MPU_ADDRESS, 0x1B, 10);

    let err = driver
        .init_with_retry(&mut delay, RetryPolicy::bounded(3, 250))
        .unwrap_err();

    assert_eq!(err.init_stage(), Some(InitStage::Configuration));
    assert_eq!(driver.state(), DriverState::DeviceReset);
    // Three attempts, two waits between them
    assert_eq!(delay.delays_ms.iter().filter(|ms| **ms == 250).count(), 2);
    // Every configuration attempt starts from a fresh reset
    assert_eq!(
        bus.writes()
            .iter()
            .filter(|w| **w == (MPU_ADDRESS, 0x6B, 0x80))
            .count(),
        3
    );
}

#[test]
fn test_configuration_failure_resets_again() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    bus.fail_write_at(MPU_ADDRESS, 0x1C, 1);

    driver
        .init_with_retry(&mut delay, RetryPolicy::bounded(3, 500))
        .unwrap();

    assert!(driver.is_ready());
    let writes = bus.writes();
    assert_eq!(
        writes.iter().filter(|w| **w == (MPU_ADDRESS, 0x6B, 0x80)).count(),
        2
    );
    // Ranges written before the failure are written again after the reset
    assert_eq!(
        writes.iter().filter(|w| **w == (MPU_ADDRESS, 0x1B, 0x00)).count(),
        2
    );
    assert_eq!(bus.get_register(MPU_ADDRESS, 0x1C), 0x00);
}

#[test]
fn test_magnetometer_failure_rewrites_bypass() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    driver.begin(&mut delay).unwrap();
    driver.reset(&mut delay).unwrap();
    driver.configure(&mut delay).unwrap();
    driver.enable_bypass().unwrap();
    assert_eq!(driver.state(), DriverState::SecondaryBypassEnabled);

    // Bypass lost behind the driver's back, the AK8963 stops answering
    bus.set_register(MPU_ADDRESS, 0x37, 0x00);
    bus.clear_operations();

    driver
        .init_with_retry(&mut delay, RetryPolicy::bounded(3, 500))
        .unwrap();

    assert!(driver.is_ready());
    assert!(bus.writes().contains(&(MPU_ADDRESS, 0x37, 0x02)));
    assert_eq!(bus.get_register(MAG_ADDRESS, 0x0A), 0x16);
}

#[test]
fn test_magnetometer_gives_up_at_its_own_bound() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    bus.remove_magnetometer();

    let err = driver
        .init_with_retry(&mut delay, RetryPolicy::bounded(4, 500))
        .unwrap_err();

    assert_eq!(err.init_stage(), Some(InitStage::Magnetometer));
    // Bypass succeeds every time, so only the magnetometer uses up attempts
    assert_eq!(
        bus.writes()
            .iter()
            .filter(|w| **w == (MPU_ADDRESS, 0x37, 0x02))
            .count(),
        4
    );
    assert_eq!(delay.delays_ms.iter().filter(|ms| **ms == 500).count(), 3);
}

#[test]
fn test_attempts_counted_per_step() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    bus.fail_write_at(MPU_ADDRESS, 0x6B, 1);
    bus.fail_write_at(MAG_ADDRESS, 0x0A, 1);

    // Each step fails once; a budget of two attempts per step is enough
    driver
        .init_with_retry(&mut delay, RetryPolicy::bounded(2, 100))
        .unwrap();

    assert!(driver.is_ready());
}

#[test]
fn test_single_attempt_policy() {
    let (mut driver, bus) = create_mock_driver();
    bus.fail_next_read();

    let err = driver
        .init_with_retry(&mut MockDelay::new(), RetryPolicy::bounded(1, 100))
        .unwrap_err();

    assert_eq!(err.init_stage(), Some(InitStage::Connection));
}

#[test]
fn test_resume_from_halted_state() {
    let (mut driver, bus) = create_mock_driver();
    bus.fail_write_at(MPU_ADDRESS, 0x1D, 1);

    assert!(driver.init(&mut MockDelay::new()).is_err());
    assert_eq!(driver.state(), DriverState::DeviceReset);

    bus.clear_operations();
    driver
        .init_with_retry(&mut MockDelay::new(), RetryPolicy::unbounded(500))
        .unwrap();

    assert!(driver.is_ready());
    // No second reset or identity check
    assert_eq!(bus.writes()[0], (MPU_ADDRESS, 0x6B, 0x01));
    assert!(!bus.reads().contains(&(MPU_ADDRESS, 0x75, 1)));
}

#[test]
fn test_unbounded_recovers() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    bus.fail_read_at(MPU_ADDRESS, 0x75, 25);

    driver
        .init_with_retry(&mut delay, RetryPolicy::unbounded(500))
        .unwrap();

    assert!(driver.is_ready());
    assert_eq!(delay.delays_ms.iter().filter(|ms| **ms == 500).count(), 25);
}

#[test]
fn test_unbounded_without_delay() {
    let (mut driver, bus) = create_mock_driver();
    let mut delay = MockDelay::new();
    bus.fail_read_at(MPU_ADDRESS, 0x75, 5);

    driver
        .init_with_retry(&mut delay, RetryPolicy::unbounded(0))
        .unwrap();

    assert!(driver.is_ready());
    assert_eq!(delay.delays_ms.iter().filter(|ms| **ms == 0).count(), 5);
}

#[test]
fn test_retry_on_ready_is_noop() {
    let (mut driver, bus) = create_mock_driver();
    driver.init(&mut MockDelay::new()).unwrap();
    bus.clear_operations();

    driver
        .init_with_retry(&mut MockDelay::new(), RetryPolicy::bounded(3, 500))
        .unwrap();

    assert!(bus.operations().is_empty());
}

#[test]
fn test_wrong_device_retried_then_reported() {
    let (mut driver, bus) = create_mock_driver();
    bus.set_who_am_i(0x68);

    let err = driver
        .init_with_retry(&mut MockDelay::new(), RetryPolicy::bounded(2, 10))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidDevice(0x68)));
}
