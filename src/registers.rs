//! Register definitions for the MPU-9250
//!
//! The primary sensor (MPU-6500 die) and the AK8963 magnetometer live at two
//! different I2C addresses on the same bus. The magnetometer is only visible to
//! the host once `INT_PIN_CFG.BYPASS_EN` is set on the primary sensor.
//!
//! Only the registers the driver touches are described here. Multi-byte
//! measurement groups are read as bursts, so their first addresses are exported
//! as plain constants rather than as register blocks.

device_driver::create_device!(
    device_name: Mpu9250,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// SMPLRT_DIV - Sample Rate Divider (0x19)
        /// Internal sample rate / (1 + SMPLRT_DIV) when the DLPF is enabled
        register SmplrtDiv {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            /// Divider value
            smplrt_div: uint = 0..8,
        },

        /// CONFIG - Gyroscope/temperature DLPF and FSYNC (0x1A)
        register DlpfConfig {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Gyro and temperature low pass filter selection
            dlpf_cfg: uint = 0..3,
            /// FSYNC pin sampling (0 = disabled)
            ext_sync_set: uint = 3..6,
            /// FIFO overwrite mode
            fifo_mode: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// GYRO_CONFIG - Gyroscope full-scale range (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            /// Inverted DLPF bypass bits (0 = use `dlpf_cfg`)
            fchoice_b: uint = 0..2,
            reserved_2: uint = 2..3,
            /// Full-scale select (0 = ±250 dps .. 3 = ±2000 dps)
            gyro_fs_sel: uint = 3..5,
            /// Z-axis self test
            zgyro_cten: bool = 5,
            /// Y-axis self test
            ygyro_cten: bool = 6,
            /// X-axis self test
            xgyro_cten: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer full-scale range (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale select (0 = ±2 g .. 3 = ±16 g)
            accel_fs_sel: uint = 3..5,
            /// Z-axis self test
            az_st_en: bool = 5,
            /// Y-axis self test
            ay_st_en: bool = 6,
            /// X-axis self test
            ax_st_en: bool = 7,
        },

        /// ACCEL_CONFIG2 - Accelerometer DLPF (0x1D)
        register AccelConfig2 {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 8;

            /// Accelerometer low pass filter selection
            a_dlpfcfg: uint = 0..3,
            /// Inverted DLPF bypass bit (false = use `a_dlpfcfg`)
            accel_fchoice_b: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// INT_PIN_CFG - Interrupt pin and bypass configuration (0x37)
        register IntPinCfg {
            const ADDRESS = 0x37;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Auxiliary bus bypass: host talks to the AK8963 directly
            bypass_en: bool = 1,
            /// FSYNC pin used as interrupt
            fsync_int_mode_en: bool = 2,
            /// FSYNC active low
            actl_fsync: bool = 3,
            /// Clear interrupt status on any read
            int_anyrd_clear: bool = 4,
            /// Latch INT pin until cleared
            latch_int_en: bool = 5,
            /// INT pin open drain
            open: bool = 6,
            /// INT pin active low
            actl: bool = 7,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source (0 = internal 20 MHz, 1 = PLL when ready, 7 = stopped)
            clksel: uint = 0..3,
            /// Power down PTAT voltage generator
            pd_ptat: bool = 3,
            /// Gyro standby
            gyro_standby: bool = 4,
            /// Cycle between sleep and one sample
            cycle: bool = 5,
            /// Sleep mode
            sleep: bool = 6,
            /// Reset internal registers to defaults (self clearing)
            h_reset: bool = 7,
        },

        /// WHO_AM_I - Device ID (0x75)
        /// 0x71 on the MPU-9250, 0x73 on the MPU-9255, 0x70 on the MPU-6500
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID
            who_am_i: uint = 0..8,
        }
    }
);

/// ACCEL_XOUT_H, first of six accelerometer data bytes (big-endian X, Y, Z)
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// TEMP_OUT_H, first of two temperature data bytes (big-endian)
pub const TEMP_OUT_H: u8 = 0x41;

/// GYRO_XOUT_H, first of six gyroscope data bytes (big-endian X, Y, Z)
pub const GYRO_XOUT_H: u8 = 0x43;

pub use Mpu9250 as RegisterDevice;

/// AK8963 magnetometer register definitions
///
/// The AK8963 has its own address space and stores measurements little-endian.
pub mod magnetometer {
    device_driver::create_device!(
        device_name: Ak8963,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// WIA - Device ID (AK8963, 0x00)
            /// Expected value: 0x48
            register Wia {
                const ADDRESS = 0x00;
                const SIZE_BITS = 8;

                /// Device ID (should read 0x48)
                device_id: uint = 0..8,
            },

            /// ST2 - Status 2 (AK8963, 0x09)
            ///
            /// Must be read after the data bytes to release the data lock.
            register St2 {
                const ADDRESS = 0x09;
                const SIZE_BITS = 8;

                reserved_2_0: uint = 0..3,
                /// Magnetic sensor overflow
                hofl: bool = 3,
                /// Output bit setting mirror (true = 16-bit)
                bitm: bool = 4,
                reserved_7_5: uint = 5..8,
            },

            /// CNTL1 - Control 1 (AK8963, 0x0A)
            register Cntl1 {
                const ADDRESS = 0x0A;
                const SIZE_BITS = 8;

                /// Operation mode:
                /// 0x0 = Power-down
                /// 0x1 = Single measurement
                /// 0x2 = Continuous 8 Hz
                /// 0x4 = External trigger
                /// 0x6 = Continuous 100 Hz
                /// 0x8 = Self-test
                /// 0xF = Fuse ROM access
                mode: uint = 0..4,
                /// Output bit setting (false = 14-bit, true = 16-bit)
                bit: bool = 4,
                reserved_7_5: uint = 5..8,
            }
        }
    );

    /// HXL, first of seven measurement bytes: HXL, HXH, HYL, HYH, HZL, HZH, ST2
    pub const HXL: u8 = 0x03;

    /// ASAX, first of three fuse ROM sensitivity adjustment bytes
    pub const ASAX: u8 = 0x10;

    pub use Ak8963 as MagnetometerDevice;
}
