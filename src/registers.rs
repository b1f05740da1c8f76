//! Register definitions for the ADXL345
//!
//! The ADXL345 exposes a flat map of byte-wide registers at 0x00-0x39.
//! Addresses 0x01-0x1C are reserved and not described here.
//!
//! Every register with more than one logical field is split into its bit-fields
//! so that the driver can update a single field with a read-modify-write
//! (`modify`) without disturbing the others.
//!
//! Reference: <https://www.analog.com/media/en/technical-documentation/data-sheets/adxl345.pdf>

device_driver::create_device!(
    device_name: Adxl345,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// DEVID - Device ID (0x00)
        /// Expected value: 0xE5
        register DevId {
            type Access = RO;
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Fixed device ID code
            devid: uint = 0..8,
        },

        /// THRESH_TAP - Tap threshold (0x1D), 62.5 mg/LSB
        register ThreshTap {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 8;

            thresh_tap: uint = 0..8,
        },

        /// OFSX - X-axis offset (0x1E), 15.6 mg/LSB, two's complement
        register Ofsx {
            const ADDRESS = 0x1E;
            const SIZE_BITS = 8;

            ofsx: uint = 0..8,
        },

        /// OFSY - Y-axis offset (0x1F)
        register Ofsy {
            const ADDRESS = 0x1F;
            const SIZE_BITS = 8;

            ofsy: uint = 0..8,
        },

        /// OFSZ - Z-axis offset (0x20)
        register Ofsz {
            const ADDRESS = 0x20;
            const SIZE_BITS = 8;

            ofsz: uint = 0..8,
        },

        /// DUR - Tap duration (0x21), 625 us/LSB
        register Dur {
            const ADDRESS = 0x21;
            const SIZE_BITS = 8;

            dur: uint = 0..8,
        },

        /// LATENT - Tap latency (0x22), 1.25 ms/LSB
        register Latent {
            const ADDRESS = 0x22;
            const SIZE_BITS = 8;

            latent: uint = 0..8,
        },

        /// WINDOW - Tap window (0x23), 1.25 ms/LSB
        register Window {
            const ADDRESS = 0x23;
            const SIZE_BITS = 8;

            window: uint = 0..8,
        },

        /// THRESH_ACT - Activity threshold (0x24), 62.5 mg/LSB
        register ThreshAct {
            const ADDRESS = 0x24;
            const SIZE_BITS = 8;

            thresh_act: uint = 0..8,
        },

        /// THRESH_INACT - Inactivity threshold (0x25), 62.5 mg/LSB
        register ThreshInact {
            const ADDRESS = 0x25;
            const SIZE_BITS = 8;

            thresh_inact: uint = 0..8,
        },

        /// TIME_INACT - Inactivity time (0x26), 1 s/LSB
        register TimeInact {
            const ADDRESS = 0x26;
            const SIZE_BITS = 8;

            time_inact: uint = 0..8,
        },

        /// ACT_INACT_CTL - Axis enable control for activity and inactivity detection (0x27)
        register ActInactCtl {
            const ADDRESS = 0x27;
            const SIZE_BITS = 8;

            /// Inactivity Z-axis enable
            inact_z_en: bool = 0,
            /// Inactivity Y-axis enable
            inact_y_en: bool = 1,
            /// Inactivity X-axis enable
            inact_x_en: bool = 2,
            /// Inactivity coupling (false = dc, true = ac)
            inact_ac_dc: bool = 3,
            /// Activity Z-axis enable
            act_z_en: bool = 4,
            /// Activity Y-axis enable
            act_y_en: bool = 5,
            /// Activity X-axis enable
            act_x_en: bool = 6,
            /// Activity coupling (false = dc, true = ac)
            act_ac_dc: bool = 7,
        },

        /// THRESH_FF - Free-fall threshold (0x28), 62.5 mg/LSB
        register ThreshFf {
            const ADDRESS = 0x28;
            const SIZE_BITS = 8;

            thresh_ff: uint = 0..8,
        },

        /// TIME_FF - Free-fall time (0x29), 5 ms/LSB
        register TimeFf {
            const ADDRESS = 0x29;
            const SIZE_BITS = 8;

            time_ff: uint = 0..8,
        },

        /// TAP_AXES - Axis control for single/double tap (0x2A)
        register TapAxes {
            const ADDRESS = 0x2A;
            const SIZE_BITS = 8;

            tap_z_en: bool = 0,
            tap_y_en: bool = 1,
            tap_x_en: bool = 2,
            /// Suppress double tap detection
            suppress: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// ACT_TAP_STATUS - Source of activity/tap events (0x2B)
        register ActTapStatus {
            type Access = RO;
            const ADDRESS = 0x2B;
            const SIZE_BITS = 8;

            tap_z_source: bool = 0,
            tap_y_source: bool = 1,
            tap_x_source: bool = 2,
            asleep: bool = 3,
            act_z_source: bool = 4,
            act_y_source: bool = 5,
            act_x_source: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// BW_RATE - Data rate and power mode control (0x2C)
        register BwRate {
            const ADDRESS = 0x2C;
            const SIZE_BITS = 8;

            /// Output data rate code (see `DataRate`)
            rate: uint = 0..4,
            /// Reduced power operation
            low_power: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// POWER_CTL - Power-saving features control (0x2D)
        register PowerCtl {
            const ADDRESS = 0x2D;
            const SIZE_BITS = 8;

            /// Sampling frequency while asleep
            wakeup: uint = 0..2,
            /// Sleep mode
            sleep: bool = 2,
            /// Measurement mode (false = standby)
            measure: bool = 3,
            auto_sleep: bool = 4,
            link: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// INT_ENABLE - Interrupt enable control (0x2E)
        register IntEnable {
            const ADDRESS = 0x2E;
            const SIZE_BITS = 8;

            overrun: bool = 0,
            watermark: bool = 1,
            free_fall: bool = 2,
            inactivity: bool = 3,
            activity: bool = 4,
            double_tap: bool = 5,
            single_tap: bool = 6,
            data_ready: bool = 7,
        },

        /// INT_MAP - Interrupt pin mapping (0x2F), set bits route to INT2
        register IntMap {
            const ADDRESS = 0x2F;
            const SIZE_BITS = 8;

            overrun: bool = 0,
            watermark: bool = 1,
            free_fall: bool = 2,
            inactivity: bool = 3,
            activity: bool = 4,
            double_tap: bool = 5,
            single_tap: bool = 6,
            data_ready: bool = 7,
        },

        /// INT_SOURCE - Source of interrupts (0x30), cleared on read
        register IntSource {
            type Access = RO;
            const ADDRESS = 0x30;
            const SIZE_BITS = 8;

            overrun: bool = 0,
            watermark: bool = 1,
            free_fall: bool = 2,
            inactivity: bool = 3,
            activity: bool = 4,
            double_tap: bool = 5,
            single_tap: bool = 6,
            data_ready: bool = 7,
        },

        /// DATA_FORMAT - Data format control (0x31)
        register DataFormat {
            const ADDRESS = 0x31;
            const SIZE_BITS = 8;

            /// Measurement range code (see `Range`)
            range: uint = 0..2,
            /// Left (MSB) justified output
            justify: bool = 2,
            /// Full resolution: 4 mg/LSB at every range
            full_res: bool = 3,
            reserved_4: uint = 4..5,
            int_invert: bool = 5,
            /// 3-wire SPI mode
            spi: bool = 6,
            self_test: bool = 7,
        },

        /// DATAX0 - X-axis data, low byte (0x32)
        register DataXLow {
            type Access = RO;
            const ADDRESS = 0x32;
            const SIZE_BITS = 8;

            x_low: uint = 0..8,
        },

        /// DATAX1 - X-axis data, high byte (0x33)
        register DataXHigh {
            type Access = RO;
            const ADDRESS = 0x33;
            const SIZE_BITS = 8;

            x_high: uint = 0..8,
        },

        /// DATAY0 - Y-axis data, low byte (0x34)
        register DataYLow {
            type Access = RO;
            const ADDRESS = 0x34;
            const SIZE_BITS = 8;

            y_low: uint = 0..8,
        },

        /// DATAY1 - Y-axis data, high byte (0x35)
        register DataYHigh {
            type Access = RO;
            const ADDRESS = 0x35;
            const SIZE_BITS = 8;

            y_high: uint = 0..8,
        },

        /// DATAZ0 - Z-axis data, low byte (0x36)
        register DataZLow {
            type Access = RO;
            const ADDRESS = 0x36;
            const SIZE_BITS = 8;

            z_low: uint = 0..8,
        },

        /// DATAZ1 - Z-axis data, high byte (0x37)
        register DataZHigh {
            type Access = RO;
            const ADDRESS = 0x37;
            const SIZE_BITS = 8;

            z_high: uint = 0..8,
        },

        /// FIFO_CTL - FIFO control (0x38)
        register FifoCtl {
            const ADDRESS = 0x38;
            const SIZE_BITS = 8;

            /// Watermark / trigger sample count
            samples: uint = 0..5,
            /// Trigger event routed to INT2 (false = INT1)
            trigger: bool = 5,
            /// FIFO mode (see `FifoMode`)
            fifo_mode: uint = 6..8,
        },

        /// FIFO_STATUS - FIFO status (0x39)
        register FifoStatus {
            type Access = RO;
            const ADDRESS = 0x39;
            const SIZE_BITS = 8;

            /// Number of samples stored in the FIFO
            entries: uint = 0..6,
            reserved_6: uint = 6..7,
            /// A trigger event occurred
            fifo_trig: bool = 7,
        }
    }
);

// Re-export commonly used types for convenience
pub use Adxl345 as RegisterDevice;

/// First axis data register; a 6-byte burst from here returns X0,X1,Y0,Y1,Z0,Z1
pub const DATAX0: u8 = 0x32;

/// Number of bytes in one XYZ sample
pub const AXIS_DATA_LEN: usize = 6;
