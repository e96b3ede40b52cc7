//! Per-device calibration coefficients.
//!
//! Every BME280 is trimmed at the factory and the resulting coefficients
//! are stored in the sensor's non-volatile memory. They are read once per
//! device (see `calibration_from_read_bytes` in the driver) and then only
//! ever read by the compensation formulas.
//!
//! Field names and widths follow table 16 in section 4.2.2 of the
//! [datasheet].
//!
//! [datasheet]: https://www.bosch-sensortec.com/media/boschsensortec/downloads/datasheets/bst-bme280-ds002.pdf

/// Compensation coefficients for a single sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,

    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,

    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    /// 12-bit signed value, packed across registers 0xE4 and 0xE5.
    pub dig_h4: i16,
    /// 12-bit signed value, packed across registers 0xE5 and 0xE6.
    pub dig_h5: i16,
    pub dig_h6: i8,
}
