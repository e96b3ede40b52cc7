//! Raw ADC readings to calibrated temperature, pressure and humidity.
//!
//! These functions are used by the [`Compensate`] implementations but are
//! provided here should you need to run a single stage on its own. The
//! temperature stage must run first: it returns the [`FineTemperature`]
//! that the pressure and humidity stages take as an argument.
//!
//! The functions in the root of this module use only integer arithmetic,
//! following the reference code in section 4.2.3 and appendix 8.2 of the
//! [datasheet], and are suitable for targets without an FPU. The
//! [`floating_point`] submodule has the double-precision equivalents from
//! appendix 8.1.
//!
//! Intermediate arithmetic wraps on overflow, as the reference code does on
//! two's complement hardware. Readings within the ADC's range never
//! overflow; readings outside it produce saturated, not panicking, results.
//!
//! [`Compensate`]: crate::compensation::Compensate
//! [datasheet]: https://www.bosch-sensortec.com/media/boschsensortec/downloads/datasheets/bst-bme280-ds002.pdf

use crate::calibration::CalibrationData;
use crate::compensation::FineTemperature;

/// Upper bound of the humidity accumulator before the final shift.
///
/// `419430400 >> 12` is `102400`, or 100 %RH in Q22.10.
pub const HUMIDITY_ACCUMULATOR_MAX: i32 = 419_430_400;

/// Convert the raw temperature reading to hundredths of a degree celsius.
///
/// A return value of `5123` equals 51.23°C. No clamping is applied to the
/// integer result.
pub fn temperature(reading: u32, calibration: &CalibrationData) -> (FineTemperature, i32) {
    let adc = reading as i32;
    let t1 = i32::from(calibration.dig_t1);
    let t2 = i32::from(calibration.dig_t2);
    let t3 = i32::from(calibration.dig_t3);

    let var1 = (adc >> 3).wrapping_sub(t1 << 1).wrapping_mul(t2) >> 11;
    let offset = (adc >> 4).wrapping_sub(t1);
    let var2 = (offset.wrapping_mul(offset) >> 12).wrapping_mul(t3) >> 14;

    let t_fine = var1.wrapping_add(var2);
    let hundredths = t_fine.wrapping_mul(5).wrapping_add(128) >> 8;
    (FineTemperature::new(t_fine), hundredths)
}

/// Convert the raw pressure reading to pascals, as unsigned Q24.8.
///
/// A return value of `24674867` represents `24674867 / 256 = 96386.2` Pa.
///
/// Returns `0` if the calibration coefficients would cause a division by
/// zero (for instance if `dig_p1` is zero).
pub fn pressure(reading: u32, t_fine: FineTemperature, calibration: &CalibrationData) -> u32 {
    let p1 = i64::from(calibration.dig_p1);
    let p2 = i64::from(calibration.dig_p2);
    let p3 = i64::from(calibration.dig_p3);
    let p4 = i64::from(calibration.dig_p4);
    let p5 = i64::from(calibration.dig_p5);
    let p6 = i64::from(calibration.dig_p6);
    let p7 = i64::from(calibration.dig_p7);
    let p8 = i64::from(calibration.dig_p8);
    let p9 = i64::from(calibration.dig_p9);

    let var1 = i64::from(t_fine.value()) - 128_000;
    let var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
    let var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
    let var2 = var2.wrapping_add(p4 << 35);
    let var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8)
        .wrapping_add(var1.wrapping_mul(p2) << 12);
    let var1 = (1_i64 << 47).wrapping_add(var1).wrapping_mul(p1) >> 33;

    if var1 == 0 {
        return 0;
    }

    let p = 1_048_576 - i64::from(reading);
    let p = (p << 31).wrapping_sub(var2).wrapping_mul(3125).wrapping_div(var1);
    let var1 = p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
    let var2 = p8.wrapping_mul(p) >> 19;
    let p = (p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4);

    p as u32
}

/// Convert the raw humidity reading to percent relative humidity, as
/// unsigned Q22.10.
///
/// A return value of `47445` represents `47445 / 1024 = 46.333` %RH.
///
/// The internal accumulator is clamped to `0..=419430400` before the final
/// shift, so the result never exceeds `102400` (100 %RH). The clamp must
/// stay ahead of the shift to match the reference output bit for bit.
pub fn humidity(reading: u32, t_fine: FineTemperature, calibration: &CalibrationData) -> u32 {
    let adc = reading as i32;
    let h1 = i32::from(calibration.dig_h1);
    let h2 = i32::from(calibration.dig_h2);
    let h3 = i32::from(calibration.dig_h3);
    let h4 = i32::from(calibration.dig_h4);
    let h5 = i32::from(calibration.dig_h5);
    let h6 = i32::from(calibration.dig_h6);

    let var1 = t_fine.value().wrapping_sub(76_800);

    let offset = (adc << 14)
        .wrapping_sub(h4 << 20)
        .wrapping_sub(h5.wrapping_mul(var1))
        .wrapping_add(16_384)
        >> 15;
    let temperature_term = (var1.wrapping_mul(h6) >> 10)
        .wrapping_mul((var1.wrapping_mul(h3) >> 11).wrapping_add(32_768))
        >> 10;
    let gain = temperature_term
        .wrapping_add(2_097_152)
        .wrapping_mul(h2)
        .wrapping_add(8_192)
        >> 14;

    let var1 = offset.wrapping_mul(gain);
    let correction = ((var1 >> 15).wrapping_mul(var1 >> 15) >> 7).wrapping_mul(h1) >> 4;
    let var1 = var1.wrapping_sub(correction).clamp(0, HUMIDITY_ACCUMULATOR_MAX);

    (var1 >> 12) as u32
}

/// Double-precision numeric conversions from sensor readings.
///
/// The functions in this module take the same inputs as those in the parent
/// `conversions` module, but compute with `f64` and return values directly
/// in degrees celsius, pascals and percent relative humidity.
///
/// Unlike the integer functions, every output here is clamped to the
/// operating range of the sensor (section 1 of the datasheet).
pub mod floating_point {
    use crate::calibration::CalibrationData;
    use crate::compensation::FineTemperature;

    pub const TEMPERATURE_MIN: f64 = -40.0;
    pub const TEMPERATURE_MAX: f64 = 85.0;
    pub const PRESSURE_MIN: f64 = 30_000.0;
    pub const PRESSURE_MAX: f64 = 110_000.0;
    pub const HUMIDITY_MIN: f64 = 0.0;
    pub const HUMIDITY_MAX: f64 = 100.0;

    /// Convert the raw temperature reading to degrees celsius.
    ///
    /// The result is clamped to `-40.0..=85.0`.
    pub fn temperature(reading: u32, calibration: &CalibrationData) -> (FineTemperature, f64) {
        let adc = f64::from(reading);
        let t1 = f64::from(calibration.dig_t1);
        let t2 = f64::from(calibration.dig_t2);
        let t3 = f64::from(calibration.dig_t3);

        let var1 = (adc / 16_384.0 - t1 / 1_024.0) * t2;
        let var2 = adc / 131_072.0 - t1 / 8_192.0;
        let var2 = var2 * var2 * t3;

        let t_fine = FineTemperature::new((var1 + var2) as i32);
        let celsius = (var1 + var2) / 5_120.0;
        (t_fine, celsius.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX))
    }

    /// Convert the raw pressure reading to pascals.
    ///
    /// Returns `0.0` if the calibration coefficients would cause a division
    /// by zero, otherwise the result is clamped to `30000.0..=110000.0`.
    pub fn pressure(reading: u32, t_fine: FineTemperature, calibration: &CalibrationData) -> f64 {
        let var1 = f64::from(t_fine.value()) / 2.0 - 64_000.0;
        let var2 = var1 * var1 * f64::from(calibration.dig_p6) / 32_768.0;
        let var2 = var2 + var1 * f64::from(calibration.dig_p5) * 2.0;
        let var2 = var2 / 4.0 + f64::from(calibration.dig_p4) * 65_536.0;
        let var3 = f64::from(calibration.dig_p3) * var1 * var1 / 524_288.0;
        let var1 = (var3 + f64::from(calibration.dig_p2) * var1) / 524_288.0;
        let var1 = (1.0 + var1 / 32_768.0) * f64::from(calibration.dig_p1);

        if var1 == 0.0 {
            return 0.0;
        }

        let p = 1_048_576.0 - f64::from(reading);
        let p = (p - var2 / 4_096.0) * 6_250.0 / var1;
        let var1 = f64::from(calibration.dig_p9) * p * p / 2_147_483_648.0;
        let var2 = p * f64::from(calibration.dig_p8) / 32_768.0;
        let p = p + (var1 + var2 + f64::from(calibration.dig_p7)) / 16.0;

        p.clamp(PRESSURE_MIN, PRESSURE_MAX)
    }

    /// Convert the raw humidity reading to percent relative humidity.
    ///
    /// The result is clamped to `0.0..=100.0`.
    pub fn humidity(reading: u32, t_fine: FineTemperature, calibration: &CalibrationData) -> f64 {
        let h1 = f64::from(calibration.dig_h1);
        let h2 = f64::from(calibration.dig_h2);
        let h3 = f64::from(calibration.dig_h3);
        let h4 = f64::from(calibration.dig_h4);
        let h5 = f64::from(calibration.dig_h5);
        let h6 = f64::from(calibration.dig_h6);

        let var1 = f64::from(t_fine.value()) - 76_800.0;
        let var2 = h4 * 64.0 + h5 / 16_384.0 * var1;
        let var3 = f64::from(reading) - var2;
        let var4 = h2 / 65_536.0;
        let var5 = 1.0 + h3 / 67_108_864.0 * var1;
        let var6 = 1.0 + h6 / 67_108_864.0 * var1 * var5;
        let var6 = var3 * var4 * (var5 * var6);

        let rh = var6 * (1.0 - h1 * var6 / 524_288.0);
        rh.clamp(HUMIDITY_MIN, HUMIDITY_MAX)
    }
}
