//! The conversion contract shared by the integer and floating-point
//! compensation routines.
//!
//! A measurement cycle turns one [`RawSample`] into one
//! [`CompensatedReading`]. The temperature stage runs first and produces a
//! [`FineTemperature`], which is handed explicitly to the pressure and
//! humidity stages of the same cycle. Nothing is cached between calls, so
//! a single [`CalibrationData`] may be shared by any number of concurrent
//! conversions.
//!
//! Pick [`IntegerCompensator`] on targets without an FPU and
//! [`FloatCompensator`] where `f64` is cheap; both accept the same inputs.

use crate::calibration::CalibrationData;
use crate::conversions;

/// The three uncompensated ADC readings from one measurement.
///
/// Pressure and temperature are 20-bit values and humidity is a 16-bit
/// value, as read from registers 0xF7 to 0xFE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub pressure: u32,
    pub temperature: u32,
    pub humidity: u32,
}

/// Temperature-dependent term shared by the pressure and humidity formulas.
///
/// This is `t_fine` in the datasheet. It is not a physical quantity, and is
/// only meaningful alongside readings from the same measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FineTemperature(i32);

impl FineTemperature {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Calibrated output of one measurement cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedReading<T, P, H> {
    pub temperature: T,
    pub pressure: P,
    pub humidity: H,
}

/// Output of [`IntegerCompensator`].
///
/// - `temperature`: hundredths of a degree celsius.
/// - `pressure`: pascals as unsigned Q24.8.
/// - `humidity`: percent relative humidity as unsigned Q22.10.
pub type FixedPointReading = CompensatedReading<i32, u32, u32>;

/// Output of [`FloatCompensator`], in degrees celsius, pascals and percent
/// relative humidity.
pub type FloatingPointReading = CompensatedReading<f64, f64, f64>;

impl FixedPointReading {
    pub fn celsius(&self) -> f32 {
        self.temperature as f32 / 100.0
    }

    pub fn fahrenheit(&self) -> f32 {
        self.celsius() * 1.8 + 32.0
    }

    pub fn pascals(&self) -> f32 {
        self.pressure as f32 / 256.0
    }

    pub fn hectopascals(&self) -> f32 {
        self.pascals() / 100.0
    }

    /// Percent relative humidity, `0.0..=100.0`.
    pub fn humidity(&self) -> f32 {
        self.humidity as f32 / 1024.0
    }
}

/// Fixed-point views of the integer readings.
///
/// Pressure and humidity are already fixed-point numbers, so these are
/// exact reinterpretations of the bits rather than conversions.
#[cfg(feature = "fixed")]
impl FixedPointReading {
    /// Degrees celsius, saturating outside the range of `I16F16`.
    pub fn celsius_fixed_point(&self) -> fixed::types::I16F16 {
        use fixed::types::{I16F16, I32F32};

        let celsius = I32F32::from_num(self.temperature) / I32F32::from_num(100);
        celsius.saturating_to_num::<I16F16>()
    }

    pub fn pressure_fixed_point(&self) -> fixed::types::U24F8 {
        fixed::types::U24F8::from_bits(self.pressure)
    }

    pub fn humidity_fixed_point(&self) -> fixed::types::U22F10 {
        fixed::types::U22F10::from_bits(self.humidity)
    }
}

/// Conversion from raw readings to calibrated values.
///
/// Implementors provide the three stages; [`Compensate::compensate`] runs
/// them in the required order for a single sample.
pub trait Compensate {
    type Temperature: Copy;
    type Pressure: Copy;
    type Humidity: Copy;

    fn temperature(
        &self,
        reading: u32,
        calibration: &CalibrationData,
    ) -> (FineTemperature, Self::Temperature);

    fn pressure(
        &self,
        reading: u32,
        t_fine: FineTemperature,
        calibration: &CalibrationData,
    ) -> Self::Pressure;

    fn humidity(
        &self,
        reading: u32,
        t_fine: FineTemperature,
        calibration: &CalibrationData,
    ) -> Self::Humidity;

    fn compensate(
        &self,
        sample: &RawSample,
        calibration: &CalibrationData,
    ) -> CompensatedReading<Self::Temperature, Self::Pressure, Self::Humidity> {
        let (t_fine, temperature) = self.temperature(sample.temperature, calibration);
        CompensatedReading {
            temperature,
            pressure: self.pressure(sample.pressure, t_fine, calibration),
            humidity: self.humidity(sample.humidity, t_fine, calibration),
        }
    }
}

/// Integer-only compensation, see the root of [`conversions`].
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntegerCompensator;

impl Compensate for IntegerCompensator {
    type Temperature = i32;
    type Pressure = u32;
    type Humidity = u32;

    fn temperature(&self, reading: u32, calibration: &CalibrationData) -> (FineTemperature, i32) {
        conversions::temperature(reading, calibration)
    }

    fn pressure(
        &self,
        reading: u32,
        t_fine: FineTemperature,
        calibration: &CalibrationData,
    ) -> u32 {
        conversions::pressure(reading, t_fine, calibration)
    }

    fn humidity(
        &self,
        reading: u32,
        t_fine: FineTemperature,
        calibration: &CalibrationData,
    ) -> u32 {
        conversions::humidity(reading, t_fine, calibration)
    }
}

/// Double-precision compensation, see [`conversions::floating_point`].
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FloatCompensator;

impl Compensate for FloatCompensator {
    type Temperature = f64;
    type Pressure = f64;
    type Humidity = f64;

    fn temperature(&self, reading: u32, calibration: &CalibrationData) -> (FineTemperature, f64) {
        conversions::floating_point::temperature(reading, calibration)
    }

    fn pressure(
        &self,
        reading: u32,
        t_fine: FineTemperature,
        calibration: &CalibrationData,
    ) -> f64 {
        conversions::floating_point::pressure(reading, t_fine, calibration)
    }

    fn humidity(
        &self,
        reading: u32,
        t_fine: FineTemperature,
        calibration: &CalibrationData,
    ) -> f64 {
        conversions::floating_point::humidity(reading, t_fine, calibration)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CALIBRATION: CalibrationData = CalibrationData {
        dig_t1: 27504,
        dig_t2: 26435,
        dig_t3: -1000,
        dig_p1: 36477,
        dig_p2: -10685,
        dig_p3: 3024,
        dig_p4: 2855,
        dig_p5: 140,
        dig_p6: -7,
        dig_p7: 15500,
        dig_p8: -14600,
        dig_p9: 6000,
        dig_h1: 75,
        dig_h2: 362,
        dig_h3: 0,
        dig_h4: 313,
        dig_h5: 50,
        dig_h6: 30,
    };

    const SAMPLE: RawSample = RawSample {
        pressure: 415_148,
        temperature: 519_888,
        humidity: 32_768,
    };

    #[test]
    fn integer_reading() {
        let reading = IntegerCompensator.compensate(&SAMPLE, &CALIBRATION);
        assert_eq!(
            reading,
            CompensatedReading {
                temperature: 2508,
                pressure: 25_767_233,
                humidity: 72_045,
            }
        );
        assert_eq!(reading.celsius(), 25.08);
        assert!((reading.pascals() - 100_653.25).abs() < 0.01);
        assert!((reading.hectopascals() - 1_006.5325).abs() < 0.001);
        assert!((reading.humidity() - 70.356).abs() < 0.001);
    }

    #[test]
    fn compensators_agree() {
        let fixed = IntegerCompensator.compensate(&SAMPLE, &CALIBRATION);
        let float = FloatCompensator.compensate(&SAMPLE, &CALIBRATION);
        assert!((f64::from(fixed.temperature) / 100.0 - float.temperature).abs() <= 0.01);
        assert!((f64::from(fixed.pressure) / 256.0 - float.pressure).abs() < 0.5);
        assert!((f64::from(fixed.humidity) / 1024.0 - float.humidity).abs() < 0.05);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = IntegerCompensator.compensate(&SAMPLE, &CALIBRATION);
        let second = IntegerCompensator.compensate(&SAMPLE, &CALIBRATION);
        assert_eq!(first, second);

        // Interleaving another sample must not leak into the next result.
        let other = RawSample {
            pressure: 300_000,
            temperature: 600_000,
            humidity: 50_000,
        };
        IntegerCompensator.compensate(&other, &CALIBRATION);
        assert_eq!(IntegerCompensator.compensate(&SAMPLE, &CALIBRATION), first);

        let first = FloatCompensator.compensate(&SAMPLE, &CALIBRATION);
        FloatCompensator.compensate(&other, &CALIBRATION);
        assert_eq!(FloatCompensator.compensate(&SAMPLE, &CALIBRATION), first);
    }

    #[test]
    fn stages_share_the_fine_temperature() {
        let (t_fine, _) = IntegerCompensator.temperature(SAMPLE.temperature, &CALIBRATION);
        let reading = IntegerCompensator.compensate(&SAMPLE, &CALIBRATION);
        assert_eq!(
            IntegerCompensator.pressure(SAMPLE.pressure, t_fine, &CALIBRATION),
            reading.pressure
        );
        assert_eq!(
            IntegerCompensator.humidity(SAMPLE.humidity, t_fine, &CALIBRATION),
            reading.humidity
        );
    }

    #[test]
    fn degenerate_pressure_calibration() {
        let calibration = CalibrationData {
            dig_p1: 0,
            ..CALIBRATION
        };
        assert_eq!(IntegerCompensator.compensate(&SAMPLE, &calibration).pressure, 0);
        assert_eq!(FloatCompensator.compensate(&SAMPLE, &calibration).pressure, 0.0);
    }

    #[test]
    fn fahrenheit() {
        let reading = FixedPointReading {
            temperature: 2500,
            pressure: 0,
            humidity: 0,
        };
        assert!((reading.fahrenheit() - 77.0).abs() < 0.001);
    }

    #[cfg(feature = "fixed")]
    #[test]
    fn fixed_point_views() {
        let reading = IntegerCompensator.compensate(&SAMPLE, &CALIBRATION);
        assert_eq!(reading.pressure_fixed_point().to_bits(), 25_767_233);
        assert_eq!(reading.humidity_fixed_point().to_bits(), 72_045);
        assert_eq!(reading.pressure_fixed_point().to_num::<u32>(), 100_653);
        assert_eq!(reading.humidity_fixed_point().to_num::<u32>(), 70);
        assert!((reading.celsius_fixed_point().to_num::<f32>() - 25.08).abs() < 0.001);
    }
}
