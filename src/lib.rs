//! Compensation routines and an `embedded-hal` driver for the Bosch BME280.
//!
//! The sensor reports raw ADC values that only become temperature, pressure
//! and humidity once combined with the calibration coefficients stored in
//! each device. The [`compensation`] module defines that conversion as the
//! [`Compensate`] trait with two implementations:
//!
//! - [`IntegerCompensator`], using only integer arithmetic, returning
//!   hundredths of a degree, Q24.8 pascals and Q22.10 percent RH;
//! - [`FloatCompensator`], using `f64`, with outputs clamped to the sensor's
//!   operating range.
//!
//! The conversion functions themselves live in [`conversions`] and do not
//! depend on the driver, so they can be fed from any transport.
//!
//! ```rust
//! use bme280_rjw::calibration::CalibrationData;
//! use bme280_rjw::compensation::{Compensate, IntegerCompensator, RawSample};
//!
//! let calibration = CalibrationData {
//!     dig_t1: 27504,
//!     dig_t2: 26435,
//!     dig_t3: -1000,
//!     ..Default::default()
//! };
//! let sample = RawSample { pressure: 0, temperature: 519_888, humidity: 0 };
//! let reading = IntegerCompensator.compensate(&sample, &calibration);
//! assert_eq!(reading.temperature, 2508);
//! ```
#![no_std]

#[cfg(feature = "async")]
pub mod asynch;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod calibration;
pub mod common;
pub mod compensation;
pub mod conversions;
pub mod error;

pub use compensation::{Compensate, FloatCompensator, IntegerCompensator};
