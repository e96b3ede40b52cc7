use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::calibration::CalibrationData;
use crate::common::{
    BME280_CHIP_ID, CALIBRATION_H_LENGTH, CALIBRATION_H_REGISTER, CALIBRATION_TP_LENGTH,
    CALIBRATION_TP_REGISTER, CHIP_ID_REGISTER, CTRL_HUM_REGISTER, CTRL_MEAS_REGISTER, Config,
    DATA_LENGTH, DATA_REGISTER, DEFAULT_ADDRESS, RESET_REGISTER, SOFT_RESET_COMMAND,
    STARTUP_DELAY_MS, calibration_from_read_bytes, raw_sample_from_read_bytes,
};
use crate::compensation::{
    Compensate, CompensatedReading, FixedPointReading, IntegerCompensator, RawSample,
};
use crate::error::Error;

pub struct BME280<I: I2c> {
    i2c: I,
    calibration: Option<CalibrationData>,
    pub address: SevenBitAddress,
    pub config: Config,
}

impl<I: I2c> BME280<I> {
    /// Create a driver for a sensor at the default address (0x76).
    ///
    /// Call [`BME280::init`] before measuring, or construct the driver with
    /// [`BME280::with_calibration`] if the coefficients are already known.
    pub fn new(i2c: I, config: Config) -> Self {
        Self {
            i2c,
            calibration: None,
            address: DEFAULT_ADDRESS,
            config,
        }
    }

    pub fn with_calibration(i2c: I, config: Config, calibration: CalibrationData) -> Self {
        Self {
            calibration: Some(calibration),
            ..Self::new(i2c, config)
        }
    }

    pub fn destroy(self) -> I {
        self.i2c
    }

    /// Calibration coefficients, if they have been loaded.
    pub fn calibration(&self) -> Option<&CalibrationData> {
        self.calibration.as_ref()
    }

    pub fn chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        let mut id = [0u8; 1];
        self.i2c.write_read(self.address, &[CHIP_ID_REGISTER], &mut id)?;
        Ok(id[0])
    }

    /// Check the chip id, reset the sensor and load its calibration data.
    pub fn init(&mut self, mut delay: impl DelayNs) -> Result<CalibrationData, Error<I::Error>> {
        let id = self.chip_id()?;
        if id != BME280_CHIP_ID {
            return Err(Error::UnexpectedChipId(id));
        }
        self.soft_reset(&mut delay)?;

        let mut tp = [0u8; CALIBRATION_TP_LENGTH];
        let mut h = [0u8; CALIBRATION_H_LENGTH];
        self.i2c.write_read(self.address, &[CALIBRATION_TP_REGISTER], &mut tp)?;
        self.i2c.write_read(self.address, &[CALIBRATION_H_REGISTER], &mut h)?;

        let calibration = calibration_from_read_bytes(&tp, &h);
        #[cfg(feature = "defmt")]
        defmt::debug!("BME280 calibration loaded: {}", calibration);
        self.calibration = Some(calibration);
        Ok(calibration)
    }

    pub fn soft_reset(&mut self, mut delay: impl DelayNs) -> Result<(), Error<I::Error>> {
        self.i2c.write(self.address, &[RESET_REGISTER, SOFT_RESET_COMMAND])?;
        delay.delay_ms(STARTUP_DELAY_MS);
        Ok(())
    }

    /// Trigger a forced-mode measurement and return the uncompensated
    /// readings.
    pub fn measure_raw(&mut self, mut delay: impl DelayNs) -> Result<RawSample, Error<I::Error>> {
        let us = self.config.delay_mode.us_for_config(&self.config);

        // ctrl_hum only takes effect after a write to ctrl_meas.
        self.i2c.write(self.address, &[CTRL_HUM_REGISTER, self.config.ctrl_hum()])?;
        self.i2c.write(self.address, &[CTRL_MEAS_REGISTER, self.config.ctrl_meas()])?;
        delay.delay_us(us);

        let mut data = [0u8; DATA_LENGTH];
        self.i2c.write_read(self.address, &[DATA_REGISTER], &mut data)?;

        let sample = raw_sample_from_read_bytes(data);
        #[cfg(feature = "defmt")]
        defmt::trace!("BME280 raw sample: {}", sample);
        Ok(sample)
    }

    /// Measure temperature, pressure and humidity using integer compensation.
    pub fn measure(&mut self, delay: impl DelayNs) -> Result<FixedPointReading, Error<I::Error>> {
        self.measure_with(delay, &IntegerCompensator)
    }

    /// Measure temperature, pressure and humidity with the given compensation
    /// routines.
    pub fn measure_with<C: Compensate>(
        &mut self,
        delay: impl DelayNs,
        compensator: &C,
    ) -> Result<CompensatedReading<C::Temperature, C::Pressure, C::Humidity>, Error<I::Error>>
    {
        let calibration = self.calibration.ok_or(Error::NotInitialized)?;
        let sample = self.measure_raw(delay)?;
        Ok(compensator.compensate(&sample, &calibration))
    }
}
