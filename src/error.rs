use crate::common::BME280_CHIP_ID;

#[derive(Debug)]
pub enum Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    /// The device at the configured address did not report the BME280
    /// chip id. Contains the id that was read.
    UnexpectedChipId(u8),
    /// A measurement was requested before calibration data was loaded.
    NotInitialized,
    I2c(I2cError),
}

impl<I2cError> From<I2cError> for Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    fn from(value: I2cError) -> Self {
        Error::I2c(value)
    }
}

impl<I2cError> core::fmt::Display for Error<I2cError>
where
    I2cError: embedded_hal::i2c::Error,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnexpectedChipId(id) => {
                write!(f, "Expected chip id {BME280_CHIP_ID:#04x}, read {id:#04x}")
            }
            Error::NotInitialized => write!(f, "Calibration data has not been loaded"),
            Error::I2c(e) => write!(f, "Received I2C error: {:?}", e),
        }
    }
}

impl<I> core::error::Error for Error<I> where I: embedded_hal::i2c::Error {}

#[cfg(feature = "defmt")]
impl<I> defmt::Format for Error<I>
where
    I: embedded_hal::i2c::Error,
{
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::UnexpectedChipId(id) => defmt::write!(f, "UnexpectedChipId({=u8:#x})", id),
            Error::NotInitialized => defmt::write!(f, "NotInitialized"),
            Error::I2c(e) => defmt::write!(f, "I2c({})", defmt::Debug2Format(&e.kind())),
        }
    }
}
