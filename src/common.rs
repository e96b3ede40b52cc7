use crate::calibration::CalibrationData;
use crate::compensation::RawSample;

pub(crate) const BME280_CHIP_ID: u8 = 0x60;
pub(crate) const DEFAULT_ADDRESS: u8 = 0x76;

pub(crate) const CHIP_ID_REGISTER: u8 = 0xD0;
pub(crate) const RESET_REGISTER: u8 = 0xE0;
pub(crate) const CTRL_HUM_REGISTER: u8 = 0xF2;
pub(crate) const CTRL_MEAS_REGISTER: u8 = 0xF4;
pub(crate) const DATA_REGISTER: u8 = 0xF7;
pub(crate) const CALIBRATION_TP_REGISTER: u8 = 0x88;
pub(crate) const CALIBRATION_H_REGISTER: u8 = 0xE1;

pub(crate) const SOFT_RESET_COMMAND: u8 = 0xB6;
/// Start-up time after power on or soft reset (section 1 of the datasheet).
pub(crate) const STARTUP_DELAY_MS: u32 = 2;

pub(crate) const CALIBRATION_TP_LENGTH: usize = 26;
pub(crate) const CALIBRATION_H_LENGTH: usize = 7;
pub(crate) const DATA_LENGTH: usize = 8;

const FORCED_MODE: u8 = 0b01;

/// Decode the two calibration blocks read from 0x88..=0xA1 and 0xE1..=0xE7.
///
/// The register layout is given in table 16 of the [datasheet]. Most values
/// are little-endian words; `dig_h4` and `dig_h5` are 12-bit signed values
/// that share the nibbles of register 0xE5.
///
/// [datasheet]: https://www.bosch-sensortec.com/media/boschsensortec/downloads/datasheets/bst-bme280-ds002.pdf
pub(crate) fn calibration_from_read_bytes(
    tp: &[u8; CALIBRATION_TP_LENGTH],
    h: &[u8; CALIBRATION_H_LENGTH],
) -> CalibrationData {
    let unsigned = |i: usize| u16::from_le_bytes([tp[i], tp[i + 1]]);
    let signed = |i: usize| i16::from_le_bytes([tp[i], tp[i + 1]]);

    CalibrationData {
        dig_t1: unsigned(0),
        dig_t2: signed(2),
        dig_t3: signed(4),
        dig_p1: unsigned(6),
        dig_p2: signed(8),
        dig_p3: signed(10),
        dig_p4: signed(12),
        dig_p5: signed(14),
        dig_p6: signed(16),
        dig_p7: signed(18),
        dig_p8: signed(20),
        dig_p9: signed(22),
        // tp[24] (0xA0) is unused.
        dig_h1: tp[25],
        dig_h2: i16::from_le_bytes([h[0], h[1]]),
        dig_h3: h[2],
        dig_h4: i16::from(h[3] as i8) * 16 | i16::from(h[4] & 0x0F),
        dig_h5: i16::from(h[5] as i8) * 16 | i16::from(h[4] >> 4),
        dig_h6: h[6] as i8,
    }
}

/// Decode the burst read of the data registers 0xF7..=0xFE.
///
/// Pressure and temperature are the top 20 bits of three bytes (MSB first),
/// humidity is a big-endian 16-bit value.
pub(crate) fn raw_sample_from_read_bytes(bytes: [u8; DATA_LENGTH]) -> RawSample {
    let [p0, p1, p2, t0, t1, t2, h0, h1] = bytes;
    let twenty_bit = |msb: u8, lsb: u8, xlsb: u8| {
        u32::from(msb) << 12 | u32::from(lsb) << 4 | u32::from(xlsb) >> 4
    };
    RawSample {
        pressure: twenty_bit(p0, p1, p2),
        temperature: twenty_bit(t0, t1, t2),
        humidity: u32::from(u16::from_be_bytes([h0, h1])),
    }
}

/// Oversampling applied to a single measurement channel.
///
/// Higher oversampling reduces noise at the cost of a longer measurement
/// (see section 3.4 of the datasheet). A skipped channel is not measured,
/// and its register reads back as `0x80000` (or `0x8000` for humidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl Oversampling {
    /// Register bits for the `osrs_*` fields.
    pub(crate) fn bits(&self) -> u8 {
        match self {
            Oversampling::Skipped => 0b000,
            Oversampling::X1 => 0b001,
            Oversampling::X2 => 0b010,
            Oversampling::X4 => 0b011,
            Oversampling::X8 => 0b100,
            Oversampling::X16 => 0b101,
        }
    }

    fn samples(&self) -> u32 {
        match self {
            Oversampling::Skipped => 0,
            Oversampling::X1 => 1,
            Oversampling::X2 => 2,
            Oversampling::X4 => 4,
            Oversampling::X8 => 8,
            Oversampling::X16 => 16,
        }
    }
}

/// Length of delay before reading the result of a forced measurement.
///
/// Measurement time grows with the oversampling of each channel. Both
/// variants use the formulas in section 9.1 of the [datasheet].
///
/// [datasheet]: https://www.bosch-sensortec.com/media/boschsensortec/downloads/datasheets/bst-bme280-ds002.pdf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadingDelayMode {
    /// Typical measurement time: 1ms plus 2ms per sample, plus 0.5ms for
    /// each of pressure and humidity when enabled.
    Typical,
    /// Maximum measurement time: 1.25ms plus 2.3ms per sample, plus 0.575ms
    /// for each of pressure and humidity when enabled.
    Maximum,
}

impl ReadingDelayMode {
    /// Microsecond delay for the current delay mode and the given settings.
    pub(crate) fn us_for_config(&self, config: &Config) -> u32 {
        let (base, per_sample, settle) = match self {
            ReadingDelayMode::Typical => (1_000, 2_000, 500),
            ReadingDelayMode::Maximum => (1_250, 2_300, 575),
        };
        let channel = |oversampling: Oversampling, extra: u32| match oversampling {
            Oversampling::Skipped => 0,
            os => per_sample * os.samples() + extra,
        };

        base + channel(config.temperature, 0)
            + channel(config.pressure, settle)
            + channel(config.humidity, settle)
    }
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub temperature: Oversampling,
    pub pressure: Oversampling,
    pub humidity: Oversampling,
    pub delay_mode: ReadingDelayMode,
}

impl Config {
    pub(crate) fn ctrl_hum(&self) -> u8 {
        self.humidity.bits()
    }

    /// `ctrl_meas` value that starts a forced-mode measurement.
    pub(crate) fn ctrl_meas(&self) -> u8 {
        self.temperature.bits() << 5 | self.pressure.bits() << 2 | FORCED_MODE
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temperature: Oversampling::X4,
            pressure: Oversampling::X4,
            humidity: Oversampling::X4,
            delay_mode: ReadingDelayMode::Typical,
        }
    }
}
