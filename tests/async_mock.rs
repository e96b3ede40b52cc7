mod common;

use bme280_rjw::FloatCompensator;
use bme280_rjw::asynch::BME280;
use bme280_rjw::common::Config;
use bme280_rjw::error::Error;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

use common::{ADDRESS, init_transactions, measure_transactions};

#[pollster::test]
async fn init_then_measure() -> anyhow::Result<()> {
    let expectations = [
        init_transactions(),
        measure_transactions(),
        measure_transactions(),
    ]
    .concat();
    let mut sensor = BME280::new(I2cMock::new(&expectations), Config::default());
    sensor.init(NoopDelay::new()).await?;

    let reading = sensor.measure(NoopDelay::new()).await?;
    assert_eq!(reading.temperature, 2508);
    assert_eq!(reading.pressure, 25_767_233);
    assert_eq!(reading.humidity, 72_045);

    let reading = sensor
        .measure_with(NoopDelay::new(), &FloatCompensator)
        .await?;
    assert!((reading.temperature - 25.08).abs() < 0.01);

    sensor.destroy().done();
    Ok(())
}

#[pollster::test]
async fn unexpected_chip_id() {
    let expectations = [Transaction::write_read(ADDRESS, vec![0xD0], vec![0x58])];
    let mut sensor = BME280::new(I2cMock::new(&expectations), Config::default());

    let result = sensor.init(NoopDelay::new()).await;
    assert!(matches!(result, Err(Error::UnexpectedChipId(0x58))));

    sensor.destroy().done();
}

#[pollster::test]
async fn measure_before_init() {
    let mut sensor = BME280::new(I2cMock::new(&[]), Config::default());

    let result = sensor.measure(NoopDelay::new()).await;
    assert!(matches!(result, Err(Error::NotInitialized)));

    sensor.destroy().done();
}
