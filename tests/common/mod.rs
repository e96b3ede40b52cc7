//! Register contents shared by the blocking and async mock tests.
#![allow(dead_code)]

use embedded_hal_mock::eh1::i2c::Transaction;

pub const ADDRESS: u8 = 0x76;

/// 0x88..=0xA1, holding the coefficients of the datasheet's worked example.
pub const CALIBRATION_TP: [u8; 26] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, // T1..T3
    0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C, 0x00, // P1..P5
    0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17, // P6..P9
    0x00, 0x4B, // unused, H1
];

/// 0xE1..=0xE7: H2 = 362, H3 = 0, H4 = 313, H5 = 50, H6 = 30.
pub const CALIBRATION_H: [u8; 7] = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];

/// 0xF7..=0xFE: pressure 415148, temperature 519888, humidity 32768.
pub const DATA: [u8; 8] = [0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x80, 0x00];

pub fn init_transactions() -> Vec<Transaction> {
    vec![
        Transaction::write_read(ADDRESS, vec![0xD0], vec![0x60]),
        Transaction::write(ADDRESS, vec![0xE0, 0xB6]),
        Transaction::write_read(ADDRESS, vec![0x88], CALIBRATION_TP.to_vec()),
        Transaction::write_read(ADDRESS, vec![0xE1], CALIBRATION_H.to_vec()),
    ]
}

/// Forced measurement with the default 4x oversampling on every channel.
pub fn measure_transactions() -> Vec<Transaction> {
    vec![
        Transaction::write(ADDRESS, vec![0xF2, 0b011]),
        Transaction::write(ADDRESS, vec![0xF4, 0b011_011_01]),
        Transaction::write_read(ADDRESS, vec![0xF7], DATA.to_vec()),
    ]
}
