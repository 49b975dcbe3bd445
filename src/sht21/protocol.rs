//! SHT21 wire protocol: opcodes, timing, and conversion math
//!
//! Every command is a single byte. A measurement response is two data
//! bytes (big-endian) followed by a CRC byte, which this driver ignores.
//! The two low-order bits of the combined value are status bits, not
//! magnitude, and must be cleared before conversion.

use std::time::Duration;

// Command opcodes (hold master mode)
pub const CMD_SOFT_RESET: u8 = 0xFE; // Reboot sensor without power cycle
pub const CMD_MEASURE_TEMP_HOLD: u8 = 0xE3; // Trigger temperature measurement
pub const CMD_MEASURE_HUMIDITY_HOLD: u8 = 0xE5; // Trigger humidity measurement

// Timing (worst case per datasheet)
pub const SOFT_RESET_SETTLE: Duration = Duration::from_millis(15);
pub const TEMP_MEASURE_DELAY: Duration = Duration::from_millis(85); // 14-bit conversion
pub const HUMIDITY_MEASURE_DELAY: Duration = Duration::from_millis(29); // 12-bit conversion

// Response layout
pub const RESPONSE_LEN: usize = 3; // MSB + LSB + CRC
pub const STATUS_BITS_MASK: u16 = 0x0003; // Low 2 bits carry status, not magnitude

/// Clear the status bits of a raw measurement
#[inline]
pub fn mask_status_bits(raw: u16) -> u16 {
    raw & !STATUS_BITS_MASK
}

/// Combine the two response data bytes (big-endian) and clear status bits
#[inline]
pub fn combine_raw(msb: u8, lsb: u8) -> u16 {
    mask_status_bits(u16::from_be_bytes([msb, lsb]))
}

/// Convert a raw temperature count to degrees Celsius
///
/// Fixed affine mapping from the datasheet: `-46.85 + 175.72 * raw / 2^16`.
pub fn convert_temperature(raw: u16) -> f64 {
    -46.85 + 175.72 * raw as f64 / 65536.0
}

/// Convert a raw humidity count to percent relative humidity
///
/// Fixed affine mapping from the datasheet: `-6.0 + 125.0 * raw / 2^16`.
pub fn convert_humidity(raw: u16) -> f64 {
    -6.0 + 125.0 * raw as f64 / 65536.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_clears_low_bits() {
        assert_eq!(mask_status_bits(0xFFFF), 0xFFFC);
        assert_eq!(mask_status_bits(0x6299), 0x6298);
        assert_eq!(mask_status_bits(0x0003), 0x0000);
        assert_eq!(mask_status_bits(0x6298), 0x6298); // already clear
    }

    #[test]
    fn test_mask_is_idempotent() {
        for raw in [0x0000u16, 0x0001, 0x6298, 0xABCD, 0xFFFF] {
            let once = mask_status_bits(raw);
            assert_eq!(mask_status_bits(once), once);
            assert_eq!(once, raw & !0x3);
        }
    }

    #[test]
    fn test_combine_big_endian() {
        assert_eq!(combine_raw(0x62, 0x98), 0x6298);
        assert_eq!(combine_raw(0x00, 0x00), 0x0000);
        // Status bits in the LSB are dropped during combine
        assert_eq!(combine_raw(0x62, 0x9A), 0x6298);
    }

    #[test]
    fn test_temperature_conversion() {
        // 0x6298 = 25240 counts -> about 20.83 degC
        let t = convert_temperature(0x6298);
        assert!((t - 20.8253662109375).abs() < 1e-9);

        // Domain edges
        assert!((convert_temperature(0) + 46.85).abs() < 1e-9);
        assert!((convert_temperature(0xFFFC) - 128.8592749).abs() < 1e-6);
    }

    #[test]
    fn test_humidity_conversion() {
        // 0x5C00 = 23552 counts -> about 38.92 %RH
        let h = convert_humidity(0x5C00);
        assert!((h - 38.921875).abs() < 1e-9);

        // Domain edges
        assert!((convert_humidity(0) + 6.0).abs() < 1e-9);
        assert!((convert_humidity(0xFFFC) - 118.99237060546875).abs() < 1e-6);
    }

    #[test]
    fn test_conversions_total_and_monotonic() {
        // Step by 4 to stay on masked values; both mappings must be
        // strictly increasing across the whole 16-bit domain.
        let mut prev_t = convert_temperature(0);
        let mut prev_h = convert_humidity(0);
        for raw in (4..=0xFFFCu32).step_by(4) {
            let t = convert_temperature(raw as u16);
            let h = convert_humidity(raw as u16);
            assert!(t > prev_t);
            assert!(h > prev_h);
            prev_t = t;
            prev_h = h;
        }
    }
}
