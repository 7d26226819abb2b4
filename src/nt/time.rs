//! Guest time conversions
//!
//! The guest counts time in 100-nanosecond ticks since January 1, 1601;
//! the host counts seconds since January 1, 1970. These helpers convert
//! between the two encodings.

use std::time::{SystemTime, UNIX_EPOCH};

/// Guest ticks per second (one tick = 100 ns).
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Seconds between the guest epoch (1601) and the Unix epoch (1970).
pub const EPOCH_DELTA_SECONDS: u64 = 11_644_473_600;

/// The same epoch delta expressed in guest ticks.
pub const EPOCH_DELTA_TICKS: u64 = EPOCH_DELTA_SECONDS * TICKS_PER_SECOND;

/// Combine the low/high halves of a host file timestamp into a tick count.
///
/// Pure bit concatenation, no validation.
pub fn ticks_from_parts(low: u32, high: u32) -> u64 {
    (low as u64) | ((high as u64) << 32)
}

/// Convert a guest tick count to seconds since the Unix epoch.
///
/// Returns `None` when the tick count precedes 1970 or the resulting
/// second count does not fit in 32 bits; the caller's output must stay
/// untouched in that case.
pub fn seconds_since_1970(ticks: u64) -> Option<u32> {
    let since_unix = ticks.checked_sub(EPOCH_DELTA_TICKS)?;
    let seconds = since_unix / TICKS_PER_SECOND;
    u32::try_from(seconds).ok()
}

/// Convert a host timestamp (seconds + nanoseconds since the Unix epoch)
/// to guest ticks. Pre-1601 inputs saturate at zero.
pub fn ticks_from_unix(secs: i64, nanos: u32) -> u64 {
    let since_1601 = secs.checked_add(EPOCH_DELTA_SECONDS as i64);
    match since_1601 {
        Some(s) if s > 0 => s as u64 * TICKS_PER_SECOND + nanos as u64 / 100,
        _ => 0,
    }
}

/// Current wall-clock time as guest ticks.
pub fn system_time_ticks() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => ticks_from_unix(d.as_secs() as i64, d.subsec_nanos()),
        // Clock set before 1970; report the Unix epoch itself.
        Err(_) => EPOCH_DELTA_TICKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_concatenate_lsb_first() {
        assert_eq!(ticks_from_parts(0xDDCC_BBAA, 0x1122_3344), 0x1122_3344_DDCC_BBAA);
        assert_eq!(ticks_from_parts(0, 1), 1 << 32);
    }

    #[test]
    fn epoch_boundary() {
        assert_eq!(seconds_since_1970(EPOCH_DELTA_TICKS), Some(0));
        assert_eq!(seconds_since_1970(EPOCH_DELTA_TICKS - 1), None);
        assert_eq!(seconds_since_1970(0), None);
    }

    #[test]
    fn seconds_round_trip_to_whole_seconds() {
        // Sub-second ticks truncate; whole seconds must survive the trip.
        for seconds in [0u64, 1, 1_700_000_000, u32::MAX as u64] {
            let ticks = EPOCH_DELTA_TICKS + seconds * TICKS_PER_SECOND + 123;
            let got = seconds_since_1970(ticks).expect("in range");
            assert_eq!(got as u64, seconds);
            assert_eq!(
                EPOCH_DELTA_TICKS + got as u64 * TICKS_PER_SECOND,
                ticks - 123
            );
        }
    }

    #[test]
    fn seconds_past_u32_range_fail() {
        let ticks = EPOCH_DELTA_TICKS + (u32::MAX as u64 + 1) * TICKS_PER_SECOND;
        assert_eq!(seconds_since_1970(ticks), None);
        assert_eq!(seconds_since_1970(u64::MAX), None);
    }

    #[test]
    fn unix_conversion_matches_epoch_delta() {
        assert_eq!(ticks_from_unix(0, 0), EPOCH_DELTA_TICKS);
        assert_eq!(ticks_from_unix(1, 500), EPOCH_DELTA_TICKS + TICKS_PER_SECOND + 5);
        assert_eq!(ticks_from_unix(-(EPOCH_DELTA_SECONDS as i64) - 10, 0), 0);
    }
}
