//! UTC datetime utilities for HTTP date headers.
//!
//! Provides a lightweight `DateTimeUtc` struct that converts to and from
//! `SystemTime` and the IMF-fixdate format used by `Last-Modified` and
//! `If-Modified-Since`.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse_http("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
//! assert_eq!(dt.to_http(), "Sun, 06 Nov 1994 08:49:37 GMT");
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};

const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const SECS_PER_DAY: u64 = 86_400;

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Convert from `SystemTime`, truncating to whole seconds.
    ///
    /// Times before the epoch clamp to the epoch.
    #[allow(clippy::cast_possible_truncation)] // Bounded by calendar math
    pub fn from_system_time(time: SystemTime) -> Self {
        let secs = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let (year, month, day) = civil_from_days(secs / SECS_PER_DAY);
        let rem = secs % SECS_PER_DAY;
        Self::new(
            year,
            month,
            day,
            (rem / 3600) as u8,
            ((rem / 60) % 60) as u8,
            (rem % 60) as u8,
        )
    }

    /// Convert to `SystemTime`.
    pub fn to_system_time(self) -> SystemTime {
        let days = days_from_civil(self.year, self.month, self.day);
        let secs = days * SECS_PER_DAY
            + u64::from(self.hour) * 3600
            + u64::from(self.minute) * 60
            + u64::from(self.second);
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    /// Parse IMF-fixdate: `Sun, 06 Nov 1994 08:49:37 GMT`.
    ///
    /// The weekday name is checked for shape only, as most servers do.
    pub fn parse_http(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 29 || &bytes[3..5] != b", " || &bytes[25..] != b" GMT" {
            return None;
        }

        let day = parse_u8(&bytes[5..7])?;
        let month_name = std::str::from_utf8(&bytes[8..11]).ok()?;
        let month = MONTHS.iter().position(|m| *m == month_name)? as u8 + 1;
        let year = parse_u16(&bytes[12..16])?;
        if bytes[7] != b' ' || bytes[11] != b' ' || bytes[16] != b' ' {
            return None;
        }
        if bytes[19] != b':' || bytes[22] != b':' {
            return None;
        }
        let hour = parse_u8(&bytes[17..19])?;
        let minute = parse_u8(&bytes[20..22])?;
        let second = parse_u8(&bytes[23..25])?;

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if year < 1970 {
            bail!("year is before the epoch: {year}");
        }
        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as IMF-fixdate for HTTP headers.
    pub fn to_http(self) -> String {
        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[self.weekday_index()],
            self.day,
            MONTHS[(self.month - 1) as usize],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Zeller's congruence; index into `WEEKDAYS` (0 = Saturday).
    #[inline]
    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

/// Format a `SystemTime` as an HTTP date.
pub fn http_date(time: SystemTime) -> String {
    DateTimeUtc::from_system_time(time).to_http()
}

/// Parse an HTTP date header value.
pub fn parse_http_date(value: &str) -> Option<SystemTime> {
    DateTimeUtc::parse_http(value).map(DateTimeUtc::to_system_time)
}

/// Days since 1970-01-01 → (year, month, day).
#[allow(clippy::cast_possible_truncation)]
fn civil_from_days(days: u64) -> (u16, u8, u8) {
    // Shift epoch to 0000-03-01 so leap days fall at the end of each era year
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year as u16, month, day)
}

/// (year, month, day) → days since 1970-01-01. Requires year >= 1970.
fn days_from_civil(year: u16, month: u8, day: u8) -> u64 {
    let y = u64::from(year) - u64::from(month <= 2);
    let m = u64::from(month);
    let era = y / 400;
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + u64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let dt = DateTimeUtc::from_system_time(UNIX_EPOCH);
        assert_eq!(dt, DateTimeUtc::new(1970, 1, 1, 0, 0, 0));
        assert_eq!(dt.to_http(), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_rfc_example() {
        // 784111777 is the example date from RFC 9110
        let time = UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT"), Some(time));
    }

    #[test]
    fn test_leap_day() {
        let dt = DateTimeUtc::new(2024, 2, 29, 12, 0, 0);
        let time = dt.to_system_time();
        assert_eq!(DateTimeUtc::from_system_time(time), dt);
        assert_eq!(dt.to_http(), "Thu, 29 Feb 2024 12:00:00 GMT");
    }

    #[test]
    fn test_subsecond_truncated() {
        let time = UNIX_EPOCH + Duration::new(1_700_000_000, 999_999_999);
        let parsed = parse_http_date(&http_date(time)).unwrap();
        assert_eq!(parsed, UNIX_EPOCH + Duration::from_secs(1_700_000_000));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_http_date("").is_none());
        assert!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT").is_none());
        assert!(parse_http_date("Sun, 06 Foo 1994 08:49:37 GMT").is_none());
        assert!(parse_http_date("Sun, 31 Feb 1994 08:49:37 GMT").is_none());
        assert!(parse_http_date("Sun, 06 Nov 1994 25:49:37 GMT").is_none());
        assert!(parse_http_date("Sun, 06 Nov 1994 08:49:37 UTC").is_none());
    }

    #[test]
    fn test_roundtrip_across_years() {
        for secs in [0, 86_399, 951_782_400, 1_234_567_890, 4_102_444_800] {
            let time = UNIX_EPOCH + Duration::from_secs(secs);
            assert_eq!(parse_http_date(&http_date(time)), Some(time), "secs={secs}");
        }
    }
}
