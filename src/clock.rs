//! Local wall-clock breakdown for the time and date text
//!
//! Timestamps arrive from the host as local-time epoch milliseconds (the host
//! has already applied the time zone offset).

const MS_PER_DAY: i64 = 86_400_000;

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Calendar fields of a local timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub year: i64,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
    /// 0 = Sunday
    pub weekday: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl LocalTime {
    pub fn from_millis(millis: i64) -> Self {
        let days = millis.div_euclid(MS_PER_DAY);
        let ms_of_day = millis.rem_euclid(MS_PER_DAY);
        let secs = (ms_of_day / 1000) as u32;
        let (year, month, day) = civil_from_days(days);

        Self {
            year,
            month,
            day,
            // 1970-01-01 was a Thursday
            weekday: (days + 4).rem_euclid(7) as u32,
            hour: secs / 3600,
            minute: secs / 60 % 60,
            second: secs % 60,
        }
    }

    /// `14:05`, or `2:05` on a 12-hour clock
    pub fn time_text(&self, use_24_hour: bool) -> String {
        if use_24_hour {
            format!("{:02}:{:02}", self.hour, self.minute)
        } else {
            let hour = match self.hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{}:{:02}", hour, self.minute)
        }
    }

    /// `SAT 18`
    pub fn date_text(&self) -> String {
        format!("{} {}", WEEKDAYS[self.weekday as usize], self.day)
    }
}

/// Days since 1970-01-01 to (year, month, day) in the proleptic Gregorian calendar
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let t = LocalTime::from_millis(0);
        assert_eq!((t.year, t.month, t.day), (1970, 1, 1));
        assert_eq!(t.weekday, 4);
        assert_eq!(t.date_text(), "THU 1");
    }

    #[test]
    fn test_known_timestamp() {
        // 2023-11-14 22:13:20, a Tuesday
        let t = LocalTime::from_millis(1_700_000_000_000);
        assert_eq!((t.year, t.month, t.day), (2023, 11, 14));
        assert_eq!((t.hour, t.minute, t.second), (22, 13, 20));
        assert_eq!(t.date_text(), "TUE 14");
        assert_eq!(t.time_text(true), "22:13");
        assert_eq!(t.time_text(false), "10:13");
    }

    #[test]
    fn test_leap_day() {
        // 2024-02-29 00:00:00
        let t = LocalTime::from_millis(1_709_164_800_000);
        assert_eq!((t.year, t.month, t.day), (2024, 2, 29));
        assert_eq!(t.weekday, 4);
    }

    #[test]
    fn test_before_epoch() {
        let t = LocalTime::from_millis(-1);
        assert_eq!((t.year, t.month, t.day), (1969, 12, 31));
        assert_eq!((t.hour, t.minute, t.second), (23, 59, 59));
        assert_eq!(t.weekday, 3);
    }

    #[test]
    fn test_midnight_on_12_hour_clock() {
        let t = LocalTime::from_millis(5 * 60_000);
        assert_eq!(t.time_text(false), "12:05");
        assert_eq!(t.time_text(true), "00:05");
    }
}
