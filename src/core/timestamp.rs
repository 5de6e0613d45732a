use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_TIME_FORMATS: [&str; 4] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a market timestamp as naive local time.
///
/// Everything from the first `+` on is discarded, so `2025-03-30T03:00:00.000+02:00` reads as
/// `2025-03-30 03:00:00` regardless of the offset. Negative offsets are not stripped and fail
/// to parse. A bare date means midnight.
#[must_use]
pub fn parse_local(text: &str) -> Option<NaiveDateTime> {
    let text = text.split_once('+').map_or(text, |(local, _)| local).trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_strips_offset() {
        assert_eq!(parse_local("2025-01-01T13:00:00.000+01:00"), Some(at(2025, 1, 1, 13, 0)));
    }

    #[test]
    fn test_offsets_are_not_converted() {
        assert_eq!(parse_local("2025-07-01T13:00:00+02:00"), parse_local("2025-07-01T13:00:00+01:00"));
    }

    #[test]
    fn test_space_separated() {
        assert_eq!(parse_local("2025-01-01 05:30:00"), Some(at(2025, 1, 1, 5, 30)));
        assert_eq!(parse_local("2025-01-01 05:30"), Some(at(2025, 1, 1, 5, 30)));
    }

    #[test]
    fn test_date_only() {
        assert_eq!(parse_local("2025-02-03"), Some(at(2025, 2, 3, 0, 0)));
    }

    #[test]
    fn test_garbage() {
        assert_eq!(parse_local("yesterday"), None);
        assert_eq!(parse_local(""), None);
        assert_eq!(parse_local("2025-13-01T00:00:00"), None);
    }

    #[test]
    fn test_negative_offset_is_rejected() {
        assert_eq!(parse_local("2025-01-01T13:00:00-05:00"), None);
    }
}
