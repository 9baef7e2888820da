use chrono::{DateTime, TimeZone};

/// Whole 24-hour periods between `start` and `now`, truncated toward zero.
pub fn elapsed_days<A: TimeZone, B: TimeZone>(start: &DateTime<A>, now: &DateTime<B>) -> i64 {
    now.clone()
        .signed_duration_since(start.clone())
        .num_days()
}

/// The start day counts as day 1.
pub fn day_number<A: TimeZone, B: TimeZone>(start: &DateTime<A>, now: &DateTime<B>) -> i64 {
    elapsed_days(start, now) + 1
}

pub fn day_label(day: i64) -> String {
    format!("Day {day}")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use chrono_tz::{America::New_York, Tz};
    use pretty_assertions::assert_eq;

    use super::*;

    fn local(tz: Tz, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
        tz.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn third_calendar_day_is_day_three() {
        let start = local(New_York, 1, 0, 0);

        assert_eq!(day_number(&start, &local(New_York, 3, 0, 0)), 3);
        assert_eq!(day_number(&start, &local(New_York, 3, 23, 59)), 3);
        assert_eq!(day_label(day_number(&start, &local(New_York, 3, 12, 0))), "Day 3");
    }

    #[test]
    fn start_day_is_day_one() {
        let start = local(New_York, 1, 0, 0);

        assert_eq!(day_number(&start, &start), 1);
        assert_eq!(day_number(&start, &local(New_York, 1, 23, 59)), 1);
    }

    #[test]
    fn start_time_of_day_shifts_rollover() {
        let start = local(New_York, 1, 18, 0);

        assert_eq!(day_number(&start, &local(New_York, 2, 17, 59)), 1);
        assert_eq!(day_number(&start, &local(New_York, 2, 18, 0)), 2);
    }

    #[test]
    fn compares_instants_across_offsets() {
        let start = local(New_York, 1, 0, 0);
        // 2024-01-03 05:00 UTC is midnight in New York.
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 5, 0, 0).unwrap();

        assert_eq!(day_number(&start, &now), 3);
        assert_eq!(
            day_number(&start, &Utc.with_ymd_and_hms(2024, 1, 3, 4, 59, 0).unwrap()),
            2
        );
    }

    #[test]
    fn before_start_counts_toward_zero() {
        let start = local(New_York, 10, 0, 0);

        assert_eq!(day_number(&start, &local(New_York, 9, 12, 0)), 1);
        assert_eq!(day_number(&start, &local(New_York, 8, 0, 0)), -1);
        assert_eq!(day_label(-1), "Day -1");
    }
}
