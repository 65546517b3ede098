use chrono::Local;

pub fn current_timestamp() -> u64 {
    Local::now().timestamp() as u64
}

const SECOND: u64 = 1;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Render how far in the future `time` is, like "in 2 hours". Returns
/// "expired" for past or zero timestamps.
pub fn format_until(time: u64) -> String {
    let now = current_timestamp();
    if time <= now {
        return String::from("expired");
    }
    let duration = time - now;

    let unit: &str;
    let value: u64;
    if duration < MINUTE {
        unit = "second";
        value = duration;
    } else if duration < HOUR {
        unit = "minute";
        value = duration / MINUTE;
    } else if duration < DAY {
        unit = "hour";
        value = duration / HOUR;
    } else if duration < WEEK {
        unit = "day";
        value = duration / DAY;
    } else if duration < MONTH {
        unit = "week";
        value = duration / WEEK;
    } else if duration < YEAR {
        unit = "month";
        value = duration / MONTH;
    } else {
        unit = "year";
        value = duration / YEAR;
    }

    if value > 1 {
        format!("in {value} {unit}s")
    } else {
        format!("in 1 {unit}")
    }
}
