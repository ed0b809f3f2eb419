/// Utilities for date and time formatting
///
/// Timestamps arrive from the API as epoch milliseconds.
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

/// Текущее время в миллисекундах (часы браузера)
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

fn to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Format epoch milliseconds to "DD.MM.YYYY, HH:MM:SS" in the browser's time zone
pub fn format_timestamp(ms: i64) -> String {
    match to_utc(ms) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%d.%m.%Y, %H:%M:%S")
            .to_string(),
        None => String::new(),
    }
}

/// Same as [`format_timestamp`] for an explicit offset
pub fn format_timestamp_in(ms: i64, offset: &FixedOffset) -> String {
    match to_utc(ms) {
        Some(dt) => dt
            .with_timezone(offset)
            .format("%d.%m.%Y, %H:%M:%S")
            .to_string(),
        None => String::new(),
    }
}

/// Русское склонение: 1 минуту, 2 минуты, 5 минут
fn plural<'a>(n: i64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let n = n.abs();
    let (m10, m100) = (n % 10, n % 100);
    if m10 == 1 && m100 != 11 {
        one
    } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
        few
    } else {
        many
    }
}

/// Human "time ago" in Russian, e.g. "5 минут назад"
pub fn format_relative(ms: i64, now: i64) -> String {
    let seconds = ((now - ms) / 1000).max(0);
    if seconds < 5 {
        return "меньше 5 секунд назад".to_string();
    }
    if seconds < 10 {
        return "меньше 10 секунд назад".to_string();
    }
    if seconds < 20 {
        return "меньше 20 секунд назад".to_string();
    }
    if seconds < 40 {
        return "полминуты назад".to_string();
    }
    if seconds < 60 {
        return "меньше минуты назад".to_string();
    }

    let minutes = (seconds as f64 / 60.0).round() as i64;
    if minutes < 45 {
        return format!(
            "{} {} назад",
            minutes,
            plural(minutes, "минуту", "минуты", "минут")
        );
    }

    let hours = (minutes as f64 / 60.0).round() as i64;
    if minutes < 60 * 24 {
        let hours = hours.max(1);
        return format!("около {} {} назад", hours, plural(hours, "часа", "часов", "часов"));
    }

    let days = (minutes as f64 / (60.0 * 24.0)).round() as i64;
    if days < 30 {
        return format!("{} {} назад", days, plural(days, "день", "дня", "дней"));
    }

    let months = (days as f64 / 30.0).round() as i64;
    if months < 12 {
        return format!(
            "{} {} назад",
            months,
            plural(months, "месяц", "месяца", "месяцев")
        );
    }

    let years = days / 365;
    let years = years.max(1);
    format!("{} {} назад", years, plural(years, "год", "года", "лет"))
}
