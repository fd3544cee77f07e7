use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = match date.weekday().num_days_from_sunday() {
        0 => 6,
        index => index - 1,
    };
    date - Duration::days(i64::from(back))
}

/// Last instant of the Sunday closing the week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDateTime {
    let sunday = week_start(date) + Duration::days(6);
    let last_instant =
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    sunday.and_time(last_instant)
}

pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDateTime) {
    (week_start(date), week_end(date))
}

pub fn current_week_range() -> (NaiveDate, NaiveDateTime) {
    week_range(today())
}

pub fn week_dates(start: NaiveDate) -> [String; 7] {
    std::array::from_fn(|offset| format_date(start + Duration::days(offset as i64)))
}

pub fn day_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// `Jan 5 - Jan 11, 2026`, or with both years when the week straddles New Year.
pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
