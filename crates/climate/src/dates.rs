use time::{error, macros::format_description, Date, Month};

/// Layout of the `measurement.date` column and of dates in request paths, as shown to callers
pub const ISO_DATE_HINT: &str = "YYYY-MM-DD";

/// Reads a request or column date.
///
/// The year is exactly four digits with no sign, month and day take one or two
/// digits, so `2017-8-1` reads as `2017-08-01`.
pub fn parse_iso_date(value: &str) -> Option<Date> {
    let year = value.get(..4)?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Date::parse(
        value,
        format_description!("[year]-[month padding:none]-[day padding:none]"),
    )
    .ok()
}

pub fn format_iso_date(date: Date) -> Result<String, error::Format> {
    date.format(format_description!("[year]-[month]-[day]"))
}

/// Same month and day one calendar year earlier.
///
/// February 29th has no counterpart in the previous year and maps to February 28th.
pub fn one_year_before(date: Date) -> Date {
    let year = date.year() - 1;
    date.replace_year(year).unwrap_or_else(|_| {
        // only Feb 29 can fail here, and Feb 28 exists in every year
        Date::from_calendar_date(year, Month::February, 28).unwrap_or(date)
    })
}
