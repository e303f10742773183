//! Calendar month arithmetic for installment due dates.

use chrono::{Months, NaiveDate};

/// Add `months` calendar months to `date`.
///
/// The day of month is kept where the target month has it and clamped
/// to the month's last day otherwise (31 January + 1 month is 28 or 29
/// February).  Dates beyond chrono's range saturate at
/// [`NaiveDate::MAX`].
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}
