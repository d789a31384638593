//! Human-readable date formatting for listings.

use chrono::{DateTime, Utc};

/// How the month is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFormat {
    /// `October`
    #[default]
    Long,
    /// `Oct`
    Short,
    /// `10`
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub month: MonthFormat,
    pub show_year: bool,
    pub show_day: bool,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            month: MonthFormat::Long,
            show_year: true,
            show_day: true,
        }
    }
}

/// Format a timestamp day-first, e.g. `19 October 2026` or `19/10/2026`.
pub fn format_date(ts: &DateTime<Utc>, format: DateFormat) -> String {
    let (month, sep) = match format.month {
        MonthFormat::Long => ("%B", " "),
        MonthFormat::Short => ("%b", " "),
        MonthFormat::Numeric => ("%m", "/"),
    };

    let mut parts = Vec::with_capacity(3);
    if format.show_day {
        parts.push(if format.month == MonthFormat::Numeric { "%d" } else { "%-d" });
    }
    parts.push(month);
    if format.show_year {
        parts.push("%Y");
    }

    ts.format(&parts.join(sep)).to_string()
}
