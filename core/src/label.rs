//! Compact date labels for the timeline spine and navigation rail.

use chrono::{Month, NaiveDate};

use crate::date::DateExpr;

/// Two-line label (`\n`-separated) for a date expression.
///
/// ```text
/// 2021-01-05          -> "Jan 5\n'21"
/// Early January 2020  -> "Early\nJan '20"
/// March 2020          -> "Mar\n'20"
/// Summer 2020         -> "Summer\n'20"
/// 2020                -> "2020"
/// anything else       -> unchanged
/// ```
pub fn format_spine_label<'a>(expr: impl Into<Option<&'a str>>) -> String {
    let expr = expr.into();
    match DateExpr::classify(expr) {
        DateExpr::Iso(date) => format!("{}\n'{}", date.format("%b %-d"), date.format("%y")),
        DateExpr::Season { season, year } => format!("{}\n'{}", season.label(), short_year(year)),
        DateExpr::Month {
            month,
            qualifier: Some(q),
            year,
        } => format!("{}\n{} '{}", q.label(), abbrev(month), short_year(year)),
        DateExpr::Month {
            month,
            qualifier: None,
            year,
        } => format!("{}\n'{}", abbrev(month), short_year(year)),
        DateExpr::Year(year) => year.to_string(),
        DateExpr::Unresolved => expr.unwrap_or_default().to_string(),
    }
}

/// "Mar 2020" for an ISO anchor date; other input is returned unchanged.
pub fn format_anchor_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

fn abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

fn short_year(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_label() {
        assert_eq!(format_spine_label("2021-01-05"), "Jan 5\n'21");
        assert_eq!(format_spine_label("2020-11-30"), "Nov 30\n'20");
    }

    #[test]
    fn test_qualified_month_label() {
        assert_eq!(format_spine_label("Early January 2020"), "Early\nJan '20");
        assert_eq!(format_spine_label("late september 2020"), "Late\nSep '20");
        assert_eq!(format_spine_label("~April 2020"), "Circa\nApr '20");
        assert_eq!(format_spine_label("Mid May 2005"), "Mid\nMay '05");
    }

    #[test]
    fn test_plain_month_label() {
        assert_eq!(format_spine_label("March 2020"), "Mar\n'20");
    }

    #[test]
    fn test_season_label() {
        assert_eq!(format_spine_label("Summer 2020"), "Summer\n'20");
        assert_eq!(format_spine_label("autumn 2021"), "Autumn\n'21");
    }

    #[test]
    fn test_bare_year_label() {
        assert_eq!(format_spine_label("2020"), "2020");
    }

    #[test]
    fn test_unrecognized_label_is_verbatim() {
        assert_eq!(format_spine_label("the week after"), "the week after");
        assert_eq!(format_spine_label("Summer"), "Summer");
        assert_eq!(format_spine_label(None), "");
    }

    #[test]
    fn test_label_follows_sort_branch() {
        // season outranks the month name, for the label as for the sort key
        assert_eq!(format_spine_label("Summer (June) 2020"), "Summer\n'20");
    }

    #[test]
    fn test_anchor_date() {
        assert_eq!(format_anchor_date("2020-03-11"), "Mar 2020");
        assert_eq!(format_anchor_date("spring"), "spring");
    }
}
