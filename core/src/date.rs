//! Fuzzy date normalization.
//!
//! Content dates are hand-written and come in a small vocabulary:
//! ISO dates, bare years, "Month Year" with an optional qualifier
//! (`early`, `mid`, `late`, `circa`, `~`), and "Season Year".
//!
//! [`DateExpr::classify`] runs a strict priority cascade over that
//! vocabulary, first match wins:
//!
//!   1. `YYYY-MM-DD` that is a real calendar date
//!   2. season keyword (substring) + first four-digit year
//!   3. month name (substring, January..December) + first four-digit year
//!   4. the whole expression is a four-digit year
//!   5. anything else is unresolved and sorts before every real date
//!
//! Season and month detection are unanchored substring matches, so a
//! string holding both a season and a month resolves as the season, and
//! two month names resolve as whichever comes first in calendar order.
//! Both the sort key and the spine label go through the same cascade.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Month, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("iso date regex")
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("year regex"));

static BARE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("bare year regex"));

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

// ── Instant ──────────────────────────────────────────────────────────────

/// A comparable point in time, used only for ordering.
///
/// The sentinel (no date) orders before every real date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Instant(Option<NaiveDate>);

impl Instant {
    /// Earliest possible instant; assigned to missing or unparseable dates.
    pub const SENTINEL: Self = Self(None);

    pub fn on(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    pub fn is_sentinel(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{date}"),
            None => f.write_str("sentinel"),
        }
    }
}

// ── Qualifier / Season ───────────────────────────────────────────────────

/// Modifier that shifts the day used for a month-level date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Early,
    Mid,
    Late,
    Circa,
}

impl Qualifier {
    /// First qualifier found, checked in the order early, mid, late, circa/~.
    fn detect(lower: &str) -> Option<Self> {
        if lower.contains("early") {
            Some(Self::Early)
        } else if lower.contains("mid") {
            Some(Self::Mid)
        } else if lower.contains("late") {
            Some(Self::Late)
        } else if lower.contains("circa") || lower.contains('~') {
            Some(Self::Circa)
        } else {
            None
        }
    }

    /// Day of month used for sorting. Unqualified months sort on the 15th.
    pub fn day(qualifier: Option<Self>) -> u32 {
        match qualifier {
            Some(Self::Early) => 5,
            Some(Self::Late) => 25,
            Some(Self::Mid | Self::Circa) | None => 15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Early => "Early",
            Self::Mid => "Mid",
            Self::Late => "Late",
            Self::Circa => "Circa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Autumn,
    Winter,
}

impl Season {
    /// Checked in this order; `fall` wins over `autumn` when both appear.
    const KEYWORDS: [(&'static str, Season); 5] = [
        ("summer", Season::Summer),
        ("spring", Season::Spring),
        ("winter", Season::Winter),
        ("fall", Season::Fall),
        ("autumn", Season::Autumn),
    ];

    fn detect(lower: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, season)| *season)
    }

    /// Month the season resolves to (always on the 1st).
    pub fn month(&self) -> u32 {
        match self {
            Self::Winter => 1,
            Self::Spring => 4,
            Self::Summer => 7,
            Self::Fall | Self::Autumn => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }
}

// ── Classification ───────────────────────────────────────────────────────

/// Which branch of the cascade a date expression resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateExpr {
    Iso(NaiveDate),
    Season {
        season: Season,
        year: i32,
    },
    Month {
        month: Month,
        qualifier: Option<Qualifier>,
        year: i32,
    },
    Year(i32),
    Unresolved,
}

impl DateExpr {
    pub fn classify<'a>(expr: impl Into<Option<&'a str>>) -> Self {
        let Some(expr) = expr.into().map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Unresolved;
        };

        if let Some(date) = parse_iso(expr) {
            return Self::Iso(date);
        }

        let lower = expr.to_lowercase();

        if let Some(season) = Season::detect(&lower) {
            return match first_year(expr) {
                Some(year) => Self::Season { season, year },
                None => Self::Unresolved,
            };
        }

        if let Some(month) = MONTHS.iter().find(|m| lower.contains(&m.name().to_lowercase())) {
            return match first_year(expr) {
                Some(year) => Self::Month {
                    month: *month,
                    qualifier: Qualifier::detect(&lower),
                    year,
                },
                None => Self::Unresolved,
            };
        }

        if BARE_YEAR.is_match(expr) {
            if let Ok(year) = expr.parse() {
                return Self::Year(year);
            }
        }

        Self::Unresolved
    }

    pub fn instant(&self) -> Instant {
        match *self {
            Self::Iso(date) => Instant::on(date),
            Self::Season { season, year } => Instant::from_ymd(year, season.month(), 1),
            Self::Month {
                month,
                qualifier,
                year,
            } => Instant::from_ymd(year, month.number_from_month(), Qualifier::day(qualifier)),
            Self::Year(year) => Instant::from_ymd(year, 7, 1),
            Self::Unresolved => Instant::SENTINEL,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Iso(_) => "iso",
            Self::Season { .. } => "season",
            Self::Month { .. } => "month",
            Self::Year(_) => "year",
            Self::Unresolved => "unresolved",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

fn parse_iso(expr: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(expr)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn first_year(expr: &str) -> Option<i32> {
    YEAR.find(expr).and_then(|m| m.as_str().parse().ok())
}

// ── Normalization ────────────────────────────────────────────────────────

/// Lenient sort key: never fails, unparseable input becomes [`Instant::SENTINEL`].
pub fn normalize_timestamp<'a>(expr: impl Into<Option<&'a str>>) -> Instant {
    let expr = expr.into();
    let parsed = DateExpr::classify(expr);
    if let (DateExpr::Unresolved, Some(raw)) = (parsed, expr) {
        tracing::debug!(date = raw, "unresolved date expression sorts as sentinel");
    }
    parsed.instant()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("date is missing")]
    Missing,
    #[error("unrecognized date expression: {0:?}")]
    Unresolved(String),
}

/// Same cascade as [`normalize_timestamp`], but reports expressions that
/// would fall back to the sentinel.
pub fn normalize_strict<'a>(expr: impl Into<Option<&'a str>>) -> Result<Instant, DateError> {
    let expr = expr
        .into()
        .filter(|s| !s.trim().is_empty())
        .ok_or(DateError::Missing)?;
    match DateExpr::classify(expr) {
        DateExpr::Unresolved => Err(DateError::Unresolved(expr.to_string())),
        parsed => Ok(parsed.instant()),
    }
}
