//! Polish phrasing for how old a record's data is.

use std::fmt;

/// Age of a record's data relative to the current year.
///
/// Polish numerals pick a different noun form for 2–4 ("lata") than for
/// five and above ("lat"); the four branches are kept as written rather
/// than generalised to the full agreement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    ThisYear,
    OneYearAgo,
    FewYearsAgo(u32),
    YearsAgo(u32),
}

impl Freshness {
    /// Classifies the gap between `data_year` and `current_year`.
    ///
    /// Data stamped with a future year counts as current.
    #[must_use]
    pub fn between(data_year: i32, current_year: i32) -> Self {
        let age = u32::try_from(current_year.saturating_sub(data_year)).unwrap_or(0);
        match age {
            0 => Self::ThisYear,
            1 => Self::OneYearAgo,
            2..=4 => Self::FewYearsAgo(age),
            _ => Self::YearsAgo(age),
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThisYear => f.write_str("z tego roku"),
            Self::OneYearAgo => f.write_str("rok temu"),
            Self::FewYearsAgo(age) => write!(f, "{age} lata temu"),
            Self::YearsAgo(age) => write!(f, "{age} lat temu"),
        }
    }
}
