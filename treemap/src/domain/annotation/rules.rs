//! Line patterns recognised inside the provider's attribute blob.

use std::sync::OnceLock;

use regex::Regex;

/// One `Label: value` line the annotator knows how to read.
///
/// Every pattern is anchored to the start of a line and only the first
/// matching line counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeLine {
    /// `Nazwa polska: <common name>`
    CommonName,
    /// `Wysokość w m: <integer>`
    HeightMetres,
    /// `Obwód pnia w cm: <integer>`
    TrunkGirthCentimetres,
    /// `Aktualność danych…<4-digit year>`
    DataCurrencyYear,
}

impl AttributeLine {
    const fn pattern(self) -> &'static str {
        match self {
            Self::CommonName => r"(?m)^Nazwa polska: (.+)",
            Self::HeightMetres => r"(?m)^Wysokość w m: ([0-9]+)",
            Self::TrunkGirthCentimetres => r"(?m)^Obwód pnia w cm: ([0-9]+)",
            Self::DataCurrencyYear => r"(?m)^Aktualność danych.*?([0-9]{4})",
        }
    }

    /// Human-readable field name used in logs and errors.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::CommonName => "common name",
            Self::HeightMetres => "height",
            Self::TrunkGirthCentimetres => "trunk girth",
            Self::DataCurrencyYear => "data currency year",
        }
    }

    fn regex(self) -> &'static Regex {
        static COMMON_NAME: OnceLock<Regex> = OnceLock::new();
        static HEIGHT: OnceLock<Regex> = OnceLock::new();
        static GIRTH: OnceLock<Regex> = OnceLock::new();
        static DATA_YEAR: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            Self::CommonName => &COMMON_NAME,
            Self::HeightMetres => &HEIGHT,
            Self::TrunkGirthCentimetres => &GIRTH,
            Self::DataCurrencyYear => &DATA_YEAR,
        };
        cell.get_or_init(|| {
            Regex::new(self.pattern()).unwrap_or_else(|error| {
                panic!("{} pattern failed to compile: {error}", self.field_name())
            })
        })
    }

    /// Returns the captured value of the first matching line, if any.
    #[must_use]
    pub fn capture(self, blob: &str) -> Option<&str> {
        self.regex()
            .captures(blob)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().trim_end_matches('\r'))
    }
}
