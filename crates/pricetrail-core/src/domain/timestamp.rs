use std::fmt::{Display, Formatter};
use std::ops::Add;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ValidationError;

const NAIVE_FRACTIONAL: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const NAIVE_WHOLE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const LABEL_DATE_TIME: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day] [hour]:[minute]");
const LABEL_DATE: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day]");

/// Instant normalized to UTC, serialized as RFC3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parse an ISO-8601 timestamp.
    ///
    /// Offsets other than UTC are converted. Zone-less values such as
    /// `2024-05-01T12:30:00.123456` are read as UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self::from_offset_datetime(parsed));
        }

        [NAIVE_FRACTIONAL, NAIVE_WHOLE]
            .into_iter()
            .find_map(|format| PrimitiveDateTime::parse(trimmed, format).ok())
            .map(|naive| Self(naive.assume_utc()))
            .ok_or_else(|| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// Time elapsed from `earlier` to `self`; negative if `earlier` is later.
    pub fn since(self, earlier: Self) -> Duration {
        self.0 - earlier.0
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.to_string())
    }

    /// Chart label: `MM/DD HH:MM`, or `MM/DD` when `include_time` is false.
    pub fn format_label(self, include_time: bool) -> String {
        let format = if include_time {
            LABEL_DATE_TIME
        } else {
            LABEL_DATE
        };
        self.0
            .format(format)
            .unwrap_or_else(|_| self.format_rfc3339())
    }
}

impl Add<Duration> for UtcDateTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Timestamp as kept in a history window.
///
/// Points recorded by this process always carry a parsed instant. Points read
/// from disk whose text cannot be parsed keep that text verbatim so they are
/// written back unchanged and can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoredTimestamp {
    Utc(UtcDateTime),
    Unparsed(String),
}

impl StoredTimestamp {
    pub fn from_stored(text: &str) -> Self {
        match UtcDateTime::parse(text) {
            Ok(instant) => Self::Utc(instant),
            Err(_) => Self::Unparsed(text.to_owned()),
        }
    }

    pub fn instant(&self) -> Option<UtcDateTime> {
        match self {
            Self::Utc(instant) => Some(*instant),
            Self::Unparsed(_) => None,
        }
    }

    pub fn to_stored(&self) -> String {
        match self {
            Self::Utc(instant) => instant.format_rfc3339(),
            Self::Unparsed(raw) => raw.clone(),
        }
    }
}

impl From<UtcDateTime> for StoredTimestamp {
    fn from(value: UtcDateTime) -> Self {
        Self::Utc(value)
    }
}
