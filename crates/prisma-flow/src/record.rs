//! The input record: the thirteen counts a PRISMA flow diagram displays.
//!
//! [`InputRecord`] is the only inbound contract of the renderer. It holds
//! non-negative counts and carries no cross-field invariants: the diagram
//! shows the numbers as given, even when they do not add up.
//!
//! Hosts usually deserialize records with serde. Deserialization goes
//! through [`RawInputRecord`], which accepts any integer and reports missing
//! or negative values as an [`InputError`] instead of coercing them.
//!
//! # Example
//!
//! ```
//! # use prisma_flow::record::{Field, InputRecord};
//! let mut record = InputRecord::default();
//! record.set(Field::Databases, 200);
//! assert_eq!(record.get(Field::Databases), 200);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};

use crate::error::InputError;

/// Identifies one of the thirteen counts of an [`InputRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Databases,
    OtherSources,
    DuplicatesRemoved,
    RecordsScreened,
    RecordsExcluded,
    FullTextAssessed,
    FullTextExcludedTotal,
    ExclIrrelevant,
    ExclLowQuality,
    ExclDuplicates,
    ExclNotRelated,
    Qualitative,
    Quantitative,
}

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Field; 13] = [
        Self::Databases,
        Self::OtherSources,
        Self::DuplicatesRemoved,
        Self::RecordsScreened,
        Self::RecordsExcluded,
        Self::FullTextAssessed,
        Self::FullTextExcludedTotal,
        Self::ExclIrrelevant,
        Self::ExclLowQuality,
        Self::ExclDuplicates,
        Self::ExclNotRelated,
        Self::Qualitative,
        Self::Quantitative,
    ];

    /// Returns the serialized name of this field, as used in input files and
    /// label placeholders.
    pub fn name(self) -> &'static str {
        match self {
            Self::Databases => "databases",
            Self::OtherSources => "other_sources",
            Self::DuplicatesRemoved => "duplicates_removed",
            Self::RecordsScreened => "records_screened",
            Self::RecordsExcluded => "records_excluded",
            Self::FullTextAssessed => "full_text_assessed",
            Self::FullTextExcludedTotal => "full_text_excluded_total",
            Self::ExclIrrelevant => "excl_irrelevant",
            Self::ExclLowQuality => "excl_low_quality",
            Self::ExclDuplicates => "excl_duplicates",
            Self::ExclNotRelated => "excl_not_related",
            Self::Qualitative => "qualitative",
            Self::Quantitative => "quantitative",
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown field `{s}`"))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The validated counts of one systematic review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawInputRecord")]
pub struct InputRecord {
    pub databases: u64,
    pub other_sources: u64,
    pub duplicates_removed: u64,
    pub records_screened: u64,
    pub records_excluded: u64,
    pub full_text_assessed: u64,
    pub full_text_excluded_total: u64,
    pub excl_irrelevant: u64,
    pub excl_low_quality: u64,
    pub excl_duplicates: u64,
    pub excl_not_related: u64,
    pub qualitative: u64,
    pub quantitative: u64,
}

impl InputRecord {
    /// Returns the value of `field`.
    pub fn get(&self, field: Field) -> u64 {
        *self.slot(field)
    }

    /// Sets the value of `field`.
    pub fn set(&mut self, field: Field, value: u64) {
        *self.slot_mut(field) = value;
    }

    /// Returns a copy of this record with `field` replaced by `value`.
    pub fn with(mut self, field: Field, value: u64) -> Self {
        self.set(field, value);
        self
    }

    fn slot(&self, field: Field) -> &u64 {
        match field {
            Field::Databases => &self.databases,
            Field::OtherSources => &self.other_sources,
            Field::DuplicatesRemoved => &self.duplicates_removed,
            Field::RecordsScreened => &self.records_screened,
            Field::RecordsExcluded => &self.records_excluded,
            Field::FullTextAssessed => &self.full_text_assessed,
            Field::FullTextExcludedTotal => &self.full_text_excluded_total,
            Field::ExclIrrelevant => &self.excl_irrelevant,
            Field::ExclLowQuality => &self.excl_low_quality,
            Field::ExclDuplicates => &self.excl_duplicates,
            Field::ExclNotRelated => &self.excl_not_related,
            Field::Qualitative => &self.qualitative,
            Field::Quantitative => &self.quantitative,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut u64 {
        match field {
            Field::Databases => &mut self.databases,
            Field::OtherSources => &mut self.other_sources,
            Field::DuplicatesRemoved => &mut self.duplicates_removed,
            Field::RecordsScreened => &mut self.records_screened,
            Field::RecordsExcluded => &mut self.records_excluded,
            Field::FullTextAssessed => &mut self.full_text_assessed,
            Field::FullTextExcludedTotal => &mut self.full_text_excluded_total,
            Field::ExclIrrelevant => &mut self.excl_irrelevant,
            Field::ExclLowQuality => &mut self.excl_low_quality,
            Field::ExclDuplicates => &mut self.excl_duplicates,
            Field::ExclNotRelated => &mut self.excl_not_related,
            Field::Qualitative => &mut self.qualitative,
            Field::Quantitative => &mut self.quantitative,
        }
    }
}

/// An unvalidated record as it appears in an input file.
///
/// Every field is optional and signed so that a missing or negative count
/// can be reported by name rather than as a generic type mismatch. The
/// fields are wide enough to hold every `u64` count.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInputRecord {
    #[serde(default, deserialize_with = "count")]
    pub databases: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub other_sources: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub duplicates_removed: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub records_screened: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub records_excluded: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub full_text_assessed: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub full_text_excluded_total: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub excl_irrelevant: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub excl_low_quality: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub excl_duplicates: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub excl_not_related: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub qualitative: Option<i128>,
    #[serde(default, deserialize_with = "count")]
    pub quantitative: Option<i128>,
}

/// Any integer a self-describing format can carry, kept wide so that a
/// negative value and a `u64` above `i64::MAX` both survive parsing.
struct Count(i128);

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountVisitor;

        impl de::Visitor<'_> for CountVisitor {
            type Value = Count;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer count")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Count, E> {
                Ok(Count(v.into()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Count, E> {
                Ok(Count(v.into()))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<Count, E> {
                Ok(Count(v))
            }
        }

        deserializer.deserialize_any(CountVisitor)
    }
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i128>, D::Error> {
    Ok(Option::<Count>::deserialize(deserializer)?.map(|Count(value)| value))
}

fn require(field: Field, value: Option<i128>) -> Result<u64, InputError> {
    let value = value.ok_or(InputError::Missing(field))?;
    if value < 0 {
        return Err(InputError::Negative { field, value });
    }
    u64::try_from(value)
        .map_err(|_| InputError::Malformed(format!("field `{field}` is too large: {value}")))
}

impl TryFrom<RawInputRecord> for InputRecord {
    type Error = InputError;

    fn try_from(raw: RawInputRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            databases: require(Field::Databases, raw.databases)?,
            other_sources: require(Field::OtherSources, raw.other_sources)?,
            duplicates_removed: require(Field::DuplicatesRemoved, raw.duplicates_removed)?,
            records_screened: require(Field::RecordsScreened, raw.records_screened)?,
            records_excluded: require(Field::RecordsExcluded, raw.records_excluded)?,
            full_text_assessed: require(Field::FullTextAssessed, raw.full_text_assessed)?,
            full_text_excluded_total: require(
                Field::FullTextExcludedTotal,
                raw.full_text_excluded_total,
            )?,
            excl_irrelevant: require(Field::ExclIrrelevant, raw.excl_irrelevant)?,
            excl_low_quality: require(Field::ExclLowQuality, raw.excl_low_quality)?,
            excl_duplicates: require(Field::ExclDuplicates, raw.excl_duplicates)?,
            excl_not_related: require(Field::ExclNotRelated, raw.excl_not_related)?,
            qualitative: require(Field::Qualitative, raw.qualitative)?,
            quantitative: require(Field::Quantitative, raw.quantitative)?,
        })
    }
}
