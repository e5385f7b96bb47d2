//! The nine fixed nodes of a PRISMA flow diagram and their label templates.

use std::fmt;

use serde::Deserialize;

use crate::record::{Field, InputRecord};

/// Identifies one of the nine boxes of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    Db,
    Other,
    Merged,
    Screened,
    Excluded,
    Fulltext,
    ExcludedFt,
    Qualitative,
    Quantitative,
}

impl NodeId {
    /// All nodes in drawing order.
    pub const ALL: [NodeId; 9] = [
        Self::Db,
        Self::Other,
        Self::Merged,
        Self::Screened,
        Self::Excluded,
        Self::Fulltext,
        Self::ExcludedFt,
        Self::Qualitative,
        Self::Quantitative,
    ];

    /// Returns the identifier used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Db => "db",
            Self::Other => "other",
            Self::Merged => "merged",
            Self::Screened => "screened",
            Self::Excluded => "excluded",
            Self::Fulltext => "fulltext",
            Self::ExcludedFt => "excluded_ft",
            Self::Qualitative => "qualitative",
            Self::Quantitative => "quantitative",
        }
    }

    /// Returns the built-in label template of this node.
    ///
    /// Templates reference [`InputRecord`] fields as `{field_name}`; a `\n`
    /// forces a line break.
    pub fn default_template(self) -> &'static str {
        match self {
            Self::Db => "Records identified from databases (n = {databases})",
            Self::Other => "Records from other sources (n = {other_sources})",
            Self::Merged => "Duplicate records removed (n = {duplicates_removed})",
            Self::Screened => "Records screened (n = {records_screened})",
            Self::Excluded => "Records excluded (n = {records_excluded})",
            Self::Fulltext => "Full-text articles assessed (n = {full_text_assessed})",
            Self::ExcludedFt => concat!(
                "Full-text articles excluded (n = {full_text_excluded_total}):\n",
                "Irrelevant outcome (n = {excl_irrelevant})\n",
                "Low quality (n = {excl_low_quality})\n",
                "Duplicates (n = {excl_duplicates})\n",
                "Not related (n = {excl_not_related})",
            ),
            Self::Qualitative => "Studies included in qualitative synthesis (n = {qualitative})",
            Self::Quantitative => {
                "Studies included in quantitative synthesis (n = {quantitative})"
            }
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The review phase a node belongs to, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Identification,
    Screening,
    Eligibility,
    Inclusion,
}

impl Phase {
    /// All phases in band order.
    pub const ALL: [Phase; 4] = [
        Self::Identification,
        Self::Screening,
        Self::Eligibility,
        Self::Inclusion,
    ];

    /// Returns the label drawn next to the phase band.
    pub fn label(self) -> &'static str {
        match self {
            Self::Identification => "Identification",
            Self::Screening => "Screening",
            Self::Eligibility => "Eligibility",
            Self::Inclusion => "Included",
        }
    }
}

/// Substitutes `{field}` placeholders in `template` with counts from `record`.
///
/// Placeholders that do not name an [`InputRecord`] field, and unbalanced
/// braces, are copied through verbatim.
///
/// # Examples
///
/// ```
/// # use prisma_flow::node::render_template;
/// # use prisma_flow::record::InputRecord;
/// let record = InputRecord { records_screened: 180, ..Default::default() };
/// assert_eq!(
///     render_template("Records screened (n = {records_screened})", &record),
///     "Records screened (n = 180)"
/// );
/// assert_eq!(render_template("{unknown} {", &record), "{unknown} {");
/// ```
pub fn render_template(template: &str, record: &InputRecord) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            rendered.push_str(&rest[open..]);
            return rendered;
        };

        let name = &after_open[..close];
        match name.parse::<Field>() {
            Ok(field) => rendered.push_str(&record.get(field).to_string()),
            Err(_) => {
                rendered.push('{');
                rendered.push_str(name);
                rendered.push('}');
            }
        }
        rest = &after_open[close + 1..];
    }

    rendered.push_str(rest);
    rendered
}
