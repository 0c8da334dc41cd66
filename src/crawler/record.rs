//! Detail page field extraction
//!
//! Each detail page yields one [`Record`] with a fixed set of fields.
//! Extraction is driven by a declarative table: one CSS selector and one
//! capture mode per field. Fields are independent: a rule that matches
//! nothing produces [`FieldValue::Missing`] and never disturbs the other
//! fields. The "Null" sentinel exists only at the serialization
//! boundary; inside the crate a missing value is a variant, not a magic
//! string.

use scraper::{Html, Selector};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Sentinel emitted for missing fields when a record is serialized
pub const SENTINEL: &str = "Null";

/// The fixed field set of a record
///
/// Declaration order is the canonical serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PubmedId,
    Title,
    CitationYear,
    Authors,
    Journal,
    Abstract,
}

impl Field {
    /// All fields, in canonical order
    pub const ALL: [Field; 6] = [
        Field::PubmedId,
        Field::Title,
        Field::CitationYear,
        Field::Authors,
        Field::Journal,
        Field::Abstract,
    ];

    /// The field's external name, as used in serialized records
    pub fn as_str(self) -> &'static str {
        match self {
            Field::PubmedId => "PubMed_ID",
            Field::Title => "Title",
            Field::CitationYear => "Citation_Year",
            Field::Authors => "Authors",
            Field::Journal => "Journal",
            Field::Abstract => "Abstract",
        }
    }
}

/// An extracted field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text extracted from the page (may be empty if the page carried
    /// only whitespace where a value was expected)
    Text(String),

    /// The field's rule matched nothing on this page
    Missing,
}

impl FieldValue {
    /// The value as presented to callers: extracted text, or the
    /// sentinel for a missing field
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Missing => SENTINEL,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One extracted bibliographic record
///
/// Always carries exactly the full field set; callers distinguish
/// missing data by value, never by key absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<Field, FieldValue>,
}

impl Record {
    /// Returns the value of a field
    pub fn get(&self, field: Field) -> &FieldValue {
        // Construction always populates the full field set
        &self.fields[&field]
    }

    /// Iterates fields and values in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

/// How a rule turns selector matches into a field value
#[derive(Debug, Clone, Copy)]
pub enum Capture {
    /// First text fragment across all matches, trimmed
    FirstText,

    /// All text fragments across all matches, each trimmed, empties
    /// dropped, joined with single spaces
    JoinedText,

    /// The named attribute of the first match carrying it, trimmed
    Attr(&'static str),
}

/// One extraction rule: field, structural query, capture mode
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub selector: &'static str,
    pub capture: Capture,
}

/// The extraction table, one rule per field
///
/// The Citation_Year selector accepts both markup shapes the site has
/// used for the year (`span` and `time`).
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::PubmedId,
        selector: "strong.current-id",
        capture: Capture::FirstText,
    },
    FieldRule {
        field: Field::Title,
        selector: "h1.heading-title",
        capture: Capture::JoinedText,
    },
    FieldRule {
        field: Field::CitationYear,
        selector: "span.citation-year, time.citation-year",
        capture: Capture::FirstText,
    },
    FieldRule {
        field: Field::Authors,
        selector: "a.full-name",
        capture: Capture::Attr("data-ga-label"),
    },
    FieldRule {
        field: Field::Journal,
        selector: "button#full-view-journal-trigger",
        capture: Capture::FirstText,
    },
    FieldRule {
        field: Field::Abstract,
        selector: "div.abstract",
        capture: Capture::JoinedText,
    },
];

/// Parses a detail page body into a record
///
/// Never fails: every rule either captures text or degrades to
/// [`FieldValue::Missing`]. A record-level error can only come from the
/// fetch, which happens in the coordinator.
pub fn parse_record(html: &str) -> Record {
    let document = Html::parse_document(html);

    let mut fields = BTreeMap::new();
    for rule in FIELD_RULES {
        fields.insert(rule.field, apply_rule(&document, rule));
    }

    Record { fields }
}

fn apply_rule(document: &Html, rule: &FieldRule) -> FieldValue {
    let selector = match Selector::parse(rule.selector) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::debug!(
                "selector {:?} for {} failed to compile: {}",
                rule.selector,
                rule.field.as_str(),
                e
            );
            return FieldValue::Missing;
        }
    };

    match rule.capture {
        Capture::FirstText => document
            .select(&selector)
            .flat_map(|element| element.text())
            .next()
            .map(|fragment| FieldValue::Text(fragment.trim().to_string()))
            .unwrap_or(FieldValue::Missing),

        Capture::JoinedText => {
            let mut matched_any = false;
            let mut parts: Vec<&str> = Vec::new();
            for element in document.select(&selector) {
                for fragment in element.text() {
                    matched_any = true;
                    let trimmed = fragment.trim();
                    if !trimmed.is_empty() {
                        parts.push(trimmed);
                    }
                }
            }
            if matched_any {
                FieldValue::Text(parts.join(" "))
            } else {
                FieldValue::Missing
            }
        }

        Capture::Attr(name) => document
            .select(&selector)
            .find_map(|element| element.value().attr(name))
            .map(|value| FieldValue::Text(value.trim().to_string()))
            .unwrap_or(FieldValue::Missing),
    }
}
