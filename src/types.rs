//! Professional record types
//!
//! The draft edited by the form, the persisted record returned by the list
//! endpoint, and the field-keyed error map shared by local validation and
//! server responses. Field names and enum literals match the REST payloads.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Error map key for errors not attributable to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

// =============================================================================
// SOURCE
// =============================================================================

/// How a professional entered the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Direct,
    Partner,
    Internal,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Direct, Source::Partner, Source::Internal];

    /// Wire literal
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Partner => "partner",
            Self::Internal => "internal",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Partner => "Partner",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "partner" => Ok(Self::Partner),
            "internal" => Ok(Self::Internal),
            _ => Err(ParseError::UnknownSource(s.to_string())),
        }
    }
}

/// List filter: every record, or only those from one source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Only(Source),
}

impl SourceFilter {
    /// Value for the `source` query parameter, `None` when unfiltered
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Only(source) => Some(source.as_str()),
        }
    }
}

impl From<Option<Source>> for SourceFilter {
    fn from(source: Option<Source>) -> Self {
        source.map_or(Self::All, Self::Only)
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(source) => source.fmt(f),
        }
    }
}

impl FromStr for SourceFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Self::All),
            t if t.eq_ignore_ascii_case("all") => Ok(Self::All),
            t => t.parse().map(Self::Only),
        }
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// Editable fields of a professional, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FullName,
    Email,
    Phone,
    JobTitle,
    CompanyName,
    Source,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FullName,
        Field::Email,
        Field::Phone,
        Field::JobTitle,
        Field::CompanyName,
        Field::Source,
    ];

    /// Payload key, also the error map key
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::JobTitle => "job_title",
            Self::CompanyName => "company_name",
            Self::Source => "source",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::JobTitle => "Job Title",
            Self::CompanyName => "Company Name",
            Self::Source => "Source",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseError::UnknownField(s.to_string()))
    }
}

/// A single assignment into the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FullName(String),
    Email(String),
    Phone(String),
    JobTitle(String),
    CompanyName(String),
    Source(Source),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            Self::FullName(_) => Field::FullName,
            Self::Email(_) => Field::Email,
            Self::Phone(_) => Field::Phone,
            Self::JobTitle(_) => Field::JobTitle,
            Self::CompanyName(_) => Field::CompanyName,
            Self::Source(_) => Field::Source,
        }
    }
}

// =============================================================================
// DRAFT AND PERSISTED RECORDS
// =============================================================================

/// In-progress record held by the form before submission.
///
/// Optional fields use the empty string for "absent", which is also what the
/// create endpoint receives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfessionalDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub company_name: String,
    pub source: Source,
}

impl ProfessionalDraft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FullName(v) => self.full_name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Phone(v) => self.phone = v,
            FieldUpdate::JobTitle(v) => self.job_title = v,
            FieldUpdate::CompanyName(v) => self.company_name = v,
            FieldUpdate::Source(v) => self.source = v,
        }
    }

    /// Current value of a field as text
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::JobTitle => &self.job_title,
            Field::CompanyName => &self.company_name,
            Field::Source => self.source.as_str(),
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Record accepted and stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Professional {
    pub fn row(&self) -> ProfessionalRow<'_> {
        ProfessionalRow {
            id: self.id,
            full_name: &self.full_name,
            email: self.email.as_deref().unwrap_or_default(),
            phone: &self.phone,
            company_name: &self.company_name,
            job_title: &self.job_title,
            source: self.source,
        }
    }
}

/// One table row of the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfessionalRow<'a> {
    pub id: i64,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub company_name: &'a str,
    pub job_title: &'a str,
    pub source: Source,
}

impl<'a> ProfessionalRow<'a> {
    pub const COLUMNS: [&'static str; 6] = [
        "Full Name",
        "Email",
        "Phone",
        "Company",
        "Job Title",
        "Source",
    ];

    /// Cell values in [`Self::COLUMNS`] order
    pub fn cells(&self) -> [&'a str; 6] {
        [
            self.full_name,
            self.email,
            self.phone,
            self.company_name,
            self.job_title,
            self.source.as_str(),
        ]
    }
}

// =============================================================================
// ERROR MAP
// =============================================================================

/// One message or a list of messages, as the server sends either
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessages {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessages {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(msg) => std::slice::from_ref(msg),
            Self::Many(msgs) => msgs,
        };
        slice.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.iter().next()
    }
}

impl From<&str> for ErrorMessages {
    fn from(msg: &str) -> Self {
        Self::One(msg.to_string())
    }
}

impl From<String> for ErrorMessages {
    fn from(msg: String) -> Self {
        Self::One(msg)
    }
}

impl From<Vec<String>> for ErrorMessages {
    fn from(msgs: Vec<String>) -> Self {
        Self::Many(msgs)
    }
}

/// Field name (or [`NON_FIELD_ERRORS`]) to human-readable messages.
///
/// Server bodies deserialize into this unchanged, so a structured 400 response
/// round-trips key for key and shape for shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, ErrorMessages>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding a single form-level message
    pub fn non_field(message: impl Into<ErrorMessages>) -> Self {
        let mut map = Self::new();
        map.insert(NON_FIELD_ERRORS, message);
        map
    }

    pub fn insert(&mut self, key: impl Into<String>, messages: impl Into<ErrorMessages>) {
        self.0.insert(key.into(), messages.into());
    }

    pub fn get(&self, key: &str) -> Option<&ErrorMessages> {
        self.0.get(key)
    }

    pub fn field(&self, field: Field) -> Option<&ErrorMessages> {
        self.get(field.as_str())
    }

    pub fn non_field_errors(&self) -> Option<&ErrorMessages> {
        self.get(NON_FIELD_ERRORS)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorMessages)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys that are neither a form field nor the non-field sentinel
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| *k != NON_FIELD_ERRORS && k.parse::<Field>().is_err())
    }
}

impl From<BTreeMap<String, ErrorMessages>> for ErrorMap {
    fn from(map: BTreeMap<String, ErrorMessages>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<ErrorMessages>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
