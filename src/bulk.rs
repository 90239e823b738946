//! Bulk upsert client
//!
//! The server matches each profile to an existing record by email, then by
//! phone, updating partially on a match and creating otherwise. It answers
//! 201 when every profile was stored and 207 when some failed, with one error
//! map per failed profile.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BulkFileError;
use crate::types::{ErrorMap, ProfessionalDraft, Source};

/// One profile in a bulk request. Absent fields are left untouched on update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl From<ProfessionalDraft> for ProfilePatch {
    fn from(draft: ProfessionalDraft) -> Self {
        fn non_empty(s: String) -> Option<String> {
            (!s.is_empty()).then_some(s)
        }

        Self {
            full_name: non_empty(draft.full_name),
            email: non_empty(draft.email),
            phone: non_empty(draft.phone),
            job_title: non_empty(draft.job_title),
            company_name: non_empty(draft.company_name),
            source: Some(draft.source),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    /// Every profile stored (201)
    Complete,
    /// At least one profile rejected (207)
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkUpsertReport {
    pub success_count: u32,
    pub failure_count: u32,
    #[serde(default)]
    pub errors: Vec<ErrorMap>,
}

impl BulkUpsertReport {
    pub fn outcome(&self) -> BulkOutcome {
        if self.failure_count > 0 {
            BulkOutcome::Partial
        } else {
            BulkOutcome::Complete
        }
    }
}

/// Read profiles from a JSON file holding an array of profile objects
pub fn load_profiles(path: impl AsRef<Path>) -> Result<Vec<ProfilePatch>, BulkFileError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| BulkFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profiles(&raw).map_err(|e| match e {
        ParseFailure::NotAList => BulkFileError::NotAList,
        ParseFailure::Json(source) => BulkFileError::Json {
            path: path.to_path_buf(),
            source,
        },
    })
}

enum ParseFailure {
    NotAList,
    Json(serde_json::Error),
}

fn parse_profiles(raw: &str) -> Result<Vec<ProfilePatch>, ParseFailure> {
    let value: Value = serde_json::from_str(raw).map_err(ParseFailure::Json)?;
    if !value.is_array() {
        return Err(ParseFailure::NotAList);
    }
    serde_json::from_value(value).map_err(ParseFailure::Json)
}
