//! Shared test doubles for the professionals client
//!
//! `ScriptedApi` answers from queues filled by each test and records every
//! call so tests can assert on what would have gone over the wire.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use professional_desk::{
    ApiError, BulkUpsertReport, CreateAck, CreateFailure, Professional, ProfessionalApi,
    ProfessionalDraft, ProfilePatch, Source, SourceFilter,
};

#[derive(Default)]
pub struct ScriptedApi {
    create_results: Mutex<VecDeque<Result<CreateAck, CreateFailure>>>,
    list_results: Mutex<VecDeque<Result<Vec<Professional>, ApiError>>>,
    hang_on_create: bool,
    created: Mutex<Vec<ProfessionalDraft>>,
    list_queries: Mutex<Vec<SourceFilter>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create requests never complete
    pub fn hanging() -> Self {
        Self {
            hang_on_create: true,
            ..Self::default()
        }
    }

    pub fn push_create(&self, result: Result<CreateAck, CreateFailure>) {
        self.create_results.lock().unwrap().push_back(result);
    }

    pub fn push_list(&self, result: Result<Vec<Professional>, ApiError>) {
        self.list_results.lock().unwrap().push_back(result);
    }

    pub fn created(&self) -> Vec<ProfessionalDraft> {
        self.created.lock().unwrap().clone()
    }

    pub fn list_queries(&self) -> Vec<SourceFilter> {
        self.list_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfessionalApi for ScriptedApi {
    async fn create(&self, draft: &ProfessionalDraft) -> Result<CreateAck, CreateFailure> {
        self.created.lock().unwrap().push(draft.clone());
        if self.hang_on_create {
            std::future::pending::<()>().await;
        }
        let next = self.create_results.lock().unwrap().pop_front();
        next.unwrap_or(Ok(CreateAck {
            status: 201,
            record: None,
        }))
    }

    async fn list(&self, filter: SourceFilter) -> Result<Vec<Professional>, ApiError> {
        self.list_queries.lock().unwrap().push(filter);
        let next = self.list_results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn bulk_upsert(&self, profiles: &[ProfilePatch]) -> Result<BulkUpsertReport, ApiError> {
        Ok(BulkUpsertReport {
            success_count: profiles.len() as u32,
            failure_count: 0,
            errors: Vec::new(),
        })
    }
}

pub fn professional(id: i64, full_name: &str, source: Source) -> Professional {
    Professional {
        id,
        full_name: full_name.to_string(),
        email: Some(format!("{}@example.com", full_name.to_lowercase().replace(' ', "."))),
        phone: format!("555000{:04}", id),
        job_title: String::new(),
        company_name: "Example Corp".to_string(),
        source,
        created_at: None,
    }
}

pub fn valid_draft() -> ProfessionalDraft {
    ProfessionalDraft {
        full_name: "John Doe".into(),
        email: "john.doe@example.com".into(),
        ..Default::default()
    }
}
