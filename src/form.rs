//! Record form controller
//!
//! Owns one draft through empty -> edited -> submitted -> (reset | errored).
//!
//! ## Submission
//!
//! 1. Clear errors
//! 2. Local validation gate (no request when it fails)
//! 3. Create request with the current draft
//! 4. Success: draft back to defaults, errors cleared, `Created` emitted
//! 5. Failure: classified into the error map, draft kept for correction
//! 6. `submitting` cleared last, whatever happened
//!
//! Presentation layers observe progress through [`FormEvent`]s from
//! [`FormController::subscribe`] rather than blocking dialogs.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{CreateAck, ProfessionalApi};
use crate::classify::{classify, FailureKind, Rejection};
use crate::types::{ErrorMap, Field, FieldUpdate, ProfessionalDraft, NON_FIELD_ERRORS};

pub const FULL_NAME_REQUIRED: &str = "Full name is required.";
pub const EMAIL_OR_PHONE_REQUIRED: &str = "Either Email or Phone is required.";
pub const CREATED_MESSAGE: &str = "Professional created successfully!";

/// Notifications emitted by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Local validation passed and the create request is in flight
    SubmitStarted,
    /// Server accepted the record
    Created { record_id: Option<i64> },
    /// Submission ended with errors now shown on the form
    Rejected { kind: FailureKind, errors: ErrorMap },
}

/// Result of one `submit` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(CreateAck),
    Rejected(Rejection),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Created(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

/// Local validation of a draft. Both failures may be reported at once.
pub fn validate_draft(draft: &ProfessionalDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if draft.full_name.is_empty() {
        errors.insert(Field::FullName.as_str(), FULL_NAME_REQUIRED);
    }
    if draft.email.is_empty() && draft.phone.is_empty() {
        errors.insert(NON_FIELD_ERRORS, EMAIL_OR_PHONE_REQUIRED);
    }
    errors
}

/// Clears the submitting flag on every exit path, including a dropped future
struct SubmittingGuard<'a>(&'a mut bool);

impl<'a> SubmittingGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct FormController<A> {
    api: A,
    draft: ProfessionalDraft,
    errors: ErrorMap,
    submitting: bool,
    events: Option<UnboundedSender<FormEvent>>,
}

impl<A: ProfessionalApi> FormController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            draft: ProfessionalDraft::default(),
            errors: ErrorMap::new(),
            submitting: false,
            events: None,
        }
    }

    /// Start receiving [`FormEvent`]s. A later call replaces the earlier receiver.
    pub fn subscribe(&mut self) -> UnboundedReceiver<FormEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    pub fn draft(&self) -> &ProfessionalDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// `submit` holds `&mut self` until it finishes, so callers only ever
    /// read `false` here. A front-end that shows progress while a request is
    /// in flight listens for [`FormEvent::SubmitStarted`] instead.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit affordance should be enabled. Same caveat as
    /// [`Self::is_submitting`].
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Assign one field. No validation runs here.
    pub fn set_field(&mut self, update: FieldUpdate) {
        self.draft.apply(update);
    }

    pub fn validate_local(&self) -> ErrorMap {
        validate_draft(&self.draft)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.errors = ErrorMap::new();

        let local = self.validate_local();
        if !local.is_empty() {
            debug!(fields = local.len(), "Draft failed local validation");
            self.errors = local.clone();
            let rejection = Rejection::local(local);
            emit(
                &self.events,
                FormEvent::Rejected {
                    kind: rejection.kind,
                    errors: rejection.errors.clone(),
                },
            );
            return SubmitOutcome::Rejected(rejection);
        }

        emit(&self.events, FormEvent::SubmitStarted);
        let outcome = {
            let _submitting = SubmittingGuard::engage(&mut self.submitting);
            match self.api.create(&self.draft).await {
                Ok(ack) => {
                    self.draft = ProfessionalDraft::default();
                    self.errors = ErrorMap::new();
                    SubmitOutcome::Created(ack)
                }
                Err(failure) => {
                    let rejection = classify(failure);
                    self.errors = rejection.errors.clone();
                    SubmitOutcome::Rejected(rejection)
                }
            }
        };

        match &outcome {
            SubmitOutcome::Created(ack) => {
                let record_id = ack.record.as_ref().map(|r| r.id);
                info!(?record_id, "{}", CREATED_MESSAGE);
                emit(&self.events, FormEvent::Created { record_id });
            }
            SubmitOutcome::Rejected(rejection) => {
                warn!(kind = %rejection.kind, "Submission rejected");
                emit(
                    &self.events,
                    FormEvent::Rejected {
                        kind: rejection.kind,
                        errors: rejection.errors.clone(),
                    },
                );
            }
        }

        outcome
    }
}

fn emit(events: &Option<UnboundedSender<FormEvent>>, event: FormEvent) {
    if let Some(tx) = events {
        // A dropped receiver just means nobody is listening
        let _ = tx.send(event);
    }
}
