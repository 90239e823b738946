//! Record list view
//!
//! Holds the current source filter and the rows last returned by the list
//! endpoint. Filtering happens on the server; the view never filters, sorts or
//! pages locally.
//!
//! Every query is issued under a [`ListTicket`] carrying a sequence number.
//! Only the response for the most recently issued ticket is applied, so a
//! slow response for an old filter cannot overwrite rows for a newer one.

use tracing::{debug, error};

use crate::api::ProfessionalApi;
use crate::error::ApiError;
use crate::types::{Professional, ProfessionalRow, SourceFilter};

/// Handle for one issued list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket {
    seq: u64,
    filter: SourceFilter,
}

impl ListTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn filter(&self) -> SourceFilter {
        self.filter
    }
}

/// What happened to a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Rows replaced with the response
    Applied { rows: usize },
    /// A newer query was issued since; response dropped
    Stale,
    /// Query failed; previous rows kept
    Failed,
    /// Filter did not change, nothing issued
    Unchanged,
}

pub struct ListView<A> {
    api: A,
    filter: SourceFilter,
    records: Vec<Professional>,
    issued: u64,
    last_error: Option<String>,
}

impl<A: ProfessionalApi> ListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            filter: SourceFilter::All,
            records: Vec::new(),
            issued: 0,
            last_error: None,
        }
    }

    pub fn filter(&self) -> SourceFilter {
        self.filter
    }

    pub fn records(&self) -> &[Professional] {
        &self.records
    }

    /// Table rows in server order. Call again to restart.
    pub fn rows(&self) -> impl Iterator<Item = ProfessionalRow<'_>> + '_ {
        self.records.iter().map(Professional::row)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Issue a ticket for the current filter, superseding earlier tickets
    pub fn begin_query(&mut self) -> ListTicket {
        self.issued += 1;
        ListTicket {
            seq: self.issued,
            filter: self.filter,
        }
    }

    /// Change the filter. Returns a ticket to query with when it changed.
    pub fn set_filter(&mut self, filter: SourceFilter) -> Option<ListTicket> {
        if filter == self.filter {
            return None;
        }
        debug!(from = %self.filter, to = %filter, "List filter changed");
        self.filter = filter;
        Some(self.begin_query())
    }

    /// Apply the response for a ticket
    pub fn apply(
        &mut self,
        ticket: ListTicket,
        result: Result<Vec<Professional>, ApiError>,
    ) -> ApplyOutcome {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                "Dropping stale list response"
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let rows = records.len();
                self.records = records;
                self.last_error = None;
                ApplyOutcome::Applied { rows }
            }
            Err(e) => {
                error!("There was an error fetching the professionals: {}", e);
                self.last_error = Some(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Query with the current filter and apply the response
    pub async fn refresh(&mut self) -> ApplyOutcome {
        let ticket = self.begin_query();
        let result = self.api.list(ticket.filter).await;
        self.apply(ticket, result)
    }

    /// Show `filter`, querying exactly once whether or not it changed
    pub async fn load(&mut self, filter: SourceFilter) -> ApplyOutcome {
        let ticket = match self.set_filter(filter) {
            Some(ticket) => ticket,
            None => self.begin_query(),
        };
        let result = self.api.list(ticket.filter).await;
        self.apply(ticket, result)
    }

    /// Change the filter and re-query when it changed
    pub async fn change_filter(&mut self, filter: SourceFilter) -> ApplyOutcome {
        match self.set_filter(filter) {
            Some(ticket) => {
                let result = self.api.list(ticket.filter).await;
                self.apply(ticket, result)
            }
            None => ApplyOutcome::Unchanged,
        }
    }
}
