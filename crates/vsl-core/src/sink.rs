use std::sync::Mutex;

use chrono::Utc;
use vsl_domain::{Lead, LeadInput};

use crate::error::SinkError;

/// Destination for captured leads.
///
/// A successful return means the lead is stored and the gate may open. Any
/// error keeps the form open so the visitor can retry; implementations should
/// tolerate the same input being submitted more than once.
pub trait LeadSink {
    fn submit_lead(&self, input: &LeadInput) -> Result<Lead, SinkError>;
}

impl<T: LeadSink + ?Sized> LeadSink for &T {
    fn submit_lead(&self, input: &LeadInput) -> Result<Lead, SinkError> {
        (**self).submit_lead(input)
    }
}

impl<T: LeadSink + ?Sized> LeadSink for Box<T> {
    fn submit_lead(&self, input: &LeadInput) -> Result<Lead, SinkError> {
        (**self).submit_lead(input)
    }
}

/// In-process sink, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryLeadSink {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    leads: Vec<Lead>,
    failures_left: usize,
}

impl MemoryLeadSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` submissions fail with [`SinkError::Unavailable`].
    pub fn fail_next(&self, count: usize) {
        if let Ok(mut state) = self.state.lock() {
            state.failures_left = count;
        }
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.state
            .lock()
            .map(|state| state.leads.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|state| state.leads.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LeadSink for MemoryLeadSink {
    fn submit_lead(&self, input: &LeadInput) -> Result<Lead, SinkError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink poisoned".into()))?;
        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err(SinkError::Unavailable("simulated outage".into()));
        }
        let lead = Lead::new(input.clone(), Utc::now());
        state.leads.push(lead.clone());
        tracing::info!(lead_id = %lead.id, "lead captured in memory");
        Ok(lead)
    }
}
