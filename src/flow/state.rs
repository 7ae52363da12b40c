//! Observable state written by the sequencer during a run.

use std::collections::BTreeMap;

use super::step::Step;
use crate::api::FailureKind;

/// Most recent failed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowFailure {
    /// Step that was active when the work failed
    pub step: Step,
    pub kind: FailureKind,
    pub message: String,
}

/// Snapshot of the flow diagram state.
///
/// Owned by a [`FlowSequencer`](super::FlowSequencer); everyone else sees
/// clones published over a watch channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowState {
    /// Step currently highlighted; `None` while idle
    pub active: Option<Step>,
    /// Status text per visited step. Never reset between runs.
    pub status: BTreeMap<Step, String>,
    /// Call label shown while the request is in flight
    pub pending_call: Option<String>,
    /// Call label of the last run that completed
    pub last_call: Option<String>,
    /// Steps entered during the current (or most recent) run
    pub trail: Vec<Step>,
    pub running: bool,
    pub last_failure: Option<FlowFailure>,
}

impl FlowState {
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && !self.running
    }

    /// Status line for a step, falling back to its idle placeholder
    pub fn status_text(&self, step: Step) -> &str {
        self.status
            .get(&step)
            .map_or_else(|| step.idle_status(), String::as_str)
    }

    /// Label to show in the call panel: pending wins over last
    pub fn call_display(&self) -> Option<(&'static str, &str)> {
        if let Some(ref pending) = self.pending_call {
            Some(("API call in progress", pending.as_str()))
        } else {
            self.last_call
                .as_deref()
                .map(|last| ("Last API call", last))
        }
    }

    pub(super) fn begin_run(&mut self) {
        self.running = true;
        self.trail.clear();
        self.last_failure = None;
    }

    pub(super) fn enter(&mut self, step: Step) {
        self.active = Some(step);
        self.status.insert(step, step.description().to_string());
        self.trail.push(step);
    }

    pub(super) fn finish(&mut self, call_label: Option<String>) {
        if let Some(label) = call_label {
            self.last_call = Some(label);
            self.pending_call = None;
        }
        self.active = None;
        self.running = false;
    }

    pub(super) fn fail(&mut self, failure: FlowFailure) {
        self.status
            .insert(failure.step, format!("Failed: {}", failure.kind));
        self.pending_call = None;
        self.active = None;
        self.running = false;
        self.last_failure = Some(failure);
    }
}
