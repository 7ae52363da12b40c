//! Runs one unit of work inside a paced walk over the flow steps.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use super::state::{FlowFailure, FlowState};
use super::step::Step;
use crate::api::ApiError;
use crate::config::FlowConfig;

/// Per-step pacing of a flow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPacing {
    /// When false every step is entered without waiting
    pub animate: bool,
    pub step_delay: Duration,
}

impl FlowPacing {
    pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(400);

    pub fn instant() -> Self {
        Self {
            animate: false,
            step_delay: Self::DEFAULT_STEP_DELAY,
        }
    }

    /// Wait applied after entering each step
    pub fn delay(&self) -> Duration {
        if self.animate {
            self.step_delay
        } else {
            Duration::ZERO
        }
    }
}

impl Default for FlowPacing {
    fn default() -> Self {
        Self {
            animate: true,
            step_delay: Self::DEFAULT_STEP_DELAY,
        }
    }
}

impl From<&FlowConfig> for FlowPacing {
    fn from(config: &FlowConfig) -> Self {
        Self {
            animate: config.animate,
            step_delay: Duration::from_millis(config.step_delay_ms),
        }
    }
}

/// A flow run whose work failed
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("{step} step failed: {source}")]
    Work {
        step: Step,
        #[source]
        source: ApiError,
    },
}

impl FlowError {
    pub fn step(&self) -> Step {
        match self {
            FlowError::Work { step, .. } => *step,
        }
    }

    pub fn api_error(&self) -> &ApiError {
        match self {
            FlowError::Work { source, .. } => source,
        }
    }
}

/// Walks the fixed step list around one unit of async work.
///
/// `run` takes `&mut self`, so one instance never has two runs in flight.
/// Observers follow along through [`FlowSequencer::subscribe`].
#[derive(Debug)]
pub struct FlowSequencer {
    pacing: FlowPacing,
    state: watch::Sender<FlowState>,
}

impl FlowSequencer {
    pub fn new(pacing: FlowPacing) -> Self {
        let (state, _) = watch::channel(FlowState::default());
        Self { pacing, state }
    }

    /// Receive a fresh snapshot after every transition
    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.state.subscribe()
    }

    /// Current state
    pub fn snapshot(&self) -> FlowState {
        self.state.borrow().clone()
    }

    pub fn pacing(&self) -> FlowPacing {
        self.pacing
    }

    /// Enable or disable the per-step delay for subsequent runs
    pub fn set_animation(&mut self, animate: bool) {
        self.pacing.animate = animate;
        tracing::debug!(animate, "Flow animation toggled");
    }

    /// Run `work` between the steps up to `midpoint` and the steps after it.
    ///
    /// `call_label` is published as the pending call when the request step
    /// is entered and becomes the last call once every step has been
    /// visited. On failure the midpoint is marked failed, the pending label
    /// is dropped and the state returns to idle.
    pub async fn run<T, F, Fut>(
        &mut self,
        midpoint: Step,
        call_label: Option<String>,
        work: F,
    ) -> Result<T, FlowError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        tracing::info!(%midpoint, call = call_label.as_deref().unwrap_or(""), "Flow run starting");
        self.state.send_modify(FlowState::begin_run);

        for &step in midpoint.through() {
            let pending = call_label.as_ref().filter(|_| step.is_request());
            self.state.send_modify(|state| {
                state.enter(step);
                if let Some(label) = pending {
                    state.pending_call = Some(label.clone());
                }
            });
            self.pause(step).await;
        }

        let output = match work().await {
            Ok(output) => output,
            Err(source) => {
                tracing::warn!(step = %midpoint, kind = %source.kind(), error = %source, "Flow work failed");
                let failure = FlowFailure {
                    step: midpoint,
                    kind: source.kind(),
                    message: source.to_string(),
                };
                self.state.send_modify(|state| state.fail(failure));
                return Err(FlowError::Work {
                    step: midpoint,
                    source,
                });
            }
        };

        for &step in midpoint.after() {
            self.state.send_modify(|state| state.enter(step));
            self.pause(step).await;
        }

        self.state.send_modify(|state| state.finish(call_label));
        tracing::info!("Flow run finished");
        Ok(output)
    }

    async fn pause(&self, step: Step) {
        tracing::info!(%step, status = step.description(), "Flow step");
        let delay = self.pacing.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for FlowSequencer {
    fn default() -> Self {
        Self::new(FlowPacing::default())
    }
}
