//! Session context: the active exercise, the advisor and the displayed
//! advisory text.
//!
//! All mutation goes through `&mut SessionContext`, so an exercise switch is a
//! single assignment that no reader can observe half-done. Advisory requests
//! run as spawned tasks and report back through a channel drained once per
//! frame.

use std::sync::Arc;

use repcoach_agents::{Admission, Advisor, Advisory, Clock, CoachBackend, UNCONFIGURED_MESSAGE};
use repcoach_core::{Detection, Error, Landmark, SessionId};
use repcoach_exercise::{Exercise, ExerciseKind, MetricsSnapshot, ShoulderProximity};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::CoachConfig;
use crate::presenter::FrameView;

/// Advisory text shown before any feedback arrives
pub const INITIAL_ADVISORY: &str = "Ready to start!";

const ADVISORY_QUEUE_SIZE: usize = 16;

/// Why a frame produced no metrics
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Detector found nobody in the frame
    NoPerson,
    /// A landmark the exercise needs was absent
    MissingLandmark(Landmark),
    /// The exercise rejected the joint set for another reason
    Rejected(String),
}

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Updated(MetricsSnapshot),
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, FrameOutcome::Updated(_))
    }

    pub fn metrics(&self) -> Option<&MetricsSnapshot> {
        match self {
            FrameOutcome::Updated(snapshot) => Some(snapshot),
            FrameOutcome::Skipped(_) => None,
        }
    }
}

struct Delivery {
    generation: u64,
    advisory: Advisory,
}

pub struct SessionContext {
    id: SessionId,
    config: CoachConfig,
    exercise: Exercise,
    backend: Arc<dyn CoachBackend>,
    clock: Arc<dyn Clock>,
    advisor: Arc<Advisor>,
    advisory: String,
    last_metrics: Option<MetricsSnapshot>,
    frames: u64,
    generation: u64,
    in_flight: usize,
    tx: mpsc::Sender<Delivery>,
    rx: mpsc::Receiver<Delivery>,
}

impl SessionContext {
    pub fn new(config: CoachConfig, backend: Arc<dyn CoachBackend>, clock: Arc<dyn Clock>) -> Self {
        let exercise = Exercise::with_config(config.exercise, config.side, &config.thresholds);
        let advisor = Arc::new(Advisor::new(config.advisor.clone(), backend.clone(), clock.clone()));
        let (tx, rx) = mpsc::channel(ADVISORY_QUEUE_SIZE);

        Self {
            id: SessionId::new(),
            config,
            exercise,
            backend,
            clock,
            advisor,
            advisory: INITIAL_ADVISORY.to_string(),
            last_metrics: None,
            frames: 0,
            generation: 0,
            in_flight: 0,
            tx,
            rx,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    pub fn advisor(&self) -> &Advisor {
        &self.advisor
    }

    /// Text currently displayed in the coach panel
    pub fn advisory(&self) -> &str {
        &self.advisory
    }

    /// Metrics of the most recent frame that produced any
    pub fn last_metrics(&self) -> Option<&MetricsSnapshot> {
        self.last_metrics.as_ref()
    }

    /// Frames seen, skipped ones included
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advisory requests spawned but not yet delivered
    pub fn pending_advisories(&self) -> usize {
        self.in_flight
    }

    /// Switch exercise. Selecting the active kind again keeps its progress.
    pub fn select_exercise(&mut self, kind: ExerciseKind) {
        if self.exercise.kind() == kind {
            return;
        }

        info!(from = %self.exercise.kind(), to = %kind, "exercise switched");
        self.exercise = Exercise::with_config(kind, self.config.side, &self.config.thresholds);
        self.config.exercise = kind;
        self.last_metrics = None;
    }

    /// Zero the active exercise in place
    pub fn reset_exercise(&mut self) {
        info!(exercise = %self.exercise.kind(), reps = self.exercise.reps(), "exercise reset");
        self.exercise.reset();
        self.last_metrics = None;
    }

    /// Replace the advisor credential. A changed credential starts a fresh
    /// advisor; replies still in flight for the old one are dropped.
    pub fn configure_credential(&mut self, api_key: Option<String>) {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.as_deref().map(str::trim) == self.config.advisor.credential() {
            return;
        }

        self.config.advisor.api_key = api_key;
        self.advisor = Arc::new(Advisor::new(
            self.config.advisor.clone(),
            self.backend.clone(),
            self.clock.clone(),
        ));
        self.generation += 1;
        self.in_flight = 0;
        info!(configured = self.advisor.is_configured(), "advisor credential updated");
    }

    /// Run one detection through the active exercise
    pub fn process(&mut self, detection: &Detection) -> FrameOutcome {
        self.frames += 1;

        let Some(joints) = detection.joints() else {
            debug!(frame = self.frames, "no person detected");
            return FrameOutcome::Skipped(SkipReason::NoPerson);
        };

        let reps_before = self.exercise.reps();
        match self.exercise.process(joints) {
            Ok(_) => {
                let snapshot = self.exercise.snapshot();
                if snapshot.reps > reps_before {
                    info!(exercise = %snapshot.exercise, reps = snapshot.reps, "rep completed");
                }
                self.last_metrics = Some(snapshot.clone());
                FrameOutcome::Updated(snapshot)
            }
            Err(Error::MissingLandmark(landmark)) => {
                debug!(frame = self.frames, %landmark, "landmark missing, frame skipped");
                FrameOutcome::Skipped(SkipReason::MissingLandmark(landmark))
            }
            Err(e) => {
                warn!(frame = self.frames, "frame rejected: {}", e);
                FrameOutcome::Skipped(SkipReason::Rejected(e.to_string()))
            }
        }
    }

    /// Ask the advisor for feedback on `snapshot` without waiting for it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch_advisory(&mut self, snapshot: &MetricsSnapshot) {
        match self.advisor.admit(snapshot) {
            Admission::Unconfigured => {
                self.advisory = UNCONFIGURED_MESSAGE.to_string();
            }
            Admission::CoolingDown => {}
            Admission::Accepted(request) => {
                let advisor = self.advisor.clone();
                let tx = self.tx.clone();
                let generation = self.generation;
                self.in_flight += 1;

                tokio::spawn(async move {
                    let advisory = advisor.complete(&request).await;
                    if tx.send(Delivery { generation, advisory }).await.is_err() {
                        debug!("session closed before advisory delivery");
                    }
                });
            }
        }
    }

    /// Apply every advisory that has arrived since the last call
    pub fn drain_advisories(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            if self.apply(delivery) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for every in-flight advisory and apply it
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(delivery) => {
                    self.apply(delivery);
                }
                None => break,
            }
        }
    }

    /// Render-ready view of the session after `outcome`
    pub fn view<'a>(&'a self, outcome: &'a FrameOutcome) -> FrameView<'a> {
        FrameView {
            frame: self.frames,
            exercise: self.exercise.kind(),
            outcome,
            metrics: self.last_metrics.as_ref(),
            advisory: &self.advisory,
            proximity: self.neck_proximity(),
        }
    }

    fn neck_proximity(&self) -> Option<ShoulderProximity> {
        self.exercise.neck_proximity()
    }

    fn apply(&mut self, delivery: Delivery) -> bool {
        if delivery.generation != self.generation {
            debug!("stale advisory dropped");
            return false;
        }
        self.in_flight = self.in_flight.saturating_sub(1);

        match delivery.advisory {
            Advisory::Update(text) => {
                self.advisory = text;
                true
            }
            Advisory::NoUpdate => false,
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("id", &self.id)
            .field("exercise", &self.exercise.kind())
            .field("reps", &self.exercise.reps())
            .field("frames", &self.frames)
            .field("advisory", &self.advisory)
            .finish()
    }
}
