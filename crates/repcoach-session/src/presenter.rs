//! Presentation of per-frame session state.

use repcoach_exercise::{ExerciseKind, MetricsSnapshot, ShoulderProximity};
use tracing::{debug, info};

use crate::session::{FrameOutcome, SkipReason};

/// Shown when the latest metrics carry no form warning
pub const FORM_OK: &str = "Form looks good!";

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub frame: u64,
    pub exercise: ExerciseKind,
    pub outcome: &'a FrameOutcome,
    /// Latest metrics; survives skipped frames
    pub metrics: Option<&'a MetricsSnapshot>,
    pub advisory: &'a str,
    pub proximity: Option<ShoulderProximity>,
}

impl FrameView<'_> {
    pub fn reps(&self) -> u32 {
        self.metrics.map(|m| m.reps).unwrap_or(0)
    }

    /// First form warning, or the all-clear message
    pub fn form_status(&self) -> &str {
        self.metrics
            .and_then(MetricsSnapshot::primary_warning)
            .unwrap_or(FORM_OK)
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self.outcome {
            FrameOutcome::Skipped(reason) => Some(reason),
            FrameOutcome::Updated(_) => None,
        }
    }
}

pub trait Presenter: Send {
    fn present(&mut self, view: &FrameView<'_>);
}

/// Presenter writing to `tracing`. Per-frame detail goes to `debug`; rep
/// count, form status and coach text changes go to `info`.
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_reps: Option<u32>,
    last_form: Option<String>,
    last_advisory: Option<String>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, view: &FrameView<'_>) {
        match view.outcome {
            FrameOutcome::Updated(snapshot) => {
                debug!(
                    frame = view.frame,
                    reps = snapshot.reps,
                    stage = snapshot.stage_label(),
                    angles = %snapshot.angle_summary(),
                    "frame"
                );
            }
            FrameOutcome::Skipped(reason) => {
                debug!(frame = view.frame, ?reason, "frame skipped");
            }
        }

        if let Some(proximity) = view.proximity.and_then(|p| p.near) {
            debug!(frame = view.frame, side = ?proximity, "nose near shoulder");
        }

        let reps = view.reps();
        if self.last_reps != Some(reps) {
            info!(exercise = %view.exercise, reps, "reps");
            self.last_reps = Some(reps);
        }

        let form = view.form_status();
        if view.metrics.is_some() && self.last_form.as_deref() != Some(form) {
            info!(exercise = %view.exercise, "form: {}", form);
            self.last_form = Some(form.to_string());
        }

        if self.last_advisory.as_deref() != Some(view.advisory) {
            info!("coach: {}", view.advisory);
            self.last_advisory = Some(view.advisory.to_string());
        }
    }
}
