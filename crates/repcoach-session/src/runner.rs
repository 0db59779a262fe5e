//! The frame loop.

use repcoach_core::Result;
use serde::Serialize;
use tracing::{error, info};

use crate::presenter::Presenter;
use crate::session::{FrameOutcome, SessionContext};
use crate::source::FrameSource;

/// Totals for one completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub updated: u64,
    pub skipped: u64,
    pub reps: u32,
}

/// Drives a [`SessionContext`] from a [`FrameSource`] to a [`Presenter`]
#[derive(Debug)]
pub struct SessionRunner {
    context: SessionContext,
}

impl SessionRunner {
    pub fn new(context: SessionContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    pub fn into_context(self) -> SessionContext {
        self.context
    }

    /// Pull frames until the source is exhausted.
    ///
    /// A source error ends the run and is returned after being logged once.
    /// Skipped frames never do. Advisories still in flight when the source
    /// runs dry are awaited before returning.
    pub async fn run<S, P>(&mut self, source: &mut S, presenter: &mut P) -> Result<RunSummary>
    where
        S: FrameSource + ?Sized,
        P: Presenter + ?Sized,
    {
        info!(
            session = ?self.context.id(),
            exercise = %self.context.exercise().kind(),
            "session started"
        );

        let mut summary = RunSummary::default();

        loop {
            self.context.drain_advisories();

            let detection = match source.next_frame().await {
                Ok(Some(detection)) => detection,
                Ok(None) => break,
                Err(e) => {
                    error!("Frame source error: {}", e);
                    return Err(e);
                }
            };

            let outcome = self.context.process(&detection);
            summary.frames += 1;
            match &outcome {
                FrameOutcome::Updated(snapshot) => {
                    summary.updated += 1;
                    self.context.dispatch_advisory(snapshot);
                }
                FrameOutcome::Skipped(_) => summary.skipped += 1,
            }

            presenter.present(&self.context.view(&outcome));
        }

        self.context.settle().await;
        summary.reps = self.context.exercise().reps();

        info!(
            frames = summary.frames,
            skipped = summary.skipped,
            reps = summary.reps,
            advisory = self.context.advisory(),
            "session finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoachConfig;
    use crate::presenter::FrameView;
    use crate::source::VecSource;
    use async_trait::async_trait;
    use repcoach_agents::{HeuristicBackend, SystemClock};
    use repcoach_core::{Detection, Error, JointSet, Landmark};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingPresenter {
        frames: Vec<u64>,
    }

    impl Presenter for CountingPresenter {
        fn present(&mut self, view: &FrameView<'_>) {
            self.frames.push(view.frame);
        }
    }

    struct BrokenSource {
        remaining_ok: usize,
    }

    #[async_trait]
    impl FrameSource for BrokenSource {
        async fn next_frame(&mut self) -> Result<Option<Detection>> {
            if self.remaining_ok == 0 {
                return Err(Error::FrameSource("camera unplugged".to_string()));
            }
            self.remaining_ok -= 1;
            Ok(Some(Detection::NoPerson))
        }
    }

    fn runner() -> SessionRunner {
        SessionRunner::new(SessionContext::new(
            CoachConfig::default(),
            Arc::new(HeuristicBackend::new()),
            Arc::new(SystemClock),
        ))
    }

    #[tokio::test]
    async fn test_run_until_exhausted() {
        let curl = |wrist: (f64, f64)| {
            Detection::Person(
                JointSet::new()
                    .with(Landmark::LeftShoulder, (0.5, 0.3))
                    .with(Landmark::LeftElbow, (0.5, 0.5))
                    .with(Landmark::LeftWrist, wrist)
                    .with(Landmark::LeftHip, (0.5, 0.8)),
            )
        };
        let mut source = VecSource::new(vec![
            curl((0.5, 0.7)),
            Detection::NoPerson,
            curl((0.52, 0.3)),
        ]);
        let mut presenter = CountingPresenter::default();
        let mut runner = runner();

        let summary = runner.run(&mut source, &mut presenter).await.unwrap();

        assert_eq!(
            summary,
            RunSummary {
                frames: 3,
                updated: 2,
                skipped: 1,
                reps: 1
            }
        );
        assert_eq!(presenter.frames, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_source_error_ends_run() {
        let mut source = BrokenSource { remaining_ok: 2 };
        let mut presenter = CountingPresenter::default();
        let mut runner = runner();

        let err = runner.run(&mut source, &mut presenter).await.unwrap_err();
        assert!(matches!(err, Error::FrameSource(_)));
        assert_eq!(presenter.frames.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let mut runner = runner();
        let summary = runner
            .run(&mut VecSource::default(), &mut CountingPresenter::default())
            .await
            .unwrap();
        assert_eq!(summary, RunSummary::default());
    }
}
