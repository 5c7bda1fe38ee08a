use std::time::Duration;

use futures::Stream;
use rand::Rng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::events::{ConnectionStatus, StateEvent};
use super::scripts::library;

const EVENT_BUFFER: usize = 64;

/// Base delay the mock scripts scale their pauses from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTiming {
    pub step: Duration,
}

impl Default for MockTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl MockTiming {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }

    /// No pauses at all
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    fn scaled(&self, factor: f64) -> Duration {
        self.step.mul_f64(factor)
    }

    fn between(&self, low: f64, high: f64) -> Duration {
        self.step.mul_f64(rand::thread_rng().gen_range(low..high))
    }
}

/// Replays scripted agent, task and approval events with randomized pauses
///
/// Every script runs on its own task and sends into the shared channel. A
/// script ends early when the source is stopped or the receiver goes away.
#[derive(Debug)]
pub struct MockEventSource {
    sender: mpsc::Sender<StateEvent>,
    timing: MockTiming,
    cancel: CancellationToken,
}

impl MockEventSource {
    pub fn new(sender: mpsc::Sender<StateEvent>, timing: MockTiming) -> Self {
        Self {
            sender,
            timing,
            cancel: CancellationToken::new(),
        }
    }

    /// Start the resume analysis and task registry scripts
    ///
    /// Resume steps go out 1-3 steps apart with the approval request two steps
    /// after the last one; task steps start after 1.5 steps and follow 2-5
    /// steps apart.
    pub fn start(&self) {
        tracing::info!(step_ms = self.timing.step.as_millis() as u64, "Starting mock event source");

        let resume = library::resume_analysis_steps()
            .into_iter()
            .map(StateEvent::AgentUpdate)
            .collect();
        self.play(
            "resume_analysis",
            self.schedule(
                1.0,
                (1.0, 3.0),
                resume,
                Some((2.0, StateEvent::ApprovalRequest(library::resume_approval_request()))),
            ),
        );

        let tasks = library::task_registry_steps()
            .into_iter()
            .map(StateEvent::TaskUpdate)
            .collect();
        self.play("task_registry", self.schedule(1.5, (2.0, 5.0), tasks, None));
    }

    /// Run the job search script followed by a job application approval request
    pub fn simulate_job_search(&self) {
        let steps = library::job_search_steps()
            .into_iter()
            .map(StateEvent::AgentUpdate)
            .collect();
        self.play(
            "job_search",
            self.schedule(
                1.0,
                (1.0, 3.0),
                steps,
                Some((2.0, StateEvent::ApprovalRequest(library::job_application_request()))),
            ),
        );
    }

    /// Cancel every pending step of every script
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            tracing::info!("Stopping mock event source");
            self.cancel.cancel();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn schedule(
        &self,
        first: f64,
        gap: (f64, f64),
        steps: Vec<StateEvent>,
        trailer: Option<(f64, StateEvent)>,
    ) -> Vec<(Duration, StateEvent)> {
        let mut delay = self.timing.scaled(first);
        let mut schedule = Vec::with_capacity(steps.len() + 1);
        for step in steps {
            schedule.push((delay, step));
            delay = self.timing.between(gap.0, gap.1);
        }
        if let Some((factor, event)) = trailer {
            schedule.push((self.timing.scaled(factor), event));
        }
        schedule
    }

    fn play(&self, script: &'static str, schedule: Vec<(Duration, StateEvent)>) {
        let sender = self.sender.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            for (delay, event) in schedule {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!(script, "Mock script cancelled");
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }

                tracing::debug!(script, event = event.name(), "Sending mock event");
                if sender.send(event).await.is_err() {
                    tracing::debug!(script, "Mock event receiver dropped");
                    return;
                }
            }
            tracing::debug!(script, "Mock script finished");
        });
    }
}

/// A connection event followed by the resume and task scripts
///
/// The stream ends once both scripts are done. Dropping it stops the scripts.
pub fn mock_stream(timing: MockTiming) -> impl Stream<Item = StateEvent> + Send + 'static {
    let (sender, mut receiver) = mpsc::channel(EVENT_BUFFER);
    let source = MockEventSource::new(sender, timing);
    source.start();
    let guard = source.cancel.clone().drop_guard();
    drop(source);

    async_stream::stream! {
        let _guard = guard;
        yield StateEvent::Connection(ConnectionStatus::connected());
        while let Some(event) = receiver.recv().await {
            yield event;
        }
    }
}
