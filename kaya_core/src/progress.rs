//! Scripted progress timer for the processing screen
//!
//! `ProgressSchedule` is the pure timeline (elapsed time -> active step).
//! `ProgressTimer` plays it on a background thread and reports events over
//! a channel; dropping the timer cancels it, and no event is delivered after
//! cancellation.

use crate::pipeline::{AnalysisPipeline, PipelineError};
use crossbeam_channel::{after, select, unbounded, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Step `n` became the active step (0-based)
    StepStarted(usize),
    /// Emitted once, after the last step plus the completion delay
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Running { step: usize },
    Completed,
}

/// `(step + 1) / total * 100`
pub fn progress_percent(step: usize, total_steps: usize) -> f64 {
    if total_steps == 0 {
        return 100.0;
    }
    let shown = (step + 1).min(total_steps);
    shown as f64 / total_steps as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSchedule {
    steps: Vec<Duration>,
    completion_delay: Duration,
}

impl ProgressSchedule {
    pub fn new(steps: Vec<Duration>, completion_delay: Duration) -> Result<Self, PipelineError> {
        if steps.is_empty() {
            return Err(PipelineError::NoStages);
        }
        Ok(Self {
            steps,
            completion_delay,
        })
    }

    pub fn from_pipeline(pipeline: &dyn AnalysisPipeline) -> Result<Self, PipelineError> {
        Self::new(
            pipeline.stages().iter().map(|s| s.duration).collect(),
            pipeline.completion_delay(),
        )
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Sum of the step durations
    pub fn steps_total(&self) -> Duration {
        self.steps.iter().sum()
    }

    /// Time from start until completion is signalled
    pub fn total(&self) -> Duration {
        self.steps_total() + self.completion_delay
    }

    /// Elapsed time at which `step` becomes active
    pub fn step_start(&self, step: usize) -> Option<Duration> {
        (step < self.steps.len()).then(|| self.steps[..step].iter().sum())
    }

    pub fn status_at(&self, elapsed: Duration) -> ProgressStatus {
        if elapsed >= self.total() {
            return ProgressStatus::Completed;
        }

        let mut boundary = Duration::ZERO;
        for (step, duration) in self.steps.iter().enumerate() {
            boundary += *duration;
            if elapsed < boundary {
                return ProgressStatus::Running { step };
            }
        }

        // Waiting out the completion delay; the last step stays active.
        ProgressStatus::Running {
            step: self.steps.len() - 1,
        }
    }
}

/// Folds `ProgressEvent`s into what the screen displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTracker {
    pub current_step: usize,
    pub total_steps: usize,
    pub completed: bool,
}

impl ProgressTracker {
    pub fn new(total_steps: usize) -> Self {
        Self {
            current_step: 0,
            total_steps,
            completed: false,
        }
    }

    /// Returns true only for the first `Completed` event
    pub fn apply(&mut self, event: ProgressEvent) -> bool {
        match event {
            ProgressEvent::StepStarted(step) => {
                if !self.completed && step < self.total_steps {
                    self.current_step = step;
                }
                false
            }
            ProgressEvent::Completed => {
                let first = !self.completed;
                self.completed = true;
                first
            }
        }
    }

    pub fn percent(&self) -> f64 {
        progress_percent(self.current_step, self.total_steps)
    }

    pub fn is_step_complete(&self, step: usize) -> bool {
        self.completed || step < self.current_step
    }
}

/// Handle to a running schedule
pub struct ProgressTimer {
    cancel: Option<Sender<()>>,
    events: Receiver<ProgressEvent>,
    thread_handle: Option<JoinHandle<()>>,
}

impl ProgressTimer {
    pub fn start(schedule: ProgressSchedule) -> Self {
        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(1);
        let (event_tx, event_rx) = unbounded();

        log::info!(
            "Progress timer started: {} steps, {} ms total",
            schedule.step_count(),
            schedule.total().as_millis()
        );

        let thread_handle = thread::spawn(move || run_schedule(&schedule, &cancel_rx, &event_tx));

        Self {
            cancel: Some(cancel_tx),
            events: event_rx,
            thread_handle: Some(thread_handle),
        }
    }

    /// Non-blocking: drain every event delivered so far
    pub fn poll(&self) -> Vec<ProgressEvent> {
        if self.cancel.is_none() {
            return Vec::new();
        }
        self.events.try_iter().collect()
    }

    /// Blocking receive with a timeout. `None` on timeout or after cancel.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ProgressEvent> {
        if self.cancel.is_none() {
            return None;
        }
        self.events.recv_timeout(timeout).ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }

    /// Stop the timer and wait for its thread. Pending events are discarded.
    pub fn cancel(&mut self) {
        let Some(cancel) = self.cancel.take() else {
            return;
        };
        let finished = self
            .thread_handle
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        let _ = cancel.try_send(());
        drop(cancel);

        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("Progress timer thread panicked");
            }
        }

        let discarded = self.events.try_iter().count();
        if finished {
            log::debug!("Progress timer released");
        } else {
            log::info!("Progress timer cancelled ({} pending events discarded)", discarded);
        }
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Returns false when cancelled before `duration` elapsed
fn wait(duration: Duration, cancel: &Receiver<()>) -> bool {
    select! {
        recv(cancel) -> _ => false,
        recv(after(duration)) -> _ => true,
    }
}

fn run_schedule(schedule: &ProgressSchedule, cancel: &Receiver<()>, events: &Sender<ProgressEvent>) {
    let last = schedule.steps.len() - 1;

    for (step, duration) in schedule.steps.iter().enumerate() {
        log::debug!("Progress step {} started", step);
        if events.send(ProgressEvent::StepStarted(step)).is_err() {
            return;
        }
        if !wait(*duration, cancel) {
            return;
        }
        if step == last && !wait(schedule.completion_delay, cancel) {
            return;
        }
    }

    // A cancel racing the final wait must still win.
    if !matches!(cancel.try_recv(), Err(TryRecvError::Empty)) {
        return;
    }
    log::info!("Progress complete");
    let _ = events.send(ProgressEvent::Completed);
}
