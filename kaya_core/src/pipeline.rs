//! Analysis Pipeline
//!
//! The seam between the processing screen and whatever produces a report.
//! A pipeline is a named sequence of stages plus a final report step. The
//! shipped `ScriptedPipeline` performs no work: its stage durations are
//! fixed choreography and its report is the built-in sample.

use crate::intake::IntakePayload;
use crate::report::AnalysisReport;
use std::time::Duration;
use thiserror::Error;

/// Per-stage durations of the scripted run, in milliseconds
pub const SCRIPTED_STAGE_MS: [u64; 5] = [2000, 3000, 3000, 2000, 2000];

/// Pause between the last stage finishing and completion being signalled
pub const COMPLETION_DELAY_MS: u64 = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Pipeline has no stages")]
    NoStages,

    #[error("Stage '{stage}' failed: {reason}")]
    StageFailed { stage: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Stable identifier for logs
    pub name: &'static str,
    /// Text shown while the stage is active
    pub label: &'static str,
    pub duration: Duration,
}

impl Stage {
    pub const fn new(name: &'static str, label: &'static str, duration_ms: u64) -> Self {
        Self {
            name,
            label,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

pub trait AnalysisPipeline: Send {
    fn stages(&self) -> &[Stage];

    fn completion_delay(&self) -> Duration;

    /// Produce the report once every stage has run.
    fn produce_report(&self, payload: &IntakePayload) -> Result<AnalysisReport, PipelineError>;
}

/// Fixed five-stage choreography ending in the sample report
#[derive(Debug, Clone)]
pub struct ScriptedPipeline {
    stages: Vec<Stage>,
    completion_delay: Duration,
}

impl ScriptedPipeline {
    pub fn new() -> Self {
        Self {
            stages: vec![
                Stage::new("parse_resume", "Parsing your resume...", SCRIPTED_STAGE_MS[0]),
                Stage::new("ideal_resume", "Generating ideal resume...", SCRIPTED_STAGE_MS[1]),
                Stage::new(
                    "ensemble_scoring",
                    "Evaluating with AI ensemble...",
                    SCRIPTED_STAGE_MS[2],
                ),
                Stage::new("gap_analysis", "Analyzing gaps...", SCRIPTED_STAGE_MS[3]),
                Stage::new(
                    "recommendations",
                    "Synthesizing recommendations...",
                    SCRIPTED_STAGE_MS[4],
                ),
            ],
            completion_delay: Duration::from_millis(COMPLETION_DELAY_MS),
        }
    }

    /// Same stages with every duration divided by `factor`. Used to run
    /// the choreography quickly in tests and demos.
    pub fn accelerated(factor: u32) -> Self {
        let factor = factor.max(1);
        let mut pipeline = Self::new();
        for stage in &mut pipeline.stages {
            stage.duration /= factor;
        }
        pipeline.completion_delay /= factor;
        pipeline
    }
}

impl Default for ScriptedPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisPipeline for ScriptedPipeline {
    fn stages(&self) -> &[Stage] {
        &self.stages
    }

    fn completion_delay(&self) -> Duration {
        self.completion_delay
    }

    fn produce_report(&self, payload: &IntakePayload) -> Result<AnalysisReport, PipelineError> {
        log::debug!(
            "Scripted report for {} ({}); payload is not inspected",
            payload.target_company(),
            payload.industry().id()
        );
        Ok(AnalysisReport::sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_stage_order_and_durations() {
        let pipeline = ScriptedPipeline::new();
        let labels: Vec<_> = pipeline.stages().iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Parsing your resume...",
                "Generating ideal resume...",
                "Evaluating with AI ensemble...",
                "Analyzing gaps...",
                "Synthesizing recommendations...",
            ]
        );

        let total: Duration = pipeline.stages().iter().map(|s| s.duration).sum();
        assert_eq!(total, Duration::from_secs(12));
        assert_eq!(pipeline.completion_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_accelerated_scales_every_duration() {
        let pipeline = ScriptedPipeline::accelerated(100);
        assert_eq!(pipeline.stages()[1].duration, Duration::from_millis(30));
        assert_eq!(pipeline.completion_delay(), Duration::from_millis(10));

        // Zero factor is treated as 1
        let same = ScriptedPipeline::accelerated(0);
        assert_eq!(same.stages()[0].duration, Duration::from_millis(2000));
    }
}
