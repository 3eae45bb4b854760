// Core of Kaya AI: the four-screen resume analysis flow, independent of any
// front end. All analysis output is the built-in sample report.

pub mod config;
pub mod feedback;
pub mod flow;
pub mod intake;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod types;

pub use flow::{AppFlow, FlowError, Screen};
pub use intake::{IntakeError, IntakeForm, IntakePayload};
pub use pipeline::{AnalysisPipeline, ScriptedPipeline};
pub use report::AnalysisReport;

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(), "0.1.0");
    }
}
