/// Example: Headless Scripted Session
///
/// Walks one session through the flow without a terminal UI: intake,
/// the scripted progress run, the report and a feedback submission.
///
/// Usage:
///   cargo run --example scripted_session -- path/to/resume.pdf
///
/// Stage durations are divided by 10 so the run takes about a second.

use kaya_core::feedback::{FeedbackForm, Sentiment};
use kaya_core::progress::{ProgressEvent, ProgressSchedule, ProgressTimer, ProgressTracker};
use kaya_core::types::{Industry, Role};
use kaya_core::{AnalysisPipeline, AppFlow, IntakeForm, ScriptedPipeline};
use std::error::Error;
use std::path::Path;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let Some(resume) = std::env::args().nth(1) else {
        eprintln!("usage: scripted_session <resume.pdf|resume.docx>");
        return Ok(());
    };

    let mut flow = AppFlow::new();
    flow.get_started()?;

    let mut form = IntakeForm::new();
    form.set_company("Google");
    form.select_industry(Some(Industry::Technology));
    form.select_role(0, Some(Role::SoftwareEngineer))?;
    form.select_role(1, Some(Role::DevopsEngineer))?;
    let file = form.attach_resume_path(Path::new(&resume))?;
    println!("Attached {} ({:.2} MB)", file.name, file.size_mb());

    flow.submit_intake(form.submit()?)?;

    let pipeline = ScriptedPipeline::accelerated(10);
    let schedule = ProgressSchedule::from_pipeline(&pipeline)?;
    let mut tracker = ProgressTracker::new(schedule.step_count());
    let timer = ProgressTimer::start(schedule);

    loop {
        let Some(event) = timer.recv_timeout(Duration::from_secs(5)) else {
            return Err("progress timer stalled".into());
        };
        if let ProgressEvent::StepStarted(step) = event {
            println!(
                "[{:>3.0}%] {}",
                kaya_core::progress::progress_percent(step, tracker.total_steps),
                pipeline.stages()[step].label
            );
        }
        if tracker.apply(event) {
            break;
        }
    }
    flow.processing_complete()?;

    let payload = flow.payload().ok_or("no payload after processing")?;
    let report = pipeline.produce_report(payload)?;
    println!("\nOverall score: {:.1}/10", report.overall_score);
    println!("Ensemble average: {:.1}/100", report.analysis.average_score());
    for gap in &report.gaps {
        println!("  [{}] {}", gap.severity, gap.category);
    }

    let mut feedback = FeedbackForm::new();
    feedback.choose(Sentiment::Helpful);
    feedback.set_comment("Clear and actionable");
    feedback.submit()?;

    flow.analyze_another()?;
    println!("\nBack on the {} screen", flow.screen());
    Ok(())
}
