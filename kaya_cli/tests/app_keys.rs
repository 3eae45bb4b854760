/// Key-driven flow tests against AppState, no terminal involved

use crossterm::event::{KeyCode, KeyModifiers};
use kaya_cli::components::NoticeLevel;
use kaya_cli::screens::{IntakeField, ReportTab};
use kaya_cli::ui::AppState;
use kaya_core::config::KayaConfig;
use kaya_core::types::{Industry, Role};
use kaya_core::pipeline::{PipelineError, Stage};
use kaya_core::{AnalysisPipeline, AnalysisReport, IntakePayload, Screen, ScriptedPipeline};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

fn app_with(pipeline: ScriptedPipeline) -> AppState {
    AppState::new(&KayaConfig::default(), Box::new(pipeline))
}

/// Scripted stages whose report step fails while `failing` is set
struct FlakyPipeline {
    inner: ScriptedPipeline,
    failing: Arc<AtomicBool>,
}

impl AnalysisPipeline for FlakyPipeline {
    fn stages(&self) -> &[Stage] {
        self.inner.stages()
    }

    fn completion_delay(&self) -> Duration {
        self.inner.completion_delay()
    }

    fn produce_report(&self, payload: &IntakePayload) -> Result<AnalysisReport, PipelineError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PipelineError::StageFailed {
                stage: "report".to_string(),
                reason: "model unavailable".to_string(),
            });
        }
        self.inner.produce_report(payload)
    }
}

fn press(app: &mut AppState, code: KeyCode) {
    app.handle_key(code, KeyModifiers::NONE);
}

fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn resume_fixture(suffix: &str, len: u64) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(b"resume").unwrap();
    file.as_file().set_len(len).unwrap();
    file
}

fn latest_notice(app: &AppState) -> (NoticeLevel, String) {
    let notice = app.notices.latest().expect("a notice was raised");
    (notice.level, notice.message.clone())
}

/// Fill company, industry, first role and resume through the keyboard
fn fill_intake(app: &mut AppState, resume: &NamedTempFile) {
    type_text(app, "Google");
    press(app, KeyCode::Tab);
    press(app, KeyCode::Right);
    press(app, KeyCode::Tab);
    press(app, KeyCode::Right);
    press(app, KeyCode::Tab);
    press(app, KeyCode::Tab);
    press(app, KeyCode::Tab);
    assert_eq!(app.intake.focus, IntakeField::Resume);
    app.handle_paste(&resume.path().display().to_string());
}

fn wait_for_report(app: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.screen() == Screen::Processing && Instant::now() < deadline {
        app.tick(Instant::now());
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_landing_actions() {
    let mut app = app_with(ScriptedPipeline::new());
    assert_eq!(app.screen(), Screen::Landing);

    press(&mut app, KeyCode::Char('l'));
    assert_eq!(app.screen(), Screen::Landing);
    assert_eq!(latest_notice(&app).0, NoticeLevel::Info);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Intake);
    assert!(app.intake.form.is_empty());
}

#[test]
fn test_typing_into_company_does_not_trigger_global_keys() {
    let mut app = app_with(ScriptedPipeline::new());
    press(&mut app, KeyCode::Enter);

    type_text(&mut app, "qt?");
    assert!(!app.should_quit);
    assert!(!app.show_help);
    assert!(!app.high_contrast);
    assert_eq!(app.intake.form.company, "qt?");

    // Away from text fields the same keys are global again
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('t'));
    assert!(app.high_contrast);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_back_to_landing_discards_edits() {
    let mut app = app_with(ScriptedPipeline::new());
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "Meta");

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen(), Screen::Landing);

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.screen(), Screen::Intake);
    assert!(app.intake.form.is_empty());
}

#[test]
fn test_empty_submit_raises_error_and_stays() {
    let mut app = app_with(ScriptedPipeline::new());
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.intake.focus, IntakeField::Submit);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen(), Screen::Intake);
    assert_eq!(
        latest_notice(&app),
        (
            NoticeLevel::Error,
            "Please fill in company and industry".to_string()
        )
    );
}

#[test]
fn test_rejected_drops_keep_other_fields() {
    let mut app = app_with(ScriptedPipeline::new());
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "Google");
    press(&mut app, KeyCode::Tab);

    let text_file = resume_fixture(".txt", 1_000);
    app.handle_paste(&text_file.path().display().to_string());
    assert_eq!(
        latest_notice(&app),
        (NoticeLevel::Error, "Please upload a PDF or DOCX file".to_string())
    );
    assert!(app.intake.form.resume.is_none());

    let huge = resume_fixture(".pdf", 11 * 1024 * 1024);
    app.handle_paste(&huge.path().display().to_string());
    assert_eq!(
        latest_notice(&app),
        (NoticeLevel::Error, "File size must be less than 10MB".to_string())
    );
    assert!(app.intake.form.resume.is_none());
    assert_eq!(app.intake.form.company, "Google");
}

#[test]
fn test_typed_path_is_attached_on_enter() {
    let mut app = app_with(ScriptedPipeline::new());
    press(&mut app, KeyCode::Enter);
    let resume = resume_fixture(".docx", 2_048);

    app.intake.focus = IntakeField::Resume;
    type_text(&mut app, &resume.path().display().to_string());
    press(&mut app, KeyCode::Enter);

    assert_eq!(
        latest_notice(&app),
        (NoticeLevel::Success, "Resume uploaded successfully".to_string())
    );
    assert!(app.intake.resume_path.is_empty());
    assert_eq!(app.intake.form.resume.as_ref().unwrap().size_bytes, 2_048);

    press(&mut app, KeyCode::Delete);
    assert!(app.intake.form.resume.is_none());
}

#[test]
fn test_full_session_through_report_and_back() {
    let mut app = app_with(ScriptedPipeline::accelerated(200));
    press(&mut app, KeyCode::Enter);

    let resume = resume_fixture(".pdf", 1_000_000);
    fill_intake(&mut app, &resume);
    assert_eq!(app.intake.form.industry, Some(Industry::Technology));
    assert_eq!(app.intake.form.roles[0], Some(Role::SoftwareEngineer));

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Processing);
    assert_eq!(app.flow.payload().unwrap().target_company(), "Google");

    // Keys other than the global ones do nothing while processing
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen(), Screen::Processing);

    wait_for_report(&mut app);
    assert_eq!(app.screen(), Screen::Report);
    assert_eq!(app.flow.completed_analyses(), 1);

    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.report.as_ref().unwrap().tab, ReportTab::Gaps);

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(
        latest_notice(&app),
        (
            NoticeLevel::Error,
            "Please select if the analysis was helpful".to_string()
        )
    );

    press(&mut app, KeyCode::Char('c'));
    type_text(&mut app, "quite good");
    press(&mut app, KeyCode::Enter);
    assert!(!app.should_quit);

    press(&mut app, KeyCode::Char('h'));
    press(&mut app, KeyCode::Char('s'));
    let feedback = &app.report.as_ref().unwrap().feedback;
    assert!(feedback.is_submitted());
    assert_eq!(
        feedback.record().unwrap().comment.as_deref(),
        Some("quite good")
    );

    press(&mut app, KeyCode::Char('d'));
    assert_eq!(
        latest_notice(&app),
        (NoticeLevel::Info, "Download feature coming soon!".to_string())
    );

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.screen(), Screen::Intake);
    assert!(app.flow.payload().is_none());
    assert!(app.report.is_none());
    assert!(app.intake.form.is_empty());
}

#[test]
fn test_quit_during_processing_stops_timer() {
    let mut app = app_with(ScriptedPipeline::new());
    press(&mut app, KeyCode::Enter);
    let resume = resume_fixture(".pdf", 10);
    fill_intake(&mut app, &resume);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert!(app.processing.is_running());

    app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.should_quit);

    let started = Instant::now();
    drop(app);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn test_help_closes_on_any_key() {
    let mut app = app_with(ScriptedPipeline::new());
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);

    press(&mut app, KeyCode::Enter);
    assert!(!app.show_help);
    assert_eq!(app.screen(), Screen::Landing);
}

#[test]
fn test_failed_report_can_be_retried() {
    let failing = Arc::new(AtomicBool::new(true));
    let mut app = AppState::new(
        &KayaConfig::default(),
        Box::new(FlakyPipeline {
            inner: ScriptedPipeline::accelerated(200),
            failing: Arc::clone(&failing),
        }),
    );
    press(&mut app, KeyCode::Enter);
    let resume = resume_fixture(".pdf", 1_000);
    fill_intake(&mut app, &resume);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);

    let deadline = Instant::now() + Duration::from_secs(5);
    while !app.report_pending() && Instant::now() < deadline {
        app.tick(Instant::now());
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(app.report_pending());
    assert_eq!(app.screen(), Screen::Processing);
    assert!(!app.processing.is_running());
    assert_eq!(
        latest_notice(&app),
        (
            NoticeLevel::Error,
            "Stage 'report' failed: model unavailable".to_string()
        )
    );

    // Still failing: Enter retries and stays put
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Processing);
    assert!(app.processing.failure.is_some());

    failing.store(false, Ordering::SeqCst);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Report);
    assert!(!app.report_pending());
    assert!(app.processing.failure.is_none());
    assert_eq!(app.flow.completed_analyses(), 1);
    assert!(app.report.is_some());
}
