/// Smoke tests for UI rendering using ratatui buffer snapshots

use kaya_cli::components::NoticeQueue;
use kaya_cli::screens::{
    IntakeScreen, IntakeScreenState, LandingScreen, ProcessingScreen, ProcessingScreenState,
    ReportScreen, ReportScreenState,
};
use kaya_cli::ui::AppState;
use kaya_core::config::KayaConfig;
use kaya_core::feedback::Sentiment;
use kaya_core::{AnalysisReport, ScriptedPipeline};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::io::Write;
use std::time::Duration;

fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect::<String>()
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(100, 30)).unwrap()
}

#[test]
fn test_landing_screen_rendering() {
    let mut terminal = terminal();
    terminal
        .draw(|f| f.render_widget(LandingScreen::new(false), f.area()))
        .unwrap();

    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Kaya AI"));
    assert!(buffer_str.contains("Intelligent Career Navigator"));
    assert!(buffer_str.contains("AI-Powered Analysis"));
    assert!(buffer_str.contains("Gap Analysis"));
    assert!(buffer_str.contains("Smart Recommendations"));
    assert!(buffer_str.contains("Let's Get Started"));
}

#[test]
fn test_empty_intake_form_rendering() {
    let state = IntakeScreenState::new();
    let mut terminal = terminal();
    terminal
        .draw(|f| f.render_widget(IntakeScreen::new(&state, false), f.area()))
        .unwrap();

    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Let's Analyze Your Resume"));
    assert!(buffer_str.contains("Target Company"));
    assert!(buffer_str.contains("Select industry"));
    assert!(buffer_str.contains("Role 1 (Required)"));
    assert!(buffer_str.contains("Role 3 (Optional)"));
    assert!(buffer_str.contains("PDF or DOCX, max 10MB"));
    assert!(buffer_str.contains("Analyze My Resume"));
}

#[test]
fn test_intake_form_shows_attached_file() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"%PDF-1.4").unwrap();
    let name = file
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();

    let mut state = IntakeScreenState::new();
    for c in "Google".chars() {
        state.input_char(c);
    }
    state
        .attach_dropped(&format!("'{}'", file.path().display()))
        .unwrap();

    let mut terminal = terminal();
    terminal
        .draw(|f| f.render_widget(IntakeScreen::new(&state, true), f.area()))
        .unwrap();

    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Google"));
    assert!(buffer_str.contains(&name));
    assert!(buffer_str.contains("[Del] Remove"));
}

#[test]
fn test_processing_screen_rendering() {
    let mut state = ProcessingScreenState::new();
    state.start(&ScriptedPipeline::new()).unwrap();

    let mut terminal = terminal();
    terminal
        .draw(|f| f.render_widget(ProcessingScreen::new(&state, false), f.area()))
        .unwrap();
    state.stop();

    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Analyzing Your Resume"));
    assert!(buffer_str.contains("Parsing your resume..."));
    assert!(buffer_str.contains("Synthesizing recommendations..."));
    assert!(buffer_str.contains("20% complete"));
}

#[test]
fn test_report_screen_tabs_rendering() {
    let mut state = ReportScreenState::new(AnalysisReport::sample());
    let mut terminal = terminal();

    terminal
        .draw(|f| f.render_widget(ReportScreen::new(&state, false), f.area()))
        .unwrap();
    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Your Career Analysis Report"));
    assert!(buffer_str.contains("7.2"));
    assert!(buffer_str.contains("Multi-LLM Ensemble Scores"));
    assert!(buffer_str.contains("Gemini"));
    assert!(buffer_str.contains("75.3/100"));
    assert!(buffer_str.contains("Was this analysis helpful?"));

    state.select_tab(2);
    terminal
        .draw(|f| f.render_widget(ReportScreen::new(&state, false), f.area()))
        .unwrap();
    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Quantifiable Achievements"));
    assert!(buffer_str.contains("Missing keywords:"));

    state.select_tab(3);
    terminal
        .draw(|f| f.render_widget(ReportScreen::new(&state, false), f.area()))
        .unwrap();
    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Add Quantifiable Metrics"));
    assert!(buffer_str.contains("HIGH PRIORITY"));
}

#[test]
fn test_report_thank_you_rendering() {
    let mut state = ReportScreenState::new(AnalysisReport::sample());
    state.choose(Sentiment::NeedsImprovement);
    state.submit_feedback().unwrap();

    let mut terminal = terminal();
    terminal
        .draw(|f| f.render_widget(ReportScreen::new(&state, false), f.area()))
        .unwrap();

    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Thank you for your feedback!"));
    assert!(!buffer_str.contains("Was this analysis helpful?"));
}

#[test]
fn test_help_overlay_and_notices_render_over_screen() {
    let mut app = AppState::new(
        &KayaConfig::default(),
        Box::new(ScriptedPipeline::new()),
    );
    app.notices.error("Please upload your resume");
    app.show_help = true;

    let mut terminal = terminal();
    terminal.draw(|f| app.render(f)).unwrap();

    let buffer_str = buffer_text(terminal.backend().buffer());
    assert!(buffer_str.contains("Help - landing"));
    assert!(buffer_str.contains("Toggle high-contrast"));
    assert!(buffer_str.contains("Please upload your resume"));
}

#[test]
fn test_notice_queue_expiry_clears_stack() {
    let mut queue = NoticeQueue::new(Duration::from_millis(10));
    queue.info("Download feature coming soon!");
    std::thread::sleep(Duration::from_millis(20));
    queue.prune(std::time::Instant::now());
    assert!(queue.is_empty());
}
