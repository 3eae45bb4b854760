/// Top-level TUI event loop and input handler
use crate::components::{NoticeQueue, NoticeStack};
use crate::keymap::KeyMap;
use crate::screens::{
    IntakeField, IntakeScreen, IntakeScreenState, LandingScreen, ProcessingScreen,
    ProcessingScreenState, ReportScreen, ReportScreenState,
};
use crate::theme;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kaya_core::config::KayaConfig;
use kaya_core::feedback::{FeedbackOutcome, Sentiment};
use kaya_core::{AnalysisPipeline, AppFlow, IntakeError, Screen};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

const LEARN_MORE: &str =
    "Kaya AI compares your resume with an ideal profile for your target roles";

pub struct AppState {
    pub flow: AppFlow,
    pipeline: Box<dyn AnalysisPipeline>,
    pub intake: IntakeScreenState,
    pub processing: ProcessingScreenState,
    pub report: Option<ReportScreenState>,
    /// Every stage ran but the last `produce_report` failed
    report_pending: bool,
    pub notices: NoticeQueue,
    pub high_contrast: bool,
    pub show_help: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &KayaConfig, pipeline: Box<dyn AnalysisPipeline>) -> Self {
        Self {
            flow: AppFlow::new(),
            pipeline,
            intake: IntakeScreenState::new(),
            processing: ProcessingScreenState::new(),
            report: None,
            report_pending: false,
            notices: NoticeQueue::new(config.notice_ttl()),
            high_contrast: config.high_contrast,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.flow.screen()
    }

    pub fn report_pending(&self) -> bool {
        self.report_pending
    }

    /// True while a text field owns printable keys
    fn captures_text(&self) -> bool {
        match self.flow.screen() {
            Screen::Intake => self.intake.focus.takes_text(),
            Screen::Report => self
                .report
                .as_ref()
                .is_some_and(|report| report.editing_comment),
            _ => false,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if KeyMap::is_force_quit(code, modifiers) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            // Any key closes help
            self.show_help = false;
            return;
        }

        let typing = self.captures_text() && matches!(code, KeyCode::Char(_));
        if !typing {
            if KeyMap::is_quit(code) {
                self.should_quit = true;
                return;
            }
            if KeyMap::is_help(code) {
                self.show_help = true;
                return;
            }
            if KeyMap::is_toggle_theme(code) {
                self.high_contrast = !self.high_contrast;
                return;
            }
        }

        match self.flow.screen() {
            Screen::Landing => self.handle_landing_key(code),
            Screen::Intake => self.handle_intake_key(code),
            Screen::Processing => {
                if self.report_pending && KeyMap::is_confirm(code) {
                    self.finish_processing();
                }
            }
            Screen::Report => self.handle_report_key(code),
        }
    }

    /// Bracketed paste. On the intake form this is how a dropped file
    /// arrives.
    pub fn handle_paste(&mut self, text: &str) {
        match self.flow.screen() {
            Screen::Intake if self.intake.focus == IntakeField::Company => {
                for c in text.chars() {
                    self.intake.input_char(c);
                }
            }
            Screen::Intake => {
                let result = self.intake.attach_dropped(text).map(|_| ());
                self.report_attach(result);
            }
            Screen::Report => {
                if let Some(report) = self.report.as_mut() {
                    report.input_str(text);
                }
            }
            _ => {}
        }
    }

    /// Expire notices and fold timer progress
    pub fn tick(&mut self, now: Instant) {
        self.notices.prune(now);

        if self.flow.screen() == Screen::Processing && self.processing.poll() {
            self.finish_processing();
        }
    }

    fn handle_landing_key(&mut self, code: KeyCode) {
        if KeyMap::is_get_started(code) {
            if self.flow.get_started().is_ok() {
                self.intake = IntakeScreenState::new();
            }
        } else if KeyMap::is_learn_more(code) {
            self.notices.info(LEARN_MORE);
        }
    }

    fn handle_intake_key(&mut self, code: KeyCode) {
        if KeyMap::is_back(code) {
            if self.flow.back_to_landing().is_ok() {
                self.intake = IntakeScreenState::new();
            }
        } else if KeyMap::is_next_field(code) {
            self.intake.focus_next();
        } else if KeyMap::is_prev_field(code) {
            self.intake.focus_prev();
        } else if KeyMap::is_left(code) {
            self.intake.cycle(false);
        } else if KeyMap::is_right(code) {
            self.intake.cycle(true);
        } else if KeyMap::is_remove(code) {
            if self.intake.remove_resume().is_some() {
                self.notices.info("Resume removed");
            }
        } else if KeyMap::is_confirm(code) {
            match self.intake.focus {
                IntakeField::Submit => self.submit_intake(),
                IntakeField::Resume if !self.intake.resume_path.is_empty() => {
                    let result = self.intake.attach_from_input().map(|_| ());
                    self.report_attach(result);
                }
                _ => self.intake.focus_next(),
            }
        } else if code == KeyCode::Backspace {
            self.intake.backspace();
        } else if let KeyCode::Char(c) = code {
            self.intake.input_char(c);
        }
    }

    fn report_attach(&mut self, result: std::result::Result<(), IntakeError>) {
        match result {
            Ok(()) => self.notices.success("Resume uploaded successfully"),
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    fn submit_intake(&mut self) {
        let payload = match self.intake.submit() {
            Ok(payload) => payload,
            Err(e) => {
                self.notices.error(e.to_string());
                return;
            }
        };

        if let Err(e) = self.flow.submit_intake(payload) {
            self.notices.error(e.to_string());
            return;
        }
        if let Err(e) = self.processing.start(self.pipeline.as_ref()) {
            log::error!("Could not start analysis: {}", e);
            self.notices.error(e.to_string());
        }
    }

    fn finish_processing(&mut self) {
        let Some(payload) = self.flow.payload() else {
            return;
        };
        match self.pipeline.produce_report(payload) {
            Ok(report) => {
                self.report_pending = false;
                self.processing.failure = None;
                if self.flow.processing_complete().is_ok() {
                    self.report = Some(ReportScreenState::new(report));
                }
            }
            Err(e) => {
                log::error!("Report generation failed: {}", e);
                self.report_pending = true;
                self.processing.failure = Some(e.to_string());
                self.notices.error(e.to_string());
            }
        }
    }

    fn handle_report_key(&mut self, code: KeyCode) {
        let Some(report) = self.report.as_mut() else {
            return;
        };

        if report.editing_comment {
            match code {
                KeyCode::Enter | KeyCode::Esc => report.finish_comment(),
                KeyCode::Backspace => report.backspace(),
                KeyCode::Char(c) => report.input_char(c),
                _ => {}
            }
            return;
        }

        if KeyMap::is_left(code) {
            report.prev_tab();
        } else if KeyMap::is_right(code) {
            report.next_tab();
        } else if let Some(index) = KeyMap::tab_index(code) {
            report.select_tab(index);
        } else if KeyMap::is_down(code) {
            report.scroll_down();
        } else if KeyMap::is_up(code) {
            report.scroll_up();
        } else if KeyMap::is_helpful(code) {
            report.choose(Sentiment::Helpful);
        } else if KeyMap::is_needs_improvement(code) {
            report.choose(Sentiment::NeedsImprovement);
        } else if KeyMap::is_edit_comment(code) {
            report.begin_comment();
        } else if KeyMap::is_submit_feedback(code) {
            match report.submit_feedback() {
                Ok(FeedbackOutcome::Submitted(_)) => {
                    self.notices.success("Thank you for your feedback!")
                }
                Ok(FeedbackOutcome::AlreadySubmitted) => {}
                Err(e) => self.notices.error(e.to_string()),
            }
        } else if KeyMap::is_download(code) {
            self.notices.info("Download feature coming soon!");
        } else if KeyMap::is_analyze_another(code) && self.flow.analyze_another().is_ok() {
            self.report = None;
            self.intake = IntakeScreenState::new();
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let area = f.area();

        match self.flow.screen() {
            Screen::Landing => f.render_widget(LandingScreen::new(self.high_contrast), area),
            Screen::Intake => {
                f.render_widget(IntakeScreen::new(&self.intake, self.high_contrast), area)
            }
            Screen::Processing => f.render_widget(
                ProcessingScreen::new(&self.processing, self.high_contrast),
                area,
            ),
            Screen::Report => {
                if let Some(report) = &self.report {
                    f.render_widget(ReportScreen::new(report, self.high_contrast), area);
                }
            }
        }

        f.render_widget(NoticeStack::new(&self.notices, self.high_contrast), area);

        if self.show_help {
            render_help(f, area, self.flow.screen(), self.high_contrast);
        }
    }
}

pub fn run_tui(config: &KayaConfig, pipeline: Box<dyn AnalysisPipeline>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(config, pipeline);
    log::info!("TUI session {} started", app.flow.session_id());
    let result = event_loop(&mut terminal, &mut app, config.tick_rate());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    log::info!(
        "TUI session {} ended after {} analyses",
        app.flow.session_id(),
        app.flow.completed_analyses()
    );
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    tick_rate: Duration,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| app.render(f))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key.code, key.modifiers)
                }
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
    Ok(())
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_help(f: &mut Frame, area: Rect, screen: Screen, high_contrast: bool) {
    let accent = theme::accent(high_contrast);
    let help_area = centered_rect(area, 70, 80);

    f.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            format!(" Help - {} ", screen),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    f.render_widget(block, help_area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Kaya AI - Intelligent Career Navigator",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (key, desc) in KeyMap::help_text(screen) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:10}", key),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(desc),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme::dim(),
    )));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}
