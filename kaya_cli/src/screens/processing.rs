/// Processing screen - scripted analysis progress
use crate::theme;
use kaya_core::pipeline::{AnalysisPipeline, PipelineError};
use kaya_core::progress::{ProgressSchedule, ProgressTimer, ProgressTracker};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

pub const TIP: &str =
    "💡 Tip: A well-crafted resume can increase your interview chances by up to 40%";

pub struct ProcessingScreenState {
    pub tracker: ProgressTracker,
    pub labels: Vec<&'static str>,
    /// Set when every stage ran but the report could not be produced
    pub failure: Option<String>,
    timer: Option<ProgressTimer>,
}

impl ProcessingScreenState {
    pub fn new() -> Self {
        Self {
            tracker: ProgressTracker::new(0),
            labels: Vec::new(),
            failure: None,
            timer: None,
        }
    }

    /// Reset the tracker and start a fresh timer. Any previous run is
    /// cancelled first.
    pub fn start(&mut self, pipeline: &dyn AnalysisPipeline) -> Result<(), PipelineError> {
        self.stop();
        let schedule = ProgressSchedule::from_pipeline(pipeline)?;
        self.labels = pipeline.stages().iter().map(|s| s.label).collect();
        self.tracker = ProgressTracker::new(schedule.step_count());
        self.failure = None;
        self.timer = Some(ProgressTimer::start(schedule));
        Ok(())
    }

    /// Fold pending timer events. Returns true exactly once, when the run
    /// completes.
    pub fn poll(&mut self) -> bool {
        let Some(timer) = &self.timer else {
            return false;
        };

        let mut completed = false;
        for event in timer.poll() {
            completed |= self.tracker.apply(event);
        }
        if completed {
            self.timer = None;
        }
        completed
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn active_label(&self) -> &'static str {
        self.labels
            .get(self.tracker.current_step)
            .copied()
            .unwrap_or("")
    }
}

impl Default for ProcessingScreenState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ProcessingScreen<'a> {
    state: &'a ProcessingScreenState,
    high_contrast: bool,
}

impl<'a> ProcessingScreen<'a> {
    pub fn new(state: &'a ProcessingScreenState, high_contrast: bool) -> Self {
        Self {
            state,
            high_contrast,
        }
    }
}

impl<'a> Widget for ProcessingScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let steps = self.state.labels.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(steps + 2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        self.render_header(chunks[1], buf);
        self.render_active(chunks[2], buf);
        self.render_gauge(chunks[3], buf);
        self.render_steps(chunks[4], buf);
        self.render_tip(chunks[5], buf);
    }
}

impl<'a> ProcessingScreen<'a> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let text = vec![
            Line::from(Span::styled(
                "Analyzing Your Resume",
                theme::title_style(self.high_contrast),
            )),
            Line::from(Span::styled(
                "Our AI is working hard to provide you with the best insights",
                theme::dim(),
            )),
        ];
        Widget::render(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
            buf,
        );
    }

    fn render_active(&self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(Span::styled(
            self.state.active_label(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        Widget::render(
            Paragraph::new(line).alignment(Alignment::Center),
            area,
            buf,
        );
    }

    fn render_gauge(&self, area: Rect, buf: &mut Buffer) {
        let percent = self.state.tracker.percent();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_style(self.high_contrast)),
            )
            .gauge_style(Style::default().fg(theme::accent(self.high_contrast)))
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{}% complete", percent.round() as u32));
        Widget::render(gauge, area, buf);
    }

    fn render_steps(&self, area: Rect, buf: &mut Buffer) {
        let accent = theme::accent(self.high_contrast);
        let done = if self.high_contrast {
            Color::White
        } else {
            theme::SUCCESS
        };

        let lines: Vec<Line> = self
            .state
            .labels
            .iter()
            .enumerate()
            .map(|(step, label)| {
                if self.state.tracker.is_step_complete(step) {
                    Line::from(vec![
                        Span::styled("✓ ", Style::default().fg(done)),
                        Span::raw(*label),
                    ])
                } else if step == self.state.tracker.current_step {
                    Line::from(vec![
                        Span::styled("● ", Style::default().fg(accent)),
                        Span::styled(
                            *label,
                            Style::default().fg(accent).add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled("○ ", theme::dim()),
                        Span::styled(*label, theme::dim()),
                    ])
                }
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(self.high_contrast))
            .title(" Steps ");
        Widget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn render_tip(&self, area: Rect, buf: &mut Buffer) {
        let line = match &self.state.failure {
            Some(reason) => Line::from(vec![
                Span::styled(
                    format!("✗ {}  ", reason),
                    Style::default()
                        .fg(if self.high_contrast {
                            Color::White
                        } else {
                            theme::DESTRUCTIVE
                        })
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("[Enter] Retry", theme::dim()),
            ]),
            None => Line::from(Span::styled(TIP, theme::dim())),
        };
        Widget::render(
            Paragraph::new(line).alignment(Alignment::Center),
            area,
            buf,
        );
    }
}
