/// Report screen - tabbed analysis results and the feedback widget
use crate::components::TextInput;
use crate::theme;
use kaya_core::feedback::{FeedbackError, FeedbackForm, FeedbackOutcome, Sentiment};
use kaya_core::report::{AnalysisReport, GapDetail};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget, Wrap},
};
use std::cell::Cell;

const SCORE_BAR_WIDTH: usize = 20;
const COMMENT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTab {
    Analysis,
    IdealResume,
    Gaps,
    Recommendations,
}

impl ReportTab {
    pub const ALL: [ReportTab; 4] = [
        ReportTab::Analysis,
        ReportTab::IdealResume,
        ReportTab::Gaps,
        ReportTab::Recommendations,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportTab::Analysis => "Analysis",
            ReportTab::IdealResume => "Ideal Resume",
            ReportTab::Gaps => "Gap Analysis",
            ReportTab::Recommendations => "Recommendations",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ReportTab::Analysis => 0,
            ReportTab::IdealResume => 1,
            ReportTab::Gaps => 2,
            ReportTab::Recommendations => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct ReportScreenState {
    pub report: AnalysisReport,
    pub tab: ReportTab,
    scroll: [u16; 4],
    pub feedback: FeedbackForm,
    pub comment: TextInput,
    pub editing_comment: bool,
    /// Inner width of the body as last drawn, 0 before the first frame
    body_width: Cell<u16>,
}

impl ReportScreenState {
    pub fn new(report: AnalysisReport) -> Self {
        Self {
            report,
            tab: ReportTab::Analysis,
            scroll: [0; 4],
            feedback: FeedbackForm::new(),
            comment: TextInput::with_max_chars(COMMENT_MAX_CHARS),
            editing_comment: false,
            body_width: Cell::new(0),
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = ReportTab::ALL.get(index) {
            self.tab = *tab;
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll[self.tab.index()]
    }

    /// Rows the current tab occupies once wrapped to the drawn width
    fn body_height(&self) -> usize {
        let lines = tab_lines(&self.report, self.tab, false);
        match self.body_width.get() {
            0 => lines.len(),
            width => Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .line_count(width),
        }
    }

    pub fn scroll_down(&mut self) {
        let max = u16::try_from(self.body_height()).unwrap_or(u16::MAX);
        let offset = &mut self.scroll[self.tab.index()];
        *offset = offset.saturating_add(1).min(max.saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        let offset = &mut self.scroll[self.tab.index()];
        *offset = offset.saturating_sub(1);
    }

    pub fn choose(&mut self, sentiment: Sentiment) {
        self.feedback.choose(sentiment);
    }

    pub fn begin_comment(&mut self) {
        if !self.feedback.is_submitted() {
            self.editing_comment = true;
        }
    }

    pub fn finish_comment(&mut self) {
        self.editing_comment = false;
    }

    pub fn input_char(&mut self, c: char) {
        if self.editing_comment && self.comment.push(c) {
            self.feedback.set_comment(self.comment.value());
        }
    }

    pub fn input_str(&mut self, text: &str) {
        if self.editing_comment {
            self.comment.push_str(text);
            self.feedback.set_comment(self.comment.value());
        }
    }

    pub fn backspace(&mut self) {
        if self.editing_comment {
            self.comment.backspace();
            self.feedback.set_comment(self.comment.value());
        }
    }

    pub fn submit_feedback(&mut self) -> Result<FeedbackOutcome, FeedbackError> {
        self.editing_comment = false;
        self.feedback.submit()
    }
}

/// Body of one report tab. `high_contrast` only affects colours.
pub fn tab_lines(
    report: &AnalysisReport,
    tab: ReportTab,
    high_contrast: bool,
) -> Vec<Line<'_>> {
    let heading = theme::title_style(high_contrast);
    let mut lines = Vec::new();

    match tab {
        ReportTab::Analysis => {
            lines.push(Line::from(Span::styled("Multi-LLM Ensemble Scores", heading)));
            for score in &report.analysis.scores {
                // Scores from a deserialized report are not clamped
                let filled = usize::from(score.score.min(100)) * SCORE_BAR_WIDTH / 100;
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<10}", score.model)),
                    Span::styled(
                        "█".repeat(filled),
                        Style::default().fg(theme::accent(high_contrast)),
                    ),
                    Span::styled("░".repeat(SCORE_BAR_WIDTH - filled), theme::dim()),
                    Span::raw(format!(" {}/100", score.score)),
                ]));
            }
            lines.push(Line::from(vec![
                Span::styled("  Ensemble Average: ", theme::dim()),
                Span::styled(
                    format!("{:.1}/100", report.analysis.average_score()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(""));

            let good = Style::default().fg(if high_contrast {
                Color::White
            } else {
                theme::SUCCESS
            });
            lines.push(Line::from(Span::styled("Strengths", heading)));
            for item in &report.analysis.strengths {
                lines.push(Line::from(vec![
                    Span::styled("  ✓ ", good),
                    Span::raw(item.as_str()),
                ]));
            }
            lines.push(Line::from(""));

            let bad = Style::default().fg(if high_contrast {
                Color::White
            } else {
                theme::WARNING
            });
            lines.push(Line::from(Span::styled("Areas to Improve", heading)));
            for item in &report.analysis.weaknesses {
                lines.push(Line::from(vec![
                    Span::styled("  ! ", bad),
                    Span::raw(item.as_str()),
                ]));
            }
        }
        ReportTab::IdealResume => {
            let ideal = &report.ideal_resume;
            lines.push(Line::from(Span::styled("Professional Summary", heading)));
            lines.push(Line::from(format!("  {}", ideal.summary)));
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled("Key Experience", heading)));
            for item in &ideal.experience {
                lines.push(Line::from(format!("  • {}", item)));
            }
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled("Essential Skills", heading)));
            lines.push(Line::from(format!("  {}", ideal.skills.join(" · "))));
        }
        ReportTab::Gaps => {
            for (i, gap) in report.gaps.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::from(""));
                }
                let color = theme::level_color(gap.severity, high_contrast);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", gap.severity),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        gap.category.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(format!("  {}", gap.description)));

                let items = gap.detail.items();
                let rendered = match gap.detail {
                    GapDetail::MissingKeywords(_) => items.join(", "),
                    GapDetail::Examples(_) | GapDetail::Suggestions(_) => items.join(" · "),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {} ", gap.detail.heading()), theme::dim()),
                    Span::raw(rendered),
                ]));
            }
        }
        ReportTab::Recommendations => {
            for (i, rec) in report.recommendations.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::from(""));
                }
                let color = theme::level_color(rec.priority, high_contrast);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}. {}", i + 1, rec.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  [{} PRIORITY]", rec.priority),
                        Style::default().fg(color),
                    ),
                ]));
                lines.push(Line::from(format!("  {}", rec.description)));
                for item in &rec.action_items {
                    lines.push(Line::from(format!("    → {}", item)));
                }
            }
        }
    }

    lines
}

/// Plain-text rendering of the whole report, every tab in order
pub fn report_text(report: &AnalysisReport) -> String {
    let mut out = format!("Overall Score: {:.1}/10\n", report.overall_score);
    for tab in ReportTab::ALL {
        out.push_str(&format!("\n== {} ==\n", tab.title()));
        for line in tab_lines(report, tab, true) {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            out.push_str(text.trim_end());
            out.push('\n');
        }
    }
    out
}

pub struct ReportScreen<'a> {
    state: &'a ReportScreenState,
    high_contrast: bool,
}

impl<'a> ReportScreen<'a> {
    pub fn new(state: &'a ReportScreenState, high_contrast: bool) -> Self {
        Self {
            state,
            high_contrast,
        }
    }
}

impl<'a> Widget for ReportScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_tabs(chunks[1], buf);
        self.render_body(chunks[2], buf);
        self.render_feedback(chunks[3], buf);
        self.render_footer(chunks[4], buf);
    }
}

impl<'a> ReportScreen<'a> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let report = &self.state.report;
        let score_color = theme::score_color(report.score_band(), self.high_contrast);

        let text = vec![
            Line::from(Span::styled(
                "Your Career Analysis Report",
                theme::title_style(self.high_contrast),
            )),
            Line::from(vec![
                Span::styled("Overall Score: ", theme::dim()),
                Span::styled(
                    format!("{:.1}", report.overall_score),
                    Style::default()
                        .fg(score_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("/10", theme::dim()),
            ]),
        ];
        Widget::render(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
            buf,
        );
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let titles: Vec<String> = ReportTab::ALL
            .iter()
            .map(|t| format!("{} {}", t.index() + 1, t.title()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.state.tab.index())
            .style(theme::dim())
            .highlight_style(
                Style::default()
                    .fg(theme::accent(self.high_contrast))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" │ ");
        Widget::render(tabs, area, buf);
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(self.high_contrast))
            .title(Span::styled(
                format!(" {} ", self.state.tab.title()),
                theme::title_style(self.high_contrast),
            ));
        self.state.body_width.set(block.inner(area).width);
        let lines = tab_lines(&self.state.report, self.state.tab, self.high_contrast);
        Widget::render(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.state.scroll(), 0)),
            area,
            buf,
        );
    }

    fn render_feedback(&self, area: Rect, buf: &mut Buffer) {
        let accent = theme::accent(self.high_contrast);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(self.high_contrast))
            .title(" Feedback ");
        let feedback = &self.state.feedback;

        let lines = if feedback.is_submitted() {
            let color = if self.high_contrast {
                Color::White
            } else {
                theme::SUCCESS
            };
            vec![
                Line::from(Span::styled(
                    "✓ Thank you for your feedback!",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Your input helps us improve our analysis.",
                    theme::dim(),
                )),
            ]
        } else {
            let option = |sentiment: Sentiment, key: &str| {
                let label = format!("[{}] {}", key, sentiment.label());
                if feedback.sentiment() == Some(sentiment) {
                    Span::styled(
                        label,
                        Style::default()
                            .fg(Color::Black)
                            .bg(accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw(label)
                }
            };

            let mut comment = vec![
                Span::styled("Comment: ", theme::dim()),
                Span::raw(self.state.comment.value()),
            ];
            if self.state.editing_comment {
                comment.push(Span::styled("▏", Style::default().fg(accent)));
            } else if self.state.comment.is_empty() {
                comment.push(Span::styled("(optional) [c] to edit", theme::dim()));
            }

            vec![
                Line::from(vec![
                    Span::raw("Was this analysis helpful?  "),
                    option(Sentiment::Helpful, "h"),
                    Span::raw("  "),
                    option(Sentiment::NeedsImprovement, "n"),
                    Span::styled("   [s] Submit Feedback", theme::dim()),
                ]),
                Line::from(comment),
            ]
        };

        Widget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let text = if self.state.editing_comment {
            Line::from(vec![
                Span::styled("[Enter/Esc] ", theme::dim()),
                Span::raw("Done editing"),
            ])
        } else {
            Line::from(vec![
                Span::styled("[d] ", theme::dim()),
                Span::raw("Download Report  "),
                Span::styled("[a] ", theme::dim()),
                Span::raw("Analyze Another Resume  "),
                Span::styled("[←/→] ", theme::dim()),
                Span::raw("Tabs  "),
                Span::styled("[j/k] ", theme::dim()),
                Span::raw("Scroll  "),
                Span::styled("[q] ", theme::dim()),
                Span::raw("Quit"),
            ])
        };
        Widget::render(Paragraph::new(text), area, buf);
    }
}
