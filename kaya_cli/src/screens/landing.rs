/// Landing screen - brand, pitch and the three feature cards
use crate::theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub const FEATURES: [(&str, &str); 3] = [
    (
        "AI-Powered Analysis",
        "Multi-LLM ensemble approach for accurate career insights",
    ),
    (
        "Gap Analysis",
        "Identify exactly what's missing from your ideal resume",
    ),
    (
        "Smart Recommendations",
        "Personalized action plan to improve your career prospects",
    ),
];

pub struct LandingScreen {
    high_contrast: bool,
}

impl LandingScreen {
    pub fn new(high_contrast: bool) -> Self {
        Self { high_contrast }
    }
}

impl Widget for LandingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(chunks[1], buf);
        self.render_features(chunks[2], buf);
        self.render_actions(chunks[3], buf);
        self.render_footer(chunks[5], buf);
    }
}

impl LandingScreen {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let accent = theme::accent(self.high_contrast);

        let text = vec![
            Line::from(Span::styled(
                "◆ Kaya AI",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Intelligent Career Navigator",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Transform your career journey with AI-powered resume analysis."),
            Line::from("Get personalized insights, identify gaps, and receive actionable"),
            Line::from("recommendations to land your dream job."),
        ];

        Widget::render(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
            buf,
        );
    }

    fn render_features(&self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (column, (title, description)) in columns.iter().zip(FEATURES) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_style(self.high_contrast))
                .title(Span::styled(
                    format!(" {} ", title),
                    theme::title_style(self.high_contrast),
                ));
            let inner = block.inner(*column);
            Widget::render(block, *column, buf);

            Widget::render(
                Paragraph::new(description)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Center),
                inner,
                buf,
            );
        }
    }

    fn render_actions(&self, area: Rect, buf: &mut Buffer) {
        let accent = theme::accent(self.high_contrast);
        let primary = Style::default()
            .fg(Color::Black)
            .bg(accent)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" [Enter] Let's Get Started ", primary),
                Span::raw("   "),
                Span::styled(
                    " [l] Learn More ",
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        Widget::render(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
            buf,
        );
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let text = Line::from(Span::styled(
            "Powered by advanced AI • Trusted by professionals worldwide   [?] Help  [q] Quit",
            theme::dim(),
        ));
        Widget::render(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
            buf,
        );
    }
}
