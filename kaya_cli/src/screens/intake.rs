/// Intake form screen - company, industry, roles and resume attachment
use crate::components::{cycle_option, TextInput};
use crate::theme;
use kaya_core::intake::ROLE_SLOTS;
use kaya_core::types::{Industry, ResumeFile, Role};
use kaya_core::{IntakeError, IntakeForm, IntakePayload};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    Company,
    Industry,
    Role(usize),
    Resume,
    Submit,
}

impl IntakeField {
    pub const ORDER: [IntakeField; 7] = [
        IntakeField::Company,
        IntakeField::Industry,
        IntakeField::Role(0),
        IntakeField::Role(1),
        IntakeField::Role(2),
        IntakeField::Resume,
        IntakeField::Submit,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// Fields that capture printable keys
    pub fn takes_text(&self) -> bool {
        matches!(self, IntakeField::Company | IntakeField::Resume)
    }
}

/// Turn text pasted or dropped onto the terminal into a path.
///
/// Terminals deliver dropped files as `file://` URIs, quoted paths or
/// backslash-escaped paths depending on the emulator.
pub fn normalize_dropped_path(text: &str) -> PathBuf {
    let mut path = text.trim();

    // Several files dropped at once: keep the first
    if let Some(first) = path.lines().next() {
        path = first.trim();
    }

    if let Some(stripped) = path.strip_prefix("file://") {
        // Decodes every %XX escape, multi-byte UTF-8 included
        return Url::parse(path)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .unwrap_or_else(|| PathBuf::from(stripped));
    }

    for quote in ['\'', '"'] {
        if path.len() >= 2 && path.starts_with(quote) && path.ends_with(quote) {
            return PathBuf::from(&path[1..path.len() - 1]);
        }
    }

    let mut unescaped = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, ' ' | '(' | ')' | '\'' | '&') {
                    unescaped.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        unescaped.push(c);
    }
    PathBuf::from(unescaped)
}

#[derive(Debug, Clone)]
pub struct IntakeScreenState {
    pub form: IntakeForm,
    pub company: TextInput,
    pub resume_path: TextInput,
    pub focus: IntakeField,
}

impl IntakeScreenState {
    pub fn new() -> Self {
        Self {
            form: IntakeForm::new(),
            company: TextInput::with_max_chars(80),
            resume_path: TextInput::new(),
            focus: IntakeField::Company,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Returns false when the focused field does not take text
    pub fn input_char(&mut self, c: char) -> bool {
        match self.focus {
            IntakeField::Company => {
                self.company.push(c);
                self.form.set_company(self.company.value());
                true
            }
            IntakeField::Resume => {
                self.resume_path.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            IntakeField::Company => {
                self.company.backspace();
                self.form.set_company(self.company.value());
            }
            IntakeField::Resume => self.resume_path.backspace(),
            _ => {}
        }
    }

    /// Step the focused dropdown forward or back
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            IntakeField::Industry => {
                let next = cycle_option(&Industry::ALL, self.form.industry, forward, false);
                self.form.select_industry(next);
            }
            IntakeField::Role(slot) if slot < ROLE_SLOTS => {
                let current = self.form.roles[slot];
                // Slot 0 is required and never returns to the placeholder
                let next = cycle_option(&Role::ALL, current, forward, slot > 0);
                let _ = self.form.select_role(slot, next);
            }
            _ => {}
        }
    }

    /// Attach the path typed into the resume field
    pub fn attach_from_input(&mut self) -> Result<&ResumeFile, IntakeError> {
        if self.resume_path.value().trim().is_empty() {
            return Err(IntakeError::MissingResume);
        }
        let path = normalize_dropped_path(self.resume_path.value());
        let result = self.form.attach_resume_path(&path);
        if result.is_ok() {
            self.resume_path.clear();
        }
        result
    }

    /// Attach a file dropped (pasted) onto the terminal
    pub fn attach_dropped(&mut self, text: &str) -> Result<&ResumeFile, IntakeError> {
        let path = normalize_dropped_path(text);
        self.form.attach_resume_path(&path)
    }

    pub fn remove_resume(&mut self) -> Option<ResumeFile> {
        self.form.remove_resume()
    }

    pub fn submit(&self) -> Result<IntakePayload, IntakeError> {
        self.form.submit()
    }
}

impl Default for IntakeScreenState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct IntakeScreen<'a> {
    state: &'a IntakeScreenState,
    high_contrast: bool,
}

impl<'a> IntakeScreen<'a> {
    pub fn new(state: &'a IntakeScreenState, high_contrast: bool) -> Self {
        Self {
            state,
            high_contrast,
        }
    }
}

impl<'a> Widget for IntakeScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_company(chunks[1], buf);
        self.render_industry(chunks[2], buf);
        self.render_roles(chunks[3], buf);
        self.render_resume(chunks[4], buf);
        self.render_submit(chunks[5], buf);
        self.render_footer(chunks[7], buf);
    }
}

impl<'a> IntakeScreen<'a> {
    fn field_block(&self, field: IntakeField, title: String) -> Block<'static> {
        let focused = self.state.focus == field;
        let border_style = if focused {
            Style::default().fg(theme::accent(self.high_contrast))
        } else {
            theme::border_style(self.high_contrast)
        };
        let title_style = if focused {
            theme::title_style(self.high_contrast)
        } else {
            Style::default()
        };

        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(format!(" {} ", title), title_style))
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let text = vec![
            Line::from(Span::styled(
                "Let's Analyze Your Resume",
                theme::title_style(self.high_contrast),
            )),
            Line::from(Span::styled(
                "Provide your target role information and upload your resume",
                theme::dim(),
            )),
        ];
        Widget::render(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
            buf,
        );
    }

    fn render_company(&self, area: Rect, buf: &mut Buffer) {
        let block = self.field_block(IntakeField::Company, "Target Company".to_string());
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let line = if self.state.company.is_empty() {
            Line::from(Span::styled("e.g., Google, Microsoft, Meta", theme::dim()))
        } else {
            let mut spans = vec![Span::raw(self.state.company.value())];
            if self.state.focus == IntakeField::Company {
                spans.push(Span::styled("▏", theme::title_style(self.high_contrast)));
            }
            Line::from(spans)
        };
        Widget::render(Paragraph::new(line), inner, buf);
    }

    fn render_industry(&self, area: Rect, buf: &mut Buffer) {
        let block = self.field_block(IntakeField::Industry, "Industry".to_string());
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let line = dropdown_line(
            self.state.form.industry.map(|i| i.label()),
            "Select industry",
            self.state.focus == IntakeField::Industry,
        );
        Widget::render(Paragraph::new(line), inner, buf);
    }

    fn render_roles(&self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (slot, column) in columns.iter().enumerate().take(ROLE_SLOTS) {
            let field = IntakeField::Role(slot);
            let title = if slot == 0 {
                "Role 1 (Required)".to_string()
            } else {
                format!("Role {} (Optional)", slot + 1)
            };
            let block = self.field_block(field, title);
            let inner = block.inner(*column);
            Widget::render(block, *column, buf);

            let line = dropdown_line(
                self.state.form.roles[slot].map(|r| r.label()),
                "Select role",
                self.state.focus == field,
            );
            Widget::render(Paragraph::new(line), inner, buf);
        }
    }

    fn render_resume(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.focus == IntakeField::Resume;
        let mut block = self.field_block(
            IntakeField::Resume,
            "Upload Resume (PDF or DOCX)".to_string(),
        );
        if self.state.form.resume.is_some() && !focused && !self.high_contrast {
            block = block.border_style(Style::default().fg(theme::SUCCESS));
        }
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let mut lines = Vec::new();
        match &self.state.form.resume {
            Some(file) => {
                let color = if self.high_contrast {
                    Color::White
                } else {
                    theme::SUCCESS
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("▤ {}", file.name),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {:.2} MB", file.size_mb()), theme::dim()),
                    Span::styled("  [Del] Remove", theme::dim()),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Drop your resume here or type a path and press Enter",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    "PDF or DOCX, max 10MB",
                    theme::dim(),
                )));
            }
        }

        let mut path_spans = vec![Span::styled("Path: ", theme::dim())];
        path_spans.push(Span::raw(self.state.resume_path.value()));
        if focused {
            path_spans.push(Span::styled("▏", theme::title_style(self.high_contrast)));
        }
        lines.push(Line::from(path_spans));

        Widget::render(
            Paragraph::new(lines).alignment(Alignment::Left),
            inner,
            buf,
        );
    }

    fn render_submit(&self, area: Rect, buf: &mut Buffer) {
        let accent = theme::accent(self.high_contrast);
        let style = if self.state.focus == IntakeField::Submit {
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled("  Analyze My Resume  ", style)),
        ];
        Widget::render(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
            buf,
        );
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let text = Line::from(vec![
            Span::styled("[Esc] ", theme::dim()),
            Span::raw("Back to Home  "),
            Span::styled("[Tab] ", theme::dim()),
            Span::raw("Next  "),
            Span::styled("[←/→] ", theme::dim()),
            Span::raw("Choose  "),
            Span::styled("[Enter] ", theme::dim()),
            Span::raw("Attach/Submit  "),
            Span::styled("[C-c] ", theme::dim()),
            Span::raw("Quit"),
        ]);
        Widget::render(Paragraph::new(text), area, buf);
    }
}

fn dropdown_line(
    value: Option<&'static str>,
    placeholder: &'static str,
    focused: bool,
) -> Line<'static> {
    let arrows = if focused { " ◂ ▸" } else { " ▾" };
    match value {
        Some(label) => Line::from(vec![Span::raw(label), Span::styled(arrows, theme::dim())]),
        None => Line::from(vec![
            Span::styled(placeholder, theme::dim()),
            Span::styled(arrows, theme::dim()),
        ]),
    }
}
