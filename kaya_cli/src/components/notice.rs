/// Transient notifications (toasts) stacked in the top-right corner
use crate::theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_NOTICES: usize = 3;
const NOTICE_WIDTH: u16 = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    pub fn color(&self, high_contrast: bool) -> Color {
        if high_contrast {
            return Color::White;
        }
        match self {
            NoticeLevel::Success => theme::SUCCESS,
            NoticeLevel::Error => theme::DESTRUCTIVE,
            NoticeLevel::Info => theme::ACCENT,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
            NoticeLevel::Info => "i",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: Instant,
}

#[derive(Debug, Clone)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    ttl: Duration,
}

impl NoticeQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    pub fn push_at(&mut self, level: NoticeLevel, message: impl Into<String>, now: Instant) {
        let message = message.into();
        log::debug!("Notice ({:?}): {}", level, message);
        self.notices.push_back(Notice {
            level,
            message,
            raised_at: now,
        });
        while self.notices.len() > MAX_NOTICES {
            self.notices.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    /// Drop notices older than the time to live
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.notices
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notice> + '_ {
        self.notices.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.back()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

pub struct NoticeStack<'a> {
    queue: &'a NoticeQueue,
    high_contrast: bool,
}

impl<'a> NoticeStack<'a> {
    pub fn new(queue: &'a NoticeQueue, high_contrast: bool) -> Self {
        Self {
            queue,
            high_contrast,
        }
    }
}

impl<'a> Widget for NoticeStack<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = NOTICE_WIDTH.min(area.width.saturating_sub(2));
        if width < 8 {
            return;
        }
        let x = area.right().saturating_sub(width + 1);
        let mut y = area.top() + 1;

        for notice in self.queue.iter().rev() {
            if y + 3 > area.bottom() {
                break;
            }
            let color = notice.level.color(self.high_contrast);
            let rect = Rect::new(x, y, width, 3);
            Widget::render(Clear, rect, buf);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(Color::Black));
            let inner = block.inner(rect);
            Widget::render(block, rect, buf);

            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", notice.level.symbol()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(notice.message.as_str()),
            ]);
            Widget::render(Paragraph::new(line).wrap(Wrap { trim: true }), inner, buf);

            y += 3;
        }
    }
}
