use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::Theme;
use crate::panel::Feedback;

const TOAST_DURATION_MS: u64 = 4000;
const ERROR_DURATION_MS: u64 = 8000;
const MAX_VISIBLE: usize = 4;
const TOAST_WIDTH: u16 = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "󰋼",
            NotificationLevel::Success => "󰄬",
            NotificationLevel::Warning => "󰀦",
            NotificationLevel::Error => "󰅚",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: Option<String>,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>) -> Self {
        let ms = if level == NotificationLevel::Error {
            ERROR_DURATION_MS
        } else {
            TOAST_DURATION_MS
        };
        Self {
            level,
            title: title.into(),
            message: None,
            created_at: Instant::now(),
            duration: Duration::from_millis(ms),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[cfg(test)]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    fn height(&self) -> u16 {
        if self.message.is_some() {
            4
        } else {
            3
        }
    }
}

/// Transient toasts stacked in the top-right corner
#[derive(Default)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
        while self.queue.len() > MAX_VISIBLE * 2 {
            self.queue.pop_front();
        }
    }

    pub fn info(&mut self, title: impl Into<String>) {
        self.push(Notification::new(NotificationLevel::Info, title));
    }

    pub fn warning_with_message(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(Notification::new(NotificationLevel::Warning, title).with_message(message));
    }

    pub fn error_with_message(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(Notification::new(NotificationLevel::Error, title).with_message(message));
    }

    /// Toast mirroring a panel's inline feedback
    pub fn feedback(&mut self, title: impl Into<String>, feedback: &Feedback) {
        let level = match feedback {
            Feedback::Info(_) => NotificationLevel::Info,
            Feedback::Success(_) => NotificationLevel::Success,
            Feedback::Error(_) => NotificationLevel::Error,
        };
        self.push(Notification::new(level, title).with_message(feedback.message()));
    }

    /// Drop expired toasts; true when anything was removed
    pub fn tick(&mut self) -> bool {
        let before = self.queue.len();
        self.queue.retain(|n| !n.is_expired());
        self.queue.len() != before
    }

    pub fn dismiss_first(&mut self) {
        self.queue.pop_front();
    }

    pub fn count(&self) -> usize {
        self.queue.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter().take(MAX_VISIBLE)
    }

    pub fn render(&self, frame: &mut Frame, screen: Rect, theme: &Theme) {
        let width = TOAST_WIDTH.min(screen.width);
        let x = screen.x + screen.width.saturating_sub(width + 1);
        let mut y = screen.y + 1;

        for notification in self.visible() {
            let height = notification.height();
            if y + height > screen.y + screen.height {
                break;
            }
            self.render_one(frame, Rect::new(x, y, width, height), notification, theme);
            y += height;
        }
    }

    fn render_one(&self, frame: &mut Frame, area: Rect, notification: &Notification, theme: &Theme) {
        frame.render_widget(Clear, area);

        let styles = &theme.notifications;
        let (fg, bg) = match notification.level {
            NotificationLevel::Info => styles.info,
            NotificationLevel::Success => styles.success,
            NotificationLevel::Warning => styles.warning,
            NotificationLevel::Error => styles.error,
        };
        let base = Style::default().fg(fg).bg(bg);
        let inner_width = area.width.saturating_sub(2) as usize;

        let mut lines = vec![Line::from(Span::styled(
            truncate_string(
                &format!("{} {}", notification.level.icon(), notification.title),
                inner_width,
            ),
            base.add_modifier(Modifier::BOLD),
        ))];
        if let Some(message) = &notification.message {
            lines.push(Line::from(Span::styled(truncate_string(message, inner_width), base)));
        }

        let block = Block::default().borders(Borders::ALL).border_style(base).style(base);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

pub(crate) fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 1 {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}
