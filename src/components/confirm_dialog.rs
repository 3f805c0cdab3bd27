use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{Component, View};
use crate::action::Action;
use crate::model::Category;

/// Record awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub category: Category,
    pub id: String,
    pub name: String,
}

/// Yes/no dialog guarding record deletion
#[derive(Default)]
pub struct ConfirmDialog {
    pending: Option<PendingDelete>,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, pending: PendingDelete) {
        self.pending = Some(pending);
    }

    /// Close the dialog, handing back what it was asking about
    pub fn take(&mut self) -> Option<PendingDelete> {
        self.pending.take()
    }

    pub fn is_visible(&self) -> bool {
        self.pending.is_some()
    }
}

impl Component for ConfirmDialog {
    fn handle_event(&self, event: &Event) -> Option<Action> {
        if !self.is_visible() {
            return None;
        }
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::RejectDelete),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _focused: bool, view: &View) {
        let Some(pending) = &self.pending else {
            return;
        };
        let theme = view.theme;

        let width = (area.width * 50 / 100).clamp(36.min(area.width), 70.min(area.width));
        let height = 7.min(area.height);
        let dialog_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );
        frame.render_widget(Clear, dialog_area);

        let warn = theme.colors.warning;
        let block = Block::default()
            .title(format!(" {} ", view.labels.delete_prompt))
            .title_style(Style::default().fg(warn).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(warn));

        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", pending.category.label()), theme.muted()),
                Span::styled(
                    format!("'{}'", pending.name),
                    theme.text().add_modifier(Modifier::BOLD),
                ),
                Span::styled("?", theme.muted()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Y]", theme.success().add_modifier(Modifier::BOLD)),
                Span::raw(" Delete   "),
                Span::styled("[N/Esc]", theme.error().add_modifier(Modifier::BOLD)),
                Span::raw(" Keep"),
            ]),
        ];

        let para = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(para, dialog_area);
    }
}
