use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::App;
use crate::components::{Component, View};

const STATUS_WIDTH: u16 = 34;

impl App {
    pub(super) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let view = View {
            theme: &self.theme,
            labels: self.language.labels(),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.background)),
            area,
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(5)])
            .split(area);

        let header = Line::from(vec![
            Span::styled(
                format!(" {} ", view.labels.title),
                self.theme.title_style(true).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("· {}", self.header_context()), self.theme.muted()),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(STATUS_WIDTH), Constraint::Min(30)])
            .split(rows[1]);

        let dialog_open = self.confirm.is_visible();
        self.status.render(frame, columns[0], false, &view);
        self.settings.render(frame, columns[1], !dialog_open, &view);

        if dialog_open {
            self.confirm.render(frame, area, true, &view);
        }
        self.notifications.render(frame, area, &self.theme);
    }

    fn header_context(&self) -> String {
        match self.settings.panel().pending() {
            Some(op) => op.label().to_string(),
            None => self.settings.current_category().label().to_string(),
        }
    }
}
