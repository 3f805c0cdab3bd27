use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{Component, View};
use crate::config::Theme;
use crate::model::{Category, PortsInfo, StatusSnapshot};
use crate::prefs::{Labels, Preferences};

/// Read-only per-category status, backend ports and current preferences
#[derive(Default)]
pub struct StatusOverview {
    snapshot: Option<StatusSnapshot>,
    ports: Option<PortsInfo>,
    loading: bool,
    prefs: Preferences,
}

impl StatusOverview {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            ..Default::default()
        }
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    pub fn set_snapshot(&mut self, snapshot: Option<StatusSnapshot>) {
        self.loading = false;
        self.snapshot = snapshot;
    }

    pub fn set_ports(&mut self, ports: Option<PortsInfo>) {
        self.ports = ports;
    }

    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }

    pub fn snapshot(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    fn lines(&self, theme: &Theme, labels: &Labels) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for category in Category::ALL {
            let status = self.snapshot.as_ref().and_then(|s| s.get(*category));
            let mut spans = vec![Span::styled(format!("{} {:<15}", category.icon(), category.label()), theme.text())];
            match status {
                Some(s) if s.configured => {
                    spans.push(Span::styled("● ", theme.success()));
                    spans.push(Span::styled(
                        s.active_name.clone().unwrap_or_else(|| "-".to_string()),
                        theme.text().add_modifier(Modifier::BOLD),
                    ));
                    lines.push(Line::from(spans));

                    let detail = [s.provider.as_deref(), s.model.as_deref()]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" / ");
                    if !detail.is_empty() {
                        lines.push(Line::from(Span::styled(format!("    {}", detail), theme.muted())));
                    }
                }
                Some(_) => {
                    spans.push(Span::styled("○ ", theme.warning()));
                    spans.push(Span::styled(labels.not_configured.to_string(), theme.warning()));
                    lines.push(Line::from(spans));
                }
                None => {
                    spans.push(Span::styled("? ", theme.muted()));
                    spans.push(Span::styled(labels.unknown.to_string(), theme.muted()));
                    lines.push(Line::from(spans));
                }
            }
        }

        lines.push(Line::from(""));
        if let Some(snapshot) = &self.snapshot {
            let summary = snapshot.summary();
            lines.push(Line::from(Span::styled(
                format!("{}/{} configured", summary.configured, summary.total),
                theme.accent(),
            )));
        } else if self.loading {
            lines.push(Line::from(Span::styled("Loading...", theme.muted())));
        }

        if let Some(ports) = &self.ports {
            let port = |p: Option<u16>| p.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(Span::styled(
                format!("ports {} / {}", port(ports.backend), port(ports.frontend)),
                theme.muted(),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            labels.preferences.to_string(),
            theme.text().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", labels.theme), theme.muted()),
            Span::styled(self.prefs.theme.to_string(), theme.text()),
            Span::styled("  [T]", theme.muted()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", labels.language), theme.muted()),
            Span::styled(self.prefs.language.to_string(), theme.text()),
            Span::styled("  [L]", theme.muted()),
        ]));

        lines
    }
}

impl Component for StatusOverview {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, view: &View) {
        let block = Block::default()
            .title(format!(" {} ", view.labels.status))
            .title_style(view.theme.title_style(focused))
            .borders(Borders::ALL)
            .border_style(view.theme.border_style(focused));

        let para = Paragraph::new(self.lines(view.theme, view.labels))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(para, area);
    }
}
