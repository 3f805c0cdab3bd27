//! Category tabs with a record list or an add/edit form per category

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use super::{Component, View};
use crate::action::Action;
use crate::config::Theme;
use crate::form::{ConfigForm, FormField};
use crate::model::providers::find_provider;
use crate::model::{Category, EnvField};
use crate::panel::{CategoryPanel, PanelMode};
use crate::prefs::Labels;

const LABEL_WIDTH: usize = 12;

pub struct SettingsScreen {
    panels: Vec<CategoryPanel>,
    current: Category,
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            panels: Category::ALL.iter().map(|c| CategoryPanel::new(*c)).collect(),
            current: Category::Llm,
        }
    }

    pub fn current_category(&self) -> Category {
        self.current
    }

    fn index(category: Category) -> usize {
        Category::ALL.iter().position(|c| *c == category).unwrap_or(0)
    }

    pub fn panel(&self) -> &CategoryPanel {
        &self.panels[Self::index(self.current)]
    }

    pub fn panel_mut(&mut self) -> &mut CategoryPanel {
        let idx = Self::index(self.current);
        &mut self.panels[idx]
    }

    pub fn panel_for_mut(&mut self, category: Category) -> &mut CategoryPanel {
        &mut self.panels[Self::index(category)]
    }

    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut CategoryPanel> {
        self.panels.iter_mut()
    }

    /// Switching tabs is only allowed from the list view
    pub fn switch_category(&mut self, forward: bool) -> bool {
        if !matches!(self.panel().mode(), PanelMode::Listing) {
            return false;
        }
        self.current = if forward {
            self.current.next()
        } else {
            self.current.prev()
        };
        true
    }

    fn handle_key_listing(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Tab | KeyCode::Right => Some(Action::NextCategory),
            KeyCode::BackTab | KeyCode::Left => Some(Action::PrevCategory),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Char('n') => Some(Action::BeginAdd),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::BeginEdit),
            KeyCode::Char('d') => Some(Action::RequestDelete),
            KeyCode::Char('a') => Some(Action::Activate),
            KeyCode::Char('t') => Some(Action::Test),
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('T') => Some(Action::CycleTheme),
            KeyCode::Char('L') => Some(Action::ToggleLanguage),
            KeyCode::Char('x') => Some(Action::DismissNotification),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn handle_key_form(&self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Save),
            KeyCode::Char('s') if ctrl => Some(Action::Save),
            KeyCode::Char('t') if ctrl => Some(Action::Test),
            KeyCode::Char('e') if ctrl => Some(Action::FormToggleEnv),
            KeyCode::Char('r') if ctrl => Some(Action::FormToggleReveal),
            KeyCode::Char('u') if ctrl => Some(Action::FormClear),
            KeyCode::Char('c') if ctrl => Some(Action::Quit),
            KeyCode::Tab | KeyCode::Down => Some(Action::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FormPrevField),
            KeyCode::Left => Some(Action::FormCycle(false)),
            KeyCode::Right => Some(Action::FormCycle(true)),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Char(c) if !ctrl => Some(Action::FormInput(c)),
            _ => None,
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let titles: Vec<Line> = Category::ALL
            .iter()
            .map(|c| Line::from(format!("{} {}", c.icon(), c.label())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(Self::index(self.current))
            .style(theme.muted())
            .highlight_style(
                Style::default()
                    .fg(theme.colors.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        frame.render_widget(tabs, area);
    }
}

fn provider_label(category: Category, id: &str) -> String {
    match find_provider(category, id) {
        Some(p) if p.local => format!("{} (local)", p.label),
        Some(p) => p.label.to_string(),
        None => id.to_string(),
    }
}

/// Record list for the list view
pub(crate) fn record_lines(panel: &CategoryPanel, theme: &Theme, labels: &Labels) -> Vec<Line<'static>> {
    if panel.records().is_empty() {
        let text = if panel.is_loaded() {
            labels.no_records
        } else {
            "Loading..."
        };
        return vec![Line::from(Span::styled(text.to_string(), theme.muted()))];
    }

    let category = panel.category();
    let mut lines = Vec::new();
    for (idx, record) in panel.records().iter().enumerate() {
        let selected = idx == panel.selected_index();
        let row_style = if selected { theme.selection_style() } else { theme.text() };

        let mut spans = vec![
            Span::styled(if selected { "▶ " } else { "  " }, row_style),
            Span::styled(record.name.clone(), row_style.add_modifier(Modifier::BOLD)),
        ];
        if record.is_active {
            spans.push(Span::styled(format!("  ● {}", labels.active), theme.success()));
        }
        if record.is_default {
            spans.push(Span::styled(format!("  [{}]", labels.default), theme.accent()));
        }
        lines.push(Line::from(spans));

        let mut detail = vec![provider_label(category, &record.provider)];
        if let Some(model) = &record.model {
            detail.push(model.clone());
        }
        if let Some(dims) = record.dimensions {
            detail.push(format!("{}d", dims));
        }
        if let Some(voice) = &record.voice {
            detail.push(voice.clone());
        }
        if category.has_endpoint() {
            detail.push(record.endpoint_display());
        }
        detail.push(format!("key {}", record.credential_display()));
        lines.push(Line::from(Span::styled(format!("    {}", detail.join(" · ")), theme.muted())));
    }
    lines
}

fn env_placeholder(form: &ConfigForm, field: EnvField, labels: &Labels) -> String {
    format!("{} ${}", labels.uses_env, form.env_var_name(field))
}

/// Form rows for the add/edit view
pub(crate) fn form_lines(form: &ConfigForm, theme: &Theme, labels: &Labels) -> Vec<Line<'static>> {
    let category = form.category();
    let selected_field = form.selected_field();
    let mut lines = Vec::new();

    for field in form.fields() {
        let selected = field == selected_field;
        let label_style = if selected {
            Style::default()
                .fg(theme.colors.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            theme.muted()
        };
        let cursor = if selected && !field.is_selector() { "█" } else { "" };

        let (value, value_style) = match field {
            FormField::Name => (format!("{}{}", form.name, cursor), theme.text()),
            FormField::Provider => (
                format!("◀ {} ▶", provider_label(category, form.provider())),
                theme.accent(),
            ),
            FormField::Endpoint if form.endpoint.use_env => (
                env_placeholder(form, EnvField::Endpoint, labels),
                theme.muted().add_modifier(Modifier::ITALIC),
            ),
            FormField::Endpoint => (format!("{}{}", form.endpoint.text, cursor), theme.text()),
            FormField::Credential if form.credential.use_env => (
                env_placeholder(form, EnvField::Credential, labels),
                theme.muted().add_modifier(Modifier::ITALIC),
            ),
            FormField::Credential if form.is_local() && form.credential.text.is_empty() => {
                (format!("{}(not required)", cursor), theme.muted())
            }
            FormField::Credential => {
                let shown = if form.show_credential {
                    form.credential.text.expose().to_string()
                } else {
                    form.credential.text.masked()
                };
                (format!("{}{}", shown, cursor), theme.text())
            }
            FormField::Model => (format!("{}{}", form.model, cursor), theme.text()),
            FormField::Dimensions => (format!("{}{}", form.dimensions, cursor), theme.text()),
            FormField::Voice => (format!("◀ {} ▶", form.voice), theme.accent()),
        };

        lines.push(Line::from(vec![
            Span::styled(if selected { "▶ " } else { "  " }, label_style),
            Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    let mut hints = vec![
        Span::styled("↵ save  ", theme.success()),
        Span::styled("Esc cancel  ", theme.muted()),
    ];
    if category.supports_test() {
        hints.push(Span::styled("^T test  ", theme.accent()));
    }
    if form.env_option_available(selected_field) {
        hints.push(Span::styled("^E env var  ", theme.accent()));
    }
    if selected_field == FormField::Credential && !form.credential.use_env {
        hints.push(Span::styled("^R show/hide  ", theme.muted()));
    }
    if selected_field.is_selector() {
        hints.push(Span::styled("←/→ choose", theme.muted()));
    } else {
        hints.push(Span::styled("^U clear", theme.warning()));
    }
    lines.push(Line::from(hints));
    lines
}

fn footer_lines(panel: &CategoryPanel, theme: &Theme) -> Vec<Line<'static>> {
    let status = if let Some(op) = panel.pending() {
        Line::from(Span::styled(op.label().to_string(), theme.accent()))
    } else if let Some(feedback) = panel.feedback() {
        let style = if feedback.is_error() { theme.error() } else { theme.success() };
        Line::from(Span::styled(feedback.message().to_string(), style))
    } else {
        Line::from("")
    };

    let hints = if matches!(panel.mode(), PanelMode::Listing) {
        let mut spans = vec![Span::styled("n add  ", theme.success())];
        for action in panel.available_actions() {
            spans.push(Span::styled(format!("{}  ", action.key_hint()), theme.muted()));
        }
        spans.push(Span::styled("r reload  ⇥ category  q quit", theme.muted()));
        Line::from(spans)
    } else {
        Line::from("")
    };

    vec![status, hints]
}

impl Component for SettingsScreen {
    fn handle_event(&self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match self.panel().mode() {
                PanelMode::Listing => self.handle_key_listing(*key),
                _ => self.handle_key_form(*key),
            },
            Event::Paste(text) if !matches!(self.panel().mode(), PanelMode::Listing) => {
                Some(Action::FormPaste(text.clone()))
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, view: &View) {
        let theme = view.theme;
        let panel = self.panel();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(area);

        self.render_tabs(frame, chunks[0], theme);

        let (title, body) = match panel.mode() {
            PanelMode::Listing => (
                format!(" {} ", self.current.label()),
                record_lines(panel, theme, view.labels),
            ),
            PanelMode::Adding(form) => (
                format!(" {} · {} ", view.labels.add_title, self.current.label()),
                form_lines(form, theme, view.labels),
            ),
            PanelMode::Editing { form, .. } => (
                format!(" {} · {} ", view.labels.edit_title, self.current.label()),
                form_lines(form, theme, view.labels),
            ),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme.title_style(focused))
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));
        frame.render_widget(Paragraph::new(body).block(block).wrap(Wrap { trim: false }), chunks[1]);

        frame.render_widget(Paragraph::new(footer_lines(panel, theme)), chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SecretText;
    use crate::model::{ConfigRecord, EnvValue};
    use crate::panel::PanelOutcome;
    use crate::prefs::Language;
    use rstest::rstest;

    fn line_text(lines: &[Line<'static>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn record(id: &str, is_default: bool, is_active: bool) -> ConfigRecord {
        ConfigRecord {
            id: id.to_string(),
            category: Category::Llm,
            name: format!("cfg-{}", id),
            provider: "ollama".to_string(),
            endpoint: Some(EnvValue::literal("http://localhost:11434/v1")),
            credential: Some(EnvValue::literal("")),
            model: Some("llama3".to_string()),
            dimensions: None,
            voice: None,
            is_default,
            is_active,
        }
    }

    fn loaded(screen: &mut SettingsScreen, records: Vec<ConfigRecord>) {
        let panel = screen.panel_mut();
        let ticket = panel.start_load().unwrap();
        panel.apply(ticket.generation, PanelOutcome::Loaded(Ok(records)));
    }

    #[rstest]
    #[case(KeyCode::Char('n'), Some(Action::BeginAdd))]
    #[case(KeyCode::Char('d'), Some(Action::RequestDelete))]
    #[case(KeyCode::Tab, Some(Action::NextCategory))]
    #[case(KeyCode::Char('q'), Some(Action::Quit))]
    fn test_listing_keys(#[case] code: KeyCode, #[case] expected: Option<Action>) {
        let screen = SettingsScreen::new();
        assert_eq!(screen.handle_event(&key(code, KeyModifiers::NONE)), expected);
    }

    #[test]
    fn test_form_keys_type_instead_of_commanding() {
        let mut screen = SettingsScreen::new();
        assert!(screen.panel_mut().begin_add());
        assert_eq!(
            screen.handle_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::FormInput('q'))
        );
        assert_eq!(
            screen.handle_event(&key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Some(Action::FormToggleEnv)
        );
        assert_eq!(
            screen.handle_event(&Event::Paste("sk-abc".to_string())),
            Some(Action::FormPaste("sk-abc".to_string()))
        );
        assert_eq!(screen.handle_event(&key(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Cancel));
    }

    #[test]
    fn test_switch_category_blocked_while_editing() {
        let mut screen = SettingsScreen::new();
        assert!(screen.switch_category(true));
        assert_eq!(screen.current_category(), Category::Embedding);
        screen.panel_mut().begin_add();
        assert!(!screen.switch_category(true));
        assert_eq!(screen.current_category(), Category::Embedding);
    }

    #[test]
    fn test_record_lines_mark_active_and_default() {
        let mut screen = SettingsScreen::new();
        loaded(&mut screen, vec![record("1", true, true), record("2", false, false)]);
        let out = line_text(&record_lines(screen.panel(), &Theme::dark(), Language::En.labels()));
        assert!(out.contains("▶ cfg-1  ● active  [default]"));
        assert!(out.contains("Ollama (local) · llama3 · http://localhost:11434/v1"));
    }

    #[test]
    fn test_empty_list_message() {
        let mut screen = SettingsScreen::new();
        loaded(&mut screen, vec![]);
        let out = line_text(&record_lines(screen.panel(), &Theme::dark(), Language::En.labels()));
        assert!(out.contains("No configurations yet"));
    }

    #[test]
    fn test_form_shows_env_placeholders() {
        let mut form = ConfigForm::new(Category::Embedding);
        form.set_endpoint_env(true);
        form.set_credential_env(true);
        let out = line_text(&form_lines(&form, &Theme::dark(), Language::En.labels()));
        assert!(out.contains("uses $EMBEDDING_HOST"));
        assert!(out.contains("uses $EMBEDDING_API_KEY"));
        assert!(out.contains("1536"));
    }

    #[test]
    fn test_form_masks_credential_until_revealed() {
        let mut form = ConfigForm::new(Category::Llm);
        form.credential.text = SecretText::new("sk-secret");
        let out = line_text(&form_lines(&form, &Theme::dark(), Language::En.labels()));
        assert!(!out.contains("sk-secret"));
        assert!(out.contains("•••••••••"));

        form.show_credential = true;
        let out = line_text(&form_lines(&form, &Theme::dark(), Language::En.labels()));
        assert!(out.contains("sk-secret"));
    }

    #[test]
    fn test_local_provider_credential_not_required() {
        let mut form = ConfigForm::new(Category::Tts);
        form.select_provider("kokoro");
        let out = line_text(&form_lines(&form, &Theme::dark(), Language::En.labels()));
        assert!(out.contains("(not required)"));
        assert!(out.contains("Kokoro (local)"));
        assert!(out.contains("◀ alloy ▶"));
    }
}
