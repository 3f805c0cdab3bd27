pub mod confirm_dialog;
pub mod notification;
pub mod settings_screen;
pub mod status_overview;

use crossterm::event::Event;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::config::Theme;
use crate::prefs::Labels;

pub use confirm_dialog::ConfirmDialog;
pub use notification::NotificationManager;
pub use settings_screen::SettingsScreen;
pub use status_overview::StatusOverview;

/// Styling and wording shared by every component for one frame
pub struct View<'a> {
    pub theme: &'a Theme,
    pub labels: &'a Labels,
}

pub trait Component {
    fn handle_event(&self, _event: &Event) -> Option<Action> {
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, view: &View);
}
