use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// A screen or panel driven by the app loop.
///
/// Components never fetch: they turn keys into [`Action`]s and draw the
/// latest view they were handed through [`update`](Self::update).
pub trait Component: Send {
    /// Handle a key the app did not claim. Return an Action to dispatch.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Key hints for the status bar.
    fn hints(&self) -> &'static str {
        ""
    }
}
