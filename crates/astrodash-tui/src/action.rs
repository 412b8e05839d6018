//! Actions flowing through the app loop. Key handlers produce them, the
//! data bridge and background loads send them over the channel.

use astrodash_core::{Rover, Snapshot};

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A toast shown above the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    SwitchScreen(ScreenId),

    /// The store published a new snapshot.
    StateChanged(Snapshot),

    // ── Data ─────────────────────────────────────────────────────────
    SelectRover(Rover),
    /// Invalidate and reload whatever the active screen shows.
    Refresh,
    ReloadApod,

    Notify(Notification),
}
