//! Application core: event loop, screen management, action dispatch.
//!
//! Snapshots arrive from the store through the [`DataBridge`]; each one is
//! handed to every screen and marks the frame dirty. After a frame is drawn
//! the app asks the dashboard to fetch whatever that snapshot lacks.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use astrodash_core::{CoreError, Dashboard, LoadOutcome, ResourceKey, Rover, Snapshot};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge::DataBridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

pub struct App {
    dashboard: Dashboard,
    /// Selected once the loop starts.
    initial_rover: Option<Rover>,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    /// Latest snapshot from the store.
    snapshot: Option<Snapshot>,
    /// Snapshot version whose data needs were last dispatched.
    dispatched_version: Option<u64>,
    /// Something changed since the last frame.
    dirty: bool,
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(dashboard: Dashboard, initial_rover: Option<Rover>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            dashboard,
            initial_rover,
            active_screen: ScreenId::default(),
            screens: create_screens().into_iter().collect(),
            running: true,
            snapshot: None,
            dispatched_version: None,
            dirty: true,
            notification: None,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let _bridge =
            DataBridge::connect(Arc::clone(self.dashboard.store()), self.action_tx.clone());
        if let Some(rover) = self.initial_rover.take() {
            self.action_tx.send(Action::SelectRover(rover))?;
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // toast expiry
            Duration::from_millis(33),  // ~30 FPS
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if action == Action::Render && self.dirty {
                    tui.draw(|frame| self.render(frame))?;
                    self.dirty = false;
                    self.dispatch_needs();
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(action) = global_action(self.active_screen, key) {
            return Ok(Some(action));
        }
        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(..) => self.dirty = true,

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    self.active_screen = *target;
                    self.dirty = true;
                }
            }

            Action::StateChanged(snapshot) => {
                self.snapshot = Some(snapshot.clone());
                self.dirty = true;
            }

            Action::SelectRover(rover) => {
                let rover = *rover;
                self.spawn_load(format!("select {}", rover.label()), move |d| async move {
                    d.select_rover(rover).await
                });
            }

            Action::Refresh => {
                let keys = self.refresh_keys();
                if keys.is_empty() {
                    self.action_tx
                        .send(Action::Notify(Notification::info("Select a rover first")))?;
                }
                for key in keys {
                    self.spawn_load(format!("refresh {key}"), move |d| async move {
                        d.refresh(key).await
                    });
                }
            }

            Action::ReloadApod => {
                self.spawn_load("refresh apod".to_owned(), |d| async move {
                    d.refresh(ResourceKey::Apod).await
                });
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
                self.dirty = true;
            }

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= NOTIFICATION_TTL)
                {
                    self.notification = None;
                    self.dirty = true;
                }
            }

            Action::Render => {}
        }

        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }

        Ok(())
    }

    /// Resources the `r` key reloads on the active screen.
    fn refresh_keys(&self) -> Vec<ResourceKey> {
        match self.active_screen {
            ScreenId::Apod => vec![ResourceKey::Apod],
            ScreenId::Rovers => match self.snapshot.as_ref().and_then(|s| s.selected_rover) {
                Some(rover) => vec![ResourceKey::Photos(rover), ResourceKey::Manifest(rover)],
                None => Vec::new(),
            },
        }
    }

    /// Ask the dashboard for whatever the last drawn snapshot lacks, once
    /// per snapshot version.
    fn dispatch_needs(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        if self.dispatched_version == Some(snapshot.version()) {
            return;
        }
        self.dispatched_version = Some(snapshot.version());
        // Handles are dropped; the tasks report through the store.
        let _ = self
            .dashboard
            .dispatch_needs(snapshot, Local::now().date_naive());
    }

    /// Run a load in the background. Failures are already in the store;
    /// the toast just makes them visible from any screen.
    fn spawn_load<F, Fut>(&self, what: String, load: F)
    where
        F: FnOnce(Dashboard) -> Fut + Send + 'static,
        Fut: Future<Output = Result<LoadOutcome, CoreError>> + Send + 'static,
    {
        let dashboard = self.dashboard.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match load(dashboard).await {
                Ok(outcome) => debug!(%what, ?outcome, "load finished"),
                Err(e) => {
                    warn!(%what, error = %e, "load failed");
                    let _ = tx.send(Action::Notify(Notification::error(failure_message(
                        &what, &e,
                    ))));
                }
            }
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // screen content
            Constraint::Length(1), // tab bar
            Constraint::Length(1), // status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(selected);

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let indicator = match &self.snapshot {
            Some(snapshot) if snapshot.is_loading() => {
                let keys: Vec<String> = snapshot.loading.iter().map(ToString::to_string).collect();
                Span::styled(format!("◐ loading {}", keys.join(", ")), theme::loading())
            }
            _ => Span::styled("● idle", theme::success()),
        };

        let screen_hints = match self.screens.get(&self.active_screen) {
            Some(screen) => screen.hints(),
            None => "",
        };
        let hints = Span::styled(
            format!(" │ {screen_hints}  a apod  tab screens  q quit"),
            theme::key_hint(),
        );

        let line = Line::from(vec![Span::raw(" "), indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Keys the app claims before the active screen sees them.
fn global_action(active: ScreenId, key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
            Some(Action::Quit)
        }
        (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
            let n = u8::try_from(c).ok()? - b'0';
            ScreenId::from_number(n).map(Action::SwitchScreen)
        }
        (KeyModifiers::NONE, KeyCode::Tab) => Some(Action::SwitchScreen(active.next())),
        (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(Action::SwitchScreen(active.prev())),
        (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Action::Refresh),
        (KeyModifiers::NONE, KeyCode::Char('a')) => Some(Action::ReloadApod),
        _ => None,
    }
}

/// Toast text for a failed load. Failures that may clear up on their own
/// get a retry hint.
fn failure_message(what: &str, error: &CoreError) -> String {
    match error {
        CoreError::Fetch(fetch) if fetch.is_retryable() => {
            format!("{what}: {fetch} (press r to retry)")
        }
        _ => format!("{what}: {error}"),
    }
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let msg_len = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16.min(area.height);

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (color, icon) = match notification.level {
        NotificationLevel::Error => (theme::FLARE_RED, "✗"),
        NotificationLevel::Info => (theme::NEBULA_BLUE, "·"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::VOID));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(notification.message.as_str(), theme::text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
