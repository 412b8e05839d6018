//! Rover photo browser: rover tabs, mission manifest, and the latest photos
//! of the selected rover.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use astrodash_core::Rover;
use astrodash_core::view::{
    self, DASHBOARD_TITLE, ManifestSummary, NO_PHOTOS_MESSAGE, PhotoCard, PhotosView, RoverTab,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct RoversScreen {
    tabs: Vec<RoverTab>,
    photos: PhotosView,
    manifest: Option<ManifestSummary>,
    /// Tab under the cursor; `Enter` makes it the selection.
    cursor: usize,
    /// First photo card shown.
    scroll: usize,
    selected: Option<Rover>,
}

impl RoversScreen {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            photos: PhotosView::NoSelection,
            manifest: None,
            cursor: 0,
            scroll: 0,
            selected: None,
        }
    }

    fn card_count(&self) -> usize {
        match &self.photos {
            PhotosView::Photos { cards, .. } => cards.len(),
            _ => 0,
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        let len = self.tabs.len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::with_capacity(self.tabs.len() * 2);
        for (idx, tab) in self.tabs.iter().enumerate() {
            let style = if idx == self.cursor {
                theme::rover_cursor()
            } else if tab.selected {
                theme::rover_selected()
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(format!(" {} ", tab.label), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_manifest(&self, frame: &mut Frame, area: Rect) {
        let lines = match &self.manifest {
            Some(m) => {
                let sol = m
                    .max_sol
                    .map_or_else(|| "?".to_owned(), |sol| sol.to_string());
                let total = m
                    .total_photos
                    .map_or_else(|| "?".to_owned(), |n| n.to_string());
                vec![
                    Line::from(vec![
                        Span::styled(m.rover_name.as_str(), theme::title_style()),
                        Span::styled(format!("  {}", m.status), theme::success()),
                    ]),
                    Line::styled(
                        format!("Launched {}  Landed {}", m.launch_date, m.landing_date),
                        theme::muted(),
                    ),
                    Line::styled(
                        format!("Latest sol {sol} on {}  {total} photos", m.max_date),
                        theme::muted(),
                    ),
                ]
            }
            None => Vec::new(),
        };
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_photos(&self, frame: &mut Frame, area: Rect) {
        let none: &[PhotoCard] = &[];
        let (header, cards) = match &self.photos {
            PhotosView::NoSelection => (
                Line::styled("Select a rover with ←/→ and Enter.", theme::muted()),
                none,
            ),
            PhotosView::Loading { rover } => (
                Line::styled(
                    format!("Loading {} photos...", rover.label()),
                    theme::loading(),
                ),
                none,
            ),
            PhotosView::Empty { .. } => (Line::styled(NO_PHOTOS_MESSAGE, theme::muted()), none),
            PhotosView::Failed { message, .. } => (
                Line::from(vec![
                    Span::styled(NO_PHOTOS_MESSAGE, theme::error()),
                    Span::styled(format!(" ({message})"), theme::error()),
                ]),
                none,
            ),
            PhotosView::Photos {
                rover,
                cards,
                total,
            } => (
                Line::styled(
                    format!(
                        "{} latest photos ({} of {total})",
                        rover.label(),
                        cards.len()
                    ),
                    theme::title_style(),
                ),
                cards.as_slice(),
            ),
        };

        let layout = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);
        frame.render_widget(Paragraph::new(header), layout[0]);

        let items: Vec<ListItem<'_>> = cards
            .iter()
            .skip(self.scroll)
            .map(|card| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("#{} ", card.id), theme::title_style()),
                        Span::styled(card.camera.as_str(), theme::text()),
                        Span::styled(format!("  {}", card.earth_date), theme::muted()),
                    ]),
                    Line::styled(card.image_url.as_str(), theme::link()),
                ])
            })
            .collect();
        frame.render_widget(List::new(items), layout[1]);
    }
}

impl Component for RoversScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(false),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(true),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.scroll + 1 < self.card_count() {
                    self.scroll += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Enter => {
                return Ok(self.tabs.get(self.cursor).map(|tab| Action::SelectRover(tab.rover)));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateChanged(snapshot) = action {
            let rendered = view::render(snapshot);
            if snapshot.selected_rover != self.selected {
                self.selected = snapshot.selected_rover;
                self.scroll = 0;
                if let Some(idx) = rendered.rovers.iter().position(|t| t.selected) {
                    self.cursor = idx;
                }
            }
            self.tabs = rendered.rovers;
            self.photos = rendered.photos;
            self.manifest = rendered.manifest;
            self.cursor = self.cursor.min(self.tabs.len().saturating_sub(1));
            self.scroll = self.scroll.min(self.card_count().saturating_sub(1));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Line::styled(format!(" {DASHBOARD_TITLE} "), theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // rover tabs
            Constraint::Length(1),
            Constraint::Length(3), // manifest
            Constraint::Length(1),
            Constraint::Min(1), // photos
        ])
        .split(inner);

        self.render_tabs(frame, layout[0]);
        self.render_manifest(frame, layout[2]);
        self.render_photos(frame, layout[4]);
    }

    fn hints(&self) -> &'static str {
        "←/→ rover  enter select  j/k scroll  r refresh"
    }
}
