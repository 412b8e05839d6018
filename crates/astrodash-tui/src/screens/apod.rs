//! Picture of the day screen.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use astrodash_core::view::{self, ApodView};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct ApodScreen {
    greeting: String,
    apod: ApodView,
}

impl ApodScreen {
    pub fn new() -> Self {
        Self {
            greeting: String::new(),
            apod: ApodView::Missing,
        }
    }

    fn body(&self) -> Vec<Line<'_>> {
        match &self.apod {
            ApodView::Loading => vec![Line::styled(
                "Loading the picture of the day...",
                theme::loading(),
            )],
            ApodView::Missing => vec![Line::styled("No picture of the day yet.", theme::muted())],
            ApodView::Failed { message } => vec![
                Line::styled("Could not load the picture of the day.", theme::error()),
                Line::styled(message.as_str(), theme::error()),
                Line::raw(""),
                Line::styled("Press r to try again.", theme::key_hint()),
            ],
            ApodView::Image {
                title,
                date,
                url,
                hd_url,
                explanation,
                copyright,
            } => {
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(title.as_str(), theme::title_style()),
                        Span::styled(format!("  {date}"), theme::muted()),
                    ]),
                    Line::styled(url.as_str(), theme::link()),
                ];
                if let Some(hd) = hd_url {
                    lines.push(Line::from(vec![
                        Span::styled("HD ", theme::muted()),
                        Span::styled(hd.as_str(), theme::link()),
                    ]));
                }
                if let Some(c) = copyright {
                    lines.push(Line::styled(format!("(c) {c}"), theme::muted()));
                }
                lines.push(Line::raw(""));
                lines.push(Line::styled(explanation.as_str(), theme::text()));
                lines
            }
            ApodView::Video {
                title,
                date,
                url,
                explanation,
            } => vec![
                Line::from(vec![
                    Span::styled("See today's featured video here: ", theme::text()),
                    Span::styled(url.as_str(), theme::link()),
                ]),
                Line::from(vec![
                    Span::styled(title.as_str(), theme::title_style()),
                    Span::styled(format!("  {date}"), theme::muted()),
                ]),
                Line::raw(""),
                Line::styled(explanation.as_str(), theme::text()),
            ],
        }
    }
}

impl Component for ApodScreen {
    fn update(&mut self, action: &Action) -> color_eyre::eyre::Result<Option<Action>> {
        if let Action::StateChanged(snapshot) = action {
            let rendered = view::render(snapshot);
            self.greeting = rendered.greeting;
            self.apod = rendered.apod;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Line::styled(
                format!(" Astronomy Picture of the Day · {} ", self.greeting),
                theme::title_style(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let paragraph = Paragraph::new(self.body())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn hints(&self) -> &'static str {
        "r/a reload"
    }
}
