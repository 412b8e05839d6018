//! Screen implementations. Each screen is a top-level Component.

pub mod apod;
pub mod rovers;

use crate::component::Component;
use crate::screen::ScreenId;

pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Apod, Box::new(apod::ApodScreen::new())),
        (ScreenId::Rovers, Box::new(rovers::RoversScreen::new())),
    ]
}

/// Flatten a test buffer to text, one line per row.
#[cfg(test)]
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
