//! Night-sky palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const STARLIGHT: Color = Color::Rgb(236, 239, 244); // #eceff4
pub const NEBULA_BLUE: Color = Color::Rgb(129, 161, 193); // #81a1c1
pub const MARS_RUST: Color = Color::Rgb(208, 135, 112); // #d08770
pub const SUN_GOLD: Color = Color::Rgb(235, 203, 139); // #ebcb8b
pub const AURORA_GREEN: Color = Color::Rgb(163, 190, 140); // #a3be8c
pub const FLARE_RED: Color = Color::Rgb(191, 97, 106); // #bf616a
pub const DUST_GRAY: Color = Color::Rgb(94, 104, 124); // #5e687c
pub const VOID: Color = Color::Rgb(36, 41, 51); // #242933

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(SUN_GOLD).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(DUST_GRAY)
}

pub fn text() -> Style {
    Style::default().fg(STARLIGHT)
}

pub fn muted() -> Style {
    Style::default().fg(NEBULA_BLUE)
}

pub fn link() -> Style {
    Style::default()
        .fg(NEBULA_BLUE)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn error() -> Style {
    Style::default().fg(FLARE_RED)
}

pub fn loading() -> Style {
    Style::default()
        .fg(SUN_GOLD)
        .add_modifier(Modifier::ITALIC)
}

/// Rover tab under the cursor.
pub fn rover_cursor() -> Style {
    Style::default()
        .fg(VOID)
        .bg(MARS_RUST)
        .add_modifier(Modifier::BOLD)
}

/// Rover tab whose photos are shown.
pub fn rover_selected() -> Style {
    Style::default()
        .fg(MARS_RUST)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn tab_active() -> Style {
    Style::default().fg(SUN_GOLD).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DUST_GRAY)
}

pub fn key_hint() -> Style {
    Style::default().fg(DUST_GRAY)
}

pub fn success() -> Style {
    Style::default().fg(AURORA_GREEN)
}
