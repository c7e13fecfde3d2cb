//! Color palettes for the two visual themes.

use {crate::persistence::Theme, ratatui::style::Color};

pub struct Palette {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub gold: Color,
    pub silver: Color,
    pub bronze: Color,
    pub focus: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            text: Color::White,
            dim: Color::Gray,
            accent: Color::Cyan,
            positive: Color::Green,
            negative: Color::Red,
            gold: Color::Yellow,
            silver: Color::Rgb(192, 192, 192),
            bronze: Color::Rgb(205, 127, 50),
            focus: Color::Yellow,
        },
        Theme::Light => Palette {
            text: Color::Black,
            dim: Color::DarkGray,
            accent: Color::Blue,
            positive: Color::Green,
            negative: Color::Red,
            gold: Color::Rgb(184, 134, 11),
            silver: Color::Rgb(105, 105, 105),
            bronze: Color::Rgb(139, 69, 19),
            focus: Color::Magenta,
        },
    }
}
