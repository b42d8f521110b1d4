//! Color theme system for githubba.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! githubba renders. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors only, for terminals without truecolor.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

/// All color values used across githubba's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Cards
    /// Border of the top card.
    pub border_active: Color,
    /// Border of the cards underneath, and of inactive popups.
    pub border_inactive: Color,
    /// Repository name on the card.
    pub card_title: Color,
    /// Description and general body text.
    pub card_text: Color,
    /// Secondary details: dates, owner, license.
    pub muted: Color,
    /// Star count.
    pub stars: Color,
    /// Language badge.
    pub language: Color,
    /// Topic chips.
    pub topic: Color,

    // Swipe feedback and hint
    pub like: Color,
    pub dislike: Color,
    pub hint: Color,

    // Status and messages
    pub error: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// App title in the navigation bar.
    pub accent: Color,

    pub background: Color,
}

impl Theme {
    /// The built-in dark theme using ANSI 16 colors. Works on any terminal.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,
            card_title: Color::White,
            card_text: Color::Reset,
            muted: Color::DarkGray,
            stars: Color::Yellow,
            language: Color::Blue,
            topic: Color::Magenta,

            like: Color::Green,
            dislike: Color::Red,
            hint: Color::Cyan,

            error: Color::Red,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            accent: Color::Cyan,

            background: Color::Reset,
        }
    }

    /// The Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let mauve = Color::Rgb(203, 166, 247);    // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: surface1,
            card_title: text,
            card_text: text,
            muted: overlay1,
            stars: yellow,
            language: blue,
            topic: mauve,

            like: green,
            dislike: red,
            hint: teal,

            error: peach,
            status_bar_bg: surface1,
            status_bar_fg: text,
            accent: lavender,

            background: base,
        }
    }

    /// Resolves a theme name from config or the command line.
    ///
    /// Unknown names fall back to `dark()` so a typo never prevents startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_builtins() {
        assert_eq!(Theme::from_name("catppuccin_mocha").background, Theme::catppuccin_mocha().background);
        assert_eq!(Theme::from_name("dark").like, Color::Green);
        assert_eq!(Theme::from_name("solarized").border_active, Theme::dark().border_active);
    }
}
