//! Color theme and glyphs for the Valentine TUI.
//!
//! A pink palette on a soft rose background, with an ASCII fallback for the
//! glyphs when emoji rendering is unreliable.

use ratatui::style::{Color, Modifier, Style};

use valentine_engine::UiOptions;

/// Pink palette constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG: Color = Color::Rgb(253, 242, 248); // pink-50
    pub const BG_CARD: Color = Color::Rgb(255, 255, 255);
    pub const BG_MESSAGE: Color = Color::Rgb(253, 232, 243); // pink-100

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(31, 41, 55); // gray-800
    pub const TEXT_BODY: Color = Color::Rgb(55, 65, 81); // gray-700
    pub const TEXT_MUTED: Color = Color::Rgb(156, 163, 175); // gray-400

    // === Pinks ===
    pub const PINK: Color = Color::Rgb(219, 39, 119); // pink-600
    pub const PINK_SOFT: Color = Color::Rgb(236, 72, 153); // pink-500
    pub const PINK_FAINT: Color = Color::Rgb(249, 168, 212); // pink-300
    pub const PINK_BORDER: Color = Color::Rgb(251, 207, 232); // pink-200
    pub const PINK_DEEP: Color = Color::Rgb(157, 23, 77); // pink-800

    // === Accents ===
    pub const RED: Color = Color::Rgb(239, 68, 68); // red-500
    pub const HEART_FAINT: Color = Color::Rgb(248, 160, 160); // red-400 at low opacity
    pub const YELLOW: Color = Color::Rgb(234, 179, 8); // yellow-500
    pub const BUTTON_NO: Color = Color::Rgb(243, 244, 246); // gray-100
}

/// Default confetti colors.
const CONFETTI: [Color; 7] = [
    Color::Rgb(38, 204, 255),
    Color::Rgb(162, 90, 253),
    Color::Rgb(255, 94, 126),
    Color::Rgb(136, 255, 90),
    Color::Rgb(252, 255, 66),
    Color::Rgb(255, 166, 45),
    Color::Rgb(255, 54, 255),
];

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub bg_card: Color,
    pub bg_message: Color,
    pub text_primary: Color,
    pub text_body: Color,
    pub text_muted: Color,
    pub pink: Color,
    pub pink_soft: Color,
    pub pink_faint: Color,
    pub pink_border: Color,
    pub pink_deep: Color,
    pub red: Color,
    pub heart_faint: Color,
    pub yellow: Color,
    pub button_no: Color,
    pub confetti: &'static [Color],
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg: colors::BG,
            bg_card: colors::BG_CARD,
            bg_message: colors::BG_MESSAGE,
            text_primary: colors::TEXT_PRIMARY,
            text_body: colors::TEXT_BODY,
            text_muted: colors::TEXT_MUTED,
            pink: colors::PINK,
            pink_soft: colors::PINK_SOFT,
            pink_faint: colors::PINK_FAINT,
            pink_border: colors::PINK_BORDER,
            pink_deep: colors::PINK_DEEP,
            red: colors::RED,
            heart_faint: colors::HEART_FAINT,
            yellow: colors::YELLOW,
            button_no: colors::BUTTON_NO,
            confetti: &CONFETTI,
        }
    }
}

/// ASCII/Unicode glyphs for icons and spinners.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub heart: &'static str,
    pub heart_small: &'static str,
    pub sparkles: &'static str,
    pub smile: &'static str,
    pub party: &'static str,
    pub music: &'static str,
    pub gift: &'static str,
    pub stars: &'static str,
    pub stripe: &'static str,
    pub confetti: &'static [&'static str],
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];
const CONFETTI_GLYPHS: &[&str] = &["■", "▲", "●", "◆", "★"];
const CONFETTI_GLYPHS_ASCII: &[&str] = &["#", "^", "o", "*", "+"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            heart: "<3",
            heart_small: "v",
            sparkles: "*",
            smile: ":)",
            party: "\\o/",
            music: "~",
            gift: "+",
            stars: "*",
            stripe: "=",
            confetti: CONFETTI_GLYPHS_ASCII,
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            heart: "♥",
            heart_small: "♡",
            sparkles: "✨",
            smile: "☺",
            party: "🎉",
            music: "♪",
            gift: "🎁",
            stars: "★",
            stripe: "▀",
            confetti: CONFETTI_GLYPHS,
            spinner_frames: SPINNER_FRAMES,
        }
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Color, Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.pink)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn affirmative_button(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_card)
            .bg(palette.pink_soft)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn negative_button(palette: &Palette, dimmed: bool) -> Style {
        let style = Style::default()
            .fg(palette.text_muted)
            .bg(palette.button_no)
            .add_modifier(Modifier::BOLD);
        if dimmed {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    #[must_use]
    pub fn note(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.pink_faint)
            .add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn card_border(palette: &Palette) -> Style {
        Style::default().fg(palette.pink_border).bg(palette.bg_card)
    }

    #[must_use]
    pub fn chip(fg: Color) -> Style {
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }
}
