//! Color palette shared by every pane (gruvbox dark)

use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub text: Color,
    pub accent: Color,
    pub accent_warm: Color,
    pub muted: Color,
    pub ok: Color,
    pub err: Color,
    pub warn: Color,
    /// Syntax: keywords
    pub keyword: Color,
    /// Syntax: string and number literals
    pub literal: Color,
    /// Syntax: called methods
    pub call: Color,
    pub type_name: Color,
    pub focus_border: Color,
    pub idle_border: Color,
    pub cursor_line_bg: Color,
    /// Values stored in the model
    pub element: Color,
    /// top / front / head / min markers
    pub marker: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(235, 219, 178),
    accent: Color::Rgb(131, 165, 152),
    accent_warm: Color::Rgb(254, 128, 25),
    muted: Color::Rgb(146, 131, 116),
    ok: Color::Rgb(184, 187, 38),
    err: Color::Rgb(251, 73, 52),
    warn: Color::Rgb(250, 189, 47),
    keyword: Color::Rgb(251, 73, 52),
    literal: Color::Rgb(211, 134, 155),
    call: Color::Rgb(250, 189, 47),
    type_name: Color::Rgb(142, 192, 124),
    focus_border: Color::Rgb(250, 189, 47),
    idle_border: Color::Rgb(102, 92, 84),
    cursor_line_bg: Color::Rgb(60, 56, 54),
    element: Color::Rgb(184, 187, 38),
    marker: Color::Rgb(254, 128, 25),
};

/// Pane border, bold when the pane has focus
pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.focus_border)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.idle_border)
    }
}
