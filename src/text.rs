//! Text labels drawn inside the rings.

use lipgloss_extras::lipgloss::{Color, Style};

/// Where a label sits inside the innermost ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextPosition {
    /// Static caption above the value.
    Top,
    /// The animated value readout.
    Center,
    /// Static caption below the value.
    Bottom,
}

impl TextPosition {
    /// All positions, top to bottom.
    pub const ALL: [TextPosition; 3] = [TextPosition::Top, TextPosition::Center, TextPosition::Bottom];

    pub(crate) fn slot(self) -> usize {
        match self {
            TextPosition::Top => 0,
            TextPosition::Center => 1,
            TextPosition::Bottom => 2,
        }
    }
}

/// Font style of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Typeface {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
    /// Italic.
    Italic,
    /// Bold and italic.
    BoldItalic,
}

/// A label and its styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    position: TextPosition,
    /// Current text.
    pub text: String,
    /// Foreground colour; `None` uses the terminal default.
    pub color: Option<String>,
    /// Font style.
    pub typeface: Typeface,
}

impl TextLabel {
    /// Creates an empty label. The value readout is bold by default.
    pub fn new(position: TextPosition) -> Self {
        let typeface = match position {
            TextPosition::Center => Typeface::Bold,
            _ => Typeface::Normal,
        };
        Self {
            position,
            text: String::new(),
            color: None,
            typeface,
        }
    }

    /// Position of this label.
    pub fn position(&self) -> TextPosition {
        self.position
    }

    /// The text parsed as an integer, or 0 when it isn't one.
    pub fn as_int(&self) -> i32 {
        self.text.trim().parse().unwrap_or(0)
    }

    /// Lipgloss style used to render the label.
    pub fn style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = &self.color {
            style = style.foreground(Color::from(color.as_str()));
        }
        match self.typeface {
            Typeface::Normal => style,
            Typeface::Bold => style.bold(true),
            Typeface::Italic => style.italic(true),
            Typeface::BoldItalic => style.bold(true).italic(true),
        }
    }
}
