//! Draw contexts: the fixed set of styles the dashboard paints with

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawContext {
    Back,
    Text,
    Prompt,
    CbarMute,
    CbarNoMute,
    CbarRecord,
    CbarNoRecord,
    CbarEmpty,
    CbarFull1,
    CbarFull2,
    CbarFull3,
    CbarLabel,
    CbarFocusLabel,
    Focus,
}

impl DrawContext {
    /// Outline of each channel bar
    pub const CBAR_FRAME: DrawContext = DrawContext::CbarMute;
    /// Outline of the whole screen
    pub const FRAME: DrawContext = DrawContext::Prompt;

    /// The glyph cells drawn in this context show
    pub fn ch(self) -> char {
        match self {
            DrawContext::CbarMute => 'M',
            DrawContext::CbarNoMute | DrawContext::CbarNoRecord => '-',
            DrawContext::CbarRecord => 'x',
            DrawContext::CbarEmpty => ' ',
            DrawContext::CbarFull1 | DrawContext::CbarFull2 | DrawContext::CbarFull3 => '#',
            _ => '.',
        }
    }

    /// (foreground, background, bold) when colors are on
    fn colors(self) -> (Color, Color, bool) {
        use DrawContext::*;
        match self {
            Back => (Color::White, Color::Black, true),
            Text => (Color::Yellow, Color::Black, true),
            Prompt => (Color::Cyan, Color::Black, false),
            CbarMute => (Color::Cyan, Color::Black, true),
            CbarNoMute => (Color::Cyan, Color::Black, true),
            CbarRecord => (Color::Red, Color::Black, false),
            CbarNoRecord => (Color::Gray, Color::Black, false),
            CbarEmpty => (Color::Gray, Color::Black, false),
            CbarFull1 => (Color::White, Color::Black, true),
            CbarFull2 => (Color::Green, Color::Black, true),
            CbarFull3 => (Color::Red, Color::Black, true),
            CbarLabel => (Color::White, Color::Blue, true),
            CbarFocusLabel => (Color::Red, Color::Blue, true),
            Focus => (Color::Red, Color::Black, true),
        }
    }

    /// Attributes used on terminals without color
    fn attributes(self) -> Modifier {
        use DrawContext::*;
        match self {
            Back | Prompt | CbarNoMute | CbarNoRecord => Modifier::empty(),
            Text | CbarMute | CbarRecord | CbarFull1 | CbarFull2 | CbarFull3 | Focus => {
                Modifier::BOLD
            }
            CbarEmpty => Modifier::DIM,
            CbarLabel | CbarFocusLabel => Modifier::REVERSED | Modifier::BOLD,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn style(&self, dc: DrawContext) -> Style {
        if !self.color {
            return Style::default().add_modifier(dc.attributes());
        }
        let (fg, bg, bold) = dc.colors();
        let style = Style::default().fg(fg).bg(bg);
        if bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}
