//! Text styling with ANSI SGR sequences

/// Control Sequence Introducer
const CSI: &str = "\x1b[";
/// Reset all attributes
const RESET: &str = "\x1b[0m";

/// Terminal foreground colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// SGR parameter selecting this color as foreground
    #[inline]
    pub fn fg_code(&self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
            Color::BrightBlack => 90,
            Color::BrightRed => 91,
            Color::BrightGreen => 92,
            Color::BrightYellow => 93,
            Color::BrightBlue => 94,
            Color::BrightMagenta => 95,
            Color::BrightCyan => 96,
            Color::BrightWhite => 97,
        }
    }
}

/// Attributes applied to a piece of text
///
/// `newline` defaults to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    pub underline: bool,
    pub fg: Option<Color>,
    pub newline: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            bold: false,
            underline: false,
            fg: None,
            newline: true,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Do not append a newline
    pub fn no_newline(mut self) -> Self {
        self.newline = false;
        self
    }

    /// Whether any attribute is set
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.underline && self.fg.is_none()
    }

    /// Wrap `text` in SGR sequences, ending with a reset
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len() + 16);
        if let Some(color) = self.fg {
            output.push_str(&format!("{}{}m", CSI, color.fg_code()));
        }
        if self.bold {
            output.push_str(&format!("{}1m", CSI));
        }
        if self.underline {
            output.push_str(&format!("{}4m", CSI));
        }
        output.push_str(text);
        output.push_str(RESET);
        output
    }

    /// Final bytes for `text`: painted only when `styled`, newline as requested
    pub fn render(&self, text: &str, styled: bool) -> String {
        let mut output = if styled {
            self.paint(text)
        } else {
            text.to_string()
        };
        if self.newline {
            output.push('\n');
        }
        output
    }
}
