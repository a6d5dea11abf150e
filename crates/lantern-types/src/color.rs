//! 16-color character cell attributes.
//!
//! The display surface is a VGA-style text grid: every cell carries one
//! attribute byte with a 4-bit foreground in the low nibble and a 4-bit
//! background in the high nibble.

/// One of the 16 classic VGA text colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// A packed foreground/background attribute byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAttr(pub u8);

impl TextAttr {
    /// Build an attribute from foreground and background colors.
    pub const fn new(fg: VgaColor, bg: VgaColor) -> Self {
        Self((fg as u8) | ((bg as u8) << 4))
    }

    /// Foreground color bits (low nibble).
    pub const fn fg(self) -> u8 {
        self.0 & 0x0F
    }

    /// Background color bits (high nibble).
    pub const fn bg(self) -> u8 {
        self.0 >> 4
    }

    /// Same background, different foreground.
    pub const fn with_fg(self, fg: VgaColor) -> Self {
        Self((self.0 & 0xF0) | (fg as u8))
    }

    /// Bright variant of the foreground (bold rendering on a 16-color grid).
    pub const fn intensified(self) -> Self {
        Self(self.0 | 0x08)
    }

    /// Default body text: light gray on black.
    pub const DEFAULT: Self = Self::new(VgaColor::LightGray, VgaColor::Black);
    /// Top-level headings: yellow on black.
    pub const HEADING_1: Self = Self::new(VgaColor::Yellow, VgaColor::Black);
    /// Second-level headings: light cyan on black.
    pub const HEADING_2: Self = Self::new(VgaColor::LightCyan, VgaColor::Black);
    /// Third-level headings: bright white on black.
    pub const HEADING: Self = Self::new(VgaColor::White, VgaColor::Black);
    /// Hyperlinks: light cyan on black.
    pub const LINK: Self = Self::new(VgaColor::LightCyan, VgaColor::Black);
    /// Italic text: dark gray on black.
    pub const DIM: Self = Self::new(VgaColor::DarkGray, VgaColor::Black);
    /// Preformatted/code text: light green on black.
    pub const MONO: Self = Self::new(VgaColor::LightGreen, VgaColor::Black);
}

impl Default for TextAttr {
    fn default() -> Self {
        Self::DEFAULT
    }
}
