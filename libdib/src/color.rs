use strum::{Display, EnumIter, EnumString};

/// A single 32-bit color sample
///
/// Fields are declared in the order they are laid out in a DIB pixel word
/// (blue, green, red, alpha). Channels are independent and never premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Blue channel
    pub b: u8,
    /// Green channel
    pub g: u8,
    /// Red channel
    pub r: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Bit mask of the alpha channel inside a pixel word
    pub const A_MASK: u32 = 0xFF00_0000;
    /// Bit mask of the red channel inside a pixel word
    pub const R_MASK: u32 = 0x00FF_0000;
    /// Bit mask of the green channel inside a pixel word
    pub const G_MASK: u32 = 0x0000_FF00;
    /// Bit mask of the blue channel inside a pixel word
    pub const B_MASK: u32 = 0x0000_00FF;

    /// Creates an opaque color
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a: 0xFF }
    }

    /// Creates a color with an explicit alpha value
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Returns the sample as it is laid out on the wire: `[b, g, r, a]`
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        NamedColor::White.rgba()
    }
}

/// Fixed set of named colors
///
/// Names parse from kebab-case, case-insensitively (`semi-aqua`, `Yellow`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum NamedColor {
    /// Opaque white
    White,
    /// Opaque aqua
    Aqua,
    /// Opaque misty rose
    Misty,
    /// Black at quarter opacity
    SemiBlack,
    /// Aqua at quarter opacity
    SemiAqua,
    /// Pink at quarter opacity
    SemiPink,
    /// Opaque red
    Red,
    /// Opaque green
    Green,
    /// Opaque blue
    Blue,
    /// Opaque yellow
    Yellow,
}

impl NamedColor {
    /// Returns the sample for this color
    #[must_use]
    pub const fn rgba(self) -> Rgba {
        match self {
            Self::White => Rgba::rgb(0xFF, 0xFF, 0xFF),
            Self::Aqua => Rgba::rgb(0, 0xFF, 0xFF),
            Self::Misty => Rgba::rgb(0xFF, 0xE4, 0xE1),
            Self::SemiBlack => Rgba::rgba(0, 0, 0, 0x40),
            Self::SemiAqua => Rgba::rgba(0, 0xFF, 0xFF, 0x40),
            Self::SemiPink => Rgba::rgba(0xFF, 0, 0xFF, 0x40),
            Self::Red => Rgba::rgb(0xFF, 0, 0),
            Self::Green => Rgba::rgb(0, 0xAA, 0),
            Self::Blue => Rgba::rgb(0, 0, 0xFF),
            Self::Yellow => Rgba::rgb(0xFF, 0xD7, 0),
        }
    }
}

impl From<NamedColor> for Rgba {
    fn from(value: NamedColor) -> Self {
        value.rgba()
    }
}
