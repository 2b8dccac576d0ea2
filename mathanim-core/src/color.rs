/// An 8-bit per channel, straight alpha RGBA color.
///
/// This is the value type of every color property on an animation object.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Color([u8; 4]);
impl Color {
    pub const TRANSPARENT: Self = Self([0; 4]);
    pub const WHITE: Self = Self([255; 4]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }
    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }
    #[must_use]
    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }
    #[must_use]
    pub const fn as_array(&self) -> [u8; 4] {
        self.0
    }
    #[must_use]
    pub const fn r(&self) -> u8 {
        self.0[0]
    }
    #[must_use]
    pub const fn g(&self) -> u8 {
        self.0[1]
    }
    #[must_use]
    pub const fn b(&self) -> u8 {
        self.0[2]
    }
    #[must_use]
    pub const fn a(&self) -> u8 {
        self.0[3]
    }
}
impl From<[u8; 4]> for Color {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}
impl From<Color> for [u8; 4] {
    fn from(value: Color) -> Self {
        value.0
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits, found {}", .0)]
    BadLength(usize),
    #[error("invalid hex digit {:?}", .0)]
    BadDigit(char),
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;
    /// Parse `#rrggbb` or `#rrggbbaa`. The leading `#` is optional, and colors without alpha are opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(bad));
        }
        // All ascii from here on, so byte slicing can't split a char.
        let len = digits.len();
        if len != 6 && len != 8 {
            return Err(ColorParseError::BadLength(len));
        }

        let mut rgba = [255u8; 4];
        for (channel, idx) in rgba.iter_mut().zip((0..len).step_by(2)) {
            // Unwrap ok - every digit checked above.
            *channel = u8::from_str_radix(&digits[idx..idx + 2], 16).unwrap();
        }
        Ok(Self(rgba))
    }
}
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}
