//! RGB colors and the named palette recognized by the parser.

use std::fmt;

/// An RGB color attached to a sprite type.
///
/// The engine never draws anything; colors exist so hosts can render
/// and so descriptions round-trip faithfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

/// Channel values used when a sprite type declares no color: one value
/// per channel is drawn from this palette with the simulation RNG.
pub const COLOR_DISC: [u8; 4] = [20, 80, 140, 200];

macro_rules! named_colors {
    ($(($name:ident, $r:expr, $g:expr, $b:expr)),+ $(,)?) => {
        $(
            #[doc = concat!("The named color `", stringify!($name), "`.")]
            pub const $name: Color = Color($r, $g, $b);
        )+

        impl Color {
            /// Look up a color by its description-language name.
            pub fn from_name(name: &str) -> Option<Color> {
                match name {
                    $(stringify!($name) => Some($name),)+
                    _ => None,
                }
            }
        }
    };
}

named_colors![
    (BLACK, 0, 0, 0),
    (WHITE, 250, 250, 250),
    (GRAY, 90, 90, 90),
    (DARKGRAY, 30, 30, 30),
    (RED, 200, 0, 0),
    (GREEN, 0, 200, 0),
    (BLUE, 0, 0, 200),
    (LIGHTGREEN, 50, 250, 50),
    (ORANGE, 250, 160, 0),
    (YELLOW, 250, 250, 0),
    (PURPLE, 130, 0, 130),
    (BROWN, 140, 120, 100),
    (GOLD, 250, 212, 0),
];

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lookup_is_exact() {
        assert_eq!(Color::from_name("RED"), Some(RED));
        assert_eq!(Color::from_name("GOLD"), Some(GOLD));
        assert_eq!(Color::from_name("red"), None);
        assert_eq!(Color::from_name("MAUVE"), None);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(BLACK.to_string(), "#000000");
        assert_eq!(GOLD.to_string(), "#fad400");
    }
}
