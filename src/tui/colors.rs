use palette::{FromColor, Lch, Srgb};

use crate::engine::tile::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Lch> for Rgb {
    fn from(lch: Lch) -> Rgb {
        let rgb = Srgb::from_color(lch).into_format::<u8>();
        Rgb::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r,
            g: f.g,
            b: f.b,
        }
    }
}

const TILE_BG_LIGHTNESS: f32 = 80.0;
const TILE_BG_CHROMA: f32 = 90.0;
const TILE_FG_LIGHTNESS: f32 = 20.0;
const TILE_FG_CHROMA: f32 = 50.0;
const TILE_BG_BASE_HUE: f32 = 28.0;

// exponents per trip around the hue circle
const HUE_STEPS: u32 = 10;

/// Foreground and background colors of a tile, in Lch so they can be dimmed evenly.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TileColors {
    fg: Lch,
    bg: Lch,
}

impl TileColors {
    /// Every power of two gets its own background hue; text sits on the opposite side of the
    /// color wheel.
    pub(crate) fn for_value(value: Value) -> Self {
        let exponent = value.max(1).trailing_zeros();
        let bg_hue = TILE_BG_BASE_HUE + (exponent % HUE_STEPS) as f32 * 360.0 / HUE_STEPS as f32;
        let fg_hue = bg_hue + 180.0;
        Self {
            fg: Lch::new(TILE_FG_LIGHTNESS, TILE_FG_CHROMA, fg_hue),
            bg: Lch::new(TILE_BG_LIGHTNESS, TILE_BG_CHROMA, bg_hue),
        }
    }

    /// Lower the lightness of both colors by `amount`, where 100.0 is the full Lch range.
    pub(crate) fn dimmed(self, amount: f32) -> Self {
        let dim = |c: Lch| Lch::new((c.l - amount).clamp(0.0, 100.0), c.chroma, c.hue);
        Self {
            fg: dim(self.fg),
            bg: dim(self.bg),
        }
    }

    pub(crate) fn fg(&self) -> Rgb {
        self.fg.into()
    }

    pub(crate) fn bg(&self) -> Rgb {
        self.bg.into()
    }
}

pub(crate) fn board_background() -> Rgb {
    Lch::new(20.0, 30.0, 40.0).into()
}

pub(crate) fn board_foreground() -> Rgb {
    Lch::new(60.0, 30.0, 220.0).into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn each_value_gets_a_distinct_background() {
        let backgrounds: Vec<Rgb> = (1..=HUE_STEPS)
            .map(|e| TileColors::for_value(1 << e).bg())
            .collect();
        for (i, a) in backgrounds.iter().enumerate() {
            for b in backgrounds.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn dimming_darkens() {
        let colors = TileColors::for_value(8);
        let dimmed = colors.dimmed(40.0);
        let sum = |c: Rgb| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(sum(dimmed.bg()) < sum(colors.bg()));
    }

    #[test]
    fn dimming_by_nothing_is_a_noop() {
        let colors = TileColors::for_value(2048);
        assert_eq!(colors.dimmed(0.0).bg(), colors.bg());
        assert_eq!(colors.dimmed(0.0).fg(), colors.fg());
    }
}
