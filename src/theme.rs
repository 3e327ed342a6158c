use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// RGBA color with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composite over an opaque background, returning an opaque (r, g, b)
    pub fn over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

const URBAN_PARTICLE: Rgba = Rgba::new(242, 233, 228, 0.5);
const ELEGANT_PARTICLE: Rgba = Rgba::new(51, 51, 51, 0.3);

/// The two page palettes. "urban" is the dark one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Urban,
    #[default]
    Elegant,
}

impl Palette {
    /// Interpret a palette attribute value. Only "urban" selects the dark palette.
    pub fn from_attribute(value: &str) -> Self {
        if value == "urban" {
            Palette::Urban
        } else {
            Palette::Elegant
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Palette::Urban => "urban",
            Palette::Elegant => "elegant",
        }
    }

    /// Text shown on the palette toggle
    pub fn label(&self) -> &str {
        match self {
            Palette::Urban => "Dark",
            Palette::Elegant => "Light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Palette::Urban => Palette::Elegant,
            Palette::Elegant => Palette::Urban,
        }
    }

    pub fn particle_color(&self) -> Rgba {
        match self {
            Palette::Urban => URBAN_PARTICLE,
            Palette::Elegant => ELEGANT_PARTICLE,
        }
    }

    /// Canvas background that particle colors are blended over
    pub fn background(&self) -> (u8, u8, u8) {
        match self {
            Palette::Urban => (26, 26, 29),
            Palette::Elegant => (245, 241, 237),
        }
    }
}

/// Read-only access to whichever palette is active
pub trait ThemeSource {
    fn palette(&self) -> Palette;
}

impl ThemeSource for Palette {
    fn palette(&self) -> Palette {
        *self
    }
}

/// Palette handle shared between the host (which toggles it) and the field (which reads it)
#[derive(Debug, Clone, Default)]
pub struct SharedPalette(Rc<Cell<Palette>>);

impl SharedPalette {
    pub fn new(palette: Palette) -> Self {
        Self(Rc::new(Cell::new(palette)))
    }

    pub fn toggle(&self) -> Palette {
        let next = self.0.get().toggled();
        self.0.set(next);
        next
    }
}

impl ThemeSource for SharedPalette {
    fn palette(&self) -> Palette {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_urban_attribute_selects_dark() {
        assert_eq!(Palette::from_attribute("urban"), Palette::Urban);
        assert_eq!(Palette::from_attribute("elegant"), Palette::Elegant);
        assert_eq!(Palette::from_attribute(""), Palette::Elegant);
        assert_eq!(Palette::from_attribute("Urban"), Palette::Elegant);
    }

    #[test]
    fn test_particle_colors() {
        assert_eq!(Palette::Urban.particle_color(), Rgba::new(242, 233, 228, 0.5));
        assert_eq!(Palette::Elegant.particle_color(), Rgba::new(51, 51, 51, 0.3));
    }

    #[test]
    fn test_shared_palette_toggle_is_visible_to_readers() {
        let host = SharedPalette::new(Palette::Elegant);
        let reader = host.clone();

        assert_eq!(host.toggle(), Palette::Urban);
        assert_eq!(reader.palette(), Palette::Urban);
        assert_eq!(reader.palette().label(), "Dark");

        host.toggle();
        assert_eq!(reader.palette(), Palette::Elegant);
    }

    #[test]
    fn test_blend_over_background() {
        let half_white = Rgba::new(255, 255, 255, 0.5);
        assert_eq!(half_white.over((0, 0, 0)), (128, 128, 128));

        let opaque = Rgba::new(10, 20, 30, 1.0);
        assert_eq!(opaque.over((200, 200, 200)), (10, 20, 30));
    }

    #[test]
    fn test_palette_serializes_lowercase() {
        let json = serde_json::to_string(&Palette::Urban).unwrap();
        assert_eq!(json, "\"urban\"");
    }
}
