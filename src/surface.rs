use crate::theme::Rgba;

/// A 2D raster the particle field draws onto, measured in logical pixels
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Erase the whole surface
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}

/// Surface that records draw calls instead of rasterising them
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub clears: usize,
    pub circles: Vec<(f32, f32, f32, Rgba)>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.circles.clear();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.circles.push((x, y, radius, color));
    }
}
