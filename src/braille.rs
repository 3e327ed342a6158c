use crate::surface::Surface;
use crate::theme::Rgba;
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille cell with position and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Terminal canvas addressed in logical pixels, rasterised onto Braille dots.
/// One dot covers `pixel_scale` x `pixel_scale` logical pixels.
pub struct BrailleSurface {
    cols: u16,
    rows: u16,
    pixel_scale: f32,
    /// Dot pattern per cell, row-major
    patterns: Vec<u8>,
    /// Color of the last fill touching each cell
    colors: Vec<Option<Rgba>>,
}

impl BrailleSurface {
    pub fn new(cols: u16, rows: u16, pixel_scale: f32) -> Self {
        let mut surface = Self {
            cols: 0,
            rows: 0,
            pixel_scale: pixel_scale.max(0.1),
            patterns: Vec::new(),
            colors: Vec::new(),
        };
        surface.resize(cols, rows);
        surface
    }

    /// Match the canvas to a new cell size; contents are discarded
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let len = cols as usize * rows as usize;
        self.patterns = vec![0; len];
        self.colors = vec![None; len];
    }

    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }

    fn dot_width(&self) -> usize {
        self.cols as usize * 2
    }

    fn dot_height(&self) -> usize {
        self.rows as usize * 4
    }

    /// Surface-local logical coordinates of the centre of a canvas cell
    pub fn cell_to_local(&self, col: u16, row: u16) -> (f32, f32) {
        let dot_x = col as f32 * 2.0 + 1.0;
        let dot_y = row as f32 * 4.0 + 2.0;
        (dot_x * self.pixel_scale, dot_y * self.pixel_scale)
    }

    fn set_dot(&mut self, dot_x: usize, dot_y: usize, color: Rgba) {
        if dot_x >= self.dot_width() || dot_y >= self.dot_height() {
            return;
        }
        let idx = (dot_y / 4) * self.cols as usize + dot_x / 2;
        self.patterns[idx] |= BRAILLE_DOTS[dot_x % 2][dot_y % 4];
        self.colors[idx] = Some(color);
    }

    /// Non-empty cells with their colors blended over `background`
    pub fn cells(&self, background: (u8, u8, u8)) -> Vec<BrailleCell> {
        let mut cells = Vec::new();

        for (idx, &pattern) in self.patterns.iter().enumerate() {
            // Only emit cells that have at least one dot
            if pattern == 0 {
                continue;
            }
            let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
            let (r, g, b) = self.colors[idx]
                .map(|color| color.over(background))
                .unwrap_or(background);

            cells.push(BrailleCell {
                x: (idx % self.cols as usize) as u16,
                y: (idx / self.cols as usize) as u16,
                char: braille_char,
                color: Color::Rgb(r, g, b),
            });
        }

        cells
    }
}

impl Surface for BrailleSurface {
    fn width(&self) -> f32 {
        self.dot_width() as f32 * self.pixel_scale
    }

    fn height(&self) -> f32 {
        self.dot_height() as f32 * self.pixel_scale
    }

    fn clear(&mut self) {
        self.patterns.fill(0);
        self.colors.fill(None);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        // Work in dot space, where dot (i, j) has its centre at (i + 0.5, j + 0.5)
        let cx = x / self.pixel_scale;
        let cy = y / self.pixel_scale;
        let r = radius.max(0.0) / self.pixel_scale;

        // The dot under the centre is always lit, so small particles stay visible
        if cx >= 0.0 && cy >= 0.0 {
            self.set_dot(cx as usize, cy as usize, color);
        }

        let min_x = (cx - r).floor().max(0.0) as usize;
        let min_y = (cy - r).floor().max(0.0) as usize;
        let max_x = (cx + r).ceil().min(self.dot_width() as f32);
        let max_y = (cy + r).ceil().min(self.dot_height() as f32);
        if max_x <= 0.0 || max_y <= 0.0 {
            return;
        }

        let r_sq = r * r;
        for dot_y in min_y..max_y as usize {
            for dot_x in min_x..max_x as usize {
                let dx = dot_x as f32 + 0.5 - cx;
                let dy = dot_y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.set_dot(dot_x, dot_y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    #[test]
    fn test_braille_pattern() {
        // Test that single dot patterns work correctly
        assert_eq!(BRAILLE_DOTS[0][0], 0x01); // Top-left
        assert_eq!(BRAILLE_DOTS[1][0], 0x08); // Top-right
        assert_eq!(BRAILLE_DOTS[0][3], 0x40); // Bottom-left
        assert_eq!(BRAILLE_DOTS[1][3], 0x80); // Bottom-right

        // All dots should give 0xFF
        let all_dots: u8 = BRAILLE_DOTS[0].iter().sum::<u8>() + BRAILLE_DOTS[1].iter().sum::<u8>();
        assert_eq!(all_dots, 0xFF);
    }

    #[test]
    fn test_logical_size_follows_scale() {
        let surface = BrailleSurface::new(100, 30, 4.0);
        assert_eq!(surface.width(), 800.0);
        assert_eq!(surface.height(), 480.0);

        let mut surface = surface;
        surface.resize(50, 10);
        assert_eq!(surface.width(), 400.0);
        assert_eq!(surface.height(), 160.0);
    }

    #[test]
    fn test_small_circle_lights_center_dot() {
        let mut surface = BrailleSurface::new(4, 2, 4.0);
        // Logical (1, 1) is dot (0, 0) of cell (0, 0)
        surface.fill_circle(1.0, 1.0, 1.0, WHITE);

        let cells = surface.cells((0, 0, 0));
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].x, 0);
        assert_eq!(cells[0].y, 0);
        assert_eq!(cells[0].char, '\u{2801}');
        assert_eq!(cells[0].color, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_large_circle_spans_cells() {
        let mut surface = BrailleSurface::new(10, 5, 1.0);
        surface.fill_circle(10.0, 10.0, 4.0, WHITE);

        let cells = surface.cells((0, 0, 0));
        assert!(cells.len() > 1);
        let lit: u32 = cells
            .iter()
            .map(|cell| (cell.char as u32 - BRAILLE_BASE).count_ones())
            .sum();
        // Area of a radius-4 disc is about 50 dots
        assert!(lit > 40 && lit < 60, "lit {}", lit);
    }

    #[test]
    fn test_off_surface_circle_is_dropped() {
        let mut surface = BrailleSurface::new(4, 2, 4.0);
        surface.fill_circle(-50.0, -50.0, 3.0, WHITE);
        surface.fill_circle(10_000.0, 12.0, 3.0, WHITE);
        surface.fill_circle(f32::NAN, 12.0, 3.0, WHITE);
        assert!(surface.cells((0, 0, 0)).is_empty());
    }

    #[test]
    fn test_clear_empties_canvas() {
        let mut surface = BrailleSurface::new(4, 2, 4.0);
        surface.fill_circle(8.0, 8.0, 4.0, WHITE);
        assert!(!surface.cells((0, 0, 0)).is_empty());

        surface.clear();
        assert!(surface.cells((0, 0, 0)).is_empty());
    }

    #[test]
    fn test_translucent_color_is_blended() {
        let mut surface = BrailleSurface::new(2, 1, 1.0);
        surface.fill_circle(0.5, 0.5, 0.5, Rgba::new(242, 233, 228, 0.5));

        let cells = surface.cells((26, 26, 29));
        assert_eq!(cells[0].color, Color::Rgb(134, 130, 129));
    }

    #[test]
    fn test_cell_to_local_is_cell_center() {
        let surface = BrailleSurface::new(10, 10, 4.0);
        assert_eq!(surface.cell_to_local(0, 0), (4.0, 8.0));
        assert_eq!(surface.cell_to_local(3, 2), (28.0, 40.0));
    }
}
