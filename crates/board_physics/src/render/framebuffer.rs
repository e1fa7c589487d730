//! In-memory RGB565 framebuffer

use image::{Rgb, RgbImage};

use super::display::{Color, Display};
use crate::foundation::math::ScreenSize;

/// Software panel that stores every pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    size: ScreenSize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Black framebuffer of the given size
    pub fn new(size: ScreenSize) -> Self {
        let count = (size.width.max(0) * size.height.max(0)) as usize;
        Self {
            size,
            pixels: vec![Color::BLACK; count],
        }
    }

    /// Panel dimensions
    pub const fn size(&self) -> ScreenSize {
        self.size
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.size
            .contains(x, y)
            .then(|| (y * self.size.width + x) as usize)
    }

    /// Pixel colour, `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).and_then(|i| self.pixels.get(i).copied())
    }

    /// Number of pixels currently equal to `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Convert to an 8-bit RGB image for saving
    pub fn to_rgb_image(&self) -> RgbImage {
        let width = self.size.width.max(0) as u32;
        let height = self.size.height.max(0) as u32;
        RgbImage::from_fn(width, height, |x, y| {
            let color = self.pixel(x as i32, y as i32).unwrap_or_default();
            Rgb(color.to_rgb888())
        })
    }
}

impl Display for Framebuffer {
    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn draw_fast_hline(&mut self, x: i32, y: i32, width: i32, color: Color) {
        if y < 0 || y >= self.size.height || width <= 0 {
            return;
        }
        let start = x.max(0);
        let end = (x + width).min(self.size.width);
        for column in start..end {
            self.draw_pixel(column, y, color);
        }
    }

    fn fill_screen(&mut self, color: Color) {
        self.pixels.fill(color);
    }
}
