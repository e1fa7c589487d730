//! Display sink abstraction and recorded draw commands
//!
//! Calls must be applied in the order they are issued; the incremental
//! renderer relies on a later draw covering an earlier erase.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::bitmap::MonoBitmap;

/// 16-bit RGB565 colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u16);

impl Color {
    /// Black
    pub const BLACK: Self = Self(0x0000);
    /// White
    pub const WHITE: Self = Self(0xFFFF);
    /// Red
    pub const RED: Self = Self(0xF800);
    /// Green
    pub const GREEN: Self = Self(0x07E0);
    /// Cyan
    pub const CYAN: Self = Self(0x07FF);
    /// Magenta
    pub const MAGENTA: Self = Self(0xF81F);
    /// Dark grey used for the cube's box
    pub const WALL: Self = Self(0x3186);

    /// Pack 8-bit channels
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// Expand to 8-bit channels, replicating high bits into the low ones
    pub const fn to_rgb888(self) -> [u8; 3] {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
    }
}

/// Something that pixels can be drawn onto
///
/// Only [`Display::draw_pixel`] is required. The other primitives default
/// to pixel loops and may be overridden with faster paths.
pub trait Display {
    /// Set one pixel; coordinates outside the panel are ignored
    fn draw_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Bresenham line including both endpoints
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        for (x, y) in bresenham(x0, y0, x1, y1) {
            self.draw_pixel(x, y, color);
        }
    }

    /// Horizontal run of `width` pixels starting at `(x, y)`
    fn draw_fast_hline(&mut self, x: i32, y: i32, width: i32, color: Color) {
        for dx in 0..width {
            self.draw_pixel(x + dx, y, color);
        }
    }

    /// Vertical run of `height` pixels starting at `(x, y)`
    fn draw_fast_vline(&mut self, x: i32, y: i32, height: i32, color: Color) {
        for dy in 0..height {
            self.draw_pixel(x, y + dy, color);
        }
    }

    /// Solid rectangle
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        for dy in 0..height {
            self.draw_fast_hline(x, y + dy, width, color);
        }
    }

    /// Fill the whole panel
    fn fill_screen(&mut self, color: Color);

    /// Set pixels of `bitmap` with its top-left at `(x, y)`; clear bits are transparent
    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &MonoBitmap, color: Color) {
        for (column, row) in bitmap.set_pixels() {
            self.draw_pixel(x + column as i32, y + row as i32, color);
        }
    }
}

/// Points of a Bresenham line from `(x0, y0)` to `(x1, y1)`
///
/// Steep lines are walked along y; lines are always walked from the lower
/// major coordinate, so the pixel set is the same in either direction.
pub fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (mut x0, mut y0, mut x1, mut y1) = if steep {
        (y0, x0, y1, x1)
    } else {
        (x0, y0, x1, y1)
    };
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let y_step = if y0 < y1 { 1 } else { -1 };
    let mut err = dx / 2;
    let mut y = y0;

    let mut points = Vec::with_capacity(dx as usize + 1);
    for x in x0..=x1 {
        points.push(if steep { (y, x) } else { (x, y) });
        err -= dy;
        if err < 0 {
            y += y_step;
            err += dx;
        }
    }
    points
}

/// One recorded display call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Single pixel
    Pixel {
        /// Column
        x: i32,
        /// Row
        y: i32,
        /// Colour
        color: Color,
    },
    /// General line
    Line {
        /// Start column
        x0: i32,
        /// Start row
        y0: i32,
        /// End column
        x1: i32,
        /// End row
        y1: i32,
        /// Colour
        color: Color,
    },
    /// Horizontal fast path
    HLine {
        /// Start column
        x: i32,
        /// Row
        y: i32,
        /// Length in pixels
        width: i32,
        /// Colour
        color: Color,
    },
    /// Vertical fast path
    VLine {
        /// Column
        x: i32,
        /// Start row
        y: i32,
        /// Length in pixels
        height: i32,
        /// Colour
        color: Color,
    },
    /// Solid rectangle
    FillRect {
        /// Left column
        x: i32,
        /// Top row
        y: i32,
        /// Width
        width: i32,
        /// Height
        height: i32,
        /// Colour
        color: Color,
    },
    /// Whole-panel fill
    FillScreen(Color),
    /// Transparent-background monochrome bitmap
    Bitmap {
        /// Left column
        x: i32,
        /// Top row
        y: i32,
        /// Raster
        bitmap: Arc<MonoBitmap>,
        /// Colour of set bits
        color: Color,
    },
}

impl DrawCommand {
    /// Issue this command on `target`
    pub fn apply<D: Display + ?Sized>(&self, target: &mut D) {
        match self {
            Self::Pixel { x, y, color } => target.draw_pixel(*x, *y, *color),
            Self::Line {
                x0,
                y0,
                x1,
                y1,
                color,
            } => target.draw_line(*x0, *y0, *x1, *y1, *color),
            Self::HLine { x, y, width, color } => target.draw_fast_hline(*x, *y, *width, *color),
            Self::VLine {
                x,
                y,
                height,
                color,
            } => target.draw_fast_vline(*x, *y, *height, *color),
            Self::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => target.fill_rect(*x, *y, *width, *height, *color),
            Self::FillScreen(color) => target.fill_screen(*color),
            Self::Bitmap {
                x,
                y,
                bitmap,
                color,
            } => target.draw_bitmap(*x, *y, bitmap, *color),
        }
    }

    /// Whether this is one of the three line primitives
    pub const fn is_line(&self) -> bool {
        matches!(self, Self::Line { .. } | Self::HLine { .. } | Self::VLine { .. })
    }
}

/// Ordered list of recorded display calls
///
/// Implements [`Display`] itself, so kernel code can draw into it and the
/// host can replay the frame onto real hardware afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Recorded commands in emission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Forget all commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Apply every command to `target` in order
    pub fn replay<D: Display + ?Sized>(&self, target: &mut D) {
        for command in &self.commands {
            command.apply(target);
        }
    }

    /// Number of line-type commands drawn in `color`
    pub fn count_lines_with(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|command| match command {
                DrawCommand::Line { color: c, .. }
                | DrawCommand::HLine { color: c, .. }
                | DrawCommand::VLine { color: c, .. } => *c == color,
                _ => false,
            })
            .count()
    }
}

impl Display for DrawList {
    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.push(DrawCommand::Pixel { x, y, color });
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.push(DrawCommand::Line {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    fn draw_fast_hline(&mut self, x: i32, y: i32, width: i32, color: Color) {
        self.push(DrawCommand::HLine { x, y, width, color });
    }

    fn draw_fast_vline(&mut self, x: i32, y: i32, height: i32, color: Color) {
        self.push(DrawCommand::VLine {
            x,
            y,
            height,
            color,
        });
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_screen(&mut self, color: Color) {
        self.push(DrawCommand::FillScreen(color));
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &MonoBitmap, color: Color) {
        self.push(DrawCommand::Bitmap {
            x,
            y,
            bitmap: Arc::new(bitmap.clone()),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bresenham_endpoints_and_symmetry() {
        let forward = bresenham(0, 0, 7, 3);
        assert_eq!(forward.first(), Some(&(0, 0)));
        assert_eq!(forward.last(), Some(&(7, 3)));
        assert_eq!(forward.len(), 8);

        let mut backward = bresenham(7, 3, 0, 0);
        backward.sort_unstable();
        assert_eq!(backward, forward);
    }

    #[test]
    fn test_bresenham_steep_line() {
        let points = bresenham(2, 0, 3, 5);
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|&(x, _)| x == 2 || x == 3));
        assert_eq!(points[0], (2, 0));
    }

    #[test]
    fn test_rgb565_conversion() {
        assert_eq!(Color::WHITE.to_rgb888(), [255, 255, 255]);
        assert_eq!(Color::RED.to_rgb888(), [255, 0, 0]);
        assert_eq!(Color::from_rgb888(0, 255, 0), Color::GREEN);
    }

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.fill_screen(Color::BLACK);
        list.draw_line(0, 0, 5, 5, Color::WHITE);
        list.draw_fast_hline(0, 1, 4, Color::BLACK);
        assert_eq!(list.len(), 3);
        assert_eq!(list.commands()[0], DrawCommand::FillScreen(Color::BLACK));
        assert_eq!(list.count_lines_with(Color::BLACK), 1);
        assert_eq!(list.count_lines_with(Color::WHITE), 1);

        let mut copy = DrawList::new();
        list.replay(&mut copy);
        assert_eq!(copy, list);
    }
}
