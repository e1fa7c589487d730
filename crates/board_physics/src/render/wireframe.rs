//! Incremental wireframe renderer
//!
//! Each tracked shape remembers the screen points it was last drawn with.
//! A frame erases the old edges in the background colour, draws the new
//! ones, then keeps the new points for the next frame. No framebuffer
//! read-back is needed.

use super::display::{Color, Display};
use crate::foundation::math::{ScreenPoint, ScreenSize};

/// Edges of a quad given corners in order
pub const QUAD_EDGES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

/// What happened to one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEmission {
    /// Sent to the display
    Emitted,
    /// Longer than the screen in x or y, treated as a projection artifact
    TooLong,
    /// Both endpoints on the same pixel
    ZeroLength,
    /// Edge names a vertex that does not exist
    BadIndex,
}

/// Counts for one [`WireframeTracker::render`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Edges erased from the previous frame
    pub erased: usize,
    /// Edges drawn for this frame
    pub drawn: usize,
    /// Edges dropped by the long-edge filter in this frame's draw pass
    pub dropped: usize,
}

impl std::ops::AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        self.erased += other.erased;
        self.drawn += other.drawn;
        self.dropped += other.dropped;
    }
}

/// Previous-frame state for one shape of `V` vertices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireframeTracker<const V: usize> {
    screen: ScreenSize,
    previous: Option<[ScreenPoint; V]>,
}

impl<const V: usize> WireframeTracker<V> {
    /// Tracker that has never drawn
    pub const fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            previous: None,
        }
    }

    /// Points drawn last frame, `None` before the first frame
    pub const fn previous(&self) -> Option<&[ScreenPoint; V]> {
        self.previous.as_ref()
    }

    /// Whether the next render is a first frame
    pub const fn is_first_frame(&self) -> bool {
        self.previous.is_none()
    }

    /// Forget the last frame; the next render skips the erase pass
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Erase the last frame, draw `current`, and remember it
    pub fn render<D: Display + ?Sized>(
        &mut self,
        current: [ScreenPoint; V],
        edges: &[(usize, usize)],
        color: Color,
        background: Color,
        out: &mut D,
    ) -> RenderStats {
        let mut stats = RenderStats::default();

        if let Some(previous) = self.previous {
            stats.erased = self.emit_all(&previous, edges, background, out).0;
        }

        let (drawn, dropped) = self.emit_all(&current, edges, color, out);
        stats.drawn = drawn;
        stats.dropped = dropped;

        self.previous = Some(current);
        stats
    }

    /// Erase the last frame without drawing a new one
    pub fn clear<D: Display + ?Sized>(
        &mut self,
        edges: &[(usize, usize)],
        background: Color,
        out: &mut D,
    ) -> usize {
        self.previous
            .take()
            .map_or(0, |previous| self.emit_all(&previous, edges, background, out).0)
    }

    fn emit_all<D: Display + ?Sized>(
        &self,
        points: &[ScreenPoint; V],
        edges: &[(usize, usize)],
        color: Color,
        out: &mut D,
    ) -> (usize, usize) {
        edges
            .iter()
            .map(|&edge| self.emit_edge(points, edge, color, out))
            .fold((0, 0), |(emitted, dropped), result| match result {
                EdgeEmission::Emitted => (emitted + 1, dropped),
                EdgeEmission::TooLong => (emitted, dropped + 1),
                EdgeEmission::ZeroLength | EdgeEmission::BadIndex => (emitted, dropped),
            })
    }

    /// Send one edge to the display, choosing the horizontal or vertical fast path when possible
    pub fn emit_edge<D: Display + ?Sized>(
        &self,
        points: &[ScreenPoint; V],
        (a, b): (usize, usize),
        color: Color,
        out: &mut D,
    ) -> EdgeEmission {
        let (Some(p1), Some(p2)) = (points.get(a), points.get(b)) else {
            return EdgeEmission::BadIndex;
        };
        let dx = (p2.x - p1.x).abs();
        let dy = (p2.y - p1.y).abs();

        if dx > self.screen.width || dy > self.screen.height {
            return EdgeEmission::TooLong;
        }

        if p1.y == p2.y && dx > 0 {
            out.draw_fast_hline(p1.x.min(p2.x), p1.y, dx + 1, color);
        } else if p1.x == p2.x && dy > 0 {
            out.draw_fast_vline(p1.x, p1.y.min(p2.y), dy + 1, color);
        } else if dx > 0 || dy > 0 {
            out.draw_line(p1.x, p1.y, p2.x, p2.y, color);
        } else {
            return EdgeEmission::ZeroLength;
        }
        EdgeEmission::Emitted
    }
}

/// Corners of a `width` x `height` outline with its top-left at `top_left`, clockwise
pub const fn rect_outline(top_left: ScreenPoint, width: i32, height: i32) -> [ScreenPoint; 4] {
    let right = top_left.x + width - 1;
    let bottom = top_left.y + height - 1;
    [
        top_left,
        ScreenPoint::new(right, top_left.y),
        ScreenPoint::new(right, bottom),
        ScreenPoint::new(top_left.x, bottom),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::display::{DrawCommand, DrawList};

    const SEGMENT: [(usize, usize); 1] = [(0, 1)];

    fn tracker<const V: usize>() -> WireframeTracker<V> {
        WireframeTracker::new(ScreenSize::OLED_128)
    }

    #[test]
    fn test_first_frame_has_no_erase() {
        let mut t = tracker::<4>();
        let mut out = DrawList::new();
        let stats = t.render(
            rect_outline(ScreenPoint::new(10, 10), 13, 17),
            &QUAD_EDGES,
            Color::GREEN,
            Color::BLACK,
            &mut out,
        );
        assert_eq!(stats, RenderStats { erased: 0, drawn: 4, dropped: 0 });
        assert_eq!(out.count_lines_with(Color::BLACK), 0);
        assert!(!t.is_first_frame());
    }

    #[test]
    fn test_erase_count_matches_previous_draw_count() {
        let mut t = tracker::<2>();
        let frames = [
            [ScreenPoint::new(0, 0), ScreenPoint::new(10, 3)],
            [ScreenPoint::new(0, 0), ScreenPoint::new(0, 0)],
            [ScreenPoint::new(-100, 0), ScreenPoint::new(100, 0)],
            [ScreenPoint::new(5, 5), ScreenPoint::new(5, 9)],
            [ScreenPoint::new(5, 5), ScreenPoint::new(9, 9)],
        ];
        let mut last_drawn = 0;
        for (i, frame) in frames.into_iter().enumerate() {
            let mut out = DrawList::new();
            let stats = t.render(frame, &SEGMENT, Color::WHITE, Color::BLACK, &mut out);
            if i > 0 {
                assert_eq!(stats.erased, last_drawn, "frame {i}");
            }
            last_drawn = stats.drawn;
        }
    }

    #[test]
    fn test_long_edges_are_dropped() {
        let t = tracker::<2>();
        let mut out = DrawList::new();
        let points = [ScreenPoint::new(-10, 0), ScreenPoint::new(130, 0)];
        assert_eq!(
            t.emit_edge(&points, (0, 1), Color::WHITE, &mut out),
            EdgeEmission::TooLong
        );
        assert!(out.is_empty());

        // exactly the screen width is still drawn
        let points = [ScreenPoint::new(0, 0), ScreenPoint::new(128, 0)];
        assert_eq!(
            t.emit_edge(&points, (0, 1), Color::WHITE, &mut out),
            EdgeEmission::Emitted
        );
    }

    #[test]
    fn test_fast_paths() {
        let t = tracker::<2>();
        let mut out = DrawList::new();
        let h = [ScreenPoint::new(9, 4), ScreenPoint::new(2, 4)];
        let v = [ScreenPoint::new(3, 8), ScreenPoint::new(3, 1)];
        let d = [ScreenPoint::new(0, 0), ScreenPoint::new(4, 2)];
        t.emit_edge(&h, (0, 1), Color::WHITE, &mut out);
        t.emit_edge(&v, (0, 1), Color::WHITE, &mut out);
        t.emit_edge(&d, (0, 1), Color::WHITE, &mut out);
        assert_eq!(
            out.commands(),
            &[
                DrawCommand::HLine { x: 2, y: 4, width: 8, color: Color::WHITE },
                DrawCommand::VLine { x: 3, y: 1, height: 8, color: Color::WHITE },
                DrawCommand::Line { x0: 0, y0: 0, x1: 4, y1: 2, color: Color::WHITE },
            ]
        );
    }

    #[test]
    fn test_erase_uses_previous_points() {
        let mut t = tracker::<2>();
        let mut out = DrawList::new();
        t.render(
            [ScreenPoint::new(0, 0), ScreenPoint::new(0, 5)],
            &SEGMENT,
            Color::WHITE,
            Color::BLACK,
            &mut out,
        );
        out.clear();
        t.render(
            [ScreenPoint::new(1, 0), ScreenPoint::new(1, 5)],
            &SEGMENT,
            Color::WHITE,
            Color::BLACK,
            &mut out,
        );
        assert_eq!(
            out.commands()[0],
            DrawCommand::VLine { x: 0, y: 0, height: 6, color: Color::BLACK }
        );
        assert_eq!(out.len(), 2);

        t.reset();
        out.clear();
        let stats = t.render(
            [ScreenPoint::new(1, 0), ScreenPoint::new(1, 5)],
            &SEGMENT,
            Color::WHITE,
            Color::BLACK,
            &mut out,
        );
        assert_eq!(stats.erased, 0);
    }

    #[test]
    fn test_clear_erases_and_forgets() {
        let mut t = tracker::<4>();
        let mut out = DrawList::new();
        t.render(
            rect_outline(ScreenPoint::new(0, 0), 4, 4),
            &QUAD_EDGES,
            Color::RED,
            Color::BLACK,
            &mut out,
        );
        assert_eq!(t.clear(&QUAD_EDGES, Color::BLACK, &mut out), 4);
        assert!(t.is_first_frame());
        assert_eq!(t.clear(&QUAD_EDGES, Color::BLACK, &mut out), 0);
    }
}
