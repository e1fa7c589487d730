//! Display output
//!
//! The kernel never talks to hardware. It draws through the [`Display`]
//! trait, usually into a [`DrawList`] that the host replays.

pub mod bitmap;
pub mod display;
pub mod framebuffer;
pub mod wireframe;

pub use bitmap::{BitmapError, MonoBitmap};
pub use display::{bresenham, Color, Display, DrawCommand, DrawList};
pub use framebuffer::Framebuffer;
pub use wireframe::{rect_outline, EdgeEmission, RenderStats, WireframeTracker, QUAD_EDGES};
