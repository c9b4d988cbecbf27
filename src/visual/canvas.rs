//! Drawing surface abstraction.
//!
//! Coordinates follow the usual 2d canvas convention: origin at the top-left
//! corner, `y` growing downwards, units in pixels of the drawing buffer.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Blurred halo drawn behind every filled shape while set.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: String,
}

/// Linear gradient between two points. Stop offsets are in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    pub stops: Vec<(f32, String)>,
}

impl LinearGradient {
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            stops: Vec::with_capacity(2),
        }
    }

    pub fn add_color_stop(&mut self, offset: f32, color: &str) {
        self.stops.push((offset.clamp(0.0, 1.0), color.to_string()));
    }

    pub fn first_color(&self) -> Option<&str> {
        self.stops.first().map(|(_, c)| c.as_str())
    }

    pub fn last_color(&self) -> Option<&str> {
        self.stops.last().map(|(_, c)| c.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    Gradient(LinearGradient),
}

/// Stateful 2d drawing context. Alpha and shadow persist until changed,
/// across shapes and across frames.
pub trait Context2d {
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_shadow(&mut self, shadow: Option<Shadow>);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn fill_circle(&mut self, center: Point, radius: f32, color: &str);
}

/// The element a visualizer renders into.
pub trait Canvas {
    /// On-screen box of the element, `None` once it is detached.
    fn display_size(&self) -> Option<Size>;

    /// Resizes the drawing buffer. Clears its content.
    fn set_buffer_size(&mut self, width: u32, height: u32);

    fn buffer_size(&self) -> (u32, u32);

    fn context(&mut self) -> Option<&mut dyn Context2d>;
}
