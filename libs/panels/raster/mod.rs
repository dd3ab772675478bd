//! Rasterizer façade
//!
//! The small set of input queries and draw calls the kernel and the content
//! renderers need. Implementations are expected to be frame-scoped: input
//! state is sampled once at the start of the frame and stays constant until
//! the next one.

pub mod headless;

/// Point or size in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    /// Bottom-right corner handle
    ResizeNwse,
    /// Right edge handle
    ResizeEw,
    /// Bottom edge handle
    ResizeNs,
}

/// Opaque handle to a font loaded by the rasterizer backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontHandle(pub u16);

/// Platform draw and input calls used by the dashboard
pub trait Rasterizer {
    fn mouse_position(&self) -> Vec2;

    /// Button went down during this frame
    fn is_mouse_pressed(&self, button: MouseButton) -> bool;

    /// Button is currently held
    fn is_mouse_down(&self, button: MouseButton) -> bool;

    /// Wheel movement this frame in notches, positive is up
    fn wheel_move(&self) -> f32;

    fn screen_size(&self) -> Vec2;

    fn set_cursor(&mut self, shape: CursorShape);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    /// Outline of `rect` as four lines
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
        self.draw_line(Vec2::new(l, t), Vec2::new(r, t), thickness, color);
        self.draw_line(Vec2::new(r, t), Vec2::new(r, b), thickness, color);
        self.draw_line(Vec2::new(l, b), Vec2::new(r, b), thickness, color);
        self.draw_line(Vec2::new(l, t), Vec2::new(l, b), thickness, color);
    }

    /// Draw `text` with its top-left corner at `pos`
    fn draw_text(
        &mut self,
        font: FontHandle,
        text: &str,
        pos: Vec2,
        size: f32,
        spacing: f32,
        color: Color,
    );

    fn measure_text(&self, font: FontHandle, text: &str, size: f32, spacing: f32) -> Vec2;

    /// Clip subsequent drawing to `rect` until the matching [`end_scissor`](Self::end_scissor)
    fn begin_scissor(&mut self, rect: Rect);

    fn end_scissor(&mut self);
}
