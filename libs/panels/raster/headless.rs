//! Off-screen rasterizer with scripted input and a recorded draw list.

use super::{Color, CursorShape, FontHandle, MouseButton, Rasterizer, Rect, Vec2};
use std::collections::HashSet;

/// Width of one glyph as a fraction of the font size
const GLYPH_ASPECT: f32 = 0.6;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
    BeginScissor(Rect),
    EndScissor,
}

/// Rasterizer that renders nothing.
///
/// Input is scripted with [`move_mouse`](Self::move_mouse),
/// [`press`](Self::press), [`release`](Self::release) and
/// [`scroll`](Self::scroll); [`next_frame`](Self::next_frame) clears the
/// per-frame edges (presses, wheel) and the recorded commands. Text is
/// measured as a fixed-pitch font.
#[derive(Debug)]
pub struct HeadlessRasterizer {
    screen: Vec2,
    mouse: Vec2,
    pressed: HashSet<MouseButton>,
    down: HashSet<MouseButton>,
    wheel: f32,
    cursor: CursorShape,
    scissor_depth: usize,
    commands: Vec<DrawCommand>,
}

impl HeadlessRasterizer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            screen: Vec2::new(width, height),
            mouse: Vec2::default(),
            pressed: HashSet::new(),
            down: HashSet::new(),
            wheel: 0.0,
            cursor: CursorShape::Default,
            scissor_depth: 0,
            commands: Vec::new(),
        }
    }

    pub fn move_mouse(&mut self, x: f32, y: f32) {
        self.mouse = Vec2::new(x, y);
    }

    /// Button goes down this frame and stays down until released
    pub fn press(&mut self, button: MouseButton) {
        self.pressed.insert(button);
        self.down.insert(button);
    }

    pub fn release(&mut self, button: MouseButton) {
        self.down.remove(&button);
    }

    /// Move to `(x, y)` and press the left button
    pub fn click_at(&mut self, x: f32, y: f32) {
        self.move_mouse(x, y);
        self.press(MouseButton::Left);
    }

    pub fn scroll(&mut self, notches: f32) {
        self.wheel += notches;
    }

    pub fn resize_screen(&mut self, width: f32, height: f32) {
        self.screen = Vec2::new(width, height);
    }

    /// Start a new frame: drop press edges, wheel movement and recorded commands
    pub fn next_frame(&mut self) {
        self.pressed.clear();
        self.wheel = 0.0;
        self.commands.clear();
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every `Text` command in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First text command whose text equals `needle`
    pub fn find_text(&self, needle: &str) -> Option<&DrawCommand> {
        self.commands
            .iter()
            .find(|c| matches!(c, DrawCommand::Text { text, .. } if text == needle))
    }

    /// Every filled rectangle with the given colour
    pub fn fills_with(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Scissor regions still open; zero once a frame is balanced
    pub fn scissor_depth(&self) -> usize {
        self.scissor_depth
    }
}

impl Default for HeadlessRasterizer {
    fn default() -> Self {
        Self::new(1100.0, 760.0)
    }
}

impl Rasterizer for HeadlessRasterizer {
    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.down.contains(&button)
    }

    fn wheel_move(&self) -> f32 {
        self.wheel
    }

    fn screen_size(&self) -> Vec2 {
        self.screen
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        self.cursor = shape;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    fn draw_text(
        &mut self,
        _font: FontHandle,
        text: &str,
        pos: Vec2,
        size: f32,
        _spacing: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }

    fn measure_text(&self, _font: FontHandle, text: &str, size: f32, spacing: f32) -> Vec2 {
        let glyphs = text.chars().count() as f32;
        let gaps = (glyphs - 1.0).max(0.0);
        Vec2::new(glyphs * size * GLYPH_ASPECT + gaps * spacing, size)
    }

    fn begin_scissor(&mut self, rect: Rect) {
        self.scissor_depth += 1;
        self.commands.push(DrawCommand::BeginScissor(rect));
    }

    fn end_scissor(&mut self) {
        self.scissor_depth = self.scissor_depth.saturating_sub(1);
        self.commands.push(DrawCommand::EndScissor);
    }
}
