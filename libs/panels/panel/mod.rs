//! Window kernel: floating panels with drag, three-edge resize, scroll and focus.

mod slot;
mod stack;

pub use slot::{DataSlot, Payload};
pub use stack::PanelStack;

use crate::palette;
use crate::raster::{CursorShape, FontHandle, MouseButton, Rasterizer, Rect, Vec2};

/// Height of the draggable header strip
pub const HEADER_HEIGHT: f32 = 30.0;
/// Height of the drawn title band; content is clipped below it
pub const TITLE_BAND: f32 = 25.0;
pub const MIN_SIZE: f32 = 100.0;
/// Pixels scrolled per wheel notch
pub const SCROLL_STEP: f32 = 20.0;

const TITLE_SIZE: f32 = 18.0;
const GRIP_SIZE: f32 = 8.0;

/// Something that draws inside a panel's content area.
///
/// Called once per frame inside a scissor region covering the panel below its
/// title band. Renderers that lay out scrollable content are responsible for
/// writing [`Panel::max_scroll`].
pub trait Content {
    fn render(&mut self, panel: &mut Panel, rl: &mut dyn Rasterizer);
}

impl<F> Content for F
where
    F: FnMut(&mut Panel, &mut dyn Rasterizer),
{
    fn render(&mut self, panel: &mut Panel, rl: &mut dyn Rasterizer) {
        self(panel, rl)
    }
}

/// Which handle an active resize is following
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    BottomRight,
    Right,
    Bottom,
}

impl ResizeEdge {
    pub fn cursor(self) -> CursorShape {
        match self {
            ResizeEdge::BottomRight => CursorShape::ResizeNwse,
            ResizeEdge::Right => CursorShape::ResizeEw,
            ResizeEdge::Bottom => CursorShape::ResizeNs,
        }
    }
}

/// Result of one panel's input phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// The panel claimed focus this frame
    pub took_focus: bool,
    /// Cursor the panel asks for; `None` leaves it to other panels
    pub cursor: Option<CursorShape>,
}

pub struct Panel {
    pub title: String,
    pub rect: Rect,
    pub slot: DataSlot,
    pub focus: bool,
    pub scroll: f32,
    pub max_scroll: f32,
    pub handle_size: f32,
    pub padding: f32,
    pub font: FontHandle,
    drag_offset: Option<Vec2>,
    resizing: Option<ResizeEdge>,
    content: Option<Box<dyn Content>>,
}

impl Panel {
    pub fn new(title: impl Into<String>, rect: Rect, font: FontHandle) -> Self {
        Self {
            title: title.into(),
            rect: Rect::new(
                rect.x,
                rect.y,
                rect.width.max(MIN_SIZE),
                rect.height.max(MIN_SIZE),
            ),
            slot: DataSlot::new(),
            focus: false,
            scroll: 0.0,
            max_scroll: 0.0,
            handle_size: 10.0,
            padding: 10.0,
            font,
            drag_offset: None,
            resizing: None,
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Content + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Render from an existing (possibly shared) slot
    pub fn with_slot(mut self, slot: DataSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    pub fn resize_edge(&self) -> Option<ResizeEdge> {
        self.resizing
    }

    pub fn header_rect(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.y, self.rect.width, HEADER_HEIGHT)
    }

    /// Content area below the title band; this is the scissor region
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.rect.x,
            self.rect.y + TITLE_BAND,
            self.rect.width,
            self.rect.height - TITLE_BAND,
        )
    }

    fn corner_handle(&self) -> Rect {
        let hs = self.handle_size;
        Rect::new(self.rect.right() - hs, self.rect.bottom() - hs, hs, hs)
    }

    // Edge strips straddle the border so they are easy to grab from outside
    fn right_handle(&self) -> Rect {
        let hs = self.handle_size;
        Rect::new(
            self.rect.right() - hs / 2.0,
            self.rect.y + HEADER_HEIGHT,
            hs,
            self.rect.height - HEADER_HEIGHT - hs,
        )
    }

    fn bottom_handle(&self) -> Rect {
        let hs = self.handle_size;
        Rect::new(
            self.rect.x,
            self.rect.bottom() - hs / 2.0,
            self.rect.width - hs,
            hs,
        )
    }

    /// Resize handle under `point`, tested corner first, then right, then bottom
    pub fn handle_at(&self, point: Vec2) -> Option<ResizeEdge> {
        if self.corner_handle().contains(point) {
            Some(ResizeEdge::BottomRight)
        } else if self.right_handle().contains(point) {
            Some(ResizeEdge::Right)
        } else if self.bottom_handle().contains(point) {
            Some(ResizeEdge::Bottom)
        } else {
            None
        }
    }

    pub fn clamp_scroll(&mut self) {
        self.max_scroll = self.max_scroll.max(0.0);
        self.scroll = self.scroll.clamp(0.0, self.max_scroll);
    }

    /// Input phase for this panel.
    ///
    /// Focus is reported, not enforced; [`PanelStack::update_all`] clears the
    /// other panels when this one takes it.
    pub fn update(&mut self, rl: &dyn Rasterizer) -> InputOutcome {
        let mouse = rl.mouse_position();
        let pressed = rl.is_mouse_pressed(MouseButton::Left);
        let down = rl.is_mouse_down(MouseButton::Left);
        let mut outcome = InputOutcome::default();

        if pressed && self.rect.contains(mouse) {
            outcome.took_focus = true;
        }

        if let Some(edge) = self.resizing {
            if down {
                match edge {
                    ResizeEdge::BottomRight => {
                        self.rect.width = mouse.x - self.rect.x;
                        self.rect.height = mouse.y - self.rect.y;
                    }
                    ResizeEdge::Right => self.rect.width = mouse.x - self.rect.x,
                    ResizeEdge::Bottom => self.rect.height = mouse.y - self.rect.y,
                }
                self.rect.width = self.rect.width.max(MIN_SIZE);
                self.rect.height = self.rect.height.max(MIN_SIZE);
                outcome.cursor = Some(edge.cursor());
            } else {
                self.resizing = None;
            }
        } else if self.drag_offset.is_none() {
            match self.handle_at(mouse) {
                Some(edge) => {
                    outcome.cursor = Some(edge.cursor());
                    if pressed {
                        self.resizing = Some(edge);
                        outcome.took_focus = true;
                    }
                }
                None => outcome.cursor = Some(CursorShape::Default),
            }
        }

        if pressed && self.resizing.is_none() && self.header_rect().contains(mouse) {
            self.drag_offset = Some(mouse - self.rect.origin());
            outcome.took_focus = true;
        }

        if let Some(offset) = self.drag_offset {
            if down {
                self.rect.x = mouse.x - offset.x;
                self.rect.y = mouse.y - offset.y;
            } else {
                self.drag_offset = None;
            }
        }

        if self.rect.contains(mouse) {
            let wheel = rl.wheel_move();
            if wheel != 0.0 {
                self.scroll -= wheel * SCROLL_STEP;
                self.clamp_scroll();
            }
        }

        outcome
    }

    /// Draw phase for this panel
    pub fn draw(&mut self, rl: &mut dyn Rasterizer) {
        let rect = self.rect;
        rl.fill_rect(rect, palette::PANEL_BG);

        let border = if self.focus {
            palette::HIGHLIGHT
        } else {
            palette::BORDER
        };
        rl.stroke_rect(rect, 1.0, border);

        rl.draw_text(
            self.font,
            &self.title,
            Vec2::new(rect.x + self.padding, rect.y + 5.0),
            TITLE_SIZE,
            1.0,
            palette::TEXT,
        );
        rl.draw_line(
            Vec2::new(rect.x, rect.y + TITLE_BAND),
            Vec2::new(rect.right(), rect.y + TITLE_BAND),
            1.0,
            border,
        );

        // Taken out for the call so the renderer can borrow the panel mutably
        if let Some(mut content) = self.content.take() {
            rl.begin_scissor(self.content_rect());
            content.render(self, rl);
            rl.end_scissor();
            self.content = Some(content);
            self.clamp_scroll();
        }

        if self.focus {
            rl.fill_rect(
                Rect::new(
                    rect.right() - GRIP_SIZE,
                    rect.bottom() - GRIP_SIZE,
                    GRIP_SIZE,
                    GRIP_SIZE,
                ),
                palette::CORNER_GRIP,
            );
        }
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("title", &self.title)
            .field("rect", &self.rect)
            .field("focus", &self.focus)
            .field("scroll", &self.scroll)
            .field("max_scroll", &self.max_scroll)
            .field("dragging", &self.is_dragging())
            .field("resizing", &self.resizing)
            .finish()
    }
}
