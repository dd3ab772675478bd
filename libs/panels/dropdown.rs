//! Instrument selector widget.

use crate::palette;
use crate::raster::{FontHandle, MouseButton, Rasterizer, Rect, Vec2};
use tracing::debug;

/// Height of the selector box and of each option row
pub const ROW_HEIGHT: f32 = 26.0;

const FONT_SIZE: f32 = 16.0;
const LABEL_OFFSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownState {
    Closed,
    Open,
}

/// Callback fired with the new index when the selection changes
pub type ChangeHandler = Box<dyn FnMut(usize)>;

pub struct Dropdown {
    pub rect: Rect,
    pub label: String,
    pub font: FontHandle,
    options: Vec<String>,
    selected: usize,
    state: DropdownState,
    on_change: Option<ChangeHandler>,
}

impl Dropdown {
    /// The first option starts selected. `options` must not be empty.
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        options: Vec<String>,
        label: impl Into<String>,
        font: FontHandle,
    ) -> Self {
        Self {
            rect: Rect::new(x, y, width, ROW_HEIGHT),
            label: label.into(),
            font,
            options,
            selected: 0,
            state: DropdownState::Closed,
            on_change: None,
        }
    }

    pub fn set_on_change(&mut self, handler: impl FnMut(usize) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// Select by index without firing the change handler.
    /// Returns `false` if `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DropdownState::Open
    }

    fn option_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.rect.x,
            self.rect.y + self.rect.height + index as f32 * ROW_HEIGHT,
            self.rect.width,
            ROW_HEIGHT,
        )
    }

    /// Input phase. Returns the new index when the selection changed this frame.
    pub fn update(&mut self, rl: &dyn Rasterizer) -> Option<usize> {
        if !rl.is_mouse_pressed(MouseButton::Left) {
            return None;
        }
        let mouse = rl.mouse_position();

        match self.state {
            DropdownState::Closed => {
                if self.rect.contains(mouse) {
                    self.state = DropdownState::Open;
                }
                None
            }
            DropdownState::Open => {
                self.state = DropdownState::Closed;

                let hit = (0..self.options.len()).find(|&i| self.option_rect(i).contains(mouse))?;
                if hit == self.selected {
                    return None;
                }

                self.selected = hit;
                debug!(option = %self.options[hit], "Dropdown selection changed");
                if let Some(handler) = self.on_change.as_mut() {
                    handler(hit);
                }
                Some(hit)
            }
        }
    }

    pub fn draw(&self, rl: &mut dyn Rasterizer) {
        let rect = self.rect;
        rl.fill_rect(rect, palette::PANEL_BG);
        rl.stroke_rect(rect, 1.0, palette::BORDER);

        if let Some(option) = self.selected_option() {
            rl.draw_text(
                self.font,
                option,
                Vec2::new(rect.x + 10.0, rect.y + 5.0),
                FONT_SIZE,
                1.0,
                palette::TEXT,
            );
        }

        let arrow = if self.is_open() { "▲" } else { "▼" };
        rl.draw_text(
            self.font,
            arrow,
            Vec2::new(rect.right() - 20.0, rect.y + 5.0),
            FONT_SIZE,
            1.0,
            palette::SUBTEXT,
        );

        rl.draw_text(
            self.font,
            &self.label,
            Vec2::new(rect.x, rect.y - LABEL_OFFSET),
            FONT_SIZE,
            1.0,
            palette::SUBTEXT,
        );

        if !self.is_open() {
            return;
        }

        for (i, option) in self.options.iter().enumerate() {
            let row = self.option_rect(i);
            let background = if i == self.selected {
                palette::HEADER_BG
            } else {
                palette::PANEL_BG
            };
            rl.fill_rect(row, background);
            rl.stroke_rect(row, 1.0, palette::BORDER);
            rl.draw_text(
                self.font,
                option,
                Vec2::new(row.x + 10.0, row.y + 5.0),
                FONT_SIZE,
                1.0,
                palette::TEXT,
            );
        }
    }
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("rect", &self.rect)
            .field("label", &self.label)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("state", &self.state)
            .finish()
    }
}
