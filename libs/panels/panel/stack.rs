use super::{InputOutcome, Panel};
use crate::raster::{CursorShape, Rasterizer};
use tracing::debug;

/// Ordered set of panels. List order is both update order and paint order;
/// focus never reorders it.
#[derive(Debug, Default)]
pub struct PanelStack {
    panels: Vec<Panel>,
}

impl PanelStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a panel, returning its index
    pub fn push(&mut self, panel: Panel) -> usize {
        self.panels.push(panel);
        self.panels.len() - 1
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    pub fn focused(&self) -> Option<usize> {
        self.panels.iter().position(|p| p.focus)
    }

    /// Give focus to `index` and take it from every other panel
    pub fn focus(&mut self, index: usize) {
        if self.panels.get(index).is_some_and(|p| !p.focus) {
            debug!(panel = %self.panels[index].title, "Panel focused");
        }
        for (i, panel) in self.panels.iter_mut().enumerate() {
            panel.focus = i == index;
        }
    }

    /// Input phase: every panel in list order.
    ///
    /// A resize cursor requested by any panel wins over another panel's
    /// request to reset it.
    pub fn update_all(&mut self, rl: &mut dyn Rasterizer) {
        let mut cursor: Option<CursorShape> = None;

        for index in 0..self.panels.len() {
            let InputOutcome {
                took_focus,
                cursor: wanted,
            } = self.panels[index].update(rl);

            if took_focus {
                self.focus(index);
            }

            cursor = match (cursor, wanted) {
                (Some(current), _) if current != CursorShape::Default => Some(current),
                (current, None) => current,
                (_, wanted) => wanted,
            };
        }

        if let Some(shape) = cursor {
            rl.set_cursor(shape);
        }
    }

    /// Draw phase: every panel in list order, later panels on top
    pub fn draw_all(&mut self, rl: &mut dyn Rasterizer) {
        for panel in &mut self.panels {
            panel.draw(rl);
        }
    }
}
