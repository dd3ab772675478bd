//! Content renderers that plug into a [`Panel`](crate::Panel).

mod market_stats;
mod orderbook;
mod trades;

pub use market_stats::MarketStatsView;
pub use orderbook::OrderBookView;
pub use trades::TradesView;

use crate::panel::Panel;
use crate::raster::{Color, Rasterizer, Vec2};

pub const FONT_SIZE: f32 = 16.0;
pub const GLYPH_SPACING: f32 = 1.0;
pub const ROW_HEIGHT: f32 = 20.0;

/// Offset of the first content row below the panel's top edge
pub const CONTENT_TOP: f32 = 35.0;

/// Column x offsets from the panel's left padding
pub const SECOND_COLUMN: f32 = 120.0;
pub const THIRD_COLUMN: f32 = 220.0;

fn text(rl: &mut dyn Rasterizer, panel: &Panel, s: &str, x: f32, y: f32, color: Color) {
    rl.draw_text(
        panel.font,
        s,
        Vec2::new(x, y),
        FONT_SIZE,
        GLYPH_SPACING,
        color,
    );
}

/// Placeholder drawn at the first content row when the slot holds nothing usable
fn placeholder(rl: &mut dyn Rasterizer, panel: &mut Panel, message: &str) {
    panel.max_scroll = 0.0;
    let (x, y) = (panel.rect.x + panel.padding, panel.rect.y + CONTENT_TOP);
    text(rl, panel, message, x, y, crate::palette::SUBTEXT);
}

/// Scroll range for content of `content_height` inside `panel`
fn max_scroll_for(panel: &Panel, content_height: f32) -> f32 {
    (content_height - (panel.rect.height - crate::panel::HEADER_HEIGHT)).max(0.0)
}
