use super::{max_scroll_for, placeholder, text, CONTENT_TOP, ROW_HEIGHT, SECOND_COLUMN, THIRD_COLUMN};
use crate::palette;
use crate::panel::{Content, Panel};
use crate::raster::{Color, Rasterizer, Rect};
use deribit::Level;

/// Levels shown per side
pub const MAX_LEVELS: usize = 20;

const HEADER_ROWS: f32 = 45.0;
const SPREAD_ROW: f32 = 30.0;
const BAR_HEIGHT: f32 = 16.0;
/// Space kept free on the left of the volume bars for the price column
const BAR_INSET: f32 = 50.0;

/// Asks above, spread in the middle, bids below; each row with a volume bar
/// scaled against the largest displayed level.
#[derive(Debug, Clone)]
pub struct OrderBookView {
    max_levels: usize,
}

impl OrderBookView {
    pub fn new(max_levels: usize) -> Self {
        Self { max_levels }
    }
}

impl Default for OrderBookView {
    fn default() -> Self {
        Self::new(MAX_LEVELS)
    }
}

/// One side's rendering parameters
struct Side {
    bar: Color,
    text: Color,
}

const ASKS: Side = Side {
    bar: palette::ASK_BAR,
    text: palette::RED,
};

const BIDS: Side = Side {
    bar: palette::BID_BAR,
    text: palette::GREEN,
};

impl OrderBookView {
    #[allow(clippy::too_many_arguments)]
    fn draw_level(
        &self,
        rl: &mut dyn Rasterizer,
        panel: &Panel,
        level: &Level,
        total: f64,
        y: f32,
        max_volume: f64,
        side: &Side,
    ) {
        let rect = panel.rect;
        let pad = panel.padding;

        let bar_span = (rect.width - BAR_INSET - 2.0 * pad) as f64;
        let bar_width = if max_volume > 0.0 {
            (level.amount / max_volume * bar_span) as f32
        } else {
            0.0
        };
        if bar_width > 0.0 {
            rl.fill_rect(
                Rect::new(rect.right() - bar_width - pad, y, bar_width, BAR_HEIGHT),
                side.bar,
            );
        }

        let x = rect.x + pad;
        text(rl, panel, &format!("{:.2}", level.price), x, y, side.text);
        text(rl, panel, &format!("{:.4}", level.amount), x + SECOND_COLUMN, y, side.text);
        text(rl, panel, &format!("{:.4}", total), x + THIRD_COLUMN, y, side.text);
    }
}

impl Content for OrderBookView {
    fn render(&mut self, panel: &mut Panel, rl: &mut dyn Rasterizer) {
        let payload = panel.slot.load();
        let Some(book) = payload.order_book() else {
            placeholder(rl, panel, "Loading order book...");
            return;
        };

        let asks = &book.asks[..book.asks.len().min(self.max_levels)];
        let bids = &book.bids[..book.bids.len().min(self.max_levels)];

        let content_height = HEADER_ROWS + (asks.len() + bids.len()) as f32 * ROW_HEIGHT + SPREAD_ROW;
        panel.max_scroll = max_scroll_for(panel, content_height);

        let rect = panel.rect;
        let x = rect.x + panel.padding;
        let mut y = rect.y + CONTENT_TOP - panel.scroll;

        text(rl, panel, "Price", x, y, palette::SUBTEXT);
        text(rl, panel, "Amount", x + SECOND_COLUMN, y, palette::SUBTEXT);
        text(rl, panel, "Total", x + THIRD_COLUMN, y, palette::SUBTEXT);
        y += ROW_HEIGHT + 5.0;

        let max_volume = asks
            .iter()
            .chain(bids)
            .map(|level| level.amount)
            .fold(0.0, f64::max);

        // Highest displayed ask first so the best ask sits on the spread
        let mut total_asks = 0.0;
        for level in asks.iter().rev() {
            total_asks += level.amount;
            self.draw_level(rl, panel, level, total_asks, y, max_volume, &ASKS);
            y += ROW_HEIGHT;
        }

        let (spread, spread_pct) = book.spread().unwrap_or((0.0, 0.0));
        rl.fill_rect(
            Rect::new(x, y, rect.width - 2.0 * panel.padding, ROW_HEIGHT),
            palette::SPREAD_BAND,
        );
        text(
            rl,
            panel,
            &format!("Spread: {:.2} ({:.4}%)", spread, spread_pct),
            x + 5.0,
            y + 2.0,
            palette::TEXT,
        );
        y += ROW_HEIGHT + 5.0;

        let mut total_bids = 0.0;
        for level in bids {
            total_bids += level.amount;
            self.draw_level(rl, panel, level, total_bids, y, max_volume, &BIDS);
            y += ROW_HEIGHT;
        }
    }
}
