use super::{max_scroll_for, placeholder, text, CONTENT_TOP, ROW_HEIGHT, SECOND_COLUMN, THIRD_COLUMN};
use crate::palette;
use crate::panel::{Content, Panel};
use crate::raster::Rasterizer;

const HEADER_ROWS: f32 = 45.0;

/// Recent trades, newest first as supplied; buys green, sells red
#[derive(Debug, Clone, Default)]
pub struct TradesView;

impl Content for TradesView {
    fn render(&mut self, panel: &mut Panel, rl: &mut dyn Rasterizer) {
        let payload = panel.slot.load();
        let Some(trades) = payload.trades() else {
            placeholder(rl, panel, "No recent trades data...");
            return;
        };

        panel.max_scroll = max_scroll_for(panel, HEADER_ROWS + trades.len() as f32 * ROW_HEIGHT);

        let x = panel.rect.x + panel.padding;
        let mut y = panel.rect.y + CONTENT_TOP - panel.scroll;

        text(rl, panel, "Price", x, y, palette::SUBTEXT);
        text(rl, panel, "Amount", x + SECOND_COLUMN, y, palette::SUBTEXT);
        text(rl, panel, "Time", x + THIRD_COLUMN, y, palette::SUBTEXT);
        y += ROW_HEIGHT + 5.0;

        for trade in trades {
            let color = if trade.is_buy() {
                palette::GREEN
            } else {
                palette::RED
            };

            text(rl, panel, &format!("{:.2}", trade.price), x, y, color);
            text(rl, panel, &format!("{:.4}", trade.amount), x + SECOND_COLUMN, y, color);
            text(rl, panel, &trade.timestamp, x + THIRD_COLUMN, y, palette::SUBTEXT);
            y += ROW_HEIGHT;
        }
    }
}
