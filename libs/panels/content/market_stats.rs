use super::{max_scroll_for, placeholder, text, CONTENT_TOP, ROW_HEIGHT};
use crate::palette;
use crate::panel::{Content, Panel};
use crate::raster::{Color, Rasterizer, Rect};
use deribit::OrderBookSnapshot;

const VALUE_COLUMN: f32 = 130.0;
const STAT_ROW: f32 = 22.0;

/// Top-of-book and 24h statistics for the snapshot in the slot
#[derive(Debug, Clone, Default)]
pub struct MarketStatsView;

/// Colour for a signed figure where positive is good
fn signed_color(value: f64) -> Color {
    if value > 0.0 {
        palette::GREEN
    } else if value < 0.0 {
        palette::RED
    } else {
        palette::SUBTEXT
    }
}

impl MarketStatsView {
    /// Label, formatted value and colour for each row
    fn rows(book: &OrderBookSnapshot) -> Vec<(&'static str, String, Color)> {
        vec![
            ("Last", format!("{:.2}", book.last_price), palette::TEXT),
            ("Mark", format!("{:.2}", book.mark_price), palette::TEXT),
            ("Index", format!("{:.2}", book.index_price), palette::TEXT),
            (
                "24h change",
                format!("{:.2}%", book.stats.price_change),
                signed_color(book.stats.price_change),
            ),
            // Positive funding is paid by longs
            (
                "Funding 8h",
                format!("{:.4}%", book.funding_8h * 100.0),
                signed_color(-book.funding_8h),
            ),
            ("24h high", format!("{:.2}", book.stats.high), palette::TEXT),
            ("24h low", format!("{:.2}", book.stats.low), palette::TEXT),
            ("24h volume", format!("{:.2}", book.stats.volume), palette::TEXT),
            ("Open interest", format!("{:.0}", book.open_interest), palette::TEXT),
        ]
    }
}

impl Content for MarketStatsView {
    fn render(&mut self, panel: &mut Panel, rl: &mut dyn Rasterizer) {
        let payload = panel.slot.load();
        let Some(book) = payload.order_book() else {
            placeholder(rl, panel, "Waiting for market data...");
            return;
        };

        let rows = Self::rows(book);
        let content_height = CONTENT_TOP + ROW_HEIGHT + 5.0 + rows.len() as f32 * STAT_ROW;
        panel.max_scroll = max_scroll_for(panel, content_height);

        let rect = panel.rect;
        let x = rect.x + panel.padding;
        let mut y = rect.y + CONTENT_TOP - panel.scroll;

        rl.fill_rect(
            Rect::new(x, y - 2.0, rect.width - 2.0 * panel.padding, ROW_HEIGHT),
            palette::CHART_BG,
        );
        text(rl, panel, &book.instrument_name, x + 5.0, y, palette::HIGHLIGHT);
        y += ROW_HEIGHT + 5.0;

        for (label, value, color) in &rows {
            text(rl, panel, label, x, y, palette::SUBTEXT);
            text(rl, panel, value, x + VALUE_COLUMN, y, *color);
            y += STAT_ROW;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Payload;
    use crate::raster::headless::{DrawCommand, HeadlessRasterizer};
    use crate::raster::FontHandle;
    use deribit::OrderBookStats;

    fn color_of(rl: &HeadlessRasterizer, needle: &str) -> Color {
        match rl.find_text(needle) {
            Some(DrawCommand::Text { color, .. }) => *color,
            _ => panic!("text {:?} not drawn", needle),
        }
    }

    fn stats_panel() -> Panel {
        Panel::new("stats", Rect::new(0.0, 0.0, 340.0, 300.0), FontHandle::default())
            .with_content(MarketStatsView)
    }

    #[test]
    fn test_placeholder() {
        let mut panel = stats_panel();
        let mut rl = HeadlessRasterizer::default();
        panel.draw(&mut rl);
        assert!(rl.find_text("Waiting for market data...").is_some());
    }

    #[test]
    fn test_signed_colours() {
        let mut panel = stats_panel();
        panel.slot.store(Payload::OrderBook(OrderBookSnapshot {
            instrument_name: "ETH-PERPETUAL".into(),
            last_price: 3500.5,
            funding_8h: 0.0001,
            stats: OrderBookStats {
                price_change: -2.5,
                ..Default::default()
            },
            ..Default::default()
        }));

        let mut rl = HeadlessRasterizer::default();
        panel.draw(&mut rl);

        assert!(rl.find_text("ETH-PERPETUAL").is_some());
        assert_eq!(color_of(&rl, "3500.50"), palette::TEXT);
        assert_eq!(color_of(&rl, "-2.50%"), palette::RED);
        // Longs pay when funding is positive
        assert_eq!(color_of(&rl, "0.0100%"), palette::RED);
    }

    #[test]
    fn test_negative_funding_is_green() {
        let book = OrderBookSnapshot {
            funding_8h: -0.0002,
            ..Default::default()
        };
        let rows = MarketStatsView::rows(&book);
        let funding = rows.iter().find(|(label, _, _)| *label == "Funding 8h").unwrap();
        assert_eq!(funding.1, "-0.0200%");
        assert_eq!(funding.2, palette::GREEN);
    }
}
