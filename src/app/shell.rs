//! Widget wiring and the per-frame loop body, independent of the window backend.

use crate::config::DashboardConfig;
use chrono::Local;
use deribit::{orderbook_title, ConnectionState, MarketDataClient};
use panels::palette;
use panels::{
    DataSlot, Dropdown, FontHandle, MarketStatsView, OrderBookView, Panel, PanelStack,
    Rasterizer, Rect, TradesView, Vec2,
};
use std::sync::Arc;
use tracing::debug;

const TITLE_POS: Vec2 = Vec2::new(20.0, 15.0);
const TITLE_SIZE: f32 = 24.0;
const STATUS_HEIGHT: f32 = 25.0;
const STATUS_SIZE: f32 = 14.0;

const DROPDOWN_POS: Vec2 = Vec2::new(20.0, 70.0);
const DROPDOWN_WIDTH: f32 = 200.0;

const STATS_RECT: Rect = Rect::new(20.0, 230.0, 310.0, 300.0);
const BOOK_RECT: Rect = Rect::new(350.0, 50.0, 380.0, 640.0);
const TRADES_RECT: Rect = Rect::new(750.0, 50.0, 320.0, 400.0);

/// The dashboard: panels, the instrument selector and the status line.
///
/// Owns all render-side state. The market-data client is optional so the
/// window still comes up (with placeholders) when the initial connect fails.
pub struct Dashboard {
    title: String,
    font: FontHandle,
    stack: PanelStack,
    book: usize,
    dropdown: Dropdown,
    slot: DataSlot,
    client: Option<Arc<MarketDataClient>>,
}

impl Dashboard {
    /// `slot` must be the sink the client publishes into
    pub fn new(
        config: &DashboardConfig,
        font: FontHandle,
        slot: DataSlot,
        client: Option<Arc<MarketDataClient>>,
    ) -> Self {
        let initial = config.initial_instrument().to_string();

        let mut stack = PanelStack::new();
        let book = stack.push(
            Panel::new(orderbook_title(&initial), BOOK_RECT, font)
                .with_slot(slot.clone())
                .with_content(OrderBookView::default()),
        );
        stack.push(
            Panel::new("Recent Trades", TRADES_RECT, font).with_content(TradesView),
        );
        stack.push(
            Panel::new("Market Stats", STATS_RECT, font)
                .with_slot(slot.clone())
                .with_content(MarketStatsView),
        );

        let mut dropdown = Dropdown::new(
            DROPDOWN_POS.x,
            DROPDOWN_POS.y,
            DROPDOWN_WIDTH,
            config.feed.instruments.clone(),
            "Instrument",
            font,
        );
        dropdown.select(config.feed.initial_index());

        Self {
            title: config.window.title.clone(),
            font,
            stack,
            book,
            dropdown,
            slot,
            client,
        }
    }

    pub fn stack(&self) -> &PanelStack {
        &self.stack
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn book_panel(&self) -> Option<&Panel> {
        self.stack.get(self.book)
    }

    pub fn slot(&self) -> &DataSlot {
        &self.slot
    }

    pub fn client(&self) -> Option<&Arc<MarketDataClient>> {
        self.client.as_ref()
    }

    /// One frame: input for panels then the dropdown, then draw
    pub fn frame(&mut self, rl: &mut dyn Rasterizer) {
        self.stack.update_all(rl);
        if let Some(index) = self.dropdown.update(rl) {
            self.switch_instrument(index);
        }
        self.draw(rl);
    }

    /// Point the order book at catalogue entry `index`
    pub fn switch_instrument(&mut self, index: usize) {
        let Some(name) = self.dropdown.options().get(index).cloned() else {
            return;
        };
        debug!(instrument = %name, "Instrument selected");

        if let Some(panel) = self.stack.get_mut(self.book) {
            panel.set_title(orderbook_title(&name));
        }
        if let Some(client) = &self.client {
            client.set_instrument(&name);
        }
        self.slot.clear();
    }

    pub fn connection_label(&self) -> &'static str {
        match self.client.as_ref().map(|c| c.connection_state()) {
            Some(ConnectionState::Connected) => "Connected to Deribit",
            Some(ConnectionState::Connecting) => "Connecting to Deribit...",
            Some(ConnectionState::Closed) | None => "Disconnected",
        }
    }

    pub fn status_text(&self) -> String {
        format!("{} | v{}", self.connection_label(), env!("CARGO_PKG_VERSION"))
    }

    fn draw(&mut self, rl: &mut dyn Rasterizer) {
        let screen = rl.screen_size();
        rl.fill_rect(Rect::new(0.0, 0.0, screen.x, screen.y), palette::BACKGROUND);
        rl.draw_text(self.font, &self.title, TITLE_POS, TITLE_SIZE, 1.0, palette::TEXT);

        self.dropdown.draw(rl);
        self.stack.draw_all(rl);
        self.draw_status(rl, screen);
    }

    fn draw_status(&self, rl: &mut dyn Rasterizer, screen: Vec2) {
        let top = screen.y - STATUS_HEIGHT;
        rl.fill_rect(Rect::new(0.0, top, screen.x, STATUS_HEIGHT), palette::HEADER_BG);
        rl.draw_line(
            Vec2::new(0.0, top),
            Vec2::new(screen.x, top),
            1.0,
            palette::BORDER,
        );

        let text_y = top + (STATUS_HEIGHT - STATUS_SIZE) / 2.0;
        rl.draw_text(
            self.font,
            &self.status_text(),
            Vec2::new(10.0, text_y),
            STATUS_SIZE,
            1.0,
            palette::SUBTEXT,
        );

        let clock = Local::now().format("%H:%M:%S").to_string();
        let width = rl.measure_text(self.font, &clock, STATUS_SIZE, 1.0).x;
        rl.draw_text(
            self.font,
            &clock,
            Vec2::new(screen.x - width - 10.0, text_y),
            STATUS_SIZE,
            1.0,
            palette::SUBTEXT,
        );
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("stack", &self.stack)
            .field("dropdown", &self.dropdown)
            .field("connected", &self.client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deribit::{Level, OrderBookSnapshot, SnapshotSink};
    use panels::{DrawCommand, HeadlessRasterizer};

    fn offline() -> Dashboard {
        Dashboard::new(
            &DashboardConfig::default(),
            FontHandle::default(),
            DataSlot::new(),
            None,
        )
    }

    #[test]
    fn test_initial_layout() {
        let dash = offline();
        assert_eq!(dash.stack().len(), 3);
        assert_eq!(
            dash.book_panel().map(|p| p.title.as_str()),
            Some("deribit btcusdt - Orderbook")
        );
        assert_eq!(dash.dropdown().selected_option(), Some("BTC-PERPETUAL"));
    }

    #[test]
    fn test_offline_status_line() {
        let mut dash = offline();
        let mut rl = HeadlessRasterizer::default();
        dash.frame(&mut rl);

        let expected = format!("Disconnected | v{}", env!("CARGO_PKG_VERSION"));
        assert!(rl.texts().contains(&expected.as_str()));

        // Clock is the last text drawn, right-aligned at the bottom
        match rl
            .commands()
            .iter()
            .rev()
            .find(|c| matches!(c, DrawCommand::Text { .. }))
        {
            Some(DrawCommand::Text { text, pos, .. }) => {
                assert_eq!(text.len(), 8);
                assert_eq!(&text[2..3], ":");
                assert_eq!(&text[5..6], ":");
                assert!(pos.x > 1000.0 && pos.y > 735.0);
            }
            other => panic!("clock missing: {:?}", other),
        }
    }

    #[test]
    fn test_draw_order_background_first_status_last() {
        let mut dash = offline();
        let mut rl = HeadlessRasterizer::default();
        dash.frame(&mut rl);

        assert_eq!(
            rl.commands().first(),
            Some(&DrawCommand::Fill {
                rect: Rect::new(0.0, 0.0, 1100.0, 760.0),
                color: palette::BACKGROUND
            })
        );
        assert!(rl.find_text("Deribit Orderbook").is_some());
        assert!(rl.find_text("Loading order book...").is_some());
        assert!(rl.find_text("No recent trades data...").is_some());
        assert!(rl.find_text("Waiting for market data...").is_some());
        assert_eq!(rl.scissor_depth(), 0);
    }

    #[test]
    fn test_switch_offline_updates_title_and_clears_slot() {
        let mut dash = offline();
        dash.slot().publish(OrderBookSnapshot {
            asks: vec![Level::new(100.0, 1.0)],
            bids: vec![Level::new(99.0, 1.0)],
            ..Default::default()
        });

        dash.switch_instrument(3);
        assert_eq!(
            dash.book_panel().map(|p| p.title.as_str()),
            Some("deribit xrpusdt - Orderbook")
        );
        assert!(dash.slot().is_empty());

        // Out of range is ignored
        dash.switch_instrument(9);
        assert_eq!(
            dash.book_panel().map(|p| p.title.as_str()),
            Some("deribit xrpusdt - Orderbook")
        );
    }

    #[test]
    fn test_dropdown_click_switches_instrument() {
        let mut dash = offline();
        let mut rl = HeadlessRasterizer::default();

        rl.click_at(30.0, 80.0);
        dash.frame(&mut rl);
        assert!(dash.dropdown().is_open());

        // ETH-PERPETUAL is the second row below the selector
        rl.next_frame();
        rl.click_at(30.0, 125.0);
        dash.frame(&mut rl);
        assert_eq!(dash.dropdown().selected_option(), Some("ETH-PERPETUAL"));
        assert_eq!(
            dash.book_panel().map(|p| p.title.as_str()),
            Some("deribit ethusdt - Orderbook")
        );
    }
}
