//! # Panels
//!
//! Immediate-mode window kernel for the order-book dashboard.
//!
//! Every frame the host calls [`PanelStack::update_all`] (input phase) and then
//! [`PanelStack::draw_all`] (draw phase) with a [`Rasterizer`]. Panels own no
//! platform resources; everything goes through the rasterizer façade, which is
//! what lets the same kernel run against egui or the recording
//! [`HeadlessRasterizer`] used by tests.
//!
//! ```rust,ignore
//! let mut stack = PanelStack::new();
//! let book = stack.push(
//!     Panel::new("deribit btcusdt - Orderbook", Rect::new(350.0, 50.0, 380.0, 640.0), font)
//!         .with_content(OrderBookView::default()),
//! );
//!
//! // per frame
//! stack.update_all(rl);
//! stack.draw_all(rl);
//! ```

pub mod content;
pub mod dropdown;
pub mod palette;
pub mod panel;
pub mod raster;

pub use content::{MarketStatsView, OrderBookView, TradesView};
pub use dropdown::{Dropdown, DropdownState};
pub use panel::{Content, DataSlot, Panel, PanelStack, Payload, ResizeEdge};
pub use raster::{
    headless::{DrawCommand, HeadlessRasterizer},
    Color, CursorShape, FontHandle, MouseButton, Rasterizer, Rect, Vec2,
};
