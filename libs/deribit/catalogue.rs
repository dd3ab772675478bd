//! Instruments offered by the dashboard and their display names.

/// Perpetuals selectable in the instrument dropdown, in display order
pub const INSTRUMENTS: [&str; 4] = [
    "BTC-PERPETUAL",
    "ETH-PERPETUAL",
    "SOL-PERPETUAL",
    "XRP-PERPETUAL",
];

const PERPETUAL_SUFFIX: &str = "-PERPETUAL";

/// `BTC-PERPETUAL` -> `btcusdt`
pub fn display_symbol(instrument: &str) -> String {
    let base = instrument
        .strip_suffix(PERPETUAL_SUFFIX)
        .unwrap_or(instrument);
    format!("{}usdt", base.to_lowercase())
}

/// Title of the order-book panel for `instrument`
pub fn orderbook_title(instrument: &str) -> String {
    format!("deribit {} - Orderbook", display_symbol(instrument))
}
