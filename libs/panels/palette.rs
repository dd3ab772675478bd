//! Dashboard colours

use crate::raster::Color;

pub const BACKGROUND: Color = Color::rgb(21, 25, 30);
pub const PANEL_BG: Color = Color::rgb(28, 32, 38);
pub const HEADER_BG: Color = Color::rgb(32, 36, 43);
pub const BORDER: Color = Color::rgb(45, 49, 55);
pub const TEXT: Color = Color::rgb(210, 210, 210);
pub const SUBTEXT: Color = Color::rgb(140, 145, 155);
pub const GREEN: Color = Color::rgb(75, 201, 155);
pub const RED: Color = Color::rgb(229, 78, 103);
pub const HIGHLIGHT: Color = Color::rgb(255, 255, 255);
pub const CHART_BG: Color = Color::rgb(25, 29, 34);

// Translucent fills
pub const ASK_BAR: Color = Color::rgba(229, 78, 103, 40);
pub const BID_BAR: Color = Color::rgba(75, 201, 155, 40);
pub const SPREAD_BAND: Color = Color::rgba(40, 44, 52, 100);
pub const CORNER_GRIP: Color = Color::rgba(75, 75, 75, 100);
