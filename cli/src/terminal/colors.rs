use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Cyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

/// IPv4 addresses render cyan, IPv6 magenta, so mixed batches scan quickly.
pub const ADDR_V4: Color = Color::BrightCyan;
pub const ADDR_V6: Color = Color::BrightMagenta;
