use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const SECONDARY: Color = Color::Cyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const VERDICT_YES: Color = Color::Green;
pub const VERDICT_NO: Color = Color::BrightBlack;
pub const SKIPPED: Color = Color::Yellow;
pub const FAILURE: Color = Color::Red;

// asset type groups
pub const ASSET_CLOUD: Color = Color::Magenta;
pub const ASSET_CODE: Color = Color::BrightMagenta;
pub const ASSET_NETWORK: Color = Color::BrightCyan;
pub const ASSET_NAME: Color = Color::BrightGreen;
