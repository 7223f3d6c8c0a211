//! Private helper functions for locator cleaning

/// Zero Width No-Break Space / BOM, which `str::trim` keeps.
const BOM: char = '\u{FEFF}';

/// Next Line, which `str::trim` drops but JavaScript's `trim` keeps.
const NEL: char = '\u{0085}';

/// Trim the same set `String.prototype.trim` does: Unicode whitespace
/// (minus NEL) and BOMs.
pub fn trim_locator(text: &str) -> &str {
    text.trim_matches(|c: char| (c.is_whitespace() && c != NEL) || c == BOM)
}
