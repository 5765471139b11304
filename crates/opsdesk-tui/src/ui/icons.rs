//! Navigation icons.
//!
//! The navigation table names icons by identifier only; the shell picks a
//! registry at startup and resolves identifiers when drawing the menu.

/// Glyph shown for identifiers a registry does not know.
pub const FALLBACK_GLYPH: &str = "•";

pub trait IconRegistry: Send + Sync {
    /// Glyph for `id`, or `None` if this registry has no entry.
    fn lookup(&self, id: &str) -> Option<&'static str>;

    fn glyph(&self, id: &str) -> &'static str {
        self.lookup(id).unwrap_or(FALLBACK_GLYPH)
    }
}

/// Unicode symbols for terminals with a decent font.
pub struct SymbolIcons;

impl IconRegistry for SymbolIcons {
    fn lookup(&self, id: &str) -> Option<&'static str> {
        Some(match id {
            "dashboard" => "◈",
            "leads" => "✦",
            "customers" => "☺",
            "products" => "▣",
            "quotations" => "✎",
            "invoices" => "≡",
            "finance" => "¤",
            "employees" => "♟",
            "departments" => "⌂",
            _ => return None,
        })
    }
}

/// Plain ASCII, for consoles without Unicode glyphs.
pub struct AsciiIcons;

impl IconRegistry for AsciiIcons {
    fn lookup(&self, id: &str) -> Option<&'static str> {
        Some(match id {
            "dashboard" => "#",
            "leads" => "*",
            "customers" => "@",
            "products" => "=",
            "quotations" => "?",
            "invoices" => "%",
            "finance" => "$",
            "employees" => "&",
            "departments" => "+",
            _ => return None,
        })
    }
}
