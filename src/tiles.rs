//! Text handling behind the portal page glue, kept free of DOM types.

/// Delay before a flash message starts fading.
pub const FLASH_DISMISS_MS: i32 = 5000;
/// Length of the fade; the element is removed once it ends.
pub const FLASH_FADE_MS: i32 = 500;

pub const LOGOUT_PROMPT: &str = "Are you sure you want to log out?";

/// Lower-cased, trimmed search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether a tile stays visible for an already normalised query. An empty
/// query matches everything.
pub fn tile_matches(name: &str, description: &str, query: &str) -> bool {
    query.is_empty()
        || name.to_lowercase().contains(query)
        || description.to_lowercase().contains(query)
}

pub fn open_message(name: &str, id: Option<&str>) -> String {
    format!("opened app {} (id {})", name.trim(), id.unwrap_or("unknown"))
}

/// Inline style for the fade-out step.
pub fn fade_style(fade_ms: i32) -> [(&'static str, String); 2] {
    [
        ("opacity", "0".to_owned()),
        ("transition", format!("opacity {}s ease-out", fade_ms as f64 / 1000.0)),
    ]
}
