/// Parse a `#RRGGBB` hex color into RGB bytes.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// YIQ luma test deciding whether dark text is readable over `hex`.
/// Invalid colors default to light (dark text), matching how the guess
/// list renders on an unknown band color.
pub fn is_light_color(hex: &str) -> bool {
    let Some((r, g, b)) = parse_hex_color(hex) else {
        return true;
    };
    let yiq = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
    yiq >= 128
}

/// Text color (as hex) to draw over a band color.
pub fn contrast_text_color(background_hex: &str) -> &'static str {
    if is_light_color(background_hex) { "#333333" } else { "#FFFFFF" }
}
