use chrono::{Datelike, NaiveDate};

use crate::session::GameSession;

/// Neutral glyph for colors outside the band table.
const FALLBACK_GLYPH: &str = "⬜";

/// Fixed band-color → share-emoji table.
pub fn emoji_for_color(hex: &str) -> &'static str {
    match hex {
        "#00FF00" => "🟩",
        "#FFFF00" => "🟨",
        "#FFBF00" | "#FF7F00" => "🟧",
        "#FF4000" | "#FF0000" => "🟥",
        _ => FALLBACK_GLYPH,
    }
}

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Long-form pt-BR date ("30 de agosto de 2026") from a fixed month
/// table, with no dependence on the host locale.
pub fn format_date_pt_br(date: NaiveDate) -> String {
    let month = MONTHS_PT_BR[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Compact shareable result: header with game name and date, attempt
/// count, then one emoji per guess in chronological order.
pub fn format_share_text(session: &GameSession, game_name: &str, date: NaiveDate) -> String {
    let attempts = session.guesses.len();
    let noun = if attempts == 1 { "tentativa" } else { "tentativas" };
    let glyphs: String = session
        .guesses
        .iter()
        .map(|guess| emoji_for_color(guess.band.color_hex()))
        .collect();

    format!(
        "{game_name} — {}\n{attempts} {noun}\n{glyphs}",
        format_date_pt_br(date)
    )
}
