use chrono::{Datelike, NaiveDate};

/// Integer seed for a calendar day: `year * 10000 + month * 100 + day`,
/// month 1-indexed. Truncation to u32 is deliberate and well-defined.
pub fn date_seed(date: NaiveDate) -> u32 {
    (date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64) as u32
}

/// Small fixed-state integer mixer (xorshift-multiply, two rounds).
/// All arithmetic wraps, so the output is bit-exact on every platform.
fn mix(seed: u32) -> u32 {
    let mut x = seed;
    x = ((x >> 16) ^ x).wrapping_mul(0x45d9f3b);
    x = ((x >> 16) ^ x).wrapping_mul(0x45d9f3b);
    (x >> 16) ^ x
}

/// Uniform draw in [0, 1) derived from the date alone.
fn uniform_for_date(date: NaiveDate) -> f64 {
    mix(date_seed(date)) as f64 / (1u64 << 32) as f64
}

/// Pick the day's target out of a sorted normalized-name list.
///
/// The list must already be in a stable lexicographic order (see
/// `MunicipalityRegistry::sorted_keys`); two clients holding the same
/// names in different orders would otherwise disagree on the target.
/// Returns `None` for an empty list; same (list, date) always yields
/// the same key.
pub fn pick_daily_target<'a>(sorted_keys: &'a [String], date: NaiveDate) -> Option<&'a str> {
    if sorted_keys.is_empty() {
        return None;
    }
    let len = sorted_keys.len();
    let index = (uniform_for_date(date) * len as f64).floor() as usize % len;
    Some(&sorted_keys[index])
}
