//! Pure presentation helpers: deterministic colour tags, initials, and
//! number/category formatting. No state, no I/O.

/// Palette tokens for brand avatars.
pub const AVATAR_PALETTE: [&str; 7] = [
    "primary",
    "accent",
    "dark-blue",
    "light-blue",
    "success",
    "warning",
    "danger",
];

/// Palette tokens for report/template category tags.
pub const CATEGORY_PALETTE: [&str; 7] = ["blue", "amber", "emerald", "indigo", "pink", "sky", "rose"];

/// Character-code-weighted string hash.
///
/// Each step computes `code + ((hash << 5) - hash)` where the shift operates
/// on the 32-bit truncation of `hash`, over UTF-16 code units. The result is
/// stable across runs for the same input.
fn string_hash(s: &str) -> i64 {
    s.encode_utf16().fold(0i64, |hash, unit| {
        #[allow(clippy::cast_possible_truncation)]
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        i64::from(unit) + shifted - hash
    })
}

fn pick<'a>(palette: &[&'a str; 7], key: &str) -> &'a str {
    if key.is_empty() {
        return palette[0];
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (string_hash(key) % 7).unsigned_abs() as usize;
    palette[index]
}

/// Avatar colour token for a brand name.
#[must_use]
pub fn avatar_color(name: &str) -> &'static str {
    pick(&AVATAR_PALETTE, name)
}

/// Tag colour token for a report or template category.
#[must_use]
pub fn category_color(category: &str) -> &'static str {
    pick(&CATEGORY_PALETTE, category)
}

/// Uppercased first character of `name`, or `?` when empty.
#[must_use]
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
}

/// `brand_health` → `Brand Health`.
#[must_use]
pub fn format_category(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    let mut prev_is_word = false;
    for c in category.chars() {
        let c = if c == '_' { ' ' } else { c };
        let is_word = c.is_alphanumeric();
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// Compact notation with at most three significant digits: `1.23K`, `45.6M`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_compact(n: u64) -> String {
    const UNITS: [(&str, f64); 5] = [("", 1.0), ("K", 1e3), ("M", 1e6), ("B", 1e9), ("T", 1e12)];

    if n < 1000 {
        return n.to_string();
    }

    let value = n as f64;
    let mut idx = 0;
    while idx + 1 < UNITS.len() && value >= UNITS[idx + 1].1 {
        idx += 1;
    }
    let mut scaled = round_significant(value / UNITS[idx].1, 3);
    if scaled >= 1000.0 && idx + 1 < UNITS.len() {
        idx += 1;
        scaled = round_significant(value / UNITS[idx].1, 3);
    }

    let int_digits = integer_digits(scaled);
    let decimals = 3usize.saturating_sub(int_digits);
    let text = format!("{scaled:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    format!("{text}{}", UNITS[idx].0)
}

#[allow(clippy::cast_possible_truncation)]
fn round_significant(x: f64, digits: i32) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let magnitude = x.abs().log10().floor() as i32 + 1;
    let factor = 10f64.powi(digits - magnitude);
    (x * factor).round() / factor
}

fn integer_digits(x: f64) -> usize {
    let mut digits = 1;
    let mut bound = 10.0;
    while x >= bound {
        digits += 1;
        bound *= 10.0;
    }
    digits
}
