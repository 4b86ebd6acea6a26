//! Font weight normalization from free-text font style strings.

use tokenscope_core::constants::DEFAULT_FONT_WEIGHT;

/// Checked in order, so the more specific names win over their substrings
/// ("extrabold" before "bold", "extralight" before "light").
const WEIGHT_NAMES: [(&str, &str, u16); 15] = [
    ("extralight", "ExtraLight", 200),
    ("ultralight", "ExtraLight", 200),
    ("semibold", "SemiBold", 600),
    ("demibold", "SemiBold", 600),
    ("extrabold", "ExtraBold", 800),
    ("ultrabold", "ExtraBold", 800),
    ("hairline", "Thin", 100),
    ("thin", "Thin", 100),
    ("light", "Light", 300),
    ("medium", "Medium", 500),
    ("bold", "Bold", 700),
    ("black", "Black", 900),
    ("heavy", "Black", 900),
    ("regular", "Regular", 400),
    ("normal", "Regular", 400),
];

fn normalized(style: &str) -> String {
    style
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn lookup(style: &str) -> Option<(&'static str, u16)> {
    let key = normalized(style);
    WEIGHT_NAMES
        .iter()
        .find(|(needle, _, _)| key.contains(needle))
        .map(|(_, label, weight)| (*label, *weight))
}

fn label_for_numeric(weight: u16) -> &'static str {
    match weight {
        0..=149 => "Thin",
        150..=249 => "ExtraLight",
        250..=349 => "Light",
        350..=449 => "Regular",
        450..=549 => "Medium",
        550..=649 => "SemiBold",
        650..=749 => "Bold",
        750..=849 => "ExtraBold",
        _ => "Black",
    }
}

/// Readable weight label for a font style ("Bold Italic" → "Bold").
/// Defaults to "Regular".
pub fn readable_weight(style: &str) -> &'static str {
    if let Ok(weight) = style.trim().parse::<u16>() {
        return label_for_numeric(weight);
    }
    lookup(style).map_or("Regular", |(label, _)| label)
}

/// Numeric weight for a font style; 400 when nothing is recognizable.
pub fn numeric_weight(style: &str) -> u16 {
    if let Ok(weight) = style.trim().parse::<u16>() {
        return weight;
    }
    lookup(style).map_or(DEFAULT_FONT_WEIGHT, |(_, weight)| weight)
}

/// Group label for a typography occurrence: family plus readable weight.
pub fn typography_label(family: &str, style: &str) -> String {
    format!("{family} {}", readable_weight(style))
}
