//! Closest-match-first ordering for typography suggestions.
//!
//! Tokens carry no numeric weight, so a token's weight is read from its
//! font style: a recognized weight name ("Bold", "Light") or a numeric style
//! ("700") counts as that weight. Any other style counts as 400.

use tokenscope_core::types::TextProps;

use crate::types::TypographyToken;
use crate::weight::numeric_weight;

/// 100 for a different family, plus the point-size difference, plus a
/// hundredth of the weight difference.
pub fn typography_distance(token: &TypographyToken, current: &TextProps) -> f32 {
    let family = if token.font_family == current.font_name.family {
        0.0
    } else {
        100.0
    };
    let current_weight = current
        .font_weight
        .unwrap_or_else(|| numeric_weight(&current.font_name.style));
    let token_weight = numeric_weight(&token.font_style);
    let weight = (f32::from(token_weight) - f32::from(current_weight)).abs() / 100.0;
    family + (token.font_size - current.font_size).abs() + weight
}

/// Stable sort by ascending distance; ties keep their incoming order.
pub fn rank_typography_tokens(tokens: &mut [TypographyToken], current: &TextProps) {
    tokens.sort_by(|a, b| {
        typography_distance(a, current).total_cmp(&typography_distance(b, current))
    });
}
