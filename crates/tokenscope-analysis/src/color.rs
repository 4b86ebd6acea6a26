//! Color primitives: hex conversion, paint discrimination, token-name rules.

use std::fmt::Write as _;

use tokenscope_core::config::InventoryConfig;
use tokenscope_core::types::{ColorStop, GradientKind, Paint, Rgba};

/// `#RRGGBB`, uppercase, alpha ignored.
pub fn to_hex(color: &Rgba) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(color.r),
        channel(color.g),
        channel(color.b)
    )
}

/// Content signature of a gradient: visually identical gradients share it.
pub fn gradient_signature(kind: GradientKind, stops: &[ColorStop]) -> String {
    let mut signature = String::from(kind.name());
    signature.push(':');
    for (i, stop) in stops.iter().enumerate() {
        if i > 0 {
            signature.push(',');
        }
        let _ = write!(signature, "{}@{:.2}", to_hex(&stop.color), stop.position);
        if stop.color.a < 1.0 {
            let _ = write!(signature, "/{:.2}", stop.color.a);
        }
    }
    signature
}

/// What the analysis does with a paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintClass {
    Solid { hex: String },
    Gradient { signature: String },
    /// Image, video and pattern paints, and anything invisible.
    Excluded,
}

pub fn classify_paint(paint: &Paint) -> PaintClass {
    if !paint.is_visible() {
        return PaintClass::Excluded;
    }
    match paint {
        Paint::Solid { color, .. } => PaintClass::Solid { hex: to_hex(color) },
        Paint::Gradient { kind, stops, .. } => PaintClass::Gradient {
            signature: gradient_signature(*kind, stops),
        },
        Paint::Image { .. } | Paint::Video { .. } | Paint::Pattern { .. } => PaintClass::Excluded,
    }
}

/// Hex of the first visible solid paint in a list.
pub fn first_solid_hex(paints: &[Paint]) -> Option<String> {
    paints.iter().find_map(|p| match p {
        Paint::Solid { color, visible, .. } if *visible => Some(to_hex(color)),
        _ => None,
    })
}

pub fn has_token_prefix(name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| name.starts_with(p.as_str()))
}

/// Rules for turning raw style/variable names into offered display names.
#[derive(Debug, Clone)]
pub struct NameHygiene {
    prefixes: Vec<String>,
    decorative_markers: Vec<String>,
    private_markers: Vec<String>,
}

impl NameHygiene {
    pub fn new(
        prefixes: Vec<String>,
        decorative_markers: Vec<String>,
        private_markers: Vec<String>,
    ) -> Self {
        Self {
            prefixes,
            decorative_markers,
            private_markers,
        }
    }

    pub fn from_config(prefixes: Vec<String>, inventory: &InventoryConfig) -> Self {
        Self::new(
            prefixes,
            inventory.effective_decorative_markers(),
            inventory.effective_private_markers(),
        )
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    fn is_private(&self, name: &str) -> bool {
        self.private_markers
            .iter()
            .any(|m| name.starts_with(m.as_str()))
    }

    /// Name with its category prefix and decorative markers removed, or
    /// `None` if the token must not be offered.
    pub fn clean(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() || self.is_private(raw) {
            return None;
        }
        let mut name = self
            .prefixes
            .iter()
            .find_map(|p| raw.strip_prefix(p.as_str()))
            .unwrap_or(raw)
            .to_string();
        for marker in &self.decorative_markers {
            name = name.replace(marker.as_str(), "");
        }
        let name = name.trim();
        if name.is_empty() || self.is_private(name) {
            None
        } else {
            Some(name.to_string())
        }
    }

    /// Name shown after a token was applied; private tokens keep their raw name.
    pub fn display_name(&self, raw: &str) -> String {
        self.clean(raw).unwrap_or_else(|| raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenscope_core::constants::DEFAULT_TOKEN_PREFIXES;

    fn hygiene() -> NameHygiene {
        NameHygiene::new(
            DEFAULT_TOKEN_PREFIXES.iter().map(|p| p.to_string()).collect(),
            vec!["✅".to_string()],
            vec!["_".to_string(), "/".to_string()],
        )
    }

    #[test]
    fn hex_rounds_and_clamps() {
        assert_eq!(to_hex(&Rgba::rgb(1.0, 0.0, 0.0)), "#FF0000");
        assert_eq!(to_hex(&Rgba::rgb(0.5, 0.5, 0.5)), "#808080");
        assert_eq!(to_hex(&Rgba::rgb(1.2, -0.1, 0.0)), "#FF0000");
    }

    #[test]
    fn media_paints_are_excluded() {
        assert_eq!(classify_paint(&Paint::Image { visible: true }), PaintClass::Excluded);
        assert_eq!(classify_paint(&Paint::Video { visible: true }), PaintClass::Excluded);
        assert_eq!(classify_paint(&Paint::Pattern { visible: true }), PaintClass::Excluded);
    }

    #[test]
    fn invisible_solid_is_excluded() {
        let paint = Paint::Solid {
            color: Rgba::rgb(0.0, 0.0, 0.0),
            opacity: 1.0,
            visible: false,
            bound_variable: None,
        };
        assert_eq!(classify_paint(&paint), PaintClass::Excluded);
    }

    #[test]
    fn identical_gradients_share_a_signature() {
        let stops = [
            ColorStop { position: 0.0, color: Rgba::rgb(1.0, 0.0, 0.0) },
            ColorStop { position: 1.0, color: Rgba::rgb(0.0, 0.0, 1.0) },
        ];
        let a = gradient_signature(GradientKind::Linear, &stops);
        let b = gradient_signature(GradientKind::Linear, &stops.clone());
        assert_eq!(a, b);
        assert_eq!(a, "linear:#FF0000@0.00,#0000FF@1.00");
        assert_ne!(a, gradient_signature(GradientKind::Radial, &stops));
    }

    #[test]
    fn clean_strips_prefix_and_marker() {
        let h = hygiene();
        assert_eq!(h.clean("Base/Gray-500").as_deref(), Some("Gray-500"));
        assert_eq!(h.clean("Brand Colors/✅ Primary").as_deref(), Some("Primary"));
        assert_eq!(h.clean("Other/Thing").as_deref(), Some("Other/Thing"));
    }

    #[test]
    fn clean_rejects_private_and_empty() {
        let h = hygiene();
        assert_eq!(h.clean("_internal"), None);
        assert_eq!(h.clean("/orphan"), None);
        assert_eq!(h.clean("Base/"), None);
        assert_eq!(h.clean("Base/_hidden"), None);
        assert_eq!(h.clean("   "), None);
        assert_eq!(h.display_name("_internal"), "_internal");
    }
}
