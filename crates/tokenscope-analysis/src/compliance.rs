//! Compliance predicates: is a paint or a text node backed by a token?

use tracing::debug;

use tokenscope_core::types::collections::FxHashMap;
use tokenscope_core::types::{Paint, PaintSet, PaintSlot, StyleBinding, StyleId};
use tokenscope_core::HostDocument;

use crate::color::has_token_prefix;

/// Color compliance with a per-walk memo of style names, so a style bound
/// on thousands of nodes is resolved once.
#[derive(Debug)]
pub struct ComplianceChecker {
    prefixes: Vec<String>,
    style_names: FxHashMap<StyleId, Option<String>>,
}

impl ComplianceChecker {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self {
            prefixes,
            style_names: FxHashMap::default(),
        }
    }

    /// First matching tier wins:
    /// 1. a solid whose color channel is bound to a variable,
    /// 2. a non-gradient paint on a slot bound to a style whose name carries
    ///    an allowed category prefix.
    ///
    /// Anything else, including a style that fails to resolve, is not a token.
    pub async fn is_paint_compliant<H: HostDocument>(
        &mut self,
        host: &H,
        paints: &PaintSet,
        paint: &Paint,
        slot: PaintSlot,
    ) -> bool {
        if matches!(paint, Paint::Solid { .. }) && paint.bound_variable().is_some() {
            return true;
        }
        if paint.is_gradient() {
            return false;
        }
        let Some(style_id) = paints.binding(slot).style_id() else {
            return false;
        };
        match self.style_name(host, style_id).await {
            Some(name) => has_token_prefix(&name, &self.prefixes),
            None => false,
        }
    }

    async fn style_name<H: HostDocument>(&mut self, host: &H, id: &StyleId) -> Option<String> {
        if let Some(cached) = self.style_names.get(id) {
            return cached.clone();
        }
        let name = match host.style(id).await {
            Ok(style) => Some(style.name),
            Err(e) => {
                debug!(style_id = %id, error = %e, "style lookup failed, treating as untokenized");
                None
            }
        };
        self.style_names.insert(id.clone(), name.clone());
        name
    }
}

/// Any non-empty text-style binding counts; no prefix rule for typography.
pub fn is_text_compliant(binding: &StyleBinding) -> bool {
    binding.style_id().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{paint_style, rect, solid, solid_bound, with_fill_style, MemoryDocument};
    use tokenscope_core::constants::DEFAULT_TOKEN_PREFIXES;

    fn checker() -> ComplianceChecker {
        ComplianceChecker::new(DEFAULT_TOKEN_PREFIXES.iter().map(|p| p.to_string()).collect())
    }

    fn fill_of(node: &tokenscope_core::types::SceneNode) -> (PaintSet, Paint) {
        let paints = node.paints().cloned().unwrap_or_default();
        let paint = paints.fills[0].clone();
        (paints, paint)
    }

    #[tokio::test]
    async fn bound_variable_is_always_compliant() {
        let doc = MemoryDocument::new("page");
        let node = rect("a", vec![solid_bound("#FF0000", "var-unlisted")]);
        let (paints, paint) = fill_of(&node);
        assert!(checker().is_paint_compliant(&doc, &paints, &paint, PaintSlot::Fill).await);
    }

    #[tokio::test]
    async fn style_needs_an_allowed_prefix() {
        let doc = MemoryDocument::new("page")
            .with_style(paint_style("s-brand", "Brand Colors/Primary", "#FF0000"))
            .with_style(paint_style("s-misc", "Misc/Red", "#FF0000"));
        let mut checker = checker();

        let branded = with_fill_style(rect("a", vec![solid("#FF0000")]), "s-brand");
        let (paints, paint) = fill_of(&branded);
        assert!(checker.is_paint_compliant(&doc, &paints, &paint, PaintSlot::Fill).await);

        let misc = with_fill_style(rect("b", vec![solid("#FF0000")]), "s-misc");
        let (paints, paint) = fill_of(&misc);
        assert!(!checker.is_paint_compliant(&doc, &paints, &paint, PaintSlot::Fill).await);
    }

    #[tokio::test]
    async fn fill_style_does_not_cover_the_stroke_slot() {
        let doc = MemoryDocument::new("page")
            .with_style(paint_style("s-brand", "Brand Colors/Primary", "#FF0000"));
        let node = with_fill_style(rect("a", vec![solid("#FF0000")]), "s-brand");
        let (paints, paint) = fill_of(&node);
        assert!(!checker().is_paint_compliant(&doc, &paints, &paint, PaintSlot::Stroke).await);
    }

    #[tokio::test]
    async fn stale_style_is_not_a_token_and_is_looked_up_once() {
        let doc = MemoryDocument::new("page");
        let node = with_fill_style(rect("a", vec![solid("#FF0000")]), "s-deleted");
        let (paints, paint) = fill_of(&node);
        let mut checker = checker();
        assert!(!checker.is_paint_compliant(&doc, &paints, &paint, PaintSlot::Fill).await);
        assert!(!checker.is_paint_compliant(&doc, &paints, &paint, PaintSlot::Fill).await);
        assert_eq!(doc.style_lookups(), 1);
    }

    #[test]
    fn text_compliance_is_binding_presence() {
        assert!(is_text_compliant(&StyleBinding::Style(StyleId::new("t"))));
        assert!(!is_text_compliant(&StyleBinding::Style(StyleId::new(""))));
        assert!(!is_text_compliant(&StyleBinding::Mixed));
        assert!(!is_text_compliant(&StyleBinding::None));
    }
}
