//! Two-phase token collection.
//!
//! Phase 1 walks the whole current page without awaiting anything and
//! records every distinct style id and bound variable id. Phase 2 resolves
//! them all concurrently and awaits them as one batch.

use futures::future::join_all;
use tracing::{debug, info};

use tokenscope_core::types::collections::FxHashSet;
use tokenscope_core::types::{FontName, Paint, Style, StyleId, VariableId};
use tokenscope_core::{HostDocument, HostError};

use crate::color::{first_solid_hex, to_hex, NameHygiene};
use crate::types::{ColorToken, TokenSource, TypographyToken};
use crate::walker::Preorder;

/// Distinct bindings in use on a page, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBindings {
    pub paint_styles: Vec<StyleId>,
    pub text_styles: Vec<StyleId>,
    /// Bound color variables with the hex their paint currently renders.
    pub variables: Vec<(VariableId, String)>,
}

impl PageBindings {
    pub fn is_empty(&self) -> bool {
        self.paint_styles.is_empty() && self.text_styles.is_empty() && self.variables.is_empty()
    }
}

fn push_unique<T: Clone + Eq + std::hash::Hash>(
    seen: &mut FxHashSet<T>,
    out: &mut Vec<T>,
    value: &T,
) {
    if seen.insert(value.clone()) {
        out.push(value.clone());
    }
}

/// Phase 1: synchronous walk over every node of the current page, hidden
/// ones included.
pub fn collect_page_bindings<H: HostDocument>(host: &H) -> PageBindings {
    let mut bindings = PageBindings::default();
    let mut seen_paint = FxHashSet::default();
    let mut seen_text = FxHashSet::default();
    let mut seen_vars = FxHashSet::default();

    for node in Preorder::new(host, &host.page_children(), true) {
        if let Some(paints) = node.paints() {
            for binding in [&paints.fill_style, &paints.stroke_style] {
                if let Some(id) = binding.style_id() {
                    push_unique(&mut seen_paint, &mut bindings.paint_styles, id);
                }
            }
            for paint in paints.fills.iter().chain(&paints.strokes) {
                let Some(var) = paint.bound_variable() else {
                    continue;
                };
                if seen_vars.insert(var.clone()) {
                    let preview = match paint {
                        Paint::Solid { color, .. } => to_hex(color),
                        _ => String::new(),
                    };
                    bindings.variables.push((var.clone(), preview));
                }
            }
        }
        if let Some((_, binding)) = node.text() {
            if let Some(id) = binding.style_id() {
                push_unique(&mut seen_text, &mut bindings.text_styles, id);
            }
        }
    }
    bindings
}

/// Resolve styles concurrently; unresolvable ids are dropped.
async fn resolve_styles<H: HostDocument>(host: &H, ids: &[StyleId]) -> Vec<Style> {
    let results = join_all(ids.iter().map(|id| host.style(id))).await;
    results
        .into_iter()
        .zip(ids)
        .filter_map(|(result, id)| match result {
            Ok(style) => Some(style),
            Err(e) => {
                debug!(style_id = %id, error = %e, "dropping unresolvable style");
                None
            }
        })
        .collect()
}

fn color_token_from_style(style: &Style, hygiene: &NameHygiene) -> Option<ColorToken> {
    let hex = first_solid_hex(style.paints()?)?;
    Some(ColorToken {
        name: hygiene.clean(&style.name)?,
        hex,
        id: style.id.to_string(),
        source: TokenSource::Style,
    })
}

fn text_token_from_style(style: &Style, hygiene: &NameHygiene) -> Option<TypographyToken> {
    let props = style.text()?;
    Some(TypographyToken {
        name: hygiene.clean(&style.name)?,
        id: style.id.to_string(),
        font_family: props.font_name.family.clone(),
        font_style: props.font_name.style.clone(),
        font_size: props.font_size,
    })
}

fn finish<T>(mut tokens: Vec<T>, id: impl Fn(&T) -> &str, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = FxHashSet::default();
    tokens.retain(|t| seen.insert(id(t).to_string()));
    tokens.sort_by(|a, b| name(a).cmp(name(b)));
    tokens
}

/// Color tokens in use on the current page, falling back to every local
/// paint style when the page uses none.
#[tracing::instrument(skip_all)]
pub async fn collect_applied_color_tokens<H: HostDocument>(
    host: &H,
    hygiene: &NameHygiene,
) -> Result<Vec<ColorToken>, HostError> {
    // Phase 1: bindings in use.
    let bindings = collect_page_bindings(host);

    // Phase 2: resolve styles and variables as one batch.
    let (styles, variables) = futures::join!(
        resolve_styles(host, &bindings.paint_styles),
        join_all(bindings.variables.iter().map(|(id, _)| host.variable(id)))
    );

    let mut tokens: Vec<ColorToken> = styles
        .iter()
        .filter_map(|s| color_token_from_style(s, hygiene))
        .collect();

    for (result, (id, preview)) in variables.into_iter().zip(&bindings.variables) {
        let variable = match result {
            Ok(v) => v,
            Err(e) => {
                debug!(variable_id = %id, error = %e, "dropping unresolvable variable");
                continue;
            }
        };
        let hex = variable.color().map(|c| to_hex(&c)).unwrap_or_else(|| preview.clone());
        if hex.is_empty() {
            continue;
        }
        if let Some(name) = hygiene.clean(&variable.name) {
            tokens.push(ColorToken {
                name,
                hex,
                id: variable.id.to_string(),
                source: TokenSource::Variable,
            });
        }
    }

    if tokens.is_empty() {
        debug!("no color tokens in use on page, falling back to local paint styles");
        tokens = host
            .local_paint_styles()
            .await?
            .iter()
            .filter(|s| !s.remote)
            .filter_map(|s| color_token_from_style(s, hygiene))
            .collect();
    }

    let tokens = finish(tokens, |t| t.id.as_str(), |t| t.name.as_str());
    info!(tokens = tokens.len(), "color tokens collected");
    Ok(tokens)
}

/// Typography tokens in use on the current page (local text styles when
/// none). Every distinct font they reference is loaded before returning.
#[tracing::instrument(skip_all)]
pub async fn collect_applied_text_tokens<H: HostDocument>(
    host: &H,
    hygiene: &NameHygiene,
) -> Result<Vec<TypographyToken>, HostError> {
    let bindings = collect_page_bindings(host);
    let mut styles = resolve_styles(host, &bindings.text_styles).await;
    styles.retain(|s| s.text().is_some());

    if styles.is_empty() {
        debug!("no text tokens in use on page, falling back to local text styles");
        styles = host.local_text_styles().await?;
        styles.retain(|s| !s.remote);
    }

    let mut fonts: Vec<FontName> = Vec::new();
    let mut seen = FxHashSet::default();
    for props in styles.iter().filter_map(Style::text) {
        push_unique(&mut seen, &mut fonts, &props.font_name);
    }
    let loads = join_all(fonts.iter().map(|f| host.load_font(f))).await;
    for (font, result) in fonts.iter().zip(loads) {
        if let Err(e) = result {
            debug!(family = %font.family, style = %font.style, error = %e, "font preload failed");
        }
    }

    let tokens: Vec<TypographyToken> = styles
        .iter()
        .filter_map(|s| text_token_from_style(s, hygiene))
        .collect();
    let tokens = finish(tokens, |t| t.id.as_str(), |t| t.name.as_str());
    info!(tokens = tokens.len(), fonts = fonts.len(), "text tokens collected");
    Ok(tokens)
}
