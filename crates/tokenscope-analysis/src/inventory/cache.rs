//! Page-keyed memo of the token inventory.
//!
//! Each list is cached per page id with a time-to-live. Asking for a page
//! other than the last one served drops everything, so navigating back and
//! forth never serves a list computed before the navigation. Callers that
//! edit bindings call [`TokenInventory::invalidate`].

use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use tokenscope_core::types::{PageId, TextProps};
use tokenscope_core::{HostDocument, HostError, TokenscopeConfig};

use crate::color::NameHygiene;
use crate::inventory::collector::{collect_applied_color_tokens, collect_applied_text_tokens};
use crate::inventory::ranking::rank_typography_tokens;
use crate::types::{ColorToken, TypographyToken};

pub struct TokenInventory {
    hygiene: NameHygiene,
    colors: Cache<PageId, Vec<ColorToken>>,
    text: Cache<PageId, Vec<TypographyToken>>,
    last_page: Option<PageId>,
}

impl TokenInventory {
    pub fn new(hygiene: NameHygiene, ttl: Duration) -> Self {
        Self {
            hygiene,
            colors: Cache::builder().max_capacity(4).time_to_live(ttl).build(),
            text: Cache::builder().max_capacity(4).time_to_live(ttl).build(),
            last_page: None,
        }
    }

    pub fn from_config(config: &TokenscopeConfig) -> Self {
        Self::new(
            NameHygiene::from_config(config.analysis.effective_token_prefixes(), &config.inventory),
            Duration::from_secs(config.inventory.effective_cache_ttl_seconds()),
        )
    }

    pub fn hygiene(&self) -> &NameHygiene {
        &self.hygiene
    }

    /// Drop both lists for every page.
    pub fn invalidate(&mut self) {
        self.colors.invalidate_all();
        self.text.invalidate_all();
    }

    fn retag(&mut self, page: &PageId) {
        if self.last_page.as_ref() != Some(page) {
            if self.last_page.is_some() {
                debug!(page = %page, "page changed, dropping token inventory");
            }
            self.invalidate();
            self.last_page = Some(page.clone());
        }
    }

    /// Color tokens for the current page.
    pub async fn color_tokens<H: HostDocument>(
        &mut self,
        host: &H,
    ) -> Result<Vec<ColorToken>, HostError> {
        let page = host.current_page();
        self.retag(&page);
        if let Some(hit) = self.colors.get(&page) {
            debug!(page = %page, cache_hit = true, tokens = hit.len(), "color tokens");
            return Ok(hit);
        }
        let tokens = collect_applied_color_tokens(host, &self.hygiene).await?;
        self.colors.insert(page, tokens.clone());
        Ok(tokens)
    }

    /// Typography tokens for the current page, ranked against `current`
    /// when given.
    pub async fn text_tokens<H: HostDocument>(
        &mut self,
        host: &H,
        current: Option<&TextProps>,
    ) -> Result<Vec<TypographyToken>, HostError> {
        let page = host.current_page();
        self.retag(&page);
        let mut tokens = match self.text.get(&page) {
            Some(hit) => {
                debug!(page = %page, cache_hit = true, tokens = hit.len(), "text tokens");
                hit
            }
            None => {
                let tokens = collect_applied_text_tokens(host, &self.hygiene).await?;
                self.text.insert(page, tokens.clone());
                tokens
            }
        };
        if let Some(current) = current {
            rank_typography_tokens(&mut tokens, current);
        }
        Ok(tokens)
    }
}
