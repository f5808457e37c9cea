use crate::model::Token;

/// Incremental display window over the processed token list.
///
/// Starts at one page and grows by one page per completed load-more. When
/// the identity of the underlying list changes (different tokens or a
/// different order, detected via an address-sequence fingerprint) the window
/// snaps back to the first page.
#[derive(Debug)]
pub struct Paginator {
    page_size: usize,
    displayed_count: usize,
    loading_more: bool,
    fingerprint: u64,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            displayed_count: page_size.max(1),
            loading_more: false,
            fingerprint: fingerprint(&[]),
        }
    }

    /// Track the current processed list, resetting to the first page when
    /// its composition or order changed. Call before reading `visible`.
    pub fn observe(&mut self, tokens: &[Token]) {
        let current = fingerprint(tokens);
        if current != self.fingerprint {
            self.fingerprint = current;
            self.displayed_count = self.page_size;
            self.loading_more = false;
        }
    }

    pub fn visible<'a>(&self, tokens: &'a [Token]) -> &'a [Token] {
        &tokens[..self.displayed_count.min(tokens.len())]
    }

    pub fn displayed_count(&self, total: usize) -> usize {
        self.displayed_count.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.displayed_count < total
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Start a load-more if one is possible. Returns false (no-op) when the
    /// list is already fully displayed or a load is in flight. The caller
    /// owns the cosmetic delay and must call `finish_load_more` afterwards.
    pub fn begin_load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) || self.loading_more {
            return false;
        }
        self.loading_more = true;
        true
    }

    pub fn finish_load_more(&mut self, total: usize) {
        if !self.loading_more {
            return;
        }
        self.loading_more = false;
        self.displayed_count = (self.displayed_count + self.page_size).min(total.max(self.page_size));
    }
}

fn fingerprint(tokens: &[Token]) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for token in tokens {
        token.token_address.hash(&mut hasher);
    }
    tokens.len().hash(&mut hasher);
    hasher.finish()
}
