use std::collections::HashMap;

use crate::render::Color;

const DEFAULT_CAPACITY: usize = 256;

/// Runtime metrics exposed by the cell color cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellColorCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Parses per-cell color strings once and reuses them across frames.
///
/// Unparseable colors resolve to `fallback`. The cache is cleared when it
/// reaches capacity, which bounds memory under churning inputs.
#[derive(Debug, Clone)]
pub struct CellColorCache {
    entries: HashMap<String, Color>,
    fallback: Color,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl CellColorCache {
    #[must_use]
    pub fn new(fallback: Color) -> Self {
        Self::with_capacity(fallback, DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(fallback: Color, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    pub fn resolve(&mut self, raw: &str) -> Color {
        if let Some(color) = self.entries.get(raw) {
            self.hits += 1;
            return *color;
        }

        self.misses += 1;
        let color = Color::parse(raw).unwrap_or(self.fallback);
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(raw.to_owned(), color);
        color
    }

    #[must_use]
    pub fn stats(&self) -> CellColorCacheStats {
        CellColorCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
