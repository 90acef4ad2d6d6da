//! The symbol library: a small fixed set of mutually exclusive choices

/// One selectable symbol
#[derive(Debug, Clone)]
struct Symbol {
    key: String,
    active: bool,
}

/// Single-selection set of symbols.
///
/// Invariant: at most one symbol is active at any time.
pub struct SymbolLibrary {
    symbols: Vec<Symbol>,
}

impl SymbolLibrary {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols = keys
            .into_iter()
            .map(|key| Symbol {
                key: key.into(),
                active: false,
            })
            .collect();

        Self { symbols }
    }

    /// Activate `key`, deactivating every other symbol.
    ///
    /// Returns `false` (and changes nothing) when `key` is not in the set.
    pub fn activate(&mut self, key: &str) -> bool {
        if !self.symbols.iter().any(|s| s.key == key) {
            log::debug!("ignoring click on unknown symbol {:?}", key);
            return false;
        }

        for symbol in &mut self.symbols {
            symbol.active = symbol.key == key;
        }

        true
    }

    /// Key of the currently active symbol, if any
    pub fn active(&self) -> Option<&str> {
        self.symbols
            .iter()
            .find(|s| s.active)
            .map(|s| s.key.as_str())
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.symbols.iter().any(|s| s.active && s.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.key.as_str())
    }
}
