//! Static one-to-one key remapping used by remap mode.

use crate::symbol::InputSymbol;
use ahash::AHashMap;

/// Immutable mapping from a physical key character to output text.
#[derive(Debug, Clone, Default)]
pub struct StaticKeymap {
    table: AHashMap<char, String>,
}

impl StaticKeymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, output)` pairs. Later pairs override earlier ones.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Self {
            table: pairs.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    pub fn map(&self, key: char) -> Option<&str> {
        self.table.get(&key).map(String::as_str)
    }

    /// Map the character a symbol types, if it has one.
    pub fn map_symbol(&self, symbol: &InputSymbol) -> Option<&str> {
        symbol.as_char().and_then(|ch| self.map(ch))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for StaticKeymap {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
