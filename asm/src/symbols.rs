use arch::mem::{ADDR_MAX, PREDEFINED, VAR_BASE};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Predefined,
    Label,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: Kind,
    pub addr: u16,
    /// Line that introduced the symbol (0-based). `None` for predefined symbols.
    pub line_idx: Option<usize>,
}

/// Name to address map of one assembly run.
///
/// Starts out with the predefined symbols. Labels are added by the first pass,
/// variables by the second pass on first use. Entries are never reassigned.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
    next_var: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        let symbols = PREDEFINED
            .iter()
            .map(|&(name, addr)| {
                let symbol = Symbol {
                    kind: Kind::Predefined,
                    addr,
                    line_idx: None,
                };
                (name.to_string(), symbol)
            })
            .collect();
        SymbolTable {
            symbols,
            next_var: VAR_BASE,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn get_val(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).map(|symbol| symbol.addr)
    }

    /// Binds a label to an instruction address. An existing binding is kept.
    pub fn define_label(&mut self, name: &str, addr: u16, line_idx: usize) -> Result<(), Error> {
        if let Some(prev) = self.symbols.get(name) {
            return Err(Error::RedefinedLabel {
                name: name.to_string(),
                prev: prev.line_idx,
            });
        }
        let symbol = Symbol {
            kind: Kind::Label,
            addr,
            line_idx: Some(line_idx),
        };
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    /// Looks a name up, allocating the next variable address if it is unknown.
    pub fn get_or_alloc(&mut self, name: &str, line_idx: usize) -> Result<u16, Error> {
        if let Some(addr) = self.get_val(name) {
            return Ok(addr);
        }
        if self.next_var > ADDR_MAX {
            return Err(Error::AddressSpaceExhausted(name.to_string()));
        }
        let addr = self.next_var;
        self.next_var += 1;
        let symbol = Symbol {
            kind: Kind::Variable,
            addr,
            line_idx: Some(line_idx),
        };
        self.symbols.insert(name.to_string(), symbol);
        Ok(addr)
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.symbols.values().filter(|s| s.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.symbols.iter()
    }

    /// JSON array of `{name, kind, address, line}` in insertion order.
    /// `line` is 1-based.
    pub fn to_json(&self) -> Result<String, Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            name: &'a str,
            kind: Kind,
            address: u16,
            line: Option<usize>,
        }

        let entries: Vec<Entry> = self
            .iter()
            .map(|(name, symbol)| Entry {
                name,
                kind: symbol.kind,
                address: symbol.addr,
                line: symbol.line_idx.map(|idx| idx + 1),
            })
            .collect();
        serde_json::to_string_pretty(&entries).map_err(Error::Serialize)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
