//! Interned identifiers.
//!
//! Every identifier text a fragment scans is interned through the module's shared
//! [`NameInterner`] so that scope lookup and symbol comparison are `u32` equality checks rather
//! than string comparisons.

use std::fmt;

use rustc_hash::FxHashMap;

/// An interned identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    /// Reserved name for the implicit recursive self-binding inside function bodies.
    pub const SELF: &'static str = "self";
    /// Reserved name for the last top-level expression result.
    pub const UNDERSCORE: &'static str = "_";
}

/// Interns identifier text to cheap, comparable [`Name`] handles.
#[derive(Default)]
pub struct NameInterner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Name>,
}

impl NameInterner {
    pub fn new() -> Self {
        NameInterner::default()
    }

    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.lookup.get(text) {
            return name;
        }
        let name = Name(self.strings.len() as u32);
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, name);
        name
    }

    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
