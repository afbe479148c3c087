//! Ordered, deduplicating collection of class tokens.
//!
//! A token is one class name or a fixed group of class names joined by
//! spaces (the font-size pair is stored as a single entry). Identity is the
//! literal string: no case folding, no splitting.

use std::collections::HashMap;

/// Insertion-ordered set of class tokens.
///
/// ```
/// use uaclass_core::TokenSet;
///
/// let mut set = TokenSet::new();
/// set.add("js").add("m-touch").add("js");
/// assert_eq!(set.get_all(), "js m-touch");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    index: HashMap<String, usize>,
    tokens: Vec<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token unless it is empty or already present.
    pub fn add(&mut self, token: impl Into<String>) -> &mut Self {
        let token = token.into();
        if token.is_empty() || self.index.contains_key(&token) {
            return self;
        }
        self.index.insert(token.clone(), self.tokens.len());
        self.tokens.push(token);
        self
    }

    /// Append a token that a probe may not have produced.
    pub fn add_opt<S: Into<String>>(&mut self, token: Option<S>) -> &mut Self {
        match token {
            Some(token) => self.add(token),
            None => self,
        }
    }

    /// Look up a stored token by exact value.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.index
            .get(token)
            .map(|&position| self.tokens[position].as_str())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// All tokens joined by single spaces, in insertion order.
    pub fn get_all(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
