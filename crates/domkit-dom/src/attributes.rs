//! Element Attributes
//!
//! Ordered name/value pairs. Names are ASCII-lowercased on the way in, as
//! HTML documents do; lookups ignore case.

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// Attributes of one element, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: Vec<Attr>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set a value; an existing attribute keeps its position.
    /// Returns the previous value.
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        match self.position(name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].value, value.to_string())),
            None => {
                self.entries.push(Attr {
                    name: name.to_ascii_lowercase(),
                    value: value.to_string(),
                });
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.position(name)?;
        Some(self.entries.remove(index).value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.entries.iter()
    }
}
