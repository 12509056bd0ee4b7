//! The word dictionary: a newest-first, case-insensitive name table.
//!
//! Primitive entries point into the VM's own primitive table by index; user
//! entries point at a starting offset in the code space. A name under
//! construction by `:` is not in this table at all until `;` commits it —
//! see [`Dictionary::begin_definition`] / [`Dictionary::commit_definition`].

use crate::error::VmError;

pub const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    Primitive(usize),
    User(usize),
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub immediate: bool,
    pub kind: WordKind,
}

pub struct Dictionary {
    entries: Vec<Entry>,
    capacity: usize,
    pending: Option<(String, usize)>,
}

fn normalize(name: &str) -> String {
    let mut s = name.to_ascii_uppercase();
    s.truncate(MAX_NAME_LEN);
    s
}

impl Dictionary {
    pub fn new(capacity: usize) -> Self {
        Dictionary {
            entries: Vec::with_capacity(capacity),
            capacity,
            pending: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest-first, case-insensitive lookup. Returns `None` while the name
    /// is in `name`'s pending (not-yet-committed) definition.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        let key = normalize(name);
        self.entries.iter().rev().find(|e| e.name == key)
    }

    /// Like `find`, but returns the entry's stable index (its position in
    /// insertion order), used to compile a `Call` instruction.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        let key = normalize(name);
        self.entries.iter().rposition(|e| e.name == key)
    }

    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn add_primitive(&mut self, name: &str, index: usize, immediate: bool) -> Result<(), VmError> {
        if self.entries.len() >= self.capacity {
            return Err(VmError::DictionaryFull);
        }
        self.entries.push(Entry {
            name: normalize(name),
            immediate,
            kind: WordKind::Primitive(index),
        });
        Ok(())
    }

    /// `:` — open a pending user-word definition. The name is not visible to
    /// `find` until `commit_definition` runs.
    pub fn begin_definition(&mut self, name: &str, body: usize) {
        self.pending = Some((normalize(name), body));
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// `;` — commit the pending definition, inserting its dictionary entry.
    pub fn commit_definition(&mut self) -> Result<(), VmError> {
        let (name, body) = self.pending.take().ok_or(VmError::UnbalancedControlFlow)?;
        if self.entries.len() >= self.capacity {
            return Err(VmError::DictionaryFull);
        }
        self.entries.push(Entry {
            name,
            immediate: false,
            kind: WordKind::User(body),
        });
        Ok(())
    }

    /// Abandon a pending definition without inserting an entry (used when a
    /// compile-time error discards the rest of the line).
    pub fn abandon_definition(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut d = Dictionary::new(8);
        d.add_primitive("dup", 0, false).unwrap();
        assert!(d.find("DUP").is_some());
        assert!(d.find("Dup").is_some());
    }

    #[test]
    fn redefinition_shadows_the_older_entry() {
        let mut d = Dictionary::new(8);
        d.add_primitive("foo", 0, false).unwrap();
        d.add_primitive("foo", 1, false).unwrap();
        match d.find("foo").unwrap().kind {
            WordKind::Primitive(idx) => assert_eq!(idx, 1),
            _ => panic!("expected primitive"),
        }
    }

    #[test]
    fn pending_definition_is_invisible_until_committed() {
        let mut d = Dictionary::new(8);
        d.begin_definition("square", 0);
        assert!(d.find("square").is_none());
        d.commit_definition().unwrap();
        assert!(d.find("square").is_some());
    }

    #[test]
    fn commit_without_begin_is_unbalanced() {
        let mut d = Dictionary::new(8);
        assert_eq!(d.commit_definition(), Err(VmError::UnbalancedControlFlow));
    }

    #[test]
    fn full_dictionary_rejects_new_primitives() {
        let mut d = Dictionary::new(1);
        d.add_primitive("a", 0, false).unwrap();
        assert_eq!(d.add_primitive("b", 1, false), Err(VmError::DictionaryFull));
    }

    #[test]
    fn overlong_names_are_truncated_not_rejected() {
        let mut d = Dictionary::new(8);
        let long_name = "a".repeat(MAX_NAME_LEN + 10);
        d.add_primitive(&long_name, 0, false).unwrap();
        assert!(d.find(&long_name).is_some());
        assert_eq!(d.find(&long_name).unwrap().name.len(), MAX_NAME_LEN);
    }
}
