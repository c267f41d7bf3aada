//! Field-scoped validation messages collected while saving a view

use std::fmt;

/// One validation problem, tied to the field it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

/// Ordered collection of validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    entries: Vec<FieldMessage>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push(FieldMessage {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: &Messages) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages for one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |m| m.field == field)
            .map(|m| m.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMessage> {
        self.entries.iter()
    }
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", entry.field, entry.message)?;
        }
        Ok(())
    }
}
