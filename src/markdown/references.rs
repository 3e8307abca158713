//! Link references and the abbreviation glossary accumulated while
//! rendering.

use std::collections::HashMap;
use std::fmt;

/// A numbered link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// 1-based id, assigned in first-encounter order.
    pub id: usize,
    pub href: String,
    pub title: Option<String>,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.id, self.href)?;
        if let Some(title) = &self.title {
            write!(f, " {}", quote_title(title))?;
        }
        Ok(())
    }
}

/// Wrap a link title in double quotes, escaping embedded quotes.
pub(crate) fn quote_title(title: &str) -> String {
    format!("\"{}\"", title.replace('"', "\\\""))
}

/// Deduplicating table of link targets.
///
/// Targets with the same `(href, title)` share one id. Entries are handed
/// out in batches by [`ReferenceTable::take_pending`], so a reference block
/// only ever lists targets that no earlier block listed.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    entries: Vec<Reference>,
    ids: HashMap<(String, Option<String>), usize>,
    emitted: usize,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for the target, allocating one on first use.
    pub fn intern(&mut self, href: &str, title: Option<&str>) -> usize {
        let key = (href.to_string(), title.map(str::to_string));
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.entries.len() + 1;
        self.entries.push(Reference {
            id,
            href: key.0.clone(),
            title: key.1.clone(),
        });
        self.ids.insert(key, id);
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Reference] {
        &self.entries
    }

    /// Reference block for entries added since the previous call.
    pub fn take_pending(&mut self) -> Option<String> {
        let pending = &self.entries[self.emitted..];
        if pending.is_empty() {
            return None;
        }
        let block = pending
            .iter()
            .map(Reference::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        self.emitted = self.entries.len();
        Some(block)
    }
}

/// Abbreviation definitions in first-seen order.
///
/// Redefining an abbreviation replaces its definition but keeps its
/// position.
#[derive(Debug, Default)]
pub struct Glossary {
    entries: Vec<(String, String)>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, abbr: &str, definition: &str) {
        match self.entries.iter_mut().find(|(a, _)| a == abbr) {
            Some(entry) => entry.1 = definition.to_string(),
            None => self
                .entries
                .push((abbr.to_string(), definition.to_string())),
        }
    }

    pub fn definition(&self, abbr: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == abbr)
            .map(|(_, d)| d.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Glossary block, one `  *[abbr]: definition` line per entry.
    pub fn render(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|(abbr, definition)| format!("  *[{abbr}]: {definition}"))
            .collect();
        Some(lines.join("\n"))
    }
}
