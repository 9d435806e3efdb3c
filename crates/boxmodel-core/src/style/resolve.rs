//! `$key` reference resolution over a merged entry table.

use super::ini::IniEntries;
use crate::error::{Error, Result};

const REFERENCE_SIGIL: char = '$';

pub struct Resolver<'a> {
    entries: &'a IniEntries,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(entries: &'a IniEntries) -> Self {
        Self { entries }
    }

    /// The literal value `key` resolves to, `None` if `key` is not set.
    ///
    /// Follows references while tracking the active chain; a missing target
    /// or a key revisited on the chain is an error naming the whole chain.
    pub fn resolve(&self, key: &str) -> Result<Option<&'a str>> {
        let Some(mut value) = self.entries.get(key) else {
            return Ok(None);
        };

        let mut chain = vec![key.to_string()];
        while let Some(target) = value.strip_prefix(REFERENCE_SIGIL) {
            let target = target.trim();
            if chain.iter().any(|k| k == target) {
                chain.push(target.to_string());
                return Err(Error::ReferenceCycle { chain });
            }
            chain.push(target.to_string());
            let Some(next) = self.entries.get(target) else {
                return Err(Error::DanglingReference { chain });
            };
            value = next;
        }

        Ok(Some(value.as_str()))
    }

    /// Fail on the first reference cycle anywhere in the table, used or not.
    pub fn check_cycles(&self) -> Result<()> {
        for key in self.entries.keys() {
            if let Err(e @ Error::ReferenceCycle { .. }) = self.resolve(key) {
                return Err(e);
            }
        }
        Ok(())
    }
}
