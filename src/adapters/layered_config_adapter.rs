//! Command-line overrides layered over an optional INI configuration.

use crate::ports::config_port::ConfigPort;

/// A [`ConfigPort`] whose explicitly set values shadow the base config.
///
/// Overrides are stored as strings and parsed on read, so an override goes
/// through the same validation as a value from the file.
pub struct LayeredConfig<'a> {
    base: Option<&'a dyn ConfigPort>,
    overrides: Vec<(String, String, String)>,
}

impl<'a> LayeredConfig<'a> {
    pub fn new(base: Option<&'a dyn ConfigPort>) -> Self {
        Self {
            base,
            overrides: Vec::new(),
        }
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl ToString) {
        self.overrides.retain(|(s, k, _)| !(s == section && k == key));
        self.overrides
            .push((section.to_string(), key.to_string(), value.to_string()));
    }

    /// Sets the override only when a value was supplied.
    pub fn set_opt<T: ToString>(&mut self, section: &str, key: &str, value: Option<T>) {
        if let Some(v) = value {
            self.set(section, key, v);
        }
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.overrides
            .iter()
            .find(|(s, k, _)| s == section && k == key)
            .map(|(_, _, v)| v.as_str())
    }
}

impl ConfigPort for LayeredConfig<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match self.lookup(section, key) {
            Some(v) => Some(v.to_string()),
            None => self.base.and_then(|b| b.get_string(section, key)),
        }
    }
}
