//! INI file configuration adapter.
//!
//! Section and key names are case-insensitive; values are handed to the
//! typed getters of [`ConfigPort`] as raw strings.

use crate::domain::error::LatencyWarsError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LatencyWarsError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path)
            .map_err(|reason| parse_error(&path.display().to_string(), reason))?;
        Ok(Self { ini })
    }

    pub fn from_string(content: &str) -> Result<Self, LatencyWarsError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| parse_error("<inline>", reason))?;
        Ok(Self { ini })
    }
}

fn parse_error(file: &str, reason: String) -> LatencyWarsError {
    LatencyWarsError::ConfigParse {
        file: file.to_string(),
        reason,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }
}
