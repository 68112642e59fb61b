//! Reading profiles from JSON files.
//!
//! Deserialization goes through `serde_path_to_error` so a malformed event
//! reports where it sits, e.g. `events[3].state`.

use crate::models::profile::Profile;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json { path: String, source: serde_json::Error },
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "io error: {}", e),
            LoadError::Json { path, source } => write!(f, "json error at {}: {}", path, source),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(value: std::io::Error) -> Self {
        LoadError::Io(value)
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for LoadError {
    fn from(value: serde_path_to_error::Error<serde_json::Error>) -> Self {
        LoadError::Json {
            path: value.path().to_string(),
            source: value.into_inner(),
        }
    }
}

pub fn parse_profile(json: &str) -> Result<Profile, LoadError> {
    let de = &mut serde_json::Deserializer::from_str(json);
    Ok(serde_path_to_error::deserialize(de)?)
}

pub fn read_profile<R: Read>(reader: R) -> Result<Profile, LoadError> {
    let de = &mut serde_json::Deserializer::from_reader(reader);
    Ok(serde_path_to_error::deserialize(de)?)
}

pub fn load_profile(path: &Path) -> Result<Profile, LoadError> {
    let file = std::fs::File::open(path)?;
    read_profile(std::io::BufReader::new(file))
}
