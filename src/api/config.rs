use crate::core::constants::ADDRESS_FORMAT_VERSION;
use crate::core::grid::{Grid, GridConfig};
use crate::error::CodecError;
use crate::index::scramble::ScrambleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a [`Codec`](crate::Codec).
///
/// Together with the dictionary, these values are the address format:
/// two codecs only agree on addresses when both match exactly. Missing
/// fields in a JSON file fall back to the defaults.
///
/// # Example
/// ```
/// use w3a_rs::{CodecConfig, GridConfig, ScrambleConfig};
///
/// let config = CodecConfig::new()
///     .with_grid(GridConfig::new(22.5, 0.25))
///     .with_scramble(ScrambleConfig::new(vec![7, 11, 13, 17]));
///
/// let parsed = CodecConfig::from_json_str(r#"{ "grid": { "step_degrees": 22.5, "lon_step_factor": 0.25 } }"#).unwrap();
/// assert_eq!(parsed.grid, config.grid);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub version: u8,
    pub grid: GridConfig,
    pub scramble: ScrambleConfig,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            version: ADDRESS_FORMAT_VERSION,
            grid: GridConfig::default(),
            scramble: ScrambleConfig::default(),
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_scramble(mut self, scramble: ScrambleConfig) -> Self {
        self.scramble = scramble;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, CodecError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CodecError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::Config(e.to_string()))
    }

    /// Checks the format version.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.version != ADDRESS_FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(self.version));
        }
        Ok(())
    }

    /// Builds the grid described by this configuration.
    pub fn build_grid(&self) -> Result<Grid, CodecError> {
        Ok(Grid::new(&self.grid)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_SCRAMBLE_KEYS;
    use std::io::Write;

    #[test]
    fn test_defaults() -> Result<(), CodecError> {
        let config = CodecConfig::default();

        assert_eq!(config.version, ADDRESS_FORMAT_VERSION);
        assert_eq!(config.scramble.keys, DEFAULT_SCRAMBLE_KEYS.to_vec());
        assert_eq!(config.build_grid()?, Grid::default());
        Ok(())
    }

    #[test]
    fn test_partial_json_uses_defaults() -> Result<(), CodecError> {
        let config = CodecConfig::from_json_str(r#"{ "scramble": { "keys": [1, 2, 3] } }"#)?;

        assert_eq!(config.scramble.keys, vec![1, 2, 3]);
        assert_eq!(config.grid, GridConfig::default());
        Ok(())
    }

    #[test]
    fn test_json_round_trip() -> Result<(), CodecError> {
        let config = CodecConfig::new().with_grid(GridConfig::new(22.5, 0.25));
        let json = config.to_json_string()?;

        assert_eq!(CodecConfig::from_json_str(&json)?, config);
        assert_eq!(
            CodecConfig::from_json_str(&CodecConfig::default().to_json_string()?)?,
            CodecConfig::default()
        );
        Ok(())
    }

    #[test]
    fn test_unsupported_version() {
        let result = CodecConfig::from_json_str(r#"{ "version": 2 }"#);
        assert!(matches!(result, Err(CodecError::UnsupportedVersion(2))));
    }

    #[test]
    fn test_invalid_json() {
        let result = CodecConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(CodecError::Config(_))));
    }

    #[test]
    fn test_from_path() -> Result<(), CodecError> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{ "grid": {{ "step_degrees": 22.5, "lon_step_factor": 0.25 }} }}"#
        )?;

        let config = CodecConfig::from_path(file.path())?;
        assert_eq!(config.build_grid()?.total_cells(), 512);
        Ok(())
    }
}
