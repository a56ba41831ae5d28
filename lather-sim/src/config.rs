//! Preset file loading
//!
//! Presets live in a TOML file, one `[[preset]]` table per entry:
//!
//! ```toml
//! [[preset]]
//! label = "Delicate"
//!
//! [preset.program]
//! wash_count = 1
//! rinse_count = 2
//! spin_enable = false
//! soap_time_sec = 2
//! wash_agitate_time_sec = 8
//! rinse_agitate_time_sec = 8
//! agitate_run_ms = 1000
//! agitate_cycle_ms = 5000
//! target_water_level = "high"
//! water_fill_timeout_sec = 30
//! drain_timeout_sec = 15
//! ticks_per_second = 2
//! ```
//!
//! Omitted program fields default to zero, so the timeouts and tick rate
//! must always be given.

use std::path::{Path, PathBuf};

use lather_core::program::{WashPreset, MAX_LABEL_LEN, MAX_PRESETS};
use lather_core::{Program, ProgramError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Preset loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid preset file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("preset file defines no presets")]
    Empty,
    #[error("too many presets: {count} (max {max})")]
    TooMany { count: usize, max: usize },
    #[error("preset label {label:?} is longer than {max} bytes")]
    LabelTooLong { label: String, max: usize },
    #[error("preset {label:?} is invalid: {reason}")]
    InvalidProgram { label: String, reason: ProgramError },
    #[error("no preset named {0:?}")]
    UnknownPreset(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetFile {
    #[serde(default, rename = "preset")]
    presets: Vec<PresetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetEntry {
    label: String,
    program: Program,
}

/// Parse and validate presets from TOML text
pub fn parse_presets(input: &str) -> Result<Vec<WashPreset>, ConfigError> {
    let file: PresetFile = toml::from_str(input)?;

    if file.presets.is_empty() {
        return Err(ConfigError::Empty);
    }
    if file.presets.len() > MAX_PRESETS {
        return Err(ConfigError::TooMany {
            count: file.presets.len(),
            max: MAX_PRESETS,
        });
    }

    file.presets
        .into_iter()
        .map(|entry| {
            if entry.label.len() > MAX_LABEL_LEN {
                return Err(ConfigError::LabelTooLong {
                    label: entry.label,
                    max: MAX_LABEL_LEN,
                });
            }
            entry
                .program
                .validate()
                .map_err(|reason| ConfigError::InvalidProgram {
                    label: entry.label.clone(),
                    reason,
                })?;
            debug!(label = %entry.label, program = ?entry.program, "preset loaded");
            Ok(WashPreset::new(&entry.label, entry.program))
        })
        .collect()
}

/// Load and validate presets from a TOML file
pub fn load_presets(path: &Path) -> Result<Vec<WashPreset>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let presets = parse_presets(&text)?;
    info!(path = %path.display(), count = presets.len(), "loaded presets");
    Ok(presets)
}

/// Find a preset by label, ignoring ASCII case
pub fn find_preset(presets: &[WashPreset], name: &str) -> Result<usize, ConfigError> {
    presets
        .iter()
        .position(|p| p.label.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lather_core::program::builtin_presets;
    use lather_core::WaterLevel;

    const DELICATE: &str = r#"
[[preset]]
label = "Delicate"

[preset.program]
wash_count = 1
rinse_count = 2
spin_enable = false
soap_time_sec = 2
wash_agitate_time_sec = 8
rinse_agitate_time_sec = 8
agitate_run_ms = 1000
agitate_cycle_ms = 5000
target_water_level = "med"
water_fill_timeout_sec = 30
drain_timeout_sec = 15
ticks_per_second = 2
"#;

    #[test]
    fn test_parse_preset() {
        let presets = parse_presets(DELICATE).unwrap();
        assert_eq!(presets.len(), 1);

        let preset = &presets[0];
        assert_eq!(preset.label.as_str(), "Delicate");
        assert_eq!(preset.program.rinse_count, 2);
        assert!(!preset.program.spin_enable);
        assert_eq!(preset.program.target_water_level, WaterLevel::Med);
        assert_eq!(preset.program.ticks_per_second, 2);
    }

    #[test]
    fn test_missing_tick_rate_rejected() {
        let input = DELICATE.replace("ticks_per_second = 2", "");
        let err = parse_presets(&input).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidProgram {
                reason: ProgramError::ZeroTickRate,
                ..
            }
        ));
        assert!(err.to_string().contains("Delicate"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let input = DELICATE.replace("spin_enable", "spin_enabled");
        assert!(matches!(parse_presets(&input), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_bad_level_rejected() {
        let input = DELICATE.replace("\"med\"", "\"brim\"");
        assert!(matches!(parse_presets(&input), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(parse_presets(""), Err(ConfigError::Empty)));
    }

    #[test]
    fn test_long_label_rejected() {
        let input = DELICATE.replace("Delicate", "Extra Delicate Wool Cycle");
        assert!(matches!(
            parse_presets(&input),
            Err(ConfigError::LabelTooLong { .. })
        ));
    }

    #[test]
    fn test_too_many_presets() {
        let input = DELICATE.repeat(MAX_PRESETS + 1);
        assert!(matches!(
            parse_presets(&input),
            Err(ConfigError::TooMany { count, .. }) if count == MAX_PRESETS + 1
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_presets(Path::new("/nonexistent/presets.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_sample_catalog() {
        let presets = parse_presets(include_str!("../presets.toml")).unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(find_preset(&presets, "towels").unwrap(), 1);
        assert_eq!(presets[1].program.wash_count, 2);
    }

    #[test]
    fn test_find_preset() {
        let presets: Vec<_> = builtin_presets().into_iter().collect();
        assert_eq!(find_preset(&presets, "quick").unwrap(), 1);
        assert_eq!(find_preset(&presets, "HEAVY DUTY").unwrap(), 2);
        assert!(matches!(
            find_preset(&presets, "Eco"),
            Err(ConfigError::UnknownPreset(_))
        ));
    }
}
