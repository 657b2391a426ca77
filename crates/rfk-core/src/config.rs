use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Width of the process-wide bit-reversal table.
pub const MAX_FAST_BITS: u32 = 16;

/// Configuration du noyau FFT.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use rfk_core::config::{FftConfig, Strategy};
/// let config = FftConfig::default();
/// assert_eq!(config.strategy, Strategy::Packed);
/// assert_eq!(config.max_fast_bits, 16);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FftConfig {
    /// Real-transform implementation used by new contexts.
    pub strategy: Strategy,
    /// Largest bit width served from the bit-reversal table [1, 20].
    /// Wider transforms reverse indices on the fly.
    pub max_fast_bits: u32,
    /// Minimum frame count before batch transforms go parallel.
    pub parallel_threshold: usize,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Packed,
            max_fast_bits: MAX_FAST_BITS,
            parallel_threshold: 4,
        }
    }
}

impl FftConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.max_fast_bits = self.max_fast_bits.clamp(1, 20);
        self.parallel_threshold = self.parallel_threshold.max(1);
    }
}

/// Real-transform implementation.
///
/// # Example
/// ```
/// use rfk_core::config::Strategy;
/// let s: Strategy = "full".parse().unwrap();
/// assert_eq!(s, Strategy::FullLength);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum Strategy {
    /// N/2-point complex transform on sample pairs, then split (default).
    #[default]
    Packed,
    /// N-point complex transform with a zero imaginary part.
    FullLength,
    /// `realfft` plans.
    Planned,
}

impl Strategy {
    /// Short name, as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Packed => "packed",
            Strategy::FullLength => "full",
            Strategy::Planned => "planned",
        }
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "packed" => Ok(Strategy::Packed),
            "full" | "fulllength" | "full_length" => Ok(Strategy::FullLength),
            "planned" | "realfft" => Ok(Strategy::Planned),
            other => anyhow::bail!("Stratégie inconnue : {other} (packed, full, planned)"),
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    fft: Option<FftSection>,
}

/// FFT section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct FftSection {
    strategy: Option<Strategy>,
    max_fast_bits: Option<u32>,
    parallel_threshold: Option<usize>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use rfk_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<FftConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text into a config, defaults for every missing field.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use rfk_core::config::{parse_config, Strategy};
/// let config = parse_config("[fft]\nstrategy = \"Planned\"\n").unwrap();
/// assert_eq!(config.strategy, Strategy::Planned);
/// assert_eq!(config.max_fast_bits, 16);
/// ```
pub fn parse_config(content: &str) -> Result<FftConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = FftConfig::default();

    if let Some(f) = file.fft {
        if let Some(v) = f.strategy {
            config.strategy = v;
        }
        if let Some(v) = f.max_fast_bits {
            config.max_fast_bits = v;
        }
        if let Some(v) = f.parallel_threshold {
            config.parallel_threshold = v;
        }
    }

    config.clamp_all();
    log::debug!("Config FFT : {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, FftConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config("[fft]\nmax_fast_bits = 40\nparallel_threshold = 0\n").unwrap();
        assert_eq!(config.max_fast_bits, 20);
        assert_eq!(config.parallel_threshold, 1);
    }

    #[test]
    fn unknown_strategy_is_an_error() {
        assert!(parse_config("[fft]\nstrategy = \"Bluestein\"\n").is_err());
        assert!("bluestein".parse::<Strategy>().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fft]\nstrategy = \"FullLength\"\nmax_fast_bits = 12").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.strategy, Strategy::FullLength);
        assert_eq!(config.max_fast_bits, 12);
        assert_eq!(config.parallel_threshold, 4);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/rfk.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/rfk.toml"));
    }

    #[test]
    fn strategy_names_round_trip() {
        for s in [Strategy::Packed, Strategy::FullLength, Strategy::Planned] {
            assert_eq!(s.as_str().parse::<Strategy>().unwrap(), s);
        }
    }
}
