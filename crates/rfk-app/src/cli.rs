use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Upper bound on `--size × --frames` for generated signals.
pub const MAX_TOTAL_SAMPLES: usize = 1 << 26;

/// rfk: real FFT of power-of-two frames.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Nombre d'échantillons par frame (puissance de deux, >= 4).
    #[arg(long, default_value_t = 16)]
    pub size: usize,

    /// Signal synthétique : impulse, constant, sine, noise.
    #[arg(long, value_enum)]
    pub signal: Option<SignalKind>,

    /// Fichier d'échantillons (séparés par espaces ou retours à la ligne).
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Exécuter aussi l'inverse et rapporter l'erreur aller-retour maximale.
    #[arg(long, default_value_t = false)]
    pub inverse_check: bool,

    /// Mode batch : nombre de frames consécutives à transformer.
    #[arg(long)]
    pub frames: Option<usize>,

    /// Stratégie : packed, full, planned (écrase la config).
    #[arg(long)]
    pub strategy: Option<String>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Format de sortie.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Synthetic test signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SignalKind {
    /// Unit pulse at the start of every frame.
    Impulse,
    /// All ones.
    Constant,
    /// One period per frame.
    Sine,
    /// Deterministic pseudo-random samples in [-1, 1].
    Noise,
}

/// Report format written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text columns, one block per frame.
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl Cli {
    /// Validate that at most one sample source is given and that the batch
    /// stays within [`MAX_TOTAL_SAMPLES`].
    ///
    /// # Errors
    /// Returns an error if both `--signal` and `--input` are specified, if
    /// `--frames` is 0, or if `--size × --frames` is too large.
    pub fn validate_input(&self) -> anyhow::Result<()> {
        if self.signal.is_some() && self.input.is_some() {
            anyhow::bail!("Une seule source d'échantillons à la fois : --signal OU --input.");
        }
        if self.frames == Some(0) {
            anyhow::bail!("--frames doit être au moins 1.");
        }
        let frames = self.frames.unwrap_or(1);
        match self.size.checked_mul(frames) {
            Some(total) if total <= MAX_TOTAL_SAMPLES => {}
            _ => anyhow::bail!(
                "--size {} × --frames {frames} dépasse {MAX_TOTAL_SAMPLES} échantillons.",
                self.size
            ),
        }
        Ok(())
    }
}
