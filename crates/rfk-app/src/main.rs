use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use rfk_core::config::{FftConfig, load_config};
use rfk_fft::TransformContext;
use rfk_fft::batch::{forward_frames, inverse_frames, split_frames};

pub mod cli;
pub mod output;
pub mod signal;

use cli::{Cli, OutputFormat, SignalKind};
use output::{FrameReport, Report};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    cli.validate_input()?;

    // 4. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    apply_overrides(&cli, &mut config)?;

    // 5. Transformer
    let report = run(&cli, &config)?;

    // 6. Écrire le rapport
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Table => output::write_table(&mut out, &report)?,
        OutputFormat::Json => output::write_json(&mut out, &report)?,
    }
    out.flush()?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<FftConfig> {
    if cli.config.exists() {
        load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(FftConfig::default())
    }
}

fn apply_overrides(cli: &Cli, config: &mut FftConfig) -> Result<()> {
    if let Some(ref name) = cli.strategy {
        config.strategy = name
            .parse()
            .with_context(|| format!("--strategy {name}"))?;
    }
    Ok(())
}

/// Gather samples, transform every frame, optionally check the round trip.
fn run(cli: &Cli, config: &FftConfig) -> Result<Report> {
    let n = cli.size;
    let ctx = TransformContext::with_config(n, config)
        .with_context(|| format!("Taille de FFT invalide : {n}"))?;

    let frames = load_frames(cli, n)?;
    log::info!("{} frame(s) de {n} échantillons", frames.len());

    let spectra = forward_frames(&ctx, &frames, config.parallel_threshold)
        .context("Transformée directe échouée")?;

    let round_trip_error = if cli.inverse_check {
        let back = inverse_frames(&ctx, &spectra, config.parallel_threshold)
            .context("Transformée inverse échouée")?;
        Some(output::max_abs_error(&frames, &back))
    } else {
        None
    };

    Ok(Report {
        size: n,
        strategy: config.strategy.as_str(),
        frequencies: rfk_core::frequency::bin_frequencies(n),
        frames: spectra.into_iter().map(FrameReport::from).collect(),
        round_trip_error,
    })
}

fn load_frames(cli: &Cli, n: usize) -> Result<Vec<Vec<f32>>> {
    let count = cli.frames.unwrap_or(1);
    if let Some(ref path) = cli.input {
        let samples = signal::read_samples(path)?;
        if samples.is_empty() {
            anyhow::bail!("Aucun échantillon dans {}", path.display());
        }
        let mut frames = split_frames(&samples, n);
        if let Some(k) = cli.frames {
            if frames.len() < k {
                log::warn!("{k} frames demandées, {} disponibles", frames.len());
            }
            frames.truncate(k);
        }
        Ok(frames)
    } else {
        let kind = cli.signal.unwrap_or(SignalKind::Impulse);
        let total = n
            .checked_mul(count)
            .filter(|&t| t <= cli::MAX_TOTAL_SAMPLES)
            .with_context(|| format!("Trop d'échantillons : {n} × {count}"))?;
        let samples = signal::generate(kind, total, n)?;
        Ok(split_frames(&samples, n))
    }
}
