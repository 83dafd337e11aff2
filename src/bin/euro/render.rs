//! Offline rendering to WAV

use std::path::Path;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::info;

use euro_dsp::{synth::Synth, EngineConfig, SAMPLE_RATE};

const BLOCK: usize = 512;

pub fn render(config: &EngineConfig, seconds: f32, out: &Path) -> EyreResult<()> {
    if !(seconds > 0.0) {
        return Err(eyre!("--seconds must be positive"));
    }
    let mut synth = Synth::new(config, ()).wrap_err("failed to build topology")?;

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer =
        WavWriter::create(out, spec).wrap_err_with(|| format!("failed to create {}", out.display()))?;

    let total = (seconds * SAMPLE_RATE as f32) as usize;
    let mut block = [0i16; BLOCK];
    let mut written = 0;
    while written < total {
        let n = BLOCK.min(total - written);
        synth.render_block(&mut block[..n]);
        for &sample in &block[..n] {
            writer.write_sample(sample)?;
        }
        written += n;
    }
    writer.finalize()?;

    info!(
        topology = %config.topology,
        samples = total,
        path = %out.display(),
        "rendered"
    );
    Ok(())
}
