//! Audio output and the two queues between the UI and the audio callback

use std::sync::Arc;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rtrb::RingBuffer;
use tracing::{error, info, warn};

use euro_dsp::{
    dsp::library::Wavetables, synth::message::ControlMessage, synth::Synth, EngineConfig, Manager,
    SAMPLE_RATE,
};

use crate::ui::{UiApp, UiState};

/// Largest block rendered per inner loop of the callback.
const MAX_BLOCK: usize = 512;

/// Samples buffered for the oscilloscope.
const SCOPE_CAPACITY: usize = 8192;

/// Prefer an f32 stream at the engine's native rate; fall back to the
/// device default, which plays off-pitch when the rates differ.
fn output_config(device: &cpal::Device) -> EyreResult<StreamConfig> {
    let native = SampleRate(SAMPLE_RATE);
    let exact = device
        .supported_output_configs()
        .wrap_err("failed to query output configs")?
        .find(|range| {
            range.sample_format() == SampleFormat::F32
                && range.min_sample_rate() <= native
                && native <= range.max_sample_rate()
        })
        .map(|range| range.with_sample_rate(native));

    match exact {
        Some(config) => Ok(config.into()),
        None => {
            let config = device
                .default_output_config()
                .wrap_err("failed to fetch default output config")?;
            if config.sample_format() != SampleFormat::F32 {
                return Err(eyre!("output device does not accept f32 samples"));
            }
            warn!(
                rate = config.sample_rate().0,
                native = SAMPLE_RATE,
                "device does not run at the native rate"
            );
            Ok(config.into())
        }
    }
}

pub fn run(config: EngineConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = output_config(&device)?;
    let channels = stream_config.channels as usize;

    let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(config.queue_capacity);
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);

    let mut synth = Synth::new(&config, control_rx).wrap_err("failed to build topology")?;

    // The UI keeps its own copy of the patch to show knob metadata. It only
    // ever sees the same messages the audio side applies.
    let mut mirror = Manager::new(Arc::new(Wavetables::with_seed(0)));
    mirror.build(config.topology)?;
    for knob in &config.knobs {
        mirror.set(knob.pane, knob.slot, knob.value);
    }

    info!(
        topology = %config.topology,
        rate = stream_config.sample_rate.0,
        channels,
        "starting audio"
    );

    let mut block = vec![0.0f32; MAX_BLOCK];
    let stream = device.build_output_stream(
        &stream_config,
        move |data: &mut [f32], _| {
            for frame_chunk in data.chunks_mut(MAX_BLOCK * channels) {
                let frames = frame_chunk.len() / channels;
                let block = &mut block[..frames];
                synth.render_block_f32(block);

                // Copy to output (mono to all channels)
                for (frame, &sample) in frame_chunk.chunks_mut(channels).zip(block.iter()) {
                    frame.fill(sample);
                    // A full scope buffer just means the UI is behind
                    let _ = scope_tx.push(sample);
                }
            }
        },
        |err| error!(%err, "audio stream error"),
        None,
    )?;
    stream.play().wrap_err("failed to start audio stream")?;

    let mut terminal = ratatui::init();
    let result = UiApp::new(UiState::new(mirror), control_tx, scope_rx).run(&mut terminal);
    ratatui::restore();
    result
}
