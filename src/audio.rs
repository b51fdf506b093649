//! Sound effects, synthesized with fundsp and played through rodio.
//!
//! Each effect is a tiny DSP graph rendered into a sample buffer and
//! appended to a detached sink, so playback never blocks a tick.

use fundsp::prelude64::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

const SAMPLE_RATE: f64 = 44_100.0;

/// Handle to the default audio device. The game runs fine without one.
pub struct Audio {
    stream: OutputStream,
}

impl Audio {
    /// `None` when no output device is available.
    pub fn open() -> Option<Self> {
        OutputStreamBuilder::open_default_stream()
            .ok()
            .map(|stream| Self { stream })
    }

    /// Short upward chirp for a flap.
    pub fn flap(&self) {
        let freq = lfo(|t| lerp(320.0, 620.0, (t / 0.08).min(1.0)));
        let gain = lfo(|t| lerp(0.10, 0.0, (t / 0.09).min(1.0)));
        self.play(&mut ((freq >> sine()) * gain), 0.09);
    }

    /// Falling sawtooth sweep when the bird dies.
    pub fn death(&self) {
        let freq = lfo(|t| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
        let gain = lfo(|t| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
        self.play(&mut ((freq >> saw()) * gain), 0.5);
    }

    fn play(&self, unit: &mut dyn AudioUnit, secs: f64) {
        let wave = Wave::render(SAMPLE_RATE, secs, unit);
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(SamplesBuffer::new(
            1,
            SAMPLE_RATE as u32,
            wave.channel(0).to_vec(),
        ));
        sink.detach();
    }
}
