use rodio::{source::SineWave, OutputStream, Sink, Source};
use std::time::Duration;

/// The playback rate (in Hz) used for XO-CHIP pattern buffers, per the convention that each of
/// the 128 bits in the buffer represents one sample at this rate.
const PATTERN_PLAYBACK_HERTZ: u32 = 4000;

/// A [Source] that plays back one XO-CHIP 16-byte audio pattern buffer as a single-cycle
/// bitstream: each bit becomes one sample, high bits at full amplitude and low bits silent.
struct PatternSource {
    bits: [bool; 128],
    position: usize,
}

impl PatternSource {
    fn new(buffer: [u8; 16]) -> Self {
        let mut bits = [false; 128];
        for (byte_index, byte) in buffer.iter().enumerate() {
            for bit_index in 0..8 {
                bits[byte_index * 8 + bit_index] = (byte >> (7 - bit_index)) & 0x1 != 0;
            }
        }
        PatternSource { bits, position: 0 }
    }
}

impl Iterator for PatternSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = if self.bits[self.position % self.bits.len()] {
            0.3
        } else {
            0.0
        };
        self.position += 1;
        Some(sample)
    }
}

impl Source for PatternSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        PATTERN_PLAYBACK_HERTZ
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// A pair of audio sinks: a fixed 440Hz beeper for standard CHIP-8/SUPER-CHIP sound timer
/// pulses, and a second sink reserved for XO-CHIP pattern buffer playback.  Both begin paused
/// and are played for exactly the frames the scheduler reports the sound timer active.
pub(crate) struct Audio {
    _stream: OutputStream,
    beep_sink: Sink,
    pattern_sink: Sink,
}

impl Audio {
    /// Constructor that returns an [Audio] instance with its beeper loaded and paused.
    pub(crate) fn new() -> Self {
        let (_stream, stream_handle) = OutputStream::try_default().unwrap();
        let beep_sink: Sink = Sink::try_new(&stream_handle).unwrap();
        beep_sink.append(SineWave::new(440.0));
        beep_sink.pause();
        let pattern_sink: Sink = Sink::try_new(&stream_handle).unwrap();
        pattern_sink.pause();
        Audio {
            _stream,
            beep_sink,
            pattern_sink,
        }
    }

    /// Pulses the 440Hz beeper for the current frame.
    pub(crate) fn play_beep(&self) {
        self.pattern_sink.pause();
        self.beep_sink.play();
    }

    /// Pulses playback of an XO-CHIP audio pattern buffer for the current frame.
    pub(crate) fn play_pattern(&mut self, buffer: [u8; 16]) {
        self.beep_sink.pause();
        self.pattern_sink.stop();
        self.pattern_sink.append(PatternSource::new(buffer));
        self.pattern_sink.play();
    }

    /// Silences both sinks; call once per frame in which no audio event was reported.
    pub(crate) fn silence(&self) {
        self.beep_sink.pause();
        self.pattern_sink.pause();
    }
}
