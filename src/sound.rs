//! Fire-and-forget audio cues.
//!
//! The engine only ever calls [`AudioNotifier::notify`]. The rodio backend owns
//! the output device on its own thread, so a slow or missing device never
//! stalls a frame. All music and effects are synthesized square waves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use macroquad::logging::{debug, info, warn};
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::config::{AudioBackend, AudioConfig};

const SAMPLE_RATE: u32 = 22_050;
const AMPLITUDE: f32 = 0.25;
const WORKER_POLL: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    LineClear,
    Pause,
    GameOver,
}

impl Effect {
    pub fn name(self) -> &'static str {
        match self {
            Effect::LineClear => "line_clear",
            Effect::Pause => "pause",
            Effect::GameOver => "game_over",
        }
    }

    /// Text shown in the log in place of (or alongside) the sound.
    pub fn banner(self) -> &'static str {
        match self {
            Effect::LineClear => "LINE CLEARED!",
            Effect::Pause => "GAME PAUSED",
            Effect::GameOver => "GAME OVER",
        }
    }

    fn tone(self) -> Note {
        let freq_hz = match self {
            Effect::LineClear => 262.0, // C4
            Effect::Pause => 220.0,     // A3
            Effect::GameOver => 165.0,  // E3
        };
        Note { freq_hz, millis: 300 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    StartMusic,
    StopMusic,
    PlayEffect(Effect),
}

/// Receiver of engine audio cues. Implementations must return immediately and
/// swallow their own failures.
pub trait AudioNotifier {
    fn notify(&mut self, cue: AudioCue);
}

/// Backend with no output device. Effects are logged.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioNotifier for SilentAudio {
    fn notify(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::PlayEffect(effect) => info!("{}", effect.banner()),
            other => debug!("audio cue {:?} (silent backend)", other),
        }
    }
}

/// Picks the backend named in the config. Falls back to [`SilentAudio`] if the
/// rodio worker cannot be started.
pub fn start(config: &AudioConfig) -> Box<dyn AudioNotifier> {
    match config.backend {
        AudioBackend::Silent => {
            info!("audio backend: silent");
            Box::new(SilentAudio)
        }
        AudioBackend::Rodio => match RodioAudio::spawn(config) {
            Ok(audio) => {
                info!("audio backend: rodio");
                Box::new(audio)
            }
            Err(err) => {
                warn!("{:#}; continuing without sound", err);
                Box::new(SilentAudio)
            }
        },
    }
}

/// Handle to the rodio worker thread. Dropping it stops the worker.
pub struct RodioAudio {
    cues: Option<Sender<AudioCue>>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl RodioAudio {
    pub fn spawn(config: &AudioConfig) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);
        let config = config.clone();
        let worker = thread::Builder::new()
            .name("audio".to_owned())
            .spawn(move || run_worker(rx, worker_stop, config))
            .context("failed to spawn audio thread")?;
        Ok(RodioAudio {
            cues: Some(tx),
            stop,
            worker: Some(worker),
        })
    }

    /// Asks the worker to stop and waits for it. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.cues.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("audio thread panicked");
            }
        }
    }
}

impl AudioNotifier for RodioAudio {
    fn notify(&mut self, cue: AudioCue) {
        if let Some(cues) = &self.cues {
            // A dead worker just means no sound.
            let _ = cues.send(cue);
        }
    }
}

impl Drop for RodioAudio {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(cues: Receiver<AudioCue>, stop: Arc<AtomicBool>, config: AudioConfig) {
    let mut output = match AudioOutput::open(&config) {
        Ok(output) => Some(output),
        Err(err) => {
            warn!("audio disabled: {:#}", err);
            None
        }
    };

    while !stop.load(Ordering::Relaxed) {
        match cues.recv_timeout(WORKER_POLL) {
            Ok(cue) => match output.as_mut() {
                Some(output) => output.play(cue),
                None => {
                    if let AudioCue::PlayEffect(effect) = cue {
                        info!("{}", effect.banner());
                    }
                }
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if let Some(output) = output.as_mut() {
        output.play(AudioCue::StopMusic);
    }
    debug!("audio thread stopped");
}

/// The open device. Lives only on the worker thread.
struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
    music_playing: bool,
    effects_volume: f32,
}

impl AudioOutput {
    fn open(config: &AudioConfig) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no default audio output device")?;
        let music = Sink::try_new(&handle).context("failed to create music sink")?;
        music.set_volume(config.music_volume);
        Ok(AudioOutput {
            _stream: stream,
            handle,
            music,
            music_playing: false,
            effects_volume: config.effects_volume,
        })
    }

    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::StartMusic => {
                if self.music_playing {
                    return;
                }
                self.music.clear();
                self.music.append(Melody::new());
                self.music.play();
                self.music_playing = true;
            }
            AudioCue::StopMusic => {
                if self.music_playing {
                    self.music.clear();
                    self.music_playing = false;
                }
            }
            AudioCue::PlayEffect(effect) => {
                info!("{}", effect.banner());
                let Ok(sink) = Sink::try_new(&self.handle) else {
                    return;
                };
                sink.set_volume(self.effects_volume);
                sink.append(Tone::new(effect.tone()));
                sink.detach();
            }
        }
    }
}

/// One square-wave note. A frequency of zero is a rest.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Note {
    freq_hz: f32,
    millis: u32,
}

impl Note {
    fn frames(self) -> u32 {
        SAMPLE_RATE * self.millis / 1000
    }
}

const THEME: [Note; 8] = [
    Note { freq_hz: 330.0, millis: 400 }, // E4
    Note { freq_hz: 247.0, millis: 200 }, // B3
    Note { freq_hz: 262.0, millis: 200 }, // C4
    Note { freq_hz: 294.0, millis: 400 }, // D4
    Note { freq_hz: 262.0, millis: 200 }, // C4
    Note { freq_hz: 247.0, millis: 200 }, // B3
    Note { freq_hz: 220.0, millis: 800 }, // A3
    Note { freq_hz: 0.0, millis: 1000 },
];

/// Square wave with a short linear attack and release to avoid clicks.
fn square_sample(note: Note, pos: u32) -> f32 {
    if note.freq_hz <= 0.0 {
        return 0.0;
    }
    let len = note.frames();
    let ramp = SAMPLE_RATE / 100; // 10ms
    let envelope = (pos.min(len.saturating_sub(pos)) as f32 / ramp as f32).min(1.0);
    let t = pos as f32 / SAMPLE_RATE as f32;
    let wave = if (t * note.freq_hz).fract() < 0.5 { 1.0 } else { -1.0 };
    wave * envelope * AMPLITUDE
}

/// Endless loop of the theme.
struct Melody {
    note: usize,
    pos: u32,
}

impl Melody {
    fn new() -> Self {
        Melody { note: 0, pos: 0 }
    }
}

impl Iterator for Melody {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        while self.pos >= THEME[self.note].frames() {
            self.pos = 0;
            self.note = (self.note + 1) % THEME.len();
        }
        let sample = square_sample(THEME[self.note], self.pos);
        self.pos += 1;
        Some(sample)
    }
}

impl Source for Melody {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// A single finite note, used for effects.
struct Tone {
    note: Note,
    pos: u32,
}

impl Tone {
    fn new(note: Note) -> Self {
        Tone { note, pos: 0 }
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.pos >= self.note.frames() {
            return None;
        }
        let sample = square_sample(self.note, self.pos);
        self.pos += 1;
        Some(sample)
    }
}

impl Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.note.frames() - self.pos.min(self.note.frames())) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.note.millis as u64))
    }
}
