//! Read-aloud playback over an external speech engine.
//!
//! The crate does not produce audio. A [`SpeechEngine`] speaks one utterance
//! at a time; [`SpeechPlayback`] feeds it the document sentence by sentence
//! and reports progress over a channel.

use crate::error::{Error, Result};
use crate::task::CancellationToken;
use crate::text;
use crossbeam_channel::Sender;

/// Slowest accepted speech rate.
pub const MIN_RATE: f32 = 0.5;
/// Fastest accepted speech rate.
pub const MAX_RATE: f32 = 2.0;
/// Lowest accepted pitch.
pub const MIN_PITCH: f32 = 0.0;
/// Highest accepted pitch.
pub const MAX_PITCH: f32 = 2.0;

/// Voice and playback parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechSettings {
    /// Engine-specific voice identifier; `None` selects the engine default
    pub voice_id: Option<String>,
    /// Rate multiplier, 0.5..=2.0
    pub rate: f32,
    /// Pitch, 0.0..=2.0
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            voice_id: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl SpeechSettings {
    /// Default voice at normal rate and pitch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a voice.
    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    /// Set the rate.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the pitch.
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Check rate and pitch against their accepted ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RATE..=MAX_RATE).contains(&self.rate) {
            return Err(Error::InvalidOption(format!(
                "speech rate {} outside {}..={}",
                self.rate, MIN_RATE, MAX_RATE
            )));
        }
        if !(MIN_PITCH..=MAX_PITCH).contains(&self.pitch) {
            return Err(Error::InvalidOption(format!(
                "speech pitch {} outside {}..={}",
                self.pitch, MIN_PITCH, MAX_PITCH
            )));
        }
        Ok(())
    }
}

/// An external voice. `speak` blocks until the utterance has been spoken.
pub trait SpeechEngine {
    /// Speak one utterance.
    fn speak(&mut self, utterance: &str, settings: &SpeechSettings) -> Result<()>;
}

/// Playback notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Playback began
    Started {
        /// Characters to be spoken
        total_chars: usize,
    },
    /// An utterance finished
    Progress {
        /// Characters spoken so far
        spoken_chars: usize,
        /// Characters to be spoken
        total_chars: usize,
        /// Whole percent, 0..=100
        percent: u8,
    },
    /// Every utterance was spoken
    Finished,
    /// Playback stopped on request
    Cancelled,
    /// The engine failed
    Failed(String),
}

/// A text prepared for sentence-by-sentence playback.
#[derive(Debug, Clone)]
pub struct SpeechPlayback {
    utterances: Vec<String>,
    total_chars: usize,
}

impl SpeechPlayback {
    /// Split `text` into utterances.
    pub fn new(text: &str) -> Self {
        let utterances: Vec<String> = text::split_sentences(text)
            .into_iter()
            .map(str::to_string)
            .collect();
        let total_chars = utterances.iter().map(|u| text::char_count(u)).sum();
        Self {
            utterances,
            total_chars,
        }
    }

    /// The utterances in speaking order.
    pub fn utterances(&self) -> &[String] {
        &self.utterances
    }

    /// Characters across all utterances.
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    /// Speak every utterance in order.
    ///
    /// Cancellation is honoured between utterances and returns
    /// [`Error::Cancelled`]. An engine failure is reported as
    /// [`SpeechEvent::Failed`] and returned.
    pub fn run<E: SpeechEngine + ?Sized>(
        &self,
        engine: &mut E,
        settings: &SpeechSettings,
        events: Option<&Sender<SpeechEvent>>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        settings.validate()?;

        let total_chars = self.total_chars;
        emit(events, SpeechEvent::Started { total_chars });
        log::debug!(
            "Speaking {} utterance(s), {} chars",
            self.utterances.len(),
            total_chars
        );

        let mut spoken_chars = 0;
        for utterance in &self.utterances {
            if cancel.is_cancelled() {
                emit(events, SpeechEvent::Cancelled);
                return Err(Error::Cancelled);
            }

            if let Err(e) = engine.speak(utterance, settings) {
                log::warn!("Speech engine failed: {}", e);
                emit(events, SpeechEvent::Failed(e.to_string()));
                return Err(e);
            }

            spoken_chars += text::char_count(utterance);
            let percent = if total_chars == 0 {
                100
            } else {
                (spoken_chars * 100 / total_chars) as u8
            };
            emit(
                events,
                SpeechEvent::Progress {
                    spoken_chars,
                    total_chars,
                    percent,
                },
            );
        }

        emit(events, SpeechEvent::Finished);
        Ok(())
    }
}

fn emit(events: Option<&Sender<SpeechEvent>>, event: SpeechEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}
