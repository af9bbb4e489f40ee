use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio::{DecodedAudio, RawRecording, WavArtifact};
use crate::models::error::RecordError;
use crate::models::playback::PlaybackSnapshot;
use crate::processing::wav;
use crate::storage::export::{self, ExportOutcome};
use crate::traits::decoder::AudioDecoder;
use crate::traits::export::{FileWriter, SaveDialog};
use crate::traits::player::{AudioPlayer, FinishedCallback};

/// Playback-side shared state, written from the player's completion
/// callback on an audio thread.
struct PlaybackShared {
    is_playing: bool,
    ended_secs: Option<f64>,
}

/// Owns the decoded buffer for the most recent capture and plays it back,
/// one playback at a time.
///
/// Exactly one `DecodedAudio`/`WavArtifact` pair is tracked; processing a
/// new capture replaces both. Playback always runs start-to-finish; there
/// is no stop-midway operation.
pub struct PlaybackController<Dec: AudioDecoder, P: AudioPlayer> {
    decoder: Dec,
    player: P,
    audio: Option<DecodedAudio>,
    artifact: Option<Arc<WavArtifact>>,
    shared: Arc<Mutex<PlaybackShared>>,
}

impl<Dec: AudioDecoder, P: AudioPlayer> PlaybackController<Dec, P> {
    pub fn new(decoder: Dec, player: P) -> Self {
        Self {
            decoder,
            player,
            audio: None,
            artifact: None,
            shared: Arc::new(Mutex::new(PlaybackShared {
                is_playing: false,
                ended_secs: None,
            })),
        }
    }

    /// Decode a raw capture and take ownership of the result.
    ///
    /// On success the prior decoded buffer and artifact are discarded, the
    /// WAV artifact is re-derived, and the new duration is returned. On
    /// failure the error is logged and prior state is left untouched.
    pub fn process_capture(&mut self, recording: &RawRecording) -> Result<f64, RecordError> {
        let audio = self.decoder.decode(recording).map_err(|error| {
            log::error!("failed to decode capture {}: {error}", recording.id);
            error
        })?;

        let duration = audio.duration_secs();
        let artifact = WavArtifact::new(wav::encode_wav(&audio), duration);
        log::debug!(
            "capture {} decoded: {:.2}s, {} channel(s) at {} Hz",
            recording.id,
            duration,
            audio.channel_count(),
            audio.sample_rate()
        );

        self.audio = Some(audio);
        self.artifact = Some(Arc::new(artifact));
        let mut shared = self.shared.lock();
        shared.ended_secs = None;
        Ok(duration)
    }

    /// Begin playback of the current buffer.
    ///
    /// Returns `Ok(false)` as a no-op when nothing is loaded or a playback
    /// is already in flight. On natural completion `is_playing` drops and
    /// the finished duration becomes observable via `playback_ended`.
    pub fn play(&mut self) -> Result<bool, RecordError> {
        let Some(audio) = self.audio.as_ref() else {
            return Ok(false);
        };
        {
            let mut shared = self.shared.lock();
            if shared.is_playing {
                return Ok(false);
            }
            shared.is_playing = true;
            shared.ended_secs = None;
        }

        let duration = audio.duration_secs();
        let shared = Arc::clone(&self.shared);
        let on_finished: FinishedCallback = Box::new(move || {
            let mut shared = shared.lock();
            shared.is_playing = false;
            shared.ended_secs = Some(duration);
        });

        if let Err(error) = self.player.play(audio, on_finished) {
            self.shared.lock().is_playing = false;
            log::error!("playback failed to start: {error}");
            return Err(error);
        }
        Ok(true)
    }

    /// Hand the current WAV artifact to the save/write collaborators.
    ///
    /// The artifact was derived when the capture was processed; the encoder
    /// is pure, so the bytes are identical to a fresh encode. A no-op when
    /// no capture has been processed.
    pub fn export_wav<D, W>(&self, dialog: &D, writer: &W) -> Result<ExportOutcome, RecordError>
    where
        D: SaveDialog + ?Sized,
        W: FileWriter + ?Sized,
    {
        let Some(artifact) = self.artifact.as_ref() else {
            return Ok(ExportOutcome::NothingToExport);
        };
        export::export_artifact(artifact, dialog, writer)
    }

    pub fn is_playing(&self) -> bool {
        self.shared.lock().is_playing
    }

    /// Duration of the finished playback, present from natural completion
    /// until the next play or processed capture.
    pub fn playback_ended(&self) -> Option<f64> {
        self.shared.lock().ended_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.audio.as_ref().map(DecodedAudio::duration_secs).unwrap_or(0.0)
    }

    pub fn artifact(&self) -> Option<Arc<WavArtifact>> {
        self.artifact.clone()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: self.is_playing(),
            duration_secs: self.duration_secs(),
            has_artifact: self.artifact.is_some(),
        }
    }
}
