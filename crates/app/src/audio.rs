//! Sound command routing from game events to an output device.
//! This module exists so the mute setting is honoured in one place.
//! It does not own mixing or asset loading; sinks decide how a sound id is voiced.

use chase_core::{SoundId, sounds};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    Play(SoundId),
    Stop(SoundId),
}

pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
    fn stop(&mut self, sound: SoundId);
}

/// Commands collected during a frame, flushed to a sink afterwards.
/// While muted, play requests are dropped but stops still pass through.
#[derive(Debug, Default)]
pub struct AudioQueue {
    muted: bool,
    pending: Vec<AudioCommand>,
}

impl AudioQueue {
    pub fn new(muted: bool) -> Self {
        Self { muted, pending: Vec::new() }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        if muted && !self.muted {
            self.pending.retain(|command| matches!(command, AudioCommand::Stop(_)));
            self.pending.push(AudioCommand::Stop(sounds::BGM));
        }
        self.muted = muted;
    }

    pub fn push(&mut self, command: AudioCommand) {
        if self.muted && matches!(command, AudioCommand::Play(_)) {
            return;
        }
        self.pending.push(command);
    }

    pub fn pending(&self) -> &[AudioCommand] {
        &self.pending
    }

    pub fn flush(&mut self, sink: &mut impl AudioSink) {
        for command in self.pending.drain(..) {
            match command {
                AudioCommand::Play(sound) => sink.play(sound),
                AudioCommand::Stop(sound) => sink.stop(sound),
            }
        }
    }
}

/// Parses a `CHASE_MUTE`-style override. Unset or unrecognised values leave the setting alone.
pub fn mute_override(raw: Option<&str>) -> Option<bool> {
    match raw?.trim() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

pub fn sound_name(sound: SoundId) -> &'static str {
    match sound {
        sounds::BELL => "bell",
        sounds::DEATH => "death",
        sounds::DONE => "done",
        sounds::BGM => "bgm",
        sounds::ENEMY_ATTACK => "enemy_attack",
        sounds::ENEMY_GROWL => "enemy_growl",
        sounds::ENEMY_GROWL_ALT => "enemy_growl_alt",
        sounds::ENEMY_CRY => "enemy_cry",
        sounds::JUMPSCARE => "jumpscare",
        _ => "unknown",
    }
}

/// Voices sounds as log lines; stands in for a device on headless or asset-less builds.
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, sound: SoundId) {
        log::debug!("play sound {} ({})", sound.0, sound_name(sound));
    }

    fn stop(&mut self, sound: SoundId) {
        log::debug!("stop sound {} ({})", sound.0, sound_name(sound));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        heard: Vec<AudioCommand>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, sound: SoundId) {
            self.heard.push(AudioCommand::Play(sound));
        }

        fn stop(&mut self, sound: SoundId) {
            self.heard.push(AudioCommand::Stop(sound));
        }
    }

    #[test]
    fn flush_preserves_order_and_empties_queue() {
        let mut queue = AudioQueue::new(false);
        queue.push(AudioCommand::Stop(sounds::BELL));
        queue.push(AudioCommand::Play(sounds::BELL));
        let mut sink = RecordingSink::default();
        queue.flush(&mut sink);
        assert_eq!(
            sink.heard,
            vec![AudioCommand::Stop(sounds::BELL), AudioCommand::Play(sounds::BELL)]
        );
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn muted_queue_drops_plays_but_keeps_stops() {
        let mut queue = AudioQueue::new(true);
        queue.push(AudioCommand::Play(sounds::JUMPSCARE));
        queue.push(AudioCommand::Stop(sounds::BGM));
        assert_eq!(queue.pending(), &[AudioCommand::Stop(sounds::BGM)]);
    }

    #[test]
    fn muting_mid_frame_discards_queued_plays_and_silences_music() {
        let mut queue = AudioQueue::new(false);
        queue.push(AudioCommand::Play(sounds::BGM));
        queue.set_muted(true);
        assert!(queue.is_muted());
        assert_eq!(queue.pending(), &[AudioCommand::Stop(sounds::BGM)]);
    }

    #[test]
    fn mute_override_parses_common_spellings() {
        assert_eq!(mute_override(Some("1")), Some(true));
        assert_eq!(mute_override(Some(" false ")), Some(false));
        assert_eq!(mute_override(Some("loud")), None);
        assert_eq!(mute_override(None), None);
    }

    #[test]
    fn every_known_sound_has_a_name() {
        assert_eq!(sound_name(sounds::ENEMY_ATTACK), "enemy_attack");
        assert_eq!(sound_name(SoundId(99)), "unknown");
    }
}
