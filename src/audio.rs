//! Sound cue plumbing.
//!
//! The simulation raises [`SoundCue`]s through a [`SoundSink`]; each frame
//! they are forwarded as Bevy messages.  There is no synthesiser: cues are
//! only logged, so a real audio backend can subscribe to the same messages.

use crate::simulation::{SoundCue, SoundSink};
use bevy::prelude::*;

/// Cues collected during one frame's simulation step.
#[derive(Debug, Default)]
pub struct CueBuffer(pub Vec<SoundCue>);

impl SoundSink for CueBuffer {
    fn play(&mut self, cue: SoundCue) {
        self.0.push(cue);
    }
}

impl CueBuffer {
    /// Forward every buffered cue and empty the buffer.
    pub fn flush(&mut self, writer: &mut MessageWriter<SoundCue>) {
        for cue in self.0.drain(..) {
            writer.write(cue);
        }
    }
}

pub struct SoundCuePlugin;

impl Plugin for SoundCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SoundCue>()
            .add_systems(Update, log_sound_cues_system);
    }
}

pub fn log_sound_cues_system(mut cues: MessageReader<SoundCue>) {
    for cue in cues.read() {
        debug!("sound cue: {:?}", cue);
    }
}
