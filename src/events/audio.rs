use bevy_ecs::message::Message;

/// Sound effect ids written by gameplay systems.
pub const FX_FIRE: &str = "watergun";
pub const FX_PRIZE: &str = "prize";
pub const FX_BOOP: &str = "boop";
/// Background music started with each level and stopped while paused.
pub const MUSIC_BACKGROUND: &str = "background";
/// Track toggled by the Music power-up.
pub const TRACK_DRUMS: u32 = 1;

/// Fire-and-forget commands for the audio collaborator.
///
/// The simulation never waits on playback and never reads back state; the
/// [`AudioBridge`](crate::resources::audio::AudioBridge) forwards these to
/// whatever owns the audio device.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    PlayFx { id: String },
    /// Play an effect through the echo filter (level completion).
    PlayFxEcho { id: String },
    ToggleTrack { track: u32 },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    Shutdown,
}

impl AudioCmd {
    pub fn fx(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }
}
