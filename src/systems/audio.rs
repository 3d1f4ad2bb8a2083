//! Audio forwarding.
//!
//! - [`forward_audio_cmds`] pushes this step's [`AudioCmd`] messages into the
//!   [`AudioBridge`] channel.
//! - [`update_bevy_audio_cmds`] advances the message queue; run it last.
//! - [`audio_thread`] is the headless sink used by the binary: it has no
//!   device and only logs what it would play.

use crate::events::audio::AudioCmd;
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use log::{debug, info};
use rustc_hash::FxHashSet;

/// Forward ECS AudioCmd messages to the sink. Without a bridge they are
/// simply dropped when the queue rotates.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        return;
    };
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the headless audio thread.
///
/// Blocks on the channel until [`AudioCmd::Shutdown`] arrives or every sender
/// is gone.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>) {
    info!("[audio] headless sink starting (id={:?})", std::thread::current().id());

    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut muted_tracks: FxHashSet<u32> = FxHashSet::default();

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::PlayFx { id } => debug!("[audio] fx {id}"),
            AudioCmd::PlayFxEcho { id } => debug!("[audio] fx {id} (echo)"),
            AudioCmd::ToggleTrack { track } => {
                let muted = if muted_tracks.remove(&track) {
                    false
                } else {
                    muted_tracks.insert(track);
                    true
                };
                debug!("[audio] track {track} muted={muted}");
            }
            AudioCmd::PlayMusic { id, looped } => {
                debug!("[audio] music {id} looped={looped}");
                playing.insert(id);
            }
            AudioCmd::StopMusic { id } => {
                debug!("[audio] stop music {id}");
                playing.remove(&id);
            }
            AudioCmd::Shutdown => break,
        }
    }

    info!("[audio] headless sink stopped ({} music streams open)", playing.len());
}
