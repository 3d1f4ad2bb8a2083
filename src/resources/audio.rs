//! Bridge between the ECS world and the audio collaborator.
//!
//! Gameplay systems only write [`AudioCmd`] messages. Once per step
//! [`forward_audio_cmds`](crate::systems::audio::forward_audio_cmds) pushes
//! them through the [`AudioBridge`] channel, if one is installed.
//!
//! Use [`setup_audio`] to run the built-in headless sink on its own thread, or
//! [`attach_audio`] to receive the commands yourself. Call [`shutdown_audio`]
//! during teardown.

use crate::events::audio::AudioCmd;
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> sink).
    pub tx_cmd: Sender<AudioCmd>,
    /// Join handle when the sink runs on a thread we spawned.
    pub handle: Option<std::thread::JoinHandle<()>>,
}

/// Spawn the headless audio thread and register the bridge.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let handle = std::thread::spawn(move || audio_thread(rx_cmd));

    world.insert_resource(AudioBridge {
        tx_cmd,
        handle: Some(handle),
    });
    world.init_resource::<Messages<AudioCmd>>();
}

/// Register the bridge and hand the receiving end to the caller.
pub fn attach_audio(world: &mut World) -> Receiver<AudioCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    world.insert_resource(AudioBridge {
        tx_cmd,
        handle: None,
    });
    world.init_resource::<Messages<AudioCmd>>();
    rx_cmd
}

/// Ask the sink to stop, join it if we own the thread, and drop the bridge.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        if let Some(handle) = bridge.handle {
            let _ = handle.join();
        }
    }
}
