//! Sound cues.
//!
//! Gameplay systems write a [`SoundCue`] only while sound is switched on.
//! Playback is a binary-only shell: each cue maps to an optional clip in
//! [`SoundBank`], bound at startup only if its file exists under `assets/`.
//! A cue without a clip is dropped silently.

use bevy::prelude::*;

/// Something audible happened this tick.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A bullet was fired.
    Fired,
    /// A bullet struck something.
    Hit,
}

const FIRED_CLIP: &str = "sounds/fire.ogg";
const HIT_CLIP: &str = "sounds/hit.ogg";

/// Clips bound to each cue.  `None` means the cue is silent.
#[derive(Resource, Debug, Default)]
pub struct SoundBank {
    pub fired: Option<Handle<AudioSource>>,
    pub hit: Option<Handle<AudioSource>>,
}

impl SoundBank {
    fn clip(&self, cue: SoundCue) -> Option<&Handle<AudioSource>> {
        match cue {
            SoundCue::Fired => self.fired.as_ref(),
            SoundCue::Hit => self.hit.as_ref(),
        }
    }
}

fn bind_clip(asset_server: &AssetServer, path: &str) -> Option<Handle<AudioSource>> {
    if std::path::Path::new("assets").join(path).exists() {
        Some(asset_server.load(path.to_owned()))
    } else {
        info!("No clip at assets/{path}; cue stays silent");
        None
    }
}

/// Startup system: bind whichever clips are present on disk.
pub fn load_sound_bank(asset_server: Res<AssetServer>, mut bank: ResMut<SoundBank>) {
    bank.fired = bind_clip(&asset_server, FIRED_CLIP);
    bank.hit = bind_clip(&asset_server, HIT_CLIP);
}

/// Play every cue written this tick that has a clip.
pub fn play_sound_cues_system(
    mut commands: Commands,
    mut cues: MessageReader<SoundCue>,
    bank: Res<SoundBank>,
) {
    for cue in cues.read() {
        if let Some(clip) = bank.clip(*cue) {
            commands.spawn((AudioPlayer::new(clip.clone()), PlaybackSettings::DESPAWN));
        }
    }
}

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundBank>()
            .add_systems(Startup, load_sound_bank)
            .add_systems(Update, play_sound_cues_system);
    }
}
