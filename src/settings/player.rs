use super::SettingsService;

pub const MUSIC_VOLUME_KEY: &str = "MusicVolume";
pub const SFX_VOLUME_KEY: &str = "SFXVolume";
pub const GRAPHICS_QUALITY_KEY: &str = "GraphicsQuality";

const DEFAULT_MUSIC_VOLUME: f32 = 0.5;
const DEFAULT_SFX_VOLUME: f32 = 0.5;
const DEFAULT_GRAPHICS_QUALITY: f32 = 2.0;

/// Preferences edited by the options menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub graphics_quality: u32,
}

impl PlayerSettings {
    /// Reads every preference, falling back to the defaults
    pub fn load(store: &dyn SettingsService) -> Self {
        PlayerSettings {
            music_volume: store.load(MUSIC_VOLUME_KEY, DEFAULT_MUSIC_VOLUME),
            sfx_volume: store.load(SFX_VOLUME_KEY, DEFAULT_SFX_VOLUME),
            graphics_quality: store
                .load(GRAPHICS_QUALITY_KEY, DEFAULT_GRAPHICS_QUALITY)
                .max(0.0) as u32,
        }
    }

    /// Writes every preference; the caller decides when to flush
    pub fn save(&self, store: &mut dyn SettingsService) {
        store.save(MUSIC_VOLUME_KEY, self.music_volume);
        store.save(SFX_VOLUME_KEY, self.sfx_volume);
        store.save(GRAPHICS_QUALITY_KEY, self.graphics_quality as f32);
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        PlayerSettings {
            music_volume: DEFAULT_MUSIC_VOLUME,
            sfx_volume: DEFAULT_SFX_VOLUME,
            graphics_quality: DEFAULT_GRAPHICS_QUALITY as u32,
        }
    }
}
