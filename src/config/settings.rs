// src/config/settings.rs
//! 実行時設定。`GameApp::new` に JSON 文字列で渡してもらうよ。
//! 全部のフィールドにデフォルトがあるので、何も渡さなくても動く！

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::logic::feedback::Sound;

/// 効果音ファイルの URL。無いものは合成音 (トーン) で代用されるよ 🎵
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundUrls {
    pub drag: Option<String>,
    pub drop: Option<String>,
    pub correct: Option<String>,
    pub wrong: Option<String>,
}

impl SoundUrls {
    pub fn url_for(&self, sound: Sound) -> Option<&str> {
        match sound {
            Sound::Drag => self.drag.as_deref(),
            Sound::Drop => self.drop.as_deref(),
            Sound::Correct => self.correct.as_deref(),
            Sound::Wrong => self.wrong.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub sounds: SoundUrls,
    /// 効果音ファイルの音量 (0.0〜1.0)
    pub effects_volume: f64,
    /// BGM をオンにしたときの音量 (0.0〜1.0)
    pub music_volume: f64,
    /// コンソールに出すログのレベル ("error", "warn", "info", "debug", "trace", "off")
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sounds: SoundUrls::default(),
            effects_volume: 0.35,
            music_volume: 0.15,
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// JSON から設定を読む。`None` や空文字ならデフォルト。
    pub fn from_json(json: Option<&str>) -> Result<Self, GameError> {
        let config = match json.map(str::trim) {
            None | Some("") => GameConfig::default(),
            Some(text) => serde_json::from_str(text)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), GameError> {
        for (name, value) in [("effects_volume", self.effects_volume), ("music_volume", self.music_volume)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidConfig(format!("{name} must be within 0.0..=1.0, got {value}")));
            }
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, GameError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| GameError::InvalidConfig(format!("unknown log_level {:?}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let config = GameConfig::from_json(None).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.effects_volume, 0.35);
        assert_eq!(config.music_volume, 0.15);
        assert_eq!(GameConfig::from_json(Some("  ")).unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = GameConfig::from_json(Some(r#"{"sounds":{"drop":"assets/drop.mp3"},"log_level":"debug"}"#)).unwrap();
        assert_eq!(config.sounds.url_for(Sound::Drop), Some("assets/drop.mp3"));
        assert_eq!(config.sounds.url_for(Sound::Drag), None);
        assert_eq!(config.music_volume, 0.15);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let err = GameConfig::from_json(Some(r#"{"music_volume": 1.5}"#)).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(msg) if msg.contains("music_volume")));
    }

    #[test]
    fn unknown_fields_and_levels_are_rejected() {
        assert!(GameConfig::from_json(Some(r#"{"round_seconds": 10}"#)).is_err());
        assert!(GameConfig::from_json(Some(r#"{"log_level": "loud"}"#)).is_err());
        assert!(GameConfig::from_json(Some("{not json")).is_err());
    }
}
