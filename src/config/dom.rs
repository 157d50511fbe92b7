// src/config/dom.rs
//! ページ側 (index.html) の要素 ID とクラス名。

pub const CARDS_CONTAINER_ID: &str = "cards-container";
pub const DROP_ZONE_ID: &str = "drop-zone";
pub const CHECK_BUTTON_ID: &str = "check-btn";
pub const NEW_ROUND_BUTTON_ID: &str = "new-btn";
pub const EFFECTS_TOGGLE_ID: &str = "effects-toggle";
pub const MUSIC_TOGGLE_ID: &str = "music-toggle";
pub const VOLUME_SLIDER_ID: &str = "volume-slider";
pub const TOAST_ID: &str = "toast";
pub const SCOREBOARD_ID: &str = "scoreboard";
pub const MUSIC_ID: &str = "background-music";

// ここから下は無くても動く (レイアウトによっては存在しない)
pub const TIMER_IDS: [&str; 2] = ["timer-desktop", "timer-mobile"];
pub const FLASH_OVERLAY_ID: &str = "flash-overlay";
pub const ROTATE_MESSAGE_ID: &str = "rotate-message";

pub const CARD_CLASS: &str = "card";
pub const PLACEHOLDER_CLASS: &str = "placeholder";
pub const ASSEMBLY_HINT_CLASS: &str = "assembly-hint";
pub const TOAST_SHOW_CLASS: &str = "show";
