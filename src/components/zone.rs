// src/components/zone.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;
use crate::error::GameError;

/// カードが置かれている場所の種類だよ。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// 配られたカードが並ぶ場所 (`#cards-container`)
    Hand,
    /// プレイヤーが食物連鎖を組み立てる場所 (`#drop-zone`)
    Assembly,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Hand => "hand",
            Zone::Assembly => "assembly",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// JS のドラッグエンジンからは文字列で届くので、そこから変換できるようにしておく
impl FromStr for Zone {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hand" => Ok(Zone::Hand),
            "assembly" => Ok(Zone::Assembly),
            other => Err(GameError::UnknownZone(other.to_string())),
        }
    }
}

/// カードがどのゾーンの何番目にあるかを持つコンポーネント。
/// 同じゾーンの `position` は常に 0 から隙間なく並ぶよ (`MoveCardSystem` が保証する)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub zone: Zone,
    /// ゾーンの中での順番 (0 が先頭)
    pub position: usize,
}

impl ZoneInfo {
    pub fn new(zone: Zone, position: usize) -> Self {
        Self { zone, position }
    }
}

impl Component for ZoneInfo {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_parses_from_js_names() {
        assert_eq!("hand".parse::<Zone>().unwrap(), Zone::Hand);
        assert_eq!("assembly".parse::<Zone>().unwrap(), Zone::Assembly);
        assert!(matches!("drop-zone".parse::<Zone>(), Err(GameError::UnknownZone(name)) if name == "drop-zone"));
    }

    #[test]
    fn zone_info_creation() {
        let info = ZoneInfo::new(Zone::Assembly, 3);
        assert_eq!(info.zone, Zone::Assembly);
        assert_eq!(info.position, 3);
    }
}
