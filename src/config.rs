use serde::{Deserialize, Serialize};

use crate::types::Side;

/// Who plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    #[serde(alias = "ai")]
    Computer,
}

/// Computer strength, expressed as search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    /// Look-ahead in plies.
    pub const fn thinking_depth(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 4,
        }
    }
}

/// Settings chosen before a game starts. Missing fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub black: PlayerKind,
    pub white: PlayerKind,
    pub difficulty: Difficulty,
}

impl GameConfig {
    /// Human on black against the computer on white.
    pub fn against_computer(difficulty: Difficulty) -> Self {
        Self {
            black: PlayerKind::Human,
            white: PlayerKind::Computer,
            difficulty,
        }
    }

    pub fn player(&self, side: Side) -> PlayerKind {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    pub fn thinking_depth(&self) -> u8 {
        self.difficulty.thinking_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_maps_to_depth() {
        assert_eq!(Difficulty::Easy.thinking_depth(), 1);
        assert_eq!(Difficulty::Medium.thinking_depth(), 2);
        assert_eq!(Difficulty::Hard.thinking_depth(), 4);
    }

    #[test]
    fn default_config_is_two_humans_on_hard() {
        let config = GameConfig::default();

        assert_eq!(config.player(Side::Black), PlayerKind::Human);
        assert_eq!(config.player(Side::White), PlayerKind::Human);
        assert_eq!(config.thinking_depth(), 4);
    }

    #[test]
    fn parses_partial_config_with_ai_alias() {
        let config: GameConfig =
            serde_json::from_str(r#"{"white": "ai", "difficulty": "medium"}"#).unwrap();

        assert_eq!(
            config,
            GameConfig {
                black: PlayerKind::Human,
                white: PlayerKind::Computer,
                difficulty: Difficulty::Medium,
            }
        );
        assert_eq!(
            serde_json::from_str::<GameConfig>("{}").unwrap(),
            GameConfig::default()
        );
    }

    #[test]
    fn rejects_unknown_difficulty() {
        let err = serde_json::from_str::<GameConfig>(r#"{"difficulty": "insane"}"#).unwrap_err();

        assert!(err.to_string().contains("unknown variant"));
    }
}
