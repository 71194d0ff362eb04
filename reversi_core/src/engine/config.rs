use crate::logic::eval_constants::{
    EARLY_PHASE_ABOVE, EARLY_WEIGHTS, LATE_PHASE_AT_MOST, LATE_WEIGHTS, MID_WEIGHTS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

/// Weights of the four evaluation features for one game phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub parity: f64,
    pub mobility: f64,
    pub frontier: f64,
    pub positional: f64,
}

impl PhaseWeights {
    #[allow(clippy::indexing_slicing)]
    pub const fn from_array(w: [f64; 4]) -> Self {
        Self {
            parity: w[0],
            mobility: w[1],
            frontier: w[2],
            positional: w[3],
        }
    }

    fn is_finite(&self) -> bool {
        self.parity.is_finite()
            && self.mobility.is_finite()
            && self.frontier.is_finite()
            && self.positional.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub early_weights: PhaseWeights,
    pub mid_weights: PhaseWeights,
    pub late_weights: PhaseWeights,
    pub early_phase_above: usize, // empty squares strictly above this = early
    pub late_phase_at_most: usize, // empty squares at or below this = late

    // Search Parameters
    pub search_depth: u8,
    pub use_transposition_table: bool,
    pub tt_size_mb: usize,
    pub order_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            early_weights: PhaseWeights::from_array(EARLY_WEIGHTS),
            mid_weights: PhaseWeights::from_array(MID_WEIGHTS),
            late_weights: PhaseWeights::from_array(LATE_WEIGHTS),
            early_phase_above: EARLY_PHASE_ABOVE,
            late_phase_at_most: LATE_PHASE_AT_MOST,

            search_depth: 5,
            use_transposition_table: true,
            tt_size_mb: 16,
            order_moves: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("late phase threshold ({late}) must be below the early phase threshold ({early})")]
    PhaseThresholds { early: usize, late: usize },
    #[error("{0} weights must be finite numbers")]
    NonFiniteWeight(&'static str),
}

/// Overrides accepted by `load_from_json`. Feature scales multiply the
/// default weight of that feature in every phase.
#[derive(Deserialize)]
struct EngineConfigJson {
    parity_scale: Option<f64>,
    mobility_scale: Option<f64>,
    frontier_scale: Option<f64>,
    positional_scale: Option<f64>,

    early_phase_above: Option<usize>,
    late_phase_at_most: Option<usize>,

    search_depth: Option<u8>,
    use_transposition_table: Option<bool>,
    tt_size_mb: Option<usize>,
    order_moves: Option<bool>,
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        let scale = |w: PhaseWeights| PhaseWeights {
            parity: apply_scale(w.parity, json_config.parity_scale),
            mobility: apply_scale(w.mobility, json_config.mobility_scale),
            frontier: apply_scale(w.frontier, json_config.frontier_scale),
            positional: apply_scale(w.positional, json_config.positional_scale),
        };

        Ok(Self {
            early_weights: scale(default.early_weights),
            mid_weights: scale(default.mid_weights),
            late_weights: scale(default.late_weights),
            early_phase_above: json_config
                .early_phase_above
                .unwrap_or(default.early_phase_above),
            late_phase_at_most: json_config
                .late_phase_at_most
                .unwrap_or(default.late_phase_at_most),

            search_depth: json_config.search_depth.unwrap_or(default.search_depth),
            use_transposition_table: json_config
                .use_transposition_table
                .unwrap_or(default.use_transposition_table),
            tt_size_mb: json_config.tt_size_mb.unwrap_or(default.tt_size_mb),
            order_moves: json_config.order_moves.unwrap_or(default.order_moves),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.late_phase_at_most >= self.early_phase_above {
            return Err(ConfigError::PhaseThresholds {
                early: self.early_phase_above,
                late: self.late_phase_at_most,
            });
        }
        for (name, weights) in [
            ("early", &self.early_weights),
            ("mid", &self.mid_weights),
            ("late", &self.late_weights),
        ] {
            if !weights.is_finite() {
                return Err(ConfigError::NonFiniteWeight(name));
            }
        }
        Ok(())
    }

    pub const fn phase_for(&self, empty: usize) -> GamePhase {
        if empty > self.early_phase_above {
            GamePhase::Early
        } else if empty > self.late_phase_at_most {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    pub const fn weights(&self, phase: GamePhase) -> &PhaseWeights {
        match phase {
            GamePhase::Early => &self.early_weights,
            GamePhase::Mid => &self.mid_weights,
            GamePhase::Late => &self.late_weights,
        }
    }

    /// Weight row for a position with `empty` free squares.
    pub const fn weights_for(&self, empty: usize) -> &PhaseWeights {
        self.weights(self.phase_for(empty))
    }
}

fn apply_scale(default_val: f64, scale: Option<f64>) -> f64 {
    scale.map_or(default_val, |s| default_val * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let json = "{}";
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search_depth, 5);
        assert!(config.use_transposition_table);
    }

    #[test]
    fn test_load_config_scaled() {
        let json = r#"{
            "mobility_scale": 0.5,
            "positional_scale": 2.0
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert!((config.early_weights.mobility - 0.4).abs() < 1e-9);
        assert!((config.mid_weights.mobility - 0.35).abs() < 1e-9);
        assert!((config.late_weights.positional - 0.2).abs() < 1e-9);
        // Untouched features keep their defaults
        assert!((config.late_weights.parity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let json = "{ invalid json }";
        let result = EngineConfig::load_from_json(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_search_options() {
        let json = r#"{
            "search_depth": 3,
            "use_transposition_table": false,
            "tt_size_mb": 1,
            "order_moves": false,
            "early_phase_above": 50,
            "late_phase_at_most": 10
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.search_depth, 3);
        assert!(!config.use_transposition_table);
        assert_eq!(config.tt_size_mb, 1);
        assert!(!config.order_moves);
        assert_eq!(config.early_phase_above, 50);
        assert_eq!(config.late_phase_at_most, 10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig {
            search_depth: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDepth));

        let config = EngineConfig {
            early_phase_above: 20,
            late_phase_at_most: 20,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PhaseThresholds {
                early: 20,
                late: 20
            })
        );

        let mut config = EngineConfig::default();
        config.mid_weights.frontier = f64::NAN;
        assert_eq!(config.validate(), Err(ConfigError::NonFiniteWeight("mid")));
    }

    #[test]
    fn test_weights_for_phase_boundaries() {
        let config = EngineConfig::default();
        assert_eq!(config.weights_for(60), &config.early_weights);
        assert_eq!(config.weights_for(45), &config.early_weights);
        assert_eq!(config.weights_for(44), &config.mid_weights);
        assert_eq!(config.weights_for(21), &config.mid_weights);
        assert_eq!(config.weights_for(20), &config.late_weights);
        assert_eq!(config.weights_for(0), &config.late_weights);
        assert_eq!(config.phase_for(2), GamePhase::Late);
        assert_eq!(config.phase_for(30), GamePhase::Mid);
    }

    #[test]
    fn test_deserialize_absolute_config() {
        let json = r#"{
            "search_depth": 7,
            "late_weights": { "parity": 2.0, "mobility": 0.0, "frontier": 0.0, "positional": 0.0 }
        }"#;

        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.search_depth, 7);
        assert!((config.late_weights.parity - 2.0).abs() < f64::EPSILON);
        // Check default values
        assert_eq!(config.early_weights, PhaseWeights::from_array(EARLY_WEIGHTS));
    }
}
