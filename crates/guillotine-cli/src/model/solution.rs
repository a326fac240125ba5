use chrono::{DateTime, Utc};
use guillotine_engine::{Board, Rect};
use guillotine_training::config::SolverConfig;
use serde::{Deserialize, Serialize};

/// Result document written by `guillotine solve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub seed: u64,
    pub solved_at: DateTime<Utc>,
    pub config: SolverConfig,
    pub max_width: u32,
    pub demands: Vec<Board>,
    pub total_area: u64,
    pub sheet: Board,
    pub sheet_area: u64,
    /// `None` when there are no demand boards.
    pub waste_percent: Option<f64>,
    pub boxes: Vec<Rect>,
}
