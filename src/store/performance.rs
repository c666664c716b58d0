use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElbowPoint {
    pub k: u32,
    pub sse: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilhouettePoint {
    pub k: u32,
    pub score: f64,
}

/// Clustering-quality reference curves. Static; shown for context only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPerformance {
    pub elbow_data: Vec<ElbowPoint>,
    pub silhouette_data: Vec<SilhouettePoint>,
}

const ELBOW_SSE: [f64; 10] = [500.0, 350.0, 200.0, 120.0, 80.0, 65.0, 58.0, 55.0, 52.0, 50.0];
const SILHOUETTE: [f64; 9] = [0.45, 0.52, 0.48, 0.55, 0.42, 0.38, 0.35, 0.33, 0.30];

impl ModelPerformance {
    /// Elbow curve for k = 1..=10, silhouette scores for k = 2..=10
    pub fn reference() -> Self {
        Self {
            elbow_data: ELBOW_SSE
                .iter()
                .enumerate()
                .map(|(i, &sse)| ElbowPoint { k: i as u32 + 1, sse })
                .collect(),
            silhouette_data: SILHOUETTE
                .iter()
                .enumerate()
                .map(|(i, &score)| SilhouettePoint {
                    k: i as u32 + 2,
                    score,
                })
                .collect(),
        }
    }
}
