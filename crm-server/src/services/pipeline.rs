//! Pipeline stage classification
//!
//! Buckets prospects into the seven stages in fixed kanban order. The
//! status enum makes an unknown stage unrepresentable, so every prospect
//! lands in exactly one bucket.

use serde::Serialize;

use shared::models::{PipelineStage, Prospect};

/// One kanban column
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageBucket {
    pub stage: PipelineStage,
    pub label: &'static str,
    pub count: usize,
    pub prospects: Vec<Prospect>,
}

/// Bucket prospects by stage, columns in fixed order
pub fn classify(prospects: Vec<Prospect>) -> Vec<StageBucket> {
    let mut buckets: Vec<StageBucket> = PipelineStage::ALL
        .iter()
        .map(|&stage| StageBucket {
            stage,
            label: stage.label(),
            count: 0,
            prospects: vec![],
        })
        .collect();

    for prospect in prospects {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.stage == prospect.status) {
            bucket.prospects.push(prospect);
        }
    }

    for bucket in &mut buckets {
        bucket.count = bucket.prospects.len();
    }

    buckets
}
