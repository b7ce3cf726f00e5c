//! 提交评估
//!
//! `Evaluator` 负责为一份提交生成分类与评分草稿，存储层负责落库。
//! 目前只有 [`MockEvaluator`]，用均匀随机数映射到各个区间。

mod mock;

pub use mock::MockEvaluator;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::evaluations::entities::{Classification, EvaluationDraft, ScoreLevel};

pub const CONFIDENCE_FLOOR: f64 = 0.7;
pub const CONFIDENCE_SPAN: f64 = 0.3;

/// 评估输入
#[derive(Debug, Clone)]
pub struct EvaluationInput<'a> {
    pub content: &'a str,
    pub assignment_title: &'a str,
    pub rubric: Option<&'a serde_json::Value>,
}

#[async_trait]
pub trait Evaluator: Send + Sync {
    /// 完整评估：分类、置信度、四项评分与反馈
    async fn evaluate(&self, input: &EvaluationInput<'_>) -> Result<EvaluationDraft>;

    /// 只重新生成反馈文本
    async fn regenerate_feedback(&self, input: &EvaluationInput<'_>) -> Result<String>;

    fn name(&self) -> &'static str;
}

pub const HUMAN_THRESHOLD: f64 = 0.6;
pub const HYBRID_THRESHOLD: f64 = 0.3;

/// 两次抽样：first > 0.6 为 Human，否则 second > 0.3 为 Hybrid，其余为 AI
///
/// 概率约为 Human 0.40 / Hybrid 0.42 / AI 0.18。
pub fn classification_bucket(first: f64, second: f64) -> Classification {
    if first > HUMAN_THRESHOLD {
        Classification::Human
    } else if second > HYBRID_THRESHOLD {
        Classification::Hybrid
    } else {
        Classification::Ai
    }
}

/// floor(draw * 4) + 1，结果落在 1..=4
pub fn score_bucket(draw: f64) -> i32 {
    let score = (draw * ScoreLevel::MAX_SCORE as f64).floor() as i32 + 1;
    score.clamp(ScoreLevel::MIN_SCORE, ScoreLevel::MAX_SCORE)
}

/// 0.7 + draw * 0.3
pub fn confidence_bucket(draw: f64) -> f64 {
    CONFIDENCE_FLOOR + draw.clamp(0.0, 1.0) * CONFIDENCE_SPAN
}
