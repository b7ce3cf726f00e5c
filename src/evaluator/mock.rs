use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use super::{EvaluationInput, Evaluator, classification_bucket, confidence_bucket, score_bucket};
use crate::errors::Result;
use crate::models::evaluations::entities::{EvaluationDraft, RubricScores};

const PLACEHOLDER_FEEDBACK: &str = "This submission demonstrates a reasonable grasp of the core \
concepts. Consider strengthening the application of theory to practical examples and \
tightening the structure of the argument.";

const REGENERATED_FEEDBACK: &str = "Regenerated feedback: the work shows understanding of the \
key ideas. Further critical evaluation of sources and clearer links between sections would \
improve the overall quality.";

/// 随机评估器，不读取提交内容
#[derive(Debug, Default, Clone, Copy)]
pub struct MockEvaluator;

impl MockEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// 给定七个 [0,1) 抽样值构造草稿：分类（两次）、置信度、四项评分
    pub fn draft_from_draws(draws: [f64; 7]) -> EvaluationDraft {
        EvaluationDraft {
            classification: classification_bucket(draws[0], draws[1]),
            confidence: confidence_bucket(draws[2]),
            scores: RubricScores {
                conceptual: score_bucket(draws[3]),
                application: score_bucket(draws[4]),
                evaluation: score_bucket(draws[5]),
                writing: score_bucket(draws[6]),
            },
            ai_feedback: PLACEHOLDER_FEEDBACK.to_string(),
        }
    }
}

#[async_trait]
impl Evaluator for MockEvaluator {
    async fn evaluate(&self, input: &EvaluationInput<'_>) -> Result<EvaluationDraft> {
        let draws: [f64; 7] = {
            let mut rng = rand::rng();
            std::array::from_fn(|_| rng.random::<f64>())
        };
        let draft = Self::draft_from_draws(draws);
        debug!(
            "Mock evaluation for '{}': {} ({:.2})",
            input.assignment_title, draft.classification, draft.confidence
        );
        Ok(draft)
    }

    async fn regenerate_feedback(&self, _input: &EvaluationInput<'_>) -> Result<String> {
        Ok(REGENERATED_FEEDBACK.to_string())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::Classification;

    fn input() -> EvaluationInput<'static> {
        EvaluationInput {
            content: "An essay about distributed systems and consensus.",
            assignment_title: "Essay 1",
            rubric: None,
        }
    }

    #[test]
    fn test_draft_from_draws() {
        let draft = MockEvaluator::draft_from_draws([0.2, 0.1, 0.0, 0.0, 0.3, 0.6, 0.99]);
        assert_eq!(draft.classification, Classification::Ai);
        assert!((draft.confidence - 0.7).abs() < f64::EPSILON);
        assert_eq!(draft.scores.as_array(), [1, 2, 3, 4]);
        assert_eq!(draft.ai_feedback, PLACEHOLDER_FEEDBACK);
    }

    #[tokio::test]
    async fn test_random_drafts_stay_in_range() {
        let evaluator = MockEvaluator::new();
        for _ in 0..200 {
            let draft = evaluator.evaluate(&input()).await.unwrap();
            assert!(draft.scores.is_valid());
            assert!((0.7..1.0).contains(&draft.confidence));
        }
    }

    #[tokio::test]
    async fn test_classification_distribution() {
        let evaluator = MockEvaluator::new();
        let runs = 20_000;
        let (mut human, mut hybrid, mut ai) = (0, 0, 0);
        for _ in 0..runs {
            match evaluator.evaluate(&input()).await.unwrap().classification {
                Classification::Human => human += 1,
                Classification::Hybrid => hybrid += 1,
                Classification::Ai => ai += 1,
            }
        }
        let share = |n: i32| n as f64 / runs as f64;
        assert!((share(human) - 0.40).abs() < 0.03, "human = {}", share(human));
        assert!((share(hybrid) - 0.42).abs() < 0.03, "hybrid = {}", share(hybrid));
        assert!((share(ai) - 0.18).abs() < 0.03, "ai = {}", share(ai));
    }

    #[tokio::test]
    async fn test_regenerated_feedback_differs() {
        let evaluator = MockEvaluator::new();
        let feedback = evaluator.regenerate_feedback(&input()).await.unwrap();
        assert_ne!(feedback, PLACEHOLDER_FEEDBACK);
        assert_eq!(evaluator.name(), "mock");
    }
}
