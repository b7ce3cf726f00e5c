use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 写作来源分类
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/evaluation.ts")]
pub enum Classification {
    Human,
    #[serde(rename = "AI")]
    Ai,
    Hybrid,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Human => write!(f, "Human"),
            Classification::Ai => write!(f, "AI"),
            Classification::Hybrid => write!(f, "Hybrid"),
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Human" => Ok(Classification::Human),
            "AI" => Ok(Classification::Ai),
            "Hybrid" => Ok(Classification::Hybrid),
            _ => Err(format!("Invalid classification: {s}")),
        }
    }
}

/// 评分等级，对应 1..=4 分
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/evaluation.ts")]
pub enum ScoreLevel {
    Bad,
    Average,
    Good,
    Excellent,
}

impl ScoreLevel {
    pub const MIN_SCORE: i32 = 1;
    pub const MAX_SCORE: i32 = 4;

    pub fn from_score(score: i32) -> Option<Self> {
        match score {
            1 => Some(ScoreLevel::Bad),
            2 => Some(ScoreLevel::Average),
            3 => Some(ScoreLevel::Good),
            4 => Some(ScoreLevel::Excellent),
            _ => None,
        }
    }
}

/// 四个评分维度的得分
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/evaluation.ts")]
pub struct RubricScores {
    pub conceptual: i32,
    pub application: i32,
    pub evaluation: i32,
    pub writing: i32,
}

impl RubricScores {
    pub fn as_array(&self) -> [i32; 4] {
        [self.conceptual, self.application, self.evaluation, self.writing]
    }

    pub fn is_valid(&self) -> bool {
        self.as_array()
            .iter()
            .all(|s| (ScoreLevel::MIN_SCORE..=ScoreLevel::MAX_SCORE).contains(s))
    }

    pub fn levels(&self) -> RubricLevels {
        // 超出范围的历史数据按最近的等级显示
        let level = |s: i32| {
            ScoreLevel::from_score(s.clamp(ScoreLevel::MIN_SCORE, ScoreLevel::MAX_SCORE))
                .unwrap_or(ScoreLevel::Bad)
        };
        RubricLevels {
            conceptual: level(self.conceptual),
            application: level(self.application),
            evaluation: level(self.evaluation),
            writing: level(self.writing),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/evaluation.ts")]
pub struct RubricLevels {
    pub conceptual: ScoreLevel,
    pub application: ScoreLevel,
    pub evaluation: ScoreLevel,
    pub writing: ScoreLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub submission_id: i64,
    pub classification: Classification,
    // 置信度，范围 [0.7, 1.0)
    pub confidence: f64,
    pub scores: RubricScores,
    pub levels: RubricLevels,
    pub ai_feedback: String,
    pub teacher_notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 评估器产出、尚未入库的评估结果
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationDraft {
    pub classification: Classification,
    pub confidence: f64,
    pub scores: RubricScores,
    pub ai_feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_wire_names() {
        assert_eq!(serde_json::to_string(&Classification::Ai).unwrap(), "\"AI\"");
        assert_eq!("Hybrid".parse::<Classification>(), Ok(Classification::Hybrid));
        assert_eq!(Classification::Human.to_string(), "Human");
        assert!("ai".parse::<Classification>().is_err());
    }

    #[test]
    fn test_score_levels() {
        assert_eq!(ScoreLevel::from_score(1), Some(ScoreLevel::Bad));
        assert_eq!(ScoreLevel::from_score(4), Some(ScoreLevel::Excellent));
        assert_eq!(ScoreLevel::from_score(0), None);
        assert_eq!(ScoreLevel::from_score(5), None);

        let scores = RubricScores {
            conceptual: 1,
            application: 2,
            evaluation: 3,
            writing: 4,
        };
        assert!(scores.is_valid());
        let levels = scores.levels();
        assert_eq!(levels.conceptual, ScoreLevel::Bad);
        assert_eq!(levels.application, ScoreLevel::Average);
        assert_eq!(levels.evaluation, ScoreLevel::Good);
        assert_eq!(levels.writing, ScoreLevel::Excellent);

        let invalid = RubricScores { writing: 5, ..scores };
        assert!(!invalid.is_valid());
        assert_eq!(invalid.levels().writing, ScoreLevel::Excellent);
    }
}
