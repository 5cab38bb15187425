// Obsession category and the fixed copy attached to each category

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of the behaviour pattern the user describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObsessionCategory {
    Contamination,
    Checking,
    Other,
}

const CONTAMINATION_MESSAGE: &str = "오염에 대한 걱정이 들 때 바로 씻기보다는, 그 불안을 잠시 지켜보며 \
스스로 가라앉는 것을 경험해보는 연습이 도움이 될 수 있어요. 많은 분들이 이런 연습을 통해 \
조금씩 편안해지고 있어요.";

const CHECKING_MESSAGE: &str = "확인하고 싶은 마음이 들 때 바로 확인하기보다는, 확인 횟수를 \
조금씩 줄여보며 불안이 스스로 가라앉는 것을 경험해보는 연습이 도움이 될 수 있어요. 많은 분들이 \
이런 연습을 통해 조금씩 편안해지고 있어요.";

const OTHER_MESSAGE: &str = "말씀해주신 어려움은 혼자 감당하기 쉽지 않은 부분이에요. 지금 겪고 \
계신 패턴을 전문가와 함께 살펴보면 나에게 맞는 방법을 더 잘 찾을 수 있어요.";

const PRACTICE_ENCOURAGEMENT: &str = "작은 연습부터 하나씩 함께 시작해봐요. 당신은 충분히 해낼 수 있어요.";

const REFERRAL_ENCOURAGEMENT: &str = "전문가와 이야기해보는 것도 큰 용기예요. 언제든 도움을 요청해도 괜찮아요.";

impl ObsessionCategory {
    pub const ALL: [ObsessionCategory; 3] = [
        ObsessionCategory::Contamination,
        ObsessionCategory::Checking,
        ObsessionCategory::Other,
    ];

    /// Strict label parse: the whole (trimmed, lowercased) text must be one
    /// of the three literals. Anything else, including a sentence that merely
    /// contains a label, is `None`.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "contamination" => Some(ObsessionCategory::Contamination),
            "checking" => Some(ObsessionCategory::Checking),
            "other" => Some(ObsessionCategory::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObsessionCategory::Contamination => "contamination",
            ObsessionCategory::Checking => "checking",
            ObsessionCategory::Other => "other",
        }
    }

    /// Fixed guidance shown under the summary. Never model-generated.
    pub fn category_message(&self) -> &'static str {
        match self {
            ObsessionCategory::Contamination => CONTAMINATION_MESSAGE,
            ObsessionCategory::Checking => CHECKING_MESSAGE,
            ObsessionCategory::Other => OTHER_MESSAGE,
        }
    }

    /// Fixed closing encouragement: practice-oriented for the two concrete
    /// categories, referral-oriented for `Other`.
    pub fn encouragement(&self) -> &'static str {
        match self {
            ObsessionCategory::Contamination | ObsessionCategory::Checking => {
                PRACTICE_ENCOURAGEMENT
            }
            ObsessionCategory::Other => REFERRAL_ENCOURAGEMENT,
        }
    }
}

impl Default for ObsessionCategory {
    fn default() -> Self {
        ObsessionCategory::Other
    }
}

impl fmt::Display for ObsessionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_labels() {
        assert_eq!(
            ObsessionCategory::parse_label("contamination"),
            Some(ObsessionCategory::Contamination)
        );
        assert_eq!(
            ObsessionCategory::parse_label("  Checking\n"),
            Some(ObsessionCategory::Checking)
        );
        assert_eq!(
            ObsessionCategory::parse_label("OTHER"),
            Some(ObsessionCategory::Other)
        );
    }

    #[test]
    fn test_parse_rejects_anything_else() {
        for raw in [
            "",
            "checking.",
            "\"checking\"",
            "I think this is checking",
            "the answer is other",
            "확인",
            "contamination checking",
        ] {
            assert_eq!(ObsessionCategory::parse_label(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn test_messages_are_distinct_per_category() {
        let messages: std::collections::HashSet<_> = ObsessionCategory::ALL
            .iter()
            .map(|c| c.category_message())
            .collect();
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_two_encouragements() {
        assert_eq!(
            ObsessionCategory::Contamination.encouragement(),
            ObsessionCategory::Checking.encouragement()
        );
        assert_ne!(
            ObsessionCategory::Checking.encouragement(),
            ObsessionCategory::Other.encouragement()
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for category in ObsessionCategory::ALL {
            assert_eq!(
                ObsessionCategory::parse_label(&category.to_string()),
                Some(category)
            );
        }
    }
}
