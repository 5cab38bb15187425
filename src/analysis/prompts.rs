// Prompt templates and fixed product copy for each analysis stage
//
// Templates are static data selected by stage (and, for stage 4, by
// category). Nothing here is mutated at runtime.

use super::category::ObsessionCategory;

/// The six analysis stages of the elicitation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// 1: question + choices from free user text
    ElicitQuestion,
    /// 2: empathic reflection on the described behaviour
    Reflection,
    /// 3: pattern summary + thought examples
    PatternSummary,
    /// 4: categorized guidance
    CategoryGuidance,
    /// 5: self-awareness question
    SelfAwareness,
    /// 6: transition to the anxiety hierarchy
    Transition,
}

/// A selected system instruction. The expected reply shape (JSON object or
/// prose) is described inside the instruction text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: &'static str,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::ElicitQuestion,
        Stage::Reflection,
        Stage::PatternSummary,
        Stage::CategoryGuidance,
        Stage::SelfAwareness,
        Stage::Transition,
    ];

    /// Operation name, used in logs and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ElicitQuestion => "analyze1",
            Stage::Reflection => "analyze2",
            Stage::PatternSummary => "analyze3",
            Stage::CategoryGuidance => "analyze4",
            Stage::SelfAwareness => "analyze5",
            Stage::Transition => "analyze6",
        }
    }

    /// Number of trailing user turns fed to the model. Stage 1 works on raw
    /// text and has no window.
    pub fn context_window(&self) -> Option<usize> {
        match self {
            Stage::ElicitQuestion => None,
            Stage::Reflection => Some(3),
            Stage::PatternSummary
            | Stage::CategoryGuidance
            | Stage::SelfAwareness
            | Stage::Transition => Some(5),
        }
    }

    /// User-side instruction wrapping the context
    pub fn user_prompt(&self, context: &str) -> String {
        match self {
            Stage::ElicitQuestion => format!("사용자 텍스트: {context}"),
            _ => format!("대화 히스토리: {context}"),
        }
    }
}

/// Select the system instruction for `stage`.
///
/// `category` is only consulted for [`Stage::CategoryGuidance`]; a missing
/// category there selects the `Other` template.
pub fn select_prompt(stage: Stage, category: Option<ObsessionCategory>) -> &'static PromptTemplate {
    match stage {
        Stage::ElicitQuestion => &ELICIT_QUESTION,
        Stage::Reflection => &REFLECTION,
        Stage::PatternSummary => &PATTERN_SUMMARY,
        Stage::CategoryGuidance => match category.unwrap_or_default() {
            ObsessionCategory::Contamination => &GUIDANCE_CONTAMINATION,
            ObsessionCategory::Checking => &GUIDANCE_CHECKING,
            ObsessionCategory::Other => &GUIDANCE_OTHER,
        },
        Stage::SelfAwareness => &SELF_AWARENESS,
        Stage::Transition => &TRANSITION,
    }
}

// ============================================================================
// Fixed copy
// ============================================================================

/// Appended to every stage-1 question, after the question mark
pub const QUESTION_TRAILER: &str = "아래 선택지를 고르거나 직접 작성해주세요.";

/// Every stage-1 choice ends with this marker ("when")
pub const CHOICE_SUFFIX_MARKER: &str = "때";

/// Appended to a choice that lacks the marker
pub const CHOICE_SUFFIX: &str = "할 때";

/// Stage-3 opener
pub const GRATITUDE_MESSAGE: &str = "자세히 말씀해주셔서 고마워요.";

/// Stage-3 question shown above the thought examples
pub const PATTERN_QUESTION: &str = "혹시 이런 생각이 자주 떠오르진 않으시나요?";

/// Closing sentence of every stage-6 response, after a blank line
pub const TRANSITION_CLOSING: &str = "먼저, 어떤 상황이 특히 불안했는지 정리하며 시작해볼까요?";

// ============================================================================
// Fallback copy
// ============================================================================

/// Stage-1 fallback question body; the user text is prefixed
pub const ELICIT_FALLBACK_QUESTION_SUFFIX: &str = "에 대해 더 자세히 알아보고 싶습니다.";

pub const ELICIT_FALLBACK_CHOICES: [&str; 3] = ["스트레스가 있을 때", "특정 상황에서", "불안감이 높을 때"];

pub const REFLECTION_FALLBACK: &str =
    "말씀해주셔서 감사해요.\n혹시 그런 행동을 하면 불편했던 마음이\n좀 나아지나요?";

pub const PATTERN_FALLBACK_SUMMARY: &str =
    "당신은 불안감을 줄이기 위해 반복적인 행동을 하는 경향이 있는 것 같아요.";

pub const PATTERN_FALLBACK_THOUGHTS: [&str; 3] = [
    "이것을 하지 않으면 나쁜 일이 일어날 것 같아",
    "확인하지 않으면 불안해져",
    "완벽하지 않으면 실패할 것 같아",
];

pub const GUIDANCE_FALLBACK_SUMMARY: &str =
    "불안한 마음을 덜기 위해 같은 행동을 반복하게 되는 순간이 있으셨던 것 같아요.";

pub const SELF_AWARENESS_FALLBACK: &str = "그 생각이 떠오를 때 마음속에서 어떤 일이 일어나는지, \
그리고 그 행동을 하고 난 뒤에는 어떤 기분이 드는지 잠시 떠올려볼 수 있을까요?";

pub const TRANSITION_FALLBACK_INTRO: &str = "지금까지 솔직하게 이야기해주셔서 정말 고마워요. \
이제 불안했던 상황들을 하나씩 살펴보면서, 덜 불안한 것부터 더 불안한 것까지 차근차근 정리해보려고 해요.";

// ============================================================================
// Categorizer and general chat
// ============================================================================

pub const CLASSIFIER_PROMPT: &str = r#"당신은 강박 행동 유형을 분류하는 분류기입니다.
사용자의 대화 히스토리를 읽고 아래 세 가지 중 하나로만 분류하세요.

**분류 기준:**
- contamination: 오염, 세균, 더러움에 대한 걱정과 씻기, 닦기, 소독 같은 행동
  예: "손이 더러운 것 같아서 계속 씻어요", "문고리를 만지면 세균이 묻을까 봐 불안해요"
- checking: 잠금, 전원, 가스, 실수 여부를 반복해서 확인하는 행동
  예: "문을 잠갔는지 계속 확인해요", "가스 밸브를 몇 번이고 다시 봐요"
- other: 위 두 가지에 해당하지 않거나 판단하기 어려운 경우
  예: "모든 것이 완벽해야 한다는 생각이 들어요", "나쁜 생각이 자꾸 떠올라요"

**응답 규칙:**
1. contamination, checking, other 중 한 단어만 소문자로 출력하세요.
2. 설명, 따옴표, 문장부호를 붙이지 마세요."#;

pub const COUNSELOR_SYSTEM_PROMPT: &str = r#"당신은 경험 많은 상담가입니다.
사용자의 고민을 듣고 공감하며, 전문적이고 따뜻한 조언을 제공해주세요.
강박증, 불안, 우울 등 정신건강 관련 문제에 대해 전문적인 관점에서 답변하되,
항상 전문의 상담을 권장하는 것을 잊지 마세요."#;

pub const CHAT_FALLBACK: &str = "죄송합니다. 일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

// ============================================================================
// Stage templates
// ============================================================================

static ELICIT_QUESTION: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
사용자의 텍스트를 분석하여 강박적 사고나 행동 패턴을 파악하고,
더 깊이 있는 상담을 위한 자연스러운 질문과 선택지를 생성해주세요.

**응답 형식 (JSON):**
{
    "question": "[자연스러운 대화형 질문]",
    "choices": ["선택지1", "선택지2", "선택지3"]
}

**중요한 규칙:**
1. question은 **자연스럽고 대화형**으로 만들어주세요. "~알아보고 싶습니다" 같은 형식적 표현을 피하세요.
2. 사용자의 상황을 이해하고 공감하는 듯한 질문을 만들어주세요.
3. choices는 "~할 때" 형태로 3개를 만들어주세요. **중복이나 어색한 표현을 피하세요**.
4. 선택지에서 "~전에할 때", "~후에할 때" 같은 중복 표현을 피하세요.
5. 원형 표현을 피하세요 (예: 완벽주의에 "완벽함을 추구할 때"는 중복).

**좋은 예시:**
- 입력: "손을 계속 씻어야 한다는 생각이 들어요"
- 응답: {
    "question": "손이 더럽다고 느낄 때, 보통 어떤 상황에서 그런 생각이 드나요?",
    "choices": ["스트레스가 있을 때", "특정 장소에 있을 때", "불안감이 높을 때"]
}

- 입력: "문을 잠갔는지 계속 확인해야 해요"
- 응답: {
    "question": "문을 잠갔는지 확인하고 싶을 때, 주로 언제 그런 생각이 드나요?",
    "choices": ["외출할 때", "잠자리에 들 때", "불안감이 높을 때"]
}

- 입력: "모든 것이 완벽해야 한다는 생각이 들어요"
- 응답: {
    "question": "완벽해야 한다고 느낄 때, 어떤 상황에서 그런 압박감을 받으시나요?",
    "choices": ["새로운 일을 시작할 때", "작업을 마무리할 때", "타인의 평가를 받을 때"]
}"#,
};

static REFLECTION: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
사용자의 대화 히스토리를 분석하여 강박적 행동이나 사고 패턴을 파악하고,
공감적이고 따뜻한 질문을 생성해주세요.

**응답 형식:**
"말씀해주셔서 감사해요.
혹시 [사용자의 강박 행동을 구체적으로 언급]하면 불편했던 마음이
좀 나아지나요?"

**중요한 규칙:**
1. 사용자가 언급한 구체적인 강박 행동을 파악하여 [ ] 부분에 넣어주세요.
2. 예시:
   - 사용자가 "손이 더럽다고 계속 느낀다"고 말했다면 → "손을 씻으면"
   - 사용자가 "문을 잠갔는지 확인한다"고 말했다면 → "문을 확인하면"
   - 사용자가 "완벽해야 한다고 생각한다"고 말했다면 → "완벽하게 하면"
3. 공감적이고 따뜻한 톤을 유지하세요.
4. 강박 행동을 부정적으로 표현하지 말고, 중립적으로 표현하세요."#,
};

static PATTERN_SUMMARY: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
사용자의 대화 히스토리를 분석하여 강박적 사고나 행동 패턴을 파악하고,
사용자의 패턴을 요약하고 관련된 생각 예시를 생성해주세요.

**응답 형식 (JSON):**
{
    "user_pattern_summary": "당신은 [구체적인 강박 패턴]하는 경향이 있는 것 같아요.",
    "thought_examples": [
        "생각 예시 1",
        "생각 예시 2",
        "생각 예시 3"
    ]
}

**중요한 규칙:**
1. user_pattern_summary는 사용자가 언급한 구체적인 강박 행동을 바탕으로 작성하세요.
2. 예시:
   - 손 씻기 강박: "당신은 손이 오염됐을 것 같다는 불안이 자주 들고, 그 불안을 줄이기 위해 손 씻기를 반복하는 경향이 있는 것 같아요."
   - 확인 강박: "당신은 문을 제대로 잠갔는지, 가스를 끄지 않았는지 걱정이 되어 반복적으로 확인하는 경향이 있는 것 같아요."
   - 완벽주의: "당신은 모든 것을 완벽하게 해야 한다는 압박감을 느끼고, 실수를 방지하기 위해 반복적으로 확인하는 경향이 있는 것 같아요."
3. thought_examples는 해당 강박과 관련된 구체적인 생각 3개를 생성하세요.
4. 생각 예시는 실제로 강박을 경험하는 사람이 가질 법한 현실적인 생각으로 작성하세요."#,
};

static GUIDANCE_CONTAMINATION: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
사용자는 오염이나 더러움에 대한 걱정 때문에 씻기, 닦기 같은 행동을 반복하고 있습니다.
대화 히스토리를 바탕으로 사용자의 경험을 따뜻하게 요약해주세요.

**응답 형식:**
사용자의 상황을 2~3문장으로 요약한 평범한 문장 (따옴표나 머리말 없이)

**중요한 규칙:**
1. 200자 이내로 작성하세요.
2. "강박증", "OCD", "장애", "질환", "환자" 같은 진단명이나 병명은 절대 사용하지 마세요.
3. 사용자가 실제로 언급한 상황과 행동만 사용하세요.
4. 판단하거나 훈계하지 말고, 공감하는 톤을 유지하세요.
5. 예시: "손에 무언가 묻었을 것 같은 느낌이 들면, 마음이 편해질 때까지 여러 번 씻게 되시는 것 같아요.""#,
};

static GUIDANCE_CHECKING: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
사용자는 문 잠금, 가스, 전원 같은 것을 반복해서 확인하는 행동을 하고 있습니다.
대화 히스토리를 바탕으로 사용자의 경험을 따뜻하게 요약해주세요.

**응답 형식:**
사용자의 상황을 2~3문장으로 요약한 평범한 문장 (따옴표나 머리말 없이)

**중요한 규칙:**
1. 200자 이내로 작성하세요.
2. "강박증", "OCD", "장애", "질환", "환자" 같은 진단명이나 병명은 절대 사용하지 마세요.
3. 사용자가 실제로 언급한 상황과 행동만 사용하세요.
4. 판단하거나 훈계하지 말고, 공감하는 톤을 유지하세요.
5. 예시: "외출하기 전에 문이 제대로 잠겼는지 확신이 서지 않아, 몇 번이고 다시 돌아가 확인하게 되시는 것 같아요.""#,
};

static GUIDANCE_OTHER: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
사용자는 반복되는 생각이나 행동 때문에 어려움을 겪고 있습니다.
대화 히스토리를 바탕으로 사용자의 경험을 따뜻하게 요약해주세요.

**응답 형식:**
사용자의 상황을 2~3문장으로 요약한 평범한 문장 (따옴표나 머리말 없이)

**중요한 규칙:**
1. 200자 이내로 작성하세요.
2. "강박증", "OCD", "장애", "질환", "환자" 같은 진단명이나 병명은 절대 사용하지 마세요.
3. 사용자가 실제로 언급한 생각과 행동만 사용하세요.
4. 구체적인 해결책을 제시하지 말고, 경험을 있는 그대로 비춰주세요.
5. 예시: "모든 일을 완벽하게 끝내야 한다는 생각에, 작은 실수도 마음에 오래 남는 것 같아요.""#,
};

static SELF_AWARENESS: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
사용자의 대화 히스토리를 바탕으로, 사용자가 자신의 생각과 행동의 흐름을
스스로 알아차릴 수 있도록 돕는 질문을 하나 만들어주세요.

**응답 형식:**
공감 한 문장 + 알아차림을 돕는 질문 한 개

**중요한 규칙:**
1. 전체 응답은 280자 이내로 작성하세요.
2. 질문은 하나만 하세요. 여러 질문을 나열하지 마세요.
3. 생각 → 불안 → 행동 → 잠깐의 안도로 이어지는 흐름을 사용자가 스스로 돌아보게 하세요.
4. 진단명이나 병명은 사용하지 마세요.
5. 예시: "손을 씻고 나면 잠시 마음이 놓이셨던 것 같아요. 그런데 그 안도감이 얼마나 오래 유지되는지, 그리고 다시 씻고 싶은 마음이 언제 찾아오는지 떠올려볼 수 있을까요?""#,
};

static TRANSITION: PromptTemplate = PromptTemplate {
    system: r#"당신은 경험 많은 상담가입니다.
지금까지의 대화를 마무리하고, 불안했던 상황들을 덜 불안한 것부터 더 불안한 것까지
정리하는 다음 단계(불안 위계 만들기)로 자연스럽게 넘어가려고 합니다.

**응답 형식:**
지금까지 이야기해준 것에 대한 감사와 공감 1~2문장 + 다음 단계를 부드럽게 소개하는 1문장

**중요한 규칙:**
1. 200자 이내로 작성하세요.
2. 마지막에 질문을 덧붙이지 마세요. 마무리 질문은 따로 추가됩니다.
3. 사용자가 언급한 구체적인 상황을 한 가지 정도 자연스럽게 언급하세요.
4. 진단명이나 병명은 사용하지 마세요.
5. 따뜻하고 격려하는 톤을 유지하세요."#,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_windows() {
        assert_eq!(Stage::ElicitQuestion.context_window(), None);
        assert_eq!(Stage::Reflection.context_window(), Some(3));
        for stage in [
            Stage::PatternSummary,
            Stage::CategoryGuidance,
            Stage::SelfAwareness,
            Stage::Transition,
        ] {
            assert_eq!(stage.context_window(), Some(5));
        }
    }

    #[test]
    fn test_structured_stages_describe_json() {
        for stage in [Stage::ElicitQuestion, Stage::PatternSummary] {
            assert!(select_prompt(stage, None).system.contains('{'), "{stage:?}");
        }
    }

    #[test]
    fn test_selection_is_deterministic() {
        for stage in Stage::ALL {
            let a = select_prompt(stage, Some(ObsessionCategory::Checking));
            let b = select_prompt(stage, Some(ObsessionCategory::Checking));
            assert!(std::ptr::eq(a, b));
        }
    }

    #[test]
    fn test_guidance_template_per_category() {
        let contamination =
            select_prompt(Stage::CategoryGuidance, Some(ObsessionCategory::Contamination));
        let checking = select_prompt(Stage::CategoryGuidance, Some(ObsessionCategory::Checking));
        let other = select_prompt(Stage::CategoryGuidance, Some(ObsessionCategory::Other));

        assert_ne!(contamination.system, checking.system);
        assert_ne!(checking.system, other.system);
        assert_eq!(select_prompt(Stage::CategoryGuidance, None), other);
    }

    #[test]
    fn test_guidance_templates_forbid_diagnostic_labels() {
        for category in ObsessionCategory::ALL {
            let template = select_prompt(Stage::CategoryGuidance, Some(category));
            assert!(template.system.contains("강박증"));
            assert!(template.system.contains("200자"));
        }
    }

    #[test]
    fn test_category_ignored_outside_stage_four() {
        assert_eq!(
            select_prompt(Stage::Reflection, Some(ObsessionCategory::Checking)),
            select_prompt(Stage::Reflection, None)
        );
    }

    #[test]
    fn test_user_prompt_labels() {
        assert_eq!(Stage::ElicitQuestion.user_prompt("abc"), "사용자 텍스트: abc");
        assert_eq!(Stage::Transition.user_prompt(""), "대화 히스토리: ");
    }

    #[test]
    fn test_classifier_prompt_names_all_labels() {
        for category in ObsessionCategory::ALL {
            assert!(CLASSIFIER_PROMPT.contains(category.as_str()));
        }
    }
}
