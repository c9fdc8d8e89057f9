//! Conversation grading by the judge model.
//!
//! The judge receives the full transcript plus the original problem and
//! expected solution, and must answer with a fenced `json` block holding
//! exactly four fields. Anything else is a grading failure.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::JudgeError;
use crate::model::{ConversationTurn, Problem, Scenario, Verdict};
use crate::traits::CompletionModel;

/// Grades finished tutoring conversations.
pub struct ConversationJudge {
    model: Arc<dyn CompletionModel>,
}

/// The judge's raw JSON answer. Missing booleans count as failures and a
/// missing rationale as empty.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    #[serde(default)]
    logic_correct: bool,
    #[serde(default)]
    corrected_when_wrong: bool,
    #[serde(default)]
    solution_matches: bool,
    #[serde(default)]
    evaluation_details: String,
}

impl ConversationJudge {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Grade a conversation for logic correctness, error correction, and
    /// solution accuracy.
    pub async fn evaluate(
        &self,
        transcript: &[ConversationTurn],
        problem: &Problem,
        scenario: Scenario,
    ) -> Result<Verdict, JudgeError> {
        let conversation_text = transcript
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = grading_prompt(problem, scenario, &conversation_text);
        let response = self
            .model
            .complete(&prompt)
            .await
            .map_err(JudgeError::Model)?;

        let block = extract_json_block(&response).ok_or(JudgeError::MissingJsonBlock)?;
        let raw: RawVerdict = serde_json::from_str(&block)?;

        Ok(Verdict {
            logic_correct: raw.logic_correct,
            corrected_when_wrong: raw.corrected_when_wrong,
            solution_matches: raw.solution_matches,
            details: raw.evaluation_details,
        })
    }
}

fn grading_prompt(problem: &Problem, scenario: Scenario, conversation_text: &str) -> String {
    format!(
        "Evaluate this math tutoring conversation between a tutor agent and a {student}.\n\
         \n\
         ORIGINAL PROBLEM: {question}\n\
         EXPECTED SOLUTION: {solution}\n\
         SCENARIO: {scenario}\n\
         \n\
         CONVERSATION:\n\
         {conversation_text}\n\
         \n\
         CRITICAL: Use STRICT TRUE/FALSE evaluation. FALSE means ANY mistake was made by the \
         agent.\n\
         \n\
         Evaluate these criteria with ZERO TOLERANCE for errors:\n\
         \n\
         1. LOGIC_CORRECT:\n\
         - TRUE only if ALL mathematical reasoning is completely correct\n\
         - FALSE if there are ANY logical errors, computational mistakes, or incorrect steps\n\
         \n\
         2. CORRECTED_WHEN_WRONG:\n\
         - TRUE only if the tutor identified and corrected ALL student errors\n\
         - FALSE if any student error was missed, incorrectly identified, or poorly corrected\n\
         - TRUE by default if student made no errors in perfect student scenario\n\
         \n\
         3. SOLUTION_MATCHES:\n\
         - TRUE only if the final answer matches the expected solution OR mathematically \
         equivalent (e.g. fraction vs. decimal)\n\
         - FALSE if the answer is wrong\n\
         \n\
         Respond in this exact JSON format:\n\
         ```json\n\
         {{\n\
             \"logic_correct\": true/false,\n\
             \"corrected_when_wrong\": true/false,\n\
             \"solution_matches\": true/false,\n\
             \"evaluation_details\": \"Detailed explanation of what went wrong (if anything)\"\n\
         }}\n\
         ```",
        student = scenario.human(),
        question = problem.question,
        solution = problem.expected_solution,
    )
}

/// Extract the body of the first fenced code block labeled `json`.
///
/// Returns `None` when no such block exists or the block is never closed.
pub fn extract_json_block(response: &str) -> Option<String> {
    let mut in_block = false;
    let mut is_json = false;
    let mut current = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            let lang = trimmed.trim_start_matches('`').trim().to_lowercase();
            is_json = lang == "json";
            current.clear();
            continue;
        }

        if in_block && trimmed == "```" {
            if is_json {
                return Some(current);
            }
            in_block = false;
            current.clear();
            continue;
        }

        if in_block && is_json {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedModel {
        response: String,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedModel {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    fn problem() -> Problem {
        Problem {
            question: "2+3".into(),
            expected_solution: "5".into(),
        }
    }

    fn transcript() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::student("Help me solve this problem: 2+3"),
            ConversationTurn::tutor("What do you get when you add 2 and 3?"),
            ConversationTurn::student("I get 5. Thank you!"),
        ]
    }

    const GOOD_RESPONSE: &str = r#"Here is my evaluation:

```json
{
    "logic_correct": true,
    "corrected_when_wrong": true,
    "solution_matches": true,
    "evaluation_details": "Flawless."
}
```
"#;

    #[tokio::test]
    async fn parses_well_formed_verdict() {
        let model = ScriptedModel::new(GOOD_RESPONSE);
        let judge = ConversationJudge::new(model.clone());

        let verdict = judge
            .evaluate(&transcript(), &problem(), Scenario::PerfectStudent)
            .await
            .unwrap();

        assert!(verdict.is_perfect());
        assert_eq!(verdict.details, "Flawless.");
    }

    #[tokio::test]
    async fn prompt_embeds_transcript_and_scenario() {
        let model = ScriptedModel::new(GOOD_RESPONSE);
        let judge = ConversationJudge::new(model.clone());

        judge
            .evaluate(&transcript(), &problem(), Scenario::ImperfectStudent)
            .await
            .unwrap();

        let prompt = model.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("tutor: What do you get when you add 2 and 3?"));
        assert!(prompt.contains("student: I get 5. Thank you!"));
        assert!(prompt.contains("ORIGINAL PROBLEM: 2+3"));
        assert!(prompt.contains("EXPECTED SOLUTION: 5"));
        assert!(prompt.contains("imperfect student"));
        assert!(prompt.contains("SCENARIO: imperfect_student"));
    }

    #[tokio::test]
    async fn missing_json_block_is_an_error() {
        let model = ScriptedModel::new("The tutor did well. logic_correct: true");
        let judge = ConversationJudge::new(model);

        let err = judge
            .evaluate(&transcript(), &problem(), Scenario::PerfectStudent)
            .await
            .unwrap_err();
        assert!(matches!(err, JudgeError::MissingJsonBlock));
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let model = ScriptedModel::new("```json\n{not json}\n```");
        let judge = ConversationJudge::new(model);

        let err = judge
            .evaluate(&transcript(), &problem(), Scenario::PerfectStudent)
            .await
            .unwrap_err();
        assert!(matches!(err, JudgeError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn missing_fields_default_to_false_and_empty() {
        let model = ScriptedModel::new("```json\n{\"logic_correct\": true}\n```");
        let judge = ConversationJudge::new(model);

        let verdict = judge
            .evaluate(&transcript(), &problem(), Scenario::PerfectStudent)
            .await
            .unwrap();
        assert!(verdict.logic_correct);
        assert!(!verdict.corrected_when_wrong);
        assert!(!verdict.solution_matches);
        assert_eq!(verdict.details, "");
    }

    #[test]
    fn extract_takes_first_json_block() {
        let input = "```json\n{\"a\": 1}\n```\n\n```json\n{\"b\": 2}\n```";
        assert_eq!(extract_json_block(input).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn extract_ignores_other_languages() {
        let input = "```python\nprint(1)\n```\n\n```json\n{\"ok\": true}\n```";
        assert_eq!(extract_json_block(input).unwrap(), "{\"ok\": true}");
    }

    #[test]
    fn extract_requires_json_label() {
        let input = "```\n{\"ok\": true}\n```";
        assert!(extract_json_block(input).is_none());
    }

    #[test]
    fn extract_unclosed_block_returns_none() {
        let input = "```json\n{\"ok\": true}";
        assert!(extract_json_block(input).is_none());
    }

    #[test]
    fn extract_preserves_multiline_body() {
        let input = "```json\n{\n  \"a\": 1\n}\n```";
        assert_eq!(extract_json_block(input).unwrap(), "{\n  \"a\": 1\n}");
    }
}
