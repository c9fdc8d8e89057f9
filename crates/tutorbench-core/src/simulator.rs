//! Simulated student turns, role-played by the judge model.
//!
//! The two modes use separate prompts; the imperfect mode's
//! failure-injection instructions never appear in the perfect prompt.

use std::sync::Arc;

use crate::model::{ConversationTurn, Problem};
use crate::traits::CompletionModel;

/// How many trailing turns the imperfect student sees for continuity.
const HISTORY_WINDOW: usize = 3;

/// Generates the next student utterance for a scenario run.
pub struct StudentSimulator {
    model: Arc<dyn CompletionModel>,
}

impl StudentSimulator {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Respond as a consistently correct, cooperative student.
    pub async fn perfect_turn(
        &self,
        tutor_response: &str,
        problem: &Problem,
    ) -> anyhow::Result<String> {
        let prompt = format!(
            "You are a perfect 7th/8th grade student who always understands math concepts \
             correctly and follows instructions well.\n\
             \n\
             Math Problem: {question}\n\
             Expected Solution: {solution}\n\
             Tutor's Response: {tutor_response}\n\
             \n\
             Respond as a student would - ask clarifying questions if needed, show your work \
             when solving, and demonstrate understanding. Be engaged and cooperative. Keep \
             responses concise but show your thinking.\n\
             \n\
             Student response:",
            question = problem.question,
            solution = problem.expected_solution,
        );
        self.model.complete(&prompt).await
    }

    /// Respond as a student who makes realistic mistakes, conditioned on the
    /// last few turns of the conversation for continuity.
    pub async fn imperfect_turn(
        &self,
        tutor_response: &str,
        problem: &Problem,
        transcript: &[ConversationTurn],
    ) -> anyhow::Result<String> {
        let recent = &transcript[transcript.len().saturating_sub(HISTORY_WINDOW)..];
        let history = serde_json::to_string_pretty(recent)?;

        let prompt = format!(
            "You are a 7th/8th grade student who sometimes makes mistakes, gets confused, or \
             misunderstands concepts. Make realistic errors that students at this level \
             commonly make.\n\
             \n\
             Math Problem: {question}\n\
             Expected Solution: {solution}\n\
             Tutor's Response: {tutor_response}\n\
             \n\
             Previous conversation: {history}\n\
             \n\
             Respond as a student would, but include some realistic mistakes or confusion:\n\
             - Computational errors\n\
             - Conceptual misunderstandings\n\
             - Forgetting steps\n\
             - Misreading the problem\n\
             - Confusion about terminology\n\
             \n\
             Keep responses natural and concise. Show your (potentially incorrect) work.\n\
             \n\
             Student response:",
            question = problem.question,
            solution = problem.expected_solution,
        );
        self.model.complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the prompt it was handed and echoes a canned reply.
    struct CapturingModel {
        last_prompt: Mutex<Option<String>>,
    }

    impl CapturingModel {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                last_prompt: Mutex::new(None),
            })
        }

        fn last_prompt(&self) -> String {
            self.last_prompt.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl CompletionModel for CapturingModel {
        fn name(&self) -> &str {
            "capturing"
        }

        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok("Okay, I think the answer is 5.".to_string())
        }
    }

    fn problem() -> Problem {
        Problem {
            question: "2+3".into(),
            expected_solution: "5".into(),
        }
    }

    #[tokio::test]
    async fn perfect_prompt_embeds_problem_and_tutor_response() {
        let model = CapturingModel::new();
        let simulator = StudentSimulator::new(model.clone());

        let reply = simulator
            .perfect_turn("What do you get when you add 2 and 3?", &problem())
            .await
            .unwrap();
        assert!(reply.contains("5"));

        let prompt = model.last_prompt();
        assert!(prompt.contains("Math Problem: 2+3"));
        assert!(prompt.contains("Expected Solution: 5"));
        assert!(prompt.contains("What do you get when you add 2 and 3?"));
        assert!(prompt.contains("perfect 7th/8th grade student"));
    }

    #[tokio::test]
    async fn imperfect_prompt_includes_last_three_turns_only() {
        let model = CapturingModel::new();
        let simulator = StudentSimulator::new(model.clone());

        let transcript = vec![
            ConversationTurn::student("turn-zero"),
            ConversationTurn::tutor("turn-one"),
            ConversationTurn::student("turn-two"),
            ConversationTurn::tutor("turn-three"),
        ];
        simulator
            .imperfect_turn("Try again.", &problem(), &transcript)
            .await
            .unwrap();

        let prompt = model.last_prompt();
        assert!(!prompt.contains("turn-zero"));
        assert!(prompt.contains("turn-one"));
        assert!(prompt.contains("turn-two"));
        assert!(prompt.contains("turn-three"));
        assert!(prompt.contains("realistic errors"));
    }

    #[tokio::test]
    async fn imperfect_prompt_handles_short_history() {
        let model = CapturingModel::new();
        let simulator = StudentSimulator::new(model.clone());

        let transcript = vec![ConversationTurn::student("only-turn")];
        simulator
            .imperfect_turn("Hint.", &problem(), &transcript)
            .await
            .unwrap();

        assert!(model.last_prompt().contains("only-turn"));
    }

    #[tokio::test]
    async fn modes_use_distinct_prompts() {
        let model = CapturingModel::new();
        let simulator = StudentSimulator::new(model.clone());

        simulator.perfect_turn("Hi", &problem()).await.unwrap();
        let perfect = model.last_prompt();
        simulator
            .imperfect_turn("Hi", &problem(), &[])
            .await
            .unwrap();
        let imperfect = model.last_prompt();

        assert!(!perfect.contains("Computational errors"));
        assert!(imperfect.contains("Computational errors"));
    }
}
