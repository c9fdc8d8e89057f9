//! Single-scenario conversation driver.
//!
//! Runs one bounded back-and-forth dialogue between the tutor agent and the
//! simulated student, then hands the transcript to the judge. The run moves
//! through four phases: start the conversation, loop over turns, evaluate,
//! emit the result.

use std::time::Duration;

use crate::judge::ConversationJudge;
use crate::model::{
    ConversationTurn, Problem, Scenario, ScenarioFailure, ScenarioResult, Verdict,
};
use crate::simulator::StudentSimulator;
use crate::traits::TutorAgent;

/// Marker the tutor emits when it considers the problem solved.
const FINISHED_MARKER: &str = "Finished";

/// Phrases that signal the student is done, checked case-insensitively.
const CLOSING_PHRASES: &[&str] = &["i understand", "got it", "thank you", "makes sense now", "i see"];

/// Closing phrases are honored only from this loop iteration onward, to
/// enforce a minimum conversation length.
const MIN_CLOSING_TURN: usize = 2;

/// Observer for scenario progress, implemented by the CLI.
pub trait ProgressReporter: Send + Sync {
    fn on_scenario_start(&self, scenario: Scenario, question: &str);
    fn on_turn(&self, turn: &ConversationTurn);
    fn on_scenario_complete(&self, result: &ScenarioResult);
    fn on_run_halted(&self, reason: &str);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_scenario_start(&self, _: Scenario, _: &str) {}
    fn on_turn(&self, _: &ConversationTurn) {}
    fn on_scenario_complete(&self, _: &ScenarioResult) {}
    fn on_run_halted(&self, _: &str) {}
}

/// Drives one scenario to completion.
pub struct ScenarioRunner {
    max_turns: usize,
    turn_delay: Duration,
}

impl ScenarioRunner {
    pub fn new(max_turns: usize, turn_delay: Duration) -> Self {
        Self {
            max_turns,
            turn_delay,
        }
    }

    /// Run a single scenario and emit its result.
    ///
    /// Any tutor, student, or judge failure aborts the current phase and is
    /// recorded on the result; the caller decides what to do with it.
    pub async fn run(
        &self,
        tutor: &mut dyn TutorAgent,
        simulator: &StudentSimulator,
        judge: &ConversationJudge,
        problem: &Problem,
        scenario: Scenario,
        progress: &dyn ProgressReporter,
    ) -> ScenarioResult {
        progress.on_scenario_start(scenario, &problem.question);
        tutor.reset();

        let mut transcript: Vec<ConversationTurn> = Vec::new();
        let mut failure: Option<ScenarioFailure> = None;

        let initial_query = format!("Help me solve this problem: {}", problem.question);
        let mut tutor_response = String::new();
        match tutor.start(&initial_query).await {
            Ok(answer) => tutor_response = answer,
            Err(e) => failure = Some(ScenarioFailure::Tutor(format!("{e:#}"))),
        }

        let first_turn = ConversationTurn::student(initial_query);
        progress.on_turn(&first_turn);
        transcript.push(first_turn);

        if failure.is_none() {
            let turn = ConversationTurn::tutor(tutor_response.clone());
            progress.on_turn(&turn);
            transcript.push(turn);

            for turn_index in 0..self.max_turns.saturating_sub(1) {
                if tutor_response.contains(FINISHED_MARKER) {
                    break;
                }

                let student_response = match scenario {
                    Scenario::PerfectStudent => {
                        simulator.perfect_turn(&tutor_response, problem).await
                    }
                    Scenario::ImperfectStudent => {
                        simulator
                            .imperfect_turn(&tutor_response, problem, &transcript)
                            .await
                    }
                };
                let student_response = match student_response {
                    Ok(text) => text,
                    Err(e) => {
                        failure = Some(ScenarioFailure::Student(format!("{e:#}")));
                        break;
                    }
                };

                let student_turn = ConversationTurn::student(student_response.clone());
                progress.on_turn(&student_turn);
                transcript.push(student_turn);

                if turn_index >= MIN_CLOSING_TURN && contains_closing_phrase(&student_response) {
                    break;
                }

                match tutor.reply(&student_response).await {
                    Ok(answer) => {
                        tutor_response = answer;
                        let turn = ConversationTurn::tutor(tutor_response.clone());
                        progress.on_turn(&turn);
                        transcript.push(turn);
                    }
                    Err(e) => {
                        failure = Some(ScenarioFailure::Tutor(format!("{e:#}")));
                        break;
                    }
                }

                tokio::time::sleep(self.turn_delay).await;
            }
        }

        let verdict = match judge.evaluate(&transcript, problem, scenario).await {
            Ok(verdict) => verdict,
            Err(e) => {
                if failure.is_none() {
                    failure = Some(ScenarioFailure::Judge(e.to_string()));
                }
                Verdict::failed(format!("evaluation failed: {e}"))
            }
        };
        tokio::time::sleep(self.turn_delay).await;

        let result = ScenarioResult {
            question: problem.question.clone(),
            expected_solution: problem.expected_solution.clone(),
            scenario,
            verdict,
            transcript,
            failure,
        };
        progress.on_scenario_complete(&result);
        result
    }
}

fn contains_closing_phrase(response: &str) -> bool {
    let lowered = response.to_lowercase();
    CLOSING_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}
