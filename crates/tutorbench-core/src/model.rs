//! Core data model types for tutorbench.
//!
//! These are the fundamental types the entire tutorbench system uses to
//! represent problems, conversation transcripts, and per-scenario outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single math problem with its reference solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// The problem statement shown to the tutor.
    pub question: String,
    /// The solution the tutor is expected to arrive at.
    pub expected_solution: String,
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Tutor => write!(f, "tutor"),
        }
    }
}

/// One utterance in a tutoring conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn student(content: impl Into<String>) -> Self {
        Self {
            role: Role::Student,
            content: content.into(),
        }
    }

    pub fn tutor(content: impl Into<String>) -> Self {
        Self {
            role: Role::Tutor,
            content: content.into(),
        }
    }
}

/// The student-behavior mode applied to a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    PerfectStudent,
    ImperfectStudent,
}

impl Scenario {
    /// Serialized identifier, as persisted in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::PerfectStudent => "perfect_student",
            Scenario::ImperfectStudent => "imperfect_student",
        }
    }

    /// Human-readable form used in prompts ("perfect student").
    pub fn human(&self) -> &'static str {
        match self {
            Scenario::PerfectStudent => "perfect student",
            Scenario::ImperfectStudent => "imperfect student",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perfect_student" => Ok(Scenario::PerfectStudent),
            "imperfect_student" => Ok(Scenario::ImperfectStudent),
            other => Err(format!("unknown scenario: {other}")),
        }
    }
}

/// The judge's grading of a finished conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Every mathematical step in the conversation was correct.
    pub logic_correct: bool,
    /// The tutor caught and fixed every student error (vacuously true when
    /// the student made none).
    pub corrected_when_wrong: bool,
    /// The final answer matches or is mathematically equivalent to the
    /// expected solution.
    pub solution_matches: bool,
    /// Free-text rationale from the judge.
    pub details: String,
}

impl Verdict {
    /// All three criteria passed.
    pub fn is_perfect(&self) -> bool {
        self.logic_correct && self.corrected_when_wrong && self.solution_matches
    }

    /// The all-false verdict recorded when grading itself failed.
    pub fn failed(details: impl Into<String>) -> Self {
        Self {
            logic_correct: false,
            corrected_when_wrong: false,
            solution_matches: false,
            details: details.into(),
        }
    }
}

/// Which component aborted a scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioFailure {
    /// The tutor agent call failed.
    Tutor(String),
    /// Generating the simulated student turn failed.
    Student(String),
    /// The judge request or its response parsing failed.
    Judge(String),
}

impl fmt::Display for ScenarioFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioFailure::Tutor(msg) => write!(f, "tutor: {msg}"),
            ScenarioFailure::Student(msg) => write!(f, "student: {msg}"),
            ScenarioFailure::Judge(msg) => write!(f, "judge: {msg}"),
        }
    }
}

/// The outcome of one scenario run against one problem.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub question: String,
    pub expected_solution: String,
    pub scenario: Scenario,
    pub verdict: Verdict,
    /// The full conversation. Empty when reconstructed from a persisted
    /// report, which does not retain transcripts.
    pub transcript: Vec<ConversationTurn>,
    /// Set when any component aborted the run; failed results are discarded
    /// by the driver and never persisted.
    pub failure: Option<ScenarioFailure>,
}

impl ScenarioResult {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_display_and_parse() {
        assert_eq!(Scenario::PerfectStudent.to_string(), "perfect_student");
        assert_eq!(Scenario::ImperfectStudent.to_string(), "imperfect_student");
        assert_eq!(
            "perfect_student".parse::<Scenario>().unwrap(),
            Scenario::PerfectStudent
        );
        assert!("diligent_student".parse::<Scenario>().is_err());
    }

    #[test]
    fn scenario_serde_names() {
        let json = serde_json::to_string(&Scenario::ImperfectStudent).unwrap();
        assert_eq!(json, "\"imperfect_student\"");
        let parsed: Scenario = serde_json::from_str("\"perfect_student\"").unwrap();
        assert_eq!(parsed, Scenario::PerfectStudent);
    }

    #[test]
    fn turn_roles_serialize_lowercase() {
        let turn = ConversationTurn::tutor("Let's factor it.");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "tutor");
        assert_eq!(json["content"], "Let's factor it.");
    }

    #[test]
    fn verdict_perfect_requires_all_three() {
        let verdict = Verdict {
            logic_correct: true,
            corrected_when_wrong: true,
            solution_matches: true,
            details: String::new(),
        };
        assert!(verdict.is_perfect());

        let partial = Verdict {
            corrected_when_wrong: false,
            ..verdict
        };
        assert!(!partial.is_perfect());
    }

    #[test]
    fn failed_verdict_is_all_false() {
        let verdict = Verdict::failed("evaluation failed: no json block");
        assert!(!verdict.logic_correct);
        assert!(!verdict.corrected_when_wrong);
        assert!(!verdict.solution_matches);
        assert!(verdict.details.contains("evaluation failed"));
    }
}
