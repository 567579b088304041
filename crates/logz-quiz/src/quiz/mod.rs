//! Diagnostic quiz engine: catalogue, scoring, classification, estimate and
//! the session state machine that ties them together.

pub mod catalog;
pub mod domain;
pub mod estimate;
pub mod flow;
pub mod scoring;
pub mod submission;
pub mod tier;

pub use catalog::{question_set, QuestionSet, SPEND_QUESTION_ID};
pub use domain::{Question, QuestionKind, QuestionOption, Role, RoleCategory};
pub use estimate::{estimate, EconomicEstimate};
pub use flow::{
    ComputingProgress, ContactDetails, FlowError, QuizResult, QuizSession, QuizStage,
    SubmissionStatus,
};
pub use scoring::{percentage, score, total_score, AnswerRecord, ScoreSheet, ScoringWeights};
pub use submission::{send_report, BookingLauncher, ReportSink};
pub use tier::{classify, tier_message, UrgencyTier};
