//! Quiz session state machine.
//!
//! `Intro -> CollectName -> CollectRole -> Question(0..n) -> Computing -> Result`.
//! Every transition is a method that either moves the session forward or
//! returns a [`FlowError`] and leaves the stage untouched.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::catalog::{question_set, QuestionSet};
use super::domain::{Question, Role};
use super::estimate::{estimate, EconomicEstimate};
use super::scoring::{percentage, AnswerRecord, ScoreSheet, ScoringWeights};
use super::tier::{tier_message, UrgencyTier};
use crate::report::request::{round_to_tenth, AnswerEntry, ReportRequest};

/// Simulated analysis shown between the last answer and the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ComputingProgress {
    percent: u8,
}

impl ComputingProgress {
    pub const STEP: u8 = 2;
    pub const TICK_INTERVAL: Duration = Duration::from_millis(50);
    /// Pause between reaching 100% and showing the result.
    pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

    pub fn percent(self) -> u8 {
        self.percent
    }

    pub fn is_complete(self) -> bool {
        self.percent >= 100
    }

    pub fn advance(&mut self) {
        self.percent = self.percent.saturating_add(Self::STEP).min(100);
    }

    pub fn message(self) -> &'static str {
        match self.percent {
            0..=29 => "Identificando pontos de melhoria...",
            30..=59 => "Calculando seu potencial de economia...",
            60..=89 => "Gerando recomendações personalizadas...",
            _ => "Finalizando seu diagnóstico executivo...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "detail", rename_all = "snake_case")]
pub enum QuizStage {
    Intro,
    CollectName,
    CollectRole,
    Question(usize),
    Computing(ComputingProgress),
    Result,
}

impl QuizStage {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::CollectName => "collect_name",
            Self::CollectRole => "collect_role",
            Self::Question(_) => "question",
            Self::Computing(_) => "computing",
            Self::Result => "result",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Informe seu nome para continuar.")]
    MissingName,
    #[error("Selecione seu cargo para continuar.")]
    MissingRole,
    #[error("Preencha nome, e-mail e empresa para receber o relatório completo.")]
    MissingContactDetails,
    #[error("option {option_index} does not exist for question {question_index}")]
    UnknownOption {
        question_index: usize,
        option_index: usize,
    },
    #[error("cannot {action} while in stage '{stage}'")]
    InvalidTransition {
        stage: &'static str,
        action: &'static str,
    },
    #[error("a report submission is already in flight")]
    SubmissionInFlight,
    #[error("{0}")]
    SendFailed(String),
}

impl FlowError {
    /// Errors the visitor can fix by correcting their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingName
                | Self::MissingRole
                | Self::MissingContactDetails
                | Self::UnknownOption { .. }
        )
    }
}

/// Contact fields collected on the result page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    InFlight,
    Sent,
    Failed(String),
}

/// Everything the result page displays, derived from the recorded answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub score_on_10: f64,
    pub tier: UrgencyTier,
    pub label: &'static str,
    pub color: &'static str,
    pub message: &'static str,
    pub monthly_spend: Option<u32>,
    #[serde(flatten)]
    pub estimate: EconomicEstimate,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    stage: QuizStage,
    name: String,
    role_label: String,
    role: Role,
    questions: &'static QuestionSet,
    weights: ScoringWeights,
    sheet: ScoreSheet,
    submission: SubmissionStatus,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl QuizSession {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            stage: QuizStage::Intro,
            name: String::new(),
            role_label: String::new(),
            role: Role::Other,
            questions: question_set(Role::Other),
            weights,
            sheet: ScoreSheet::new(),
            submission: SubmissionStatus::Idle,
        }
    }

    pub fn stage(&self) -> QuizStage {
        self.stage
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Role exactly as the visitor picked it.
    pub fn role_label(&self) -> &str {
        &self.role_label
    }

    pub fn questions(&self) -> &'static QuestionSet {
        self.questions
    }

    pub fn sheet(&self) -> &ScoreSheet {
        &self.sheet
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.stage {
            QuizStage::Question(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// Progress bar value while answering, in percent.
    pub fn question_progress(&self) -> f64 {
        let total = self.questions.len().max(1) as f64;
        match self.stage {
            QuizStage::Question(index) => (index + 1) as f64 * 100.0 / total,
            QuizStage::Computing(_) | QuizStage::Result => 100.0,
            _ => 0.0,
        }
    }

    pub fn begin(&mut self) -> Result<QuizStage, FlowError> {
        self.expect_stage(matches!(self.stage, QuizStage::Intro), "begin")?;
        self.stage = QuizStage::CollectName;
        Ok(self.stage)
    }

    pub fn submit_name(&mut self, name: &str) -> Result<QuizStage, FlowError> {
        self.expect_stage(
            matches!(self.stage, QuizStage::CollectName),
            "submit a name",
        )?;
        let name = name.trim();
        if name.is_empty() {
            return Err(FlowError::MissingName);
        }

        self.name = name.to_string();
        self.stage = QuizStage::CollectRole;
        Ok(self.stage)
    }

    /// Picks the question set for `role` and starts a fresh questionnaire.
    /// Labels outside the role picker fall back to [`Role::Other`].
    pub fn submit_role(&mut self, role: &str) -> Result<QuizStage, FlowError> {
        self.expect_stage(
            matches!(self.stage, QuizStage::CollectRole),
            "submit a role",
        )?;
        let label = role.trim();
        if label.is_empty() {
            return Err(FlowError::MissingRole);
        }

        self.role_label = label.to_string();
        self.role = Role::from_label(label).unwrap_or(Role::Other);
        self.questions = question_set(self.role);
        self.sheet.clear();
        self.submission = SubmissionStatus::Idle;
        self.stage = QuizStage::Question(0);
        debug!(role = %self.role, questions = self.questions.len(), "questionnaire started");
        Ok(self.stage)
    }

    /// Record the option at display position `option_index` for the current question.
    pub fn answer(&mut self, option_index: usize) -> Result<QuizStage, FlowError> {
        let QuizStage::Question(question_index) = self.stage else {
            return Err(self.invalid("answer a question"));
        };
        self.questions
            .get(question_index)
            .and_then(|question| question.option(option_index))
            .ok_or(FlowError::UnknownOption {
                question_index,
                option_index,
            })?;

        self.sheet.record(AnswerRecord {
            question_index,
            option_index,
            contribution: self.weights.contribution(question_index, option_index),
        });

        self.stage = if question_index + 1 < self.questions.len() {
            QuizStage::Question(question_index + 1)
        } else {
            QuizStage::Computing(ComputingProgress::default())
        };
        Ok(self.stage)
    }

    /// Advance the progress indicator one step. Returns the updated progress.
    pub fn tick_computing(&mut self) -> Result<ComputingProgress, FlowError> {
        let QuizStage::Computing(mut progress) = self.stage else {
            return Err(self.invalid("advance the analysis"));
        };
        progress.advance();
        self.stage = QuizStage::Computing(progress);
        Ok(progress)
    }

    /// Leave the computing stage. Allowed at any progress value.
    pub fn finish_computing(&mut self) -> Result<QuizStage, FlowError> {
        self.expect_stage(
            matches!(self.stage, QuizStage::Computing(_)),
            "finish the analysis",
        )?;
        self.stage = QuizStage::Result;
        let result = self.evaluate();
        debug!(
            total = result.total_score,
            percentage = result.percentage,
            tier = ?result.tier,
            "diagnostic computed"
        );
        Ok(self.stage)
    }

    pub fn result(&self) -> Result<QuizResult, FlowError> {
        self.expect_stage(matches!(self.stage, QuizStage::Result), "show the result")?;
        Ok(self.evaluate())
    }

    /// Derive the result from the answers recorded so far.
    pub fn evaluate(&self) -> QuizResult {
        let total_score = self.sheet.total();
        let max_score = self.weights.max_possible(self.questions.len());
        let percentage = percentage(total_score, max_score);
        let tier = UrgencyTier::classify(percentage);
        let monthly_spend = self.monthly_spend();

        QuizResult {
            total_score,
            max_score,
            percentage,
            score_on_10: round_to_tenth(percentage / 10.0),
            tier,
            label: tier.label(),
            color: tier.color(),
            message: tier_message(tier, self.questions.category),
            monthly_spend,
            estimate: estimate(percentage, monthly_spend.map(f64::from)),
        }
    }

    /// Spend magnitude of the option picked on the spend question, if any.
    pub fn monthly_spend(&self) -> Option<u32> {
        let index = self.questions.spend_question_index()?;
        let record = self.sheet.get(index)?;
        self.questions
            .get(index)?
            .option(record.option_index)?
            .monthly_spend
    }

    /// Answer lines in question order, as sent with the report.
    pub fn answer_entries(&self) -> Vec<AnswerEntry> {
        self.sheet
            .answers()
            .filter_map(|record| {
                let question = self.questions.get(record.question_index)?;
                let option = question.option(record.option_index)?;
                Some(AnswerEntry {
                    question_id: i64::from(question.id),
                    question_type: Some(question.kind.as_str().to_string()),
                    question: question.prompt.to_string(),
                    answer: option.text.to_string(),
                    option_value: Some(f64::from(option.value)),
                    monthly_spend: option.monthly_spend.map(f64::from),
                })
            })
            .collect()
    }

    /// Validate contact details and build the report payload.
    ///
    /// Marks the submission in flight; call [`Self::complete_submission`] with
    /// the outcome once the request finishes.
    pub fn prepare_submission(
        &mut self,
        contact: &ContactDetails,
    ) -> Result<ReportRequest, FlowError> {
        self.expect_stage(matches!(self.stage, QuizStage::Result), "submit contact details")?;
        if self.submission == SubmissionStatus::InFlight {
            return Err(FlowError::SubmissionInFlight);
        }

        let name = contact.name.trim();
        let email = contact.email.trim();
        let company = contact.company.trim();
        if name.is_empty() || email.is_empty() || company.is_empty() {
            return Err(FlowError::MissingContactDetails);
        }

        let result = self.evaluate();
        let request = ReportRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            company: Some(company.to_string()),
            role: Some(self.role_label.clone()),
            score: Some(result.score_on_10),
            score_percentage: Some(result.percentage),
            efficiency_gain: Some(f64::from(result.estimate.efficiency_gain)),
            economy_potential: Some(result.estimate.economic_potential as f64),
            answers: serde_json::to_value(self.answer_entries()).ok(),
        };

        self.submission = SubmissionStatus::InFlight;
        Ok(request)
    }

    pub fn complete_submission(&mut self, outcome: Result<(), String>) {
        self.submission = match outcome {
            Ok(()) => SubmissionStatus::Sent,
            Err(message) => SubmissionStatus::Failed(message),
        };
    }

    fn expect_stage(&self, allowed: bool, action: &'static str) -> Result<(), FlowError> {
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            stage: self.stage.name(),
            action,
        }
    }
}
