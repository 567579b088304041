use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared job role. Wire values are the labels shown in the role picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Director,
    MachiningSupervisor,
    Buyer,
    Other,
}

impl Role {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Director,
            Self::MachiningSupervisor,
            Self::Buyer,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Director => "Diretor",
            Self::MachiningSupervisor => "Supervisor/Gerente de usinagem",
            Self::Buyer => "Comprador",
            Self::Other => "Outros",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|role| role.label() == value)
    }

    pub const fn category(self) -> RoleCategory {
        match self {
            Self::MachiningSupervisor => RoleCategory::Machining,
            Self::Buyer => RoleCategory::Purchasing,
            Self::Director | Self::Other => RoleCategory::Director,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Message bucket used to pick role-specific copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Director,
    Machining,
    Purchasing,
}

impl RoleCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Director, Self::Machining, Self::Purchasing]
    }
}

/// Intent of a question within the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Identification,
    Pain,
    Hope,
    Solution,
    Commitment,
}

impl QuestionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identification => "identification",
            Self::Pain => "pain",
            Self::Hope => "hope",
            Self::Solution => "solution",
            Self::Commitment => "commitment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOption {
    pub text: &'static str,
    pub icon: &'static str,
    /// Catalogue value echoed to the internal summary; it plays no part in scoring.
    pub value: u8,
    /// Representative monthly spend in BRL; only the spend question carries it.
    pub monthly_spend: Option<u32>,
}

/// A catalogue question. The array type pins the option count at four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u8,
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub description: &'static str,
    pub options: [QuestionOption; 4],
}

impl Question {
    pub fn option(&self, position: usize) -> Option<&QuestionOption> {
        self.options.get(position)
    }
}
