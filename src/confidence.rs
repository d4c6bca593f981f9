use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// User-supplied recall strength for a solved question, ordered weakest
/// to strongest. The numeric weight drives interval growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Confused,
    Struggled,
    Understood,
    Confident,
    Mastered,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown confidence level: {0}")]
pub struct UnknownConfidence(pub String);

impl Confidence {
    pub const ALL: [Confidence; 5] = [
        Self::Confused,
        Self::Struggled,
        Self::Understood,
        Self::Confident,
        Self::Mastered,
    ];

    pub fn weight(&self) -> u8 {
        match self {
            Self::Confused => 0,
            Self::Struggled => 1,
            Self::Understood => 2,
            Self::Confident => 3,
            Self::Mastered => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confused => "confused",
            Self::Struggled => "struggled",
            Self::Understood => "understood",
            Self::Confident => "confident",
            Self::Mastered => "mastered",
        }
    }
}

impl FromStr for Confidence {
    type Err = UnknownConfidence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confused" => Ok(Self::Confused),
            "struggled" => Ok(Self::Struggled),
            "understood" => Ok(Self::Understood),
            "confident" => Ok(Self::Confident),
            "mastered" => Ok(Self::Mastered),
            other => Err(UnknownConfidence(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceLevelInfo {
    pub value: Confidence,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// Presentation catalog for rating pickers, strongest level first.
pub const CONFIDENCE_LEVELS: [ConfidenceLevelInfo; 5] = [
    ConfidenceLevelInfo {
        value: Confidence::Mastered,
        label: "Mastered",
        description: "Came up with the optimal solution immediately",
        color: "#10b981",
    },
    ConfidenceLevelInfo {
        value: Confidence::Confident,
        label: "Confident",
        description: "Came up with a good solution quickly",
        color: "#3b82f6",
    },
    ConfidenceLevelInfo {
        value: Confidence::Understood,
        label: "Understood",
        description: "Solved, but could use a better or faster solution",
        color: "#f59e0b",
    },
    ConfidenceLevelInfo {
        value: Confidence::Struggled,
        label: "Struggled",
        description: "Did not solve in time, but understand the solution",
        color: "#ef4444",
    },
    ConfidenceLevelInfo {
        value: Confidence::Confused,
        label: "Confused",
        description: "Do not understand the solution yet",
        color: "#8b5cf6",
    },
];
