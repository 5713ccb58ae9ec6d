//! Prompt templates

use crate::de::null_as_default;
use crate::error::{EvolveError, Result};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    #[default]
    Analysis,
    Classification,
    Extraction,
    Generation,
    General,
    #[serde(other)]
    Unknown,
}

impl PromptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Classification => "classification",
            Self::Extraction => "extraction",
            Self::Generation => "generation",
            Self::General => "general",
            Self::Unknown => "unknown",
        }
    }

    /// Starter texts offered when drafting a prompt of this category.
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Self::Analysis => &[
                "Analyze the following text and provide insights:",
                "Provide a detailed breakdown and reasoning for the input:",
                "Explain the underlying patterns and meaning behind the content:",
            ],
            Self::Classification => &[
                "Classify the following text into correct category:",
                "Determine the class label of this input:",
                "Categorize the content into one of the predefined labels:",
            ],
            Self::Extraction => &[
                "Extract all key data points from the following text:",
                "Identify entities, numbers and relevant details:",
                "Pull structured information from the unstructured content:",
            ],
            Self::Generation => &[
                "Generate a human-quality response for the following:",
                "Write a complete paragraph based on this input:",
                "Create a contextual and meaningful output from the prompt:",
            ],
            Self::General => &[
                "Respond intelligently to the user input:",
                "Provide helpful guidance for the following:",
                "Interpret and reply in a conversational manner:",
            ],
            Self::Unknown => &[],
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PromptCategory {
    type Err = EvolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analysis" => Ok(Self::Analysis),
            "classification" => Ok(Self::Classification),
            "extraction" => Ok(Self::Extraction),
            "generation" => Ok(Self::Generation),
            "general" => Ok(Self::General),
            other => Err(EvolveError::validation(
                "category",
                format!("unknown prompt category '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: PromptCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Body of `POST /prompts` and `PATCH /prompts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptDraft {
    pub name: String,
    pub content: String,
    pub category: PromptCategory,
    pub description: String,
}

impl PromptDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.content.trim().is_empty() {
            return Err(EvolveError::validation(
                "prompt",
                "name & content are required",
            ));
        }
        Ok(())
    }
}

impl From<&Prompt> for PromptDraft {
    fn from(prompt: &Prompt) -> Self {
        Self {
            name: prompt.name.clone(),
            content: prompt.content.clone(),
            category: prompt.category,
            description: prompt.description.clone().unwrap_or_default(),
        }
    }
}
