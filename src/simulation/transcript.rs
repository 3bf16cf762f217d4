use crate::step::{StepId, StepKind};
use serde::Serialize;

pub const CHAT_ENDED: &str = "Chat ended.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bot,
    User,
    System,
}

/// One message in the simulated conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<StepId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<StepKind>,
}

impl Turn {
    pub fn bot(step_id: StepId, kind: StepKind, content: String, options: Vec<String>) -> Self {
        Self {
            role: Role::Bot,
            content,
            options,
            step_id: Some(step_id),
            kind: Some(kind),
        }
    }

    pub fn user(content: String) -> Self {
        Self {
            role: Role::User,
            content,
            options: Vec::new(),
            step_id: None,
            kind: None,
        }
    }

    pub fn system(content: &str) -> Self {
        Self {
            role: Role::System,
            content: content.to_string(),
            options: Vec::new(),
            step_id: None,
            kind: None,
        }
    }
}

/// Formats transcripts into a plain-text chat log.
pub struct TranscriptFormatter;

impl TranscriptFormatter {
    pub fn format_transcript(turns: &[Turn]) -> String {
        turns
            .iter()
            .map(Self::format_turn)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_turn(turn: &Turn) -> String {
        match turn.role {
            Role::Bot => {
                let mut line = format!("bot: {}", turn.content);
                if !turn.options.is_empty() {
                    let options = turn
                        .options
                        .iter()
                        .enumerate()
                        .map(|(i, o)| format!("[{}] {}", i + 1, o))
                        .collect::<Vec<_>>()
                        .join("  ");
                    line.push_str(&format!("\n     {}", options));
                }
                line
            }
            Role::User if turn.content.is_empty() => "you: (skipped)".to_string(),
            Role::User => format!("you: {}", turn.content),
            Role::System => format!("--- {} ---", turn.content),
        }
    }
}
