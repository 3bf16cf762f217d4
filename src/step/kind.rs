use crate::error::StepError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the chat preview treats a step when the conversation reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Shown to the user, then the conversation moves on by itself.
    Informational,
    /// Waits for a typed answer.
    FreeText,
    /// Waits for one of the step's options to be picked.
    Choice,
}

/// Prefix carried by palette items in drag payloads, e.g. `sidebar-email`.
pub const PALETTE_ITEM_PREFIX: &str = "sidebar-";

/// Master macro defining the closed step catalog: the enum, its wire names,
/// palette labels and interaction class, all from one table.
macro_rules! define_step_kinds {
    ( $( ($variant:ident, $wire:literal, $label:literal, $interaction:ident) ),* $(,)? ) => {
        /// The closed catalog of conversation step kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum StepKind {
            $(
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl StepKind {
            /// Every kind, in palette order.
            pub const ALL: &'static [StepKind] = &[ $( StepKind::$variant, )* ];

            /// The wire name used in persisted and exported flows.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( StepKind::$variant => $wire, )*
                }
            }

            /// Human-readable palette label.
            pub fn label(&self) -> &'static str {
                match self {
                    $( StepKind::$variant => $label, )*
                }
            }

            pub fn interaction(&self) -> Interaction {
                match self {
                    $( StepKind::$variant => Interaction::$interaction, )*
                }
            }
        }

        impl FromStr for StepKind {
            type Err = StepError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(StepKind::$variant), )*
                    // Older exports spelled multiple choice out in full.
                    "multiple-choice" => Ok(StepKind::Mcq),
                    other => Err(StepError::UnknownKind(other.to_string())),
                }
            }
        }
    };
}

define_step_kinds! {
    (Welcome, "welcome", "Welcome Screen", Informational),
    (Text, "text", "Text Input", FreeText),
    (Mcq, "mcq", "Multichoice", Choice),
    (YesNo, "yesno", "Yes/No", Choice),
    (Email, "email", "Email", FreeText),
    (Phone, "phone", "Phone", FreeText),
    (End, "end", "End Screen", Informational),
    (SingleChoice, "single-choice", "Single Choice", Choice),
    (Name, "name", "Name", FreeText),
    (Number, "number", "Number", FreeText),
    (Website, "website", "Website", FreeText),
    (Date, "date", "Date", FreeText),
    (Time, "time", "Time", FreeText),
    (DateTime, "date-time", "Date & Time", FreeText),
    (Location, "location", "Location", FreeText),
    (Range, "range", "Range", FreeText),
    (Rating, "rating", "Rating", FreeText),
    (File, "file", "File Upload", FreeText),
    (Statement, "statement", "Statement", Informational),
    (Image, "image", "Image", Informational),
    (Video, "video", "Video", Informational),
    (LinkOut, "link-out", "Link Out", Informational),
    (Redirect, "redirect", "Redirect", Informational),
    (LiveChat, "live-chat", "Live Chat", Informational),
    (AiResponse, "ai-response", "AI Response", Informational),
}

impl StepKind {
    /// Title given to freshly created steps of this kind.
    pub fn default_title(&self) -> &'static str {
        match self {
            StepKind::Welcome => "Welcome message",
            StepKind::Statement => "New Message",
            StepKind::End => "Thanks for chatting with us!",
            _ => "New Question",
        }
    }

    pub fn is_choice(&self) -> bool {
        self.interaction() == Interaction::Choice
    }

    /// Whether the step collects a user response, making `required` meaningful.
    pub fn collects_response(&self) -> bool {
        self.interaction() != Interaction::Informational
    }

    pub fn is_informational(&self) -> bool {
        self.interaction() == Interaction::Informational
    }

    /// Kinds whose `url` attribute points at media or a destination.
    pub fn takes_url(&self) -> bool {
        matches!(
            self,
            StepKind::Image | StepKind::Video | StepKind::LinkOut | StepKind::Redirect
        )
    }

    /// Identifier of this kind's palette item in drag payloads.
    pub fn palette_id(&self) -> String {
        format!("{}{}", PALETTE_ITEM_PREFIX, self.as_str())
    }

    /// Recovers the kind from a palette drag payload.
    ///
    /// Accepts both prefixed (`sidebar-email`) and bare (`email`) identifiers.
    pub fn from_palette_id(item_id: &str) -> Result<Self, StepError> {
        item_id
            .strip_prefix(PALETTE_ITEM_PREFIX)
            .unwrap_or(item_id)
            .parse()
    }
}

// Goes through `FromStr` so that legacy spellings load too.
impl<'de> Deserialize<'de> for StepKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
