use super::kind::StepKind;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RATING_SCALE: u32 = 5;
pub const COPY_SUFFIX: &str = " (Copy)";

/// Opaque, immutable step identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StepId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for StepId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StepId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Inclusive numeric bounds for range steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

/// A single conversation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    id: StepId,
    #[serde(rename = "type")]
    kind: StepKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Inline validity markers shown next to a step on the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIssue {
    EmptyTitle,
    MissingOptions,
}

impl Step {
    /// Creates a step of `kind` with a fresh id and kind-appropriate defaults.
    pub fn new(kind: StepKind) -> Self {
        Self::with_id(StepId::generate(), kind)
    }

    /// Creates a step with a caller-chosen id. Used for seed data and fixtures.
    pub fn with_id(id: impl Into<StepId>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            kind,
            title: kind.default_title().to_string(),
            required: false,
            options: kind.is_choice().then(|| vec!["Option 1".to_string()]),
            rating_scale: (kind == StepKind::Rating).then_some(DEFAULT_RATING_SCALE),
            range: (kind == StepKind::Range).then(ValueRange::default),
            placeholder: None,
            url: None,
        }
    }

    pub fn id(&self) -> &StepId {
        &self.id
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Builder-style title setter, handy for fixtures.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder-style options setter. Ignored for kinds that take no options.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if self.kind.is_choice() && !options.is_empty() {
            self.options = Some(options);
        }
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Clones every field except the id, which is regenerated, and the title,
    /// which gets the copy suffix.
    pub fn duplicate(&self) -> Self {
        Self {
            id: StepId::generate(),
            title: format!("{}{}", self.title, COPY_SUFFIX),
            ..self.clone()
        }
    }

    /// Merges `patch` into a copy of this step.
    ///
    /// Options are only accepted for choice kinds and only when non-empty, so
    /// the option floor holds even for patches that bypass the editing surface.
    pub fn patched(&self, patch: &StepPatch) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(required) = patch.required {
            next.required = required;
        }
        if let Some(options) = &patch.options {
            if self.kind.is_choice() && !options.is_empty() {
                next.options = Some(options.clone());
            } else {
                tracing::debug!(step = %self.id, "ignoring options patch");
            }
        }
        if let Some(scale) = patch.rating_scale {
            next.rating_scale = Some(scale);
        }
        if let Some(range) = patch.range {
            next.range = Some(range);
        }
        if let Some(placeholder) = &patch.placeholder {
            next.placeholder = Some(placeholder.clone());
        }
        if let Some(url) = &patch.url {
            next.url = Some(url.clone());
        }
        next
    }

    pub fn issues(&self) -> Vec<StepIssue> {
        let mut issues = Vec::new();
        if self.kind.collects_response() && self.title.trim().is_empty() {
            issues.push(StepIssue::EmptyTitle);
        }
        if self.kind.is_choice() && self.options().is_empty() {
            issues.push(StepIssue::MissingOptions);
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

/// A partial update to a step. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StepPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::default()
        }
    }

    pub fn options(options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let step = Step::with_id("t1", StepKind::Text);
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "t1",
                "type": "text",
                "title": "New Question",
                "required": false
            })
        );
    }

    #[test]
    fn rating_and_range_defaults_use_camel_case() {
        let rating = serde_json::to_value(Step::with_id("r", StepKind::Rating)).unwrap();
        assert_eq!(rating["ratingScale"], 5);
        let range = serde_json::to_value(Step::with_id("g", StepKind::Range)).unwrap();
        assert_eq!(range["range"]["max"], 100.0);
    }

    #[test]
    fn patch_ignores_options_on_non_choice_steps() {
        let step = Step::with_id("t1", StepKind::Text);
        let patched = step.patched(&StepPatch::options(vec!["A".into()]));
        assert!(patched.options.is_none());
    }
}
