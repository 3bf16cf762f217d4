use crate::error::{FlowError, SnapshotError};
use crate::flow::{Edge, Flow, IntoFlow};
use crate::step::Step;
use serde::{Deserialize, Serialize};

/// Version written into every snapshot produced by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// The persisted shape of a flow: the full step array plus the edge array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFlow {
    pub schema_version: u32,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl From<&Flow> for PersistedFlow {
    fn from(flow: &Flow) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            steps: flow.steps().to_vec(),
            edges: flow.edges().to_vec(),
        }
    }
}

impl IntoFlow for PersistedFlow {
    fn into_flow(self) -> Result<Flow, FlowError> {
        Flow::new(self.steps, self.edges)
    }
}

/// The unversioned layout written before edges were persisted: a bare step array.
///
/// Order was the only connection model back then, so migration connects each
/// step to the next one.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LegacySteps(pub Vec<Step>);

impl IntoFlow for LegacySteps {
    fn into_flow(self) -> Result<Flow, FlowError> {
        Flow::sequential(self.0)
    }
}

/// Serializes a complete snapshot of `flow`.
pub fn encode(flow: &Flow) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&PersistedFlow::from(flow))?)
}

/// Decodes a snapshot, migrating the legacy layout and rejecting newer schemas.
pub fn decode(json: &str) -> Result<Flow, SnapshotError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        tracing::info!("migrating unversioned step-array snapshot");
        let legacy: LegacySteps = serde_json::from_value(value)?;
        return Ok(legacy.into_flow()?);
    }

    let found = value
        .get("schemaVersion")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    if found > u64::from(SCHEMA_VERSION) {
        return Err(SnapshotError::UnsupportedVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    let persisted: PersistedFlow = serde_json::from_value(value)?;
    Ok(persisted.into_flow()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_writes_schema_version() {
        let json = encode(&Flow::seed()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert_eq!(value["steps"].as_array().unwrap().len(), 2);
        assert_eq!(value["edges"][0]["source"], "welcome-1");
    }

    #[test]
    fn decode_rejects_newer_versions() {
        let err = decode(r#"{"schemaVersion": 7, "steps": [], "edges": []}"#).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion { found: 7, .. }
        ));
    }

    #[test]
    fn decode_rejects_versions_beyond_u32() {
        let json = r#"{"schemaVersion": 4294967297, "steps": [], "edges": []}"#;
        assert!(matches!(
            decode(json).unwrap_err(),
            SnapshotError::UnsupportedVersion {
                found: 4294967297,
                ..
            }
        ));
    }

    #[test]
    fn decode_rejects_dangling_edges() {
        let json = r#"{"schemaVersion": 1, "steps": [], "edges": [{"source": "a", "target": "b"}]}"#;
        assert!(matches!(
            decode(json).unwrap_err(),
            SnapshotError::Invalid(FlowError::DanglingEdge { .. })
        ));
    }
}
