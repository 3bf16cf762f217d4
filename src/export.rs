use crate::step::Step;
use std::fs;
use std::path::Path;

/// Default file name for downloaded exports.
pub const EXPORT_FILE_NAME: &str = "chatbot-flow.json";

/// Serializes the step array for the chat widget, pretty-printed with two-space indentation.
///
/// Edges are not part of the export; the widget walks steps in order.
pub fn export_steps(steps: &[Step]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(steps)
}

/// Parses an export document back into steps.
pub fn import_steps(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes the export document to `path`.
pub fn write_export(steps: &[Step], path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = export_steps(steps)?;
    fs::write(path, json)?;
    Ok(())
}
