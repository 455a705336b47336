/// Errors surfaced to the embedding page.
///
/// Interaction never fails; only data loading and browser painting can.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The scene JSON could not be parsed.
    #[error("scene parse failed: {0}")]
    SceneParse(#[source] serde_json::Error),

    /// The assignments overlay JSON could not be parsed.
    #[error("assignments parse failed: {0}")]
    AssignmentsParse(#[source] serde_json::Error),

    /// The editor props JSON could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(#[source] serde_json::Error),

    /// A browser canvas call failed or no 2D context is available.
    #[error("canvas error: {0}")]
    Canvas(String),
}
