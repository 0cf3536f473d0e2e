use std::path::PathBuf;

/// What happened during one migration run.
///
/// `path` holds the id of every version the value passed through, starting
/// with the version it was detected (or supplied) as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// The label of the chain that ran.
    pub label: String,
    /// Version ids visited, oldest first.
    pub path: Vec<String>,
    /// Number of transforms applied.
    pub steps_applied: usize,
    /// Artifacts written, in write order.
    pub artifacts: Vec<PathBuf>,
}

impl MigrationReport {
    pub(crate) fn new(label: &str, start_version: &str) -> Self {
        Self {
            label: label.to_string(),
            path: vec![start_version.to_string()],
            steps_applied: 0,
            artifacts: Vec::new(),
        }
    }

    pub(crate) fn record_step(&mut self, version: &str) {
        self.path.push(version.to_string());
        self.steps_applied += 1;
    }

    pub(crate) fn record_artifact(&mut self, path: PathBuf) {
        self.artifacts.push(path);
    }

    /// The version the input was in before migration.
    pub fn detected_version(&self) -> &str {
        &self.path[0]
    }

    /// The version the value ended at.
    pub fn final_version(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }

    pub fn was_migrated(&self) -> bool {
        self.steps_applied > 0
    }
}
