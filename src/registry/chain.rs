//! Linear migration chains for a single label.

use std::fmt;

use log::debug;

use crate::codec;
use crate::config::LoadOptions;
use crate::errors::{SchemaliftError, SchemaliftResult};
use crate::registry::MigrationReport;
use crate::traits::migration::{AnyVersion, VersionDescriptor};

/// Type-erased transform between two adjacent versions.
///
/// Receives the start and end descriptors of its step and the value to
/// migrate; must return a value of the end version.
pub type Transform = Box<
    dyn Fn(&VersionDescriptor, &VersionDescriptor, AnyVersion) -> SchemaliftResult<AnyVersion>
        + Send
        + Sync,
>;

/// One registered transform from `start` to `end`.
pub struct MigrationStep {
    label: String,
    start: VersionDescriptor,
    end: VersionDescriptor,
    transform: Transform,
}

impl MigrationStep {
    pub fn new(
        label: impl Into<String>,
        start: VersionDescriptor,
        end: VersionDescriptor,
        transform: Transform,
    ) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            transform,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> &VersionDescriptor {
        &self.start
    }

    pub fn end(&self) -> &VersionDescriptor {
        &self.end
    }

    /// Run the transform and check it produced the declared end version.
    fn run(&self, value: AnyVersion) -> SchemaliftResult<AnyVersion> {
        let migrated = (self.transform)(&self.start, &self.end, value)?;
        if migrated.descriptor() != &self.end || !migrated.is_consistent() {
            return Err(SchemaliftError::TransformType {
                label: self.label.clone(),
                expected: self.end.id().to_string(),
                expected_type: self.end.type_name(),
                found: migrated.version_id().to_string(),
                found_type: migrated.descriptor().type_name(),
            });
        }
        Ok(migrated)
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("label", &self.label)
            .field("start", &self.start.id())
            .field("end", &self.end.id())
            .finish_non_exhaustive()
    }
}

/// Ordered steps for one label, forming a simple path of versions.
///
/// Invariants, enforced by [`push`](Self::push):
/// - `steps[i].end == steps[i + 1].start`, same id and same Rust type
/// - no version id appears twice among the chain's nodes
#[derive(Debug)]
pub struct MigrationChain {
    label: String,
    steps: Vec<MigrationStep>,
}

impl MigrationChain {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn steps(&self) -> &[MigrationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The newest version: the end of the last step.
    pub fn current_version(&self) -> Option<&VersionDescriptor> {
        self.steps.last().map(MigrationStep::end)
    }

    /// Every version of the chain, oldest first.
    pub fn known_versions(&self) -> Vec<&VersionDescriptor> {
        let mut versions: Vec<&VersionDescriptor> = self.steps.iter().map(MigrationStep::start).collect();
        versions.extend(self.current_version());
        versions
    }

    pub fn version_ids(&self) -> Vec<&str> {
        self.known_versions().into_iter().map(VersionDescriptor::id).collect()
    }

    pub fn contains(&self, version_id: &str) -> bool {
        self.known_versions().iter().any(|v| v.id() == version_id)
    }

    fn step_from(&self, version_id: &str) -> Option<&MigrationStep> {
        self.steps.iter().find(|step| step.start.id() == version_id)
    }

    /// Append a step. On error the chain is left unchanged.
    pub fn push(&mut self, step: MigrationStep) -> SchemaliftResult<()> {
        if let Some(tail) = self.current_version() {
            if step.start != *tail {
                return Err(SchemaliftError::ChainMismatch {
                    label: self.label.clone(),
                    start: step.start.id().to_string(),
                    start_type: step.start.type_name(),
                    tail: tail.id().to_string(),
                    tail_type: tail.type_name(),
                });
            }
        }

        if step.end.id() == step.start.id() || self.contains(step.end.id()) {
            return Err(SchemaliftError::Cycle {
                label: self.label.clone(),
                version: step.end.id().to_string(),
                chain: self.version_ids().into_iter().map(String::from).collect(),
            });
        }

        if self.step_from(step.start.id()).is_some() {
            return Err(SchemaliftError::DuplicateStart {
                label: self.label.clone(),
                version: step.start.id().to_string(),
            });
        }

        debug!(
            "Registered migration: {} {} -> {}",
            self.label,
            step.start.id(),
            step.end.id()
        );
        self.steps.push(step);
        Ok(())
    }

    /// Migrate `value` forward to the chain's current version.
    ///
    /// Values already at the current version are returned untouched. With
    /// `write_versions` enabled the starting value and every migrated value
    /// are persisted; a write failure aborts the remaining steps.
    pub fn apply(&self, value: AnyVersion, options: &LoadOptions) -> SchemaliftResult<(AnyVersion, MigrationReport)> {
        if !self.contains(value.version_id()) {
            return Err(SchemaliftError::UnknownVersion {
                label: self.label.clone(),
                version: value.version_id().to_string(),
            });
        }

        let mut report = MigrationReport::new(&self.label, value.version_id());
        self.write_if_needed(&value, options, &mut report)?;

        let mut current = value;
        while let Some(step) = self.step_from(current.version_id()) {
            debug!(
                "Migrating {} from {} to {}",
                self.label,
                step.start.id(),
                step.end.id()
            );
            current = step.run(current)?;
            report.record_step(current.version_id());
            self.write_if_needed(&current, options, &mut report)?;
        }

        Ok((current, report))
    }

    fn write_if_needed(
        &self,
        value: &AnyVersion,
        options: &LoadOptions,
        report: &mut MigrationReport,
    ) -> SchemaliftResult<()> {
        if options.write_versions {
            let stem = options.artifact_stem(value.version_id());
            let path = codec::persist_any(value, options.artifact_dir(), &stem)?;
            report.record_artifact(path);
        }
        Ok(())
    }
}
