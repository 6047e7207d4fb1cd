use std::fs;
use std::path::Path;
use std::sync::Arc;

use qube_result::Result;
use qube_storage::{drop_table_if_exists, StoreClient, TABLE_OWNER_TAG};
use tracing::{debug, error};

/// Terminal state of one executed job step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepState {
    Succeed,
    Error,
}

/// Result of one executed job step: the terminal state plus the accumulated
/// transcript, one line per touched resource.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub state: StepState,
    pub output: String,
}

impl StepOutcome {
    fn succeed(output: String) -> Self {
        Self {
            state: StepState::Succeed,
            output,
        }
    }

    fn error(output: String) -> Self {
        Self {
            state: StepState::Error,
            output,
        }
    }

    pub fn is_succeed(&self) -> bool {
        self.state == StepState::Succeed
    }
}

/// Execution environment for cleanup: the store connection and the
/// deployment's metadata prefix used as the table ownership guard.
pub struct CleanupContext {
    pub client: Arc<dyn StoreClient>,
    pub metadata_prefix: String,
}

/// Drops the resources that are no longer needed after a cube build or
/// merge: obsolete cube tables, the obsolete staging table, and obsolete
/// filesystem paths.
///
/// Deletions are not transactional. The first failure aborts the remaining
/// sub-steps and surfaces as a failed outcome carrying whatever transcript
/// accumulated up to that point; resources already deleted stay deleted.
#[derive(Clone, Debug, Default)]
pub struct CleanupStep {
    obsolete_tables: Vec<String>,
    obsolete_staging_table: Option<String>,
    obsolete_paths: Vec<String>,
}

impl CleanupStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obsolete_tables(mut self, tables: Vec<String>) -> Self {
        self.obsolete_tables = tables;
        self
    }

    pub fn with_obsolete_staging_table(mut self, table: impl Into<String>) -> Self {
        self.obsolete_staging_table = Some(table.into());
        self
    }

    pub fn with_obsolete_paths(mut self, paths: Vec<String>) -> Self {
        self.obsolete_paths = paths;
        self
    }

    pub fn execute(&self, ctx: &CleanupContext) -> StepOutcome {
        let mut output = String::new();
        match self.run(ctx, &mut output) {
            Ok(()) => StepOutcome::succeed(output),
            Err(e) => {
                error!("cleanup step finished with error: {e}");
                output.push('\n');
                output.push_str(&e.to_string());
                StepOutcome::error(output)
            }
        }
    }

    fn run(&self, ctx: &CleanupContext, output: &mut String) -> Result<()> {
        self.drop_store_tables(ctx, output)?;
        self.drop_paths(output)?;
        self.drop_staging_table(ctx, output)?;
        Ok(())
    }

    fn drop_store_tables(&self, ctx: &CleanupContext, output: &mut String) -> Result<()> {
        for table in &self.obsolete_tables {
            if !ctx.client.table_exists(table)? {
                continue;
            }
            let descriptor = ctx.client.table_descriptor(table)?;
            let owner = descriptor.as_ref().and_then(|d| d.tag(TABLE_OWNER_TAG));
            // another deployment may reuse the same table name; only drop
            // tables this deployment owns
            if owner.is_some_and(|o| o.eq_ignore_ascii_case(&ctx.metadata_prefix)) {
                ctx.client.drop_table(table)?;
                debug!("dropped table {table}");
                output.push_str(&format!("Dropped table {table} \n"));
            } else {
                debug!("skipped table {table}");
                output.push_str(&format!("Skipped table {table} \n"));
            }
        }
        Ok(())
    }

    fn drop_paths(&self, output: &mut String) -> Result<()> {
        for raw in &self.obsolete_paths {
            let trimmed = raw.strip_suffix('*').unwrap_or(raw);
            let path = Path::new(trimmed);
            if path.exists() {
                if path.is_dir() {
                    fs::remove_dir_all(path)?;
                } else {
                    fs::remove_file(path)?;
                }
                debug!("dropped path: {trimmed}");
                output.push_str(&format!("Dropped path \"{trimmed}\" \n"));
            } else {
                debug!("path not exists: {trimmed}");
                output.push_str(&format!("Path not exists: \"{trimmed}\" \n"));
            }
        }
        Ok(())
    }

    fn drop_staging_table(&self, ctx: &CleanupContext, output: &mut String) -> Result<()> {
        if let Some(table) = self.obsolete_staging_table.as_deref() {
            if !table.is_empty() {
                drop_table_if_exists(ctx.client.as_ref(), table)?;
                output.push_str(&format!("Dropped staging table {table} \n"));
            }
        }
        Ok(())
    }
}
