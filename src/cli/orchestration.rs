//! Command workflows
//!
//! Each `run_*` function performs one command against explicit
//! collaborators and returns data; [execute] adds console output and maps
//! the outcome to a process exit status. Keeping the two apart lets the
//! workflows be driven from tests without clap or a terminal.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, error};

use crate::context::InvocationContext;
use crate::domain::release::BuildInfo;
use crate::domain::version::Version;
use crate::error::{BranchGuardError, Result};
use crate::git::VersionControl;
use crate::release::{PreparedRelease, ReleasePreparer};
use crate::store::{self, DescriptorStore};
use crate::ui;
use crate::validate::{validate_branch, BranchReport};

/// Remote named in the "push the branch" next step.
const REMOTE: &str = "origin";

/// A parsed command line, independent of clap
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ValidateBranch,
    PrepareRelease {
        version: Option<String>,
        description: Option<String>,
    },
    BuildInfo,
}

/// Collaborators shared by every command
pub struct Workspace<'a, V: VersionControl + ?Sized> {
    pub vcs: &'a V,
    pub root: PathBuf,
    pub context: InvocationContext,
}

/// Read the current branch and report its class and merge rules.
pub fn run_validate_branch<V: VersionControl + ?Sized>(
    workspace: &Workspace<'_, V>,
) -> Result<BranchReport> {
    let branch = workspace.vcs.current_branch()?;
    debug!(branch = %branch, "validating branch");
    validate_branch(workspace.vcs, &branch)
}

/// Validate the version, read the branch, then prepare the descriptor.
///
/// The version is checked first so a malformed version is reported even
/// when no repository is reachable.
pub fn run_prepare_release<V: VersionControl + ?Sized>(
    workspace: &Workspace<'_, V>,
    version: Option<&str>,
    description: Option<&str>,
) -> Result<PreparedRelease> {
    let version = version
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BranchGuardError::missing("version"))?;
    Version::parse(version)?;

    let branch = workspace.vcs.current_branch()?;

    ReleasePreparer::new(
        workspace.vcs,
        DescriptorStore::new(&workspace.root),
        workspace.context.clone(),
    )
    .prepare(version, description, &branch)
}

/// Build record for the descriptor under `root`.
pub fn run_build_info(root: &Path, context: &InvocationContext) -> Result<BuildInfo> {
    let descriptor = DescriptorStore::new(root).read()?;
    let version = Version::parse(&descriptor.version)?;

    Ok(BuildInfo {
        version: version.to_string(),
        major: version.major,
        minor: version.minor,
        patch: version.patch,
        build: context.build_number.clone(),
        commit: context.commit_sha.clone(),
        branch: context.branch_name.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Run `command`, print its outcome and return the process exit status.
pub fn execute<V: VersionControl + ?Sized>(workspace: &Workspace<'_, V>, command: &Command) -> i32 {
    let outcome = match command {
        Command::ValidateBranch => run_validate_branch(workspace).map(|report| {
            ui::display_branch_report(&report);
        }),
        Command::PrepareRelease {
            version,
            description,
        } => run_prepare_release(workspace, version.as_deref(), description.as_deref())
            .and_then(|prepared| report_prepared(&prepared)),
        Command::BuildInfo => run_build_info(&workspace.root, &workspace.context)
            .and_then(|info| serde_json::to_string_pretty(&info).map_err(BranchGuardError::from))
            .map(|json| println!("{}", json)),
    };

    match outcome {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "command failed");
            ui::display_failure(&e);
            e.exit_code()
        }
    }
}

fn report_prepared(prepared: &PreparedRelease) -> Result<()> {
    let descriptor = &prepared.descriptor;
    ui::display_json(
        &format!("Created {}:", store::DESCRIPTOR_FILE),
        &store::render(descriptor)?,
    );

    match &prepared.warning {
        None => ui::display_success(&format!(
            "Committed {} for version {}",
            store::DESCRIPTOR_FILE,
            descriptor.version
        )),
        Some(warning) => ui::display_boundary_warning(warning),
    }

    ui::display_next_steps(&descriptor.version, &descriptor.branch, REMOTE);
    Ok(())
}
