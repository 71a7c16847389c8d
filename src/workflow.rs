//! The three-stage mirror workflow.
//!
//! Each tracked repository runs sync → reconcile → publish in order. The
//! stages share no state beyond the working copy itself, and the first
//! failing invocation aborts the whole run; partial state is left for the
//! next run to pick up.

use crate::config::Config;
use crate::error::Result;
use crate::refs::{classify, missing_refs, parse_listing, tag_message, RefAction};
use crate::vcs::VcsClient;

/// Options for one mirror run.
#[derive(Debug, Clone, Default)]
pub struct MirrorOptions {
    /// Run only the read-only listing invocations and report what the
    /// reconcile stage would create. Sync and publish are skipped entirely;
    /// fetch and rebase are themselves mutations.
    pub dry_run: bool,
}

/// Outcome of mirroring a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Tracked repository name.
    pub repo: String,
    /// Local branches created (or, under dry-run, that would be created).
    pub branches_created: Vec<String>,
    /// Annotated tags created (or, under dry-run, that would be created).
    pub tags_created: Vec<String>,
    /// Whether the publish stage ran.
    pub pushed: bool,
}

/// Mirrors every repository in the given list, in order.
///
/// Repositories are processed strictly sequentially; the first error stops
/// the run and no later repository is touched.
pub fn mirror_all<C: VcsClient>(
    client: &C,
    config: &Config,
    repos: &[String],
    opts: &MirrorOptions,
) -> Result<Vec<MirrorSummary>> {
    let mut summaries = Vec::with_capacity(repos.len());
    for repo in repos {
        summaries.push(mirror_repo(client, config, repo, opts)?);
    }
    Ok(summaries)
}

/// Runs the three stages for one repository.
pub fn mirror_repo<C: VcsClient>(
    client: &C,
    config: &Config,
    repo: &str,
    opts: &MirrorOptions,
) -> Result<MirrorSummary> {
    if !opts.dry_run {
        sync(client, config, repo)?;
    }

    let (branches_created, tags_created) = reconcile(client, config, repo, opts.dry_run)?;

    if !opts.dry_run {
        publish(client, config, repo)?;
    }

    Ok(MirrorSummary {
        repo: repo.to_string(),
        branches_created,
        tags_created,
        pushed: !opts.dry_run,
    })
}

/// Sync stage: fetch upstream SVN revisions and fast-forward the primary
/// branch by rebasing it onto the upstream integration branch.
fn sync<C: VcsClient>(client: &C, config: &Config, repo: &str) -> Result<()> {
    client.fetch_upstream(repo)?;
    client.checkout_branch(repo, &config.branches.primary)?;
    client.rebase_onto(repo, &config.branches.upstream)?;
    Ok(())
}

/// Reconcile stage: create a local counterpart for every meaningful upstream
/// reference that is missing locally.
///
/// The local snapshot covers branches and tags; tag names re-enter it with
/// the namespace prefix re-applied so a tag mirrored on an earlier run drops
/// out of the difference instead of being re-created.
fn reconcile<C: VcsClient>(
    client: &C,
    config: &Config,
    repo: &str,
    dry_run: bool,
) -> Result<(Vec<String>, Vec<String>)> {
    let remote = parse_listing(&client.list_remote_branches(repo)?);

    let mut local = parse_listing(&client.list_local_branches(repo)?);
    for tag in parse_listing(&client.list_local_tags(repo)?) {
        local.insert(format!("{}{}", config.branches.tag_namespace, tag));
    }

    let mut branches_created = Vec::new();
    let mut tags_created = Vec::new();

    for name in missing_refs(&remote, &local) {
        match classify(&name, &config.branches.upstream, &config.branches.tag_namespace) {
            RefAction::SkipUpstream | RefAction::SkipNested => {}
            RefAction::CreateBranch(branch) => {
                if !dry_run {
                    client.create_branch(repo, &branch)?;
                }
                branches_created.push(branch);
            }
            RefAction::CreateTag(tag) => {
                if !dry_run {
                    client.create_annotated_tag(repo, &tag, &tag_message(&tag))?;
                }
                tags_created.push(tag);
            }
        }
    }

    Ok((branches_created, tags_created))
}

/// Publish stage: make the hosting remote match the local repository,
/// overwriting whatever diverged.
fn publish<C: VcsClient>(client: &C, config: &Config, repo: &str) -> Result<()> {
    client.push_all_branches(repo, &config.publish.remote)?;
    client.push_all_tags(repo, &config.publish.remote)?;
    Ok(())
}
