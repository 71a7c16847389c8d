// tests/workflow_test.rs
//
// End-to-end behavior of the mirror workflow against the mock client: the
// reconcile difference-set contract, tag naming, publish round-trip, and
// fail-fast propagation.

use svn_mirror::config::Config;
use svn_mirror::refs::{classify, parse_listing, RefAction};
use svn_mirror::vcs::mock::{MockVcsClient, VcsCall};
use svn_mirror::workflow::{mirror_all, mirror_repo, MirrorOptions};

fn config_with_repos(repos: &[&str]) -> Config {
    Config {
        repos: repos.iter().map(|r| r.to_string()).collect(),
        ..Config::default()
    }
}

fn upstream_fixture() -> MockVcsClient {
    let mut client = MockVcsClient::new();
    client.add_local_branch("master");
    client.add_remote_branch("trunk");
    client.add_remote_branch("tags/v1.0");
    client.add_remote_branch("tags/v1.1");
    client.add_remote_branch("feature/foo");
    client.add_remote_branch("release-2");
    client
}

#[test]
fn full_run_mirrors_branches_and_tags_then_publishes() {
    let client = upstream_fixture();
    let config = config_with_repos(&["sqlalchemy"]);

    let summaries = mirror_all(
        &client,
        &config,
        &config.repos,
        &MirrorOptions::default(),
    )
    .unwrap();

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.repo, "sqlalchemy");
    assert_eq!(summary.branches_created, vec!["release-2".to_string()]);
    assert_eq!(
        summary.tags_created,
        vec!["v1.0".to_string(), "v1.1".to_string()]
    );
    assert!(summary.pushed);

    // Publish pushes everything to the configured remote, branches then tags.
    let calls = client.calls();
    let n = calls.len();
    assert_eq!(
        calls[n - 2],
        VcsCall::PushAllBranches {
            repo: "sqlalchemy".to_string(),
            remote: "gh".to_string(),
        }
    );
    assert_eq!(
        calls[n - 1],
        VcsCall::PushAllTags {
            repo: "sqlalchemy".to_string(),
            remote: "gh".to_string(),
        }
    );
}

#[test]
fn custom_branch_layout_flows_through_all_stages() {
    let mut client = MockVcsClient::new();
    client.add_local_branch("main");
    client.add_remote_branch("mainline");
    client.add_remote_branch("rel/3.0");
    let mut config = config_with_repos(&["proj"]);
    config.branches.primary = "main".to_string();
    config.branches.upstream = "mainline".to_string();
    config.branches.tag_namespace = "rel/".to_string();
    config.publish.remote = "github".to_string();

    let summary = mirror_repo(&client, &config, "proj", &MirrorOptions::default()).unwrap();

    assert!(summary.branches_created.is_empty());
    assert_eq!(summary.tags_created, vec!["3.0".to_string()]);

    let calls = client.calls();
    assert!(calls.contains(&VcsCall::CheckoutBranch {
        repo: "proj".to_string(),
        branch: "main".to_string(),
    }));
    assert!(calls.contains(&VcsCall::RebaseOnto {
        repo: "proj".to_string(),
        upstream: "mainline".to_string(),
    }));
    assert!(calls.contains(&VcsCall::CreateAnnotatedTag {
        repo: "proj".to_string(),
        name: "3.0".to_string(),
        message: "Tagging svn tag 3.0".to_string(),
    }));
    assert!(calls.contains(&VcsCall::PushAllTags {
        repo: "proj".to_string(),
        remote: "github".to_string(),
    }));
}

#[test]
fn rerun_after_successful_mirror_creates_nothing() {
    let client = upstream_fixture();
    let config = config_with_repos(&["sqlalchemy"]);

    mirror_repo(&client, &config, "sqlalchemy", &MirrorOptions::default()).unwrap();
    let rerun = mirror_repo(&client, &config, "sqlalchemy", &MirrorOptions::default()).unwrap();

    assert!(rerun.branches_created.is_empty());
    assert!(rerun.tags_created.is_empty());
    // The rerun still publishes: push is a full mirror, not conditional.
    assert!(rerun.pushed);
}

#[test]
fn failure_in_one_repo_halts_the_whole_run() {
    let mut client = upstream_fixture();
    client.fail_on("push_all_tags");
    let config = config_with_repos(&["alpha", "beta"]);

    let err = mirror_all(&client, &config, &config.repos, &MirrorOptions::default())
        .unwrap_err();
    assert_eq!(err.exit_code(), 1);

    // beta was never started in any stage.
    assert!(client.calls().iter().all(|call| !matches!(
        call,
        VcsCall::FetchUpstream { repo } if repo == "beta"
    )));
}

#[test]
fn classification_is_pure_and_order_independent() {
    let names = ["trunk", "tags/v1.0", "feature/foo", "release-2"];
    let forward: Vec<RefAction> = names
        .iter()
        .map(|n| classify(n, "trunk", "tags/"))
        .collect();
    let backward: Vec<RefAction> = names
        .iter()
        .rev()
        .map(|n| classify(n, "trunk", "tags/"))
        .collect();

    for (i, name) in names.iter().enumerate() {
        assert_eq!(forward[i], backward[names.len() - 1 - i], "name {}", name);
        // Calling again yields the same classification.
        assert_eq!(forward[i], classify(name, "trunk", "tags/"));
    }
}

#[test]
fn listing_parser_tolerates_marker_and_blank_lines() {
    let names = parse_listing("* master\n\n  release-2\n");
    assert_eq!(names.len(), 2);
    assert!(names.contains("master"));
    assert!(names.contains("release-2"));
}
