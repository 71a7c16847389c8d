//! Terminal output formatting.
//!
//! Pure display functions; nothing here prompts or reads input. The mirror
//! job is meant to run unattended, so output is a handful of status lines and
//! a per-repository summary.

use console::style;

use crate::workflow::MirrorSummary;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display the repositories configured for mirroring.
pub fn display_configured_repos(repos: &[String]) {
    println!("{}", style("Configured repositories:").bold());
    for repo in repos {
        println!("  - {}", repo);
    }
}

/// Display the outcome of mirroring one repository.
///
/// Lists every branch and tag created; under dry-run the created refs are the
/// ones a real run would create.
pub fn display_summary(summary: &MirrorSummary) {
    let verb = if summary.pushed { "mirrored" } else { "would mirror" };
    display_success(&format!(
        "{}: {} ({} branch(es), {} tag(s))",
        summary.repo,
        verb,
        summary.branches_created.len(),
        summary.tags_created.len(),
    ));
    for branch in &summary.branches_created {
        println!("    branch {}", branch);
    }
    for tag in &summary.tags_created {
        println!("    tag    {}", tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }

    #[test]
    fn test_display_summary() {
        display_summary(&MirrorSummary {
            repo: "sqlalchemy".to_string(),
            branches_created: vec!["release-2".to_string()],
            tags_created: vec!["v1.0".to_string()],
            pushed: true,
        });
    }
}
