use anyhow::Result;
use clap::Parser;

use svn_mirror::config;
use svn_mirror::ui;
use svn_mirror::vcs::git_cli::{GitCommandClient, OutputMode};
use svn_mirror::workflow::{self, MirrorOptions};

#[derive(clap::Parser)]
#[command(
    name = "svn-mirror",
    about = "Mirror SVN repository history into git and publish it to a remote host"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Mirror only the named repository (repeatable)")]
    repo: Vec<String>,

    #[arg(long, help = "Preview what reconcile would create without making changes")]
    dry_run: bool,

    #[arg(long, help = "Stream version-control tool output instead of capturing it")]
    verbose: bool,

    #[arg(long, help = "Show configured repositories and exit")]
    list: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("svn-mirror {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if args.list {
        if config.repos.is_empty() {
            ui::display_error("No repositories configured in svnmirror.toml");
            std::process::exit(1);
        }
        ui::display_configured_repos(&config.repos);
        return Ok(());
    }

    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    // Select repositories to mirror, preserving configured order
    let repos: Vec<String> = if args.repo.is_empty() {
        config.repos.clone()
    } else {
        for name in &args.repo {
            if !config.repos.contains(name) {
                ui::display_error(&format!(
                    "Repository '{}' is not configured for mirroring",
                    name
                ));
                std::process::exit(1);
            }
        }
        config
            .repos
            .iter()
            .filter(|name| args.repo.contains(*name))
            .cloned()
            .collect()
    };

    if repos.is_empty() {
        ui::display_error("No repositories configured in svnmirror.toml");
        std::process::exit(1);
    }

    let output = if args.verbose {
        OutputMode::Inherit
    } else {
        OutputMode::Capture
    };
    let client = GitCommandClient::new(&config.root).with_output(output);
    let opts = MirrorOptions {
        dry_run: args.dry_run,
    };

    if args.dry_run {
        ui::display_status(&format!(
            "Dry run: checking {} repositories under {}",
            repos.len(),
            config.root.display()
        ));
    } else {
        ui::display_status(&format!(
            "Mirroring {} repositories under {}",
            repos.len(),
            config.root.display()
        ));
    }

    match workflow::mirror_all(&client, &config, &repos, &opts) {
        Ok(summaries) => {
            for summary in &summaries {
                ui::display_summary(summary);
            }
            if !args.dry_run {
                ui::display_success(&format!(
                    "All repositories pushed to remote '{}'",
                    config.publish.remote
                ));
            }
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            if let Some(stderr) = e.command_stderr() {
                eprintln!("{}", stderr);
            }
            std::process::exit(e.exit_code());
        }
    }
}
