use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cpython_install::build::{BuildDriver, BuildPipeline, CommandRunner};
use cpython_install::domain::{select_latest_per_minor, VersionBounds};
use cpython_install::git::{Git2Repository, Repository};
use cpython_install::{config, distro, ui};

#[derive(clap::Parser)]
#[command(
    name = "cpython-install",
    about = "Build and altinstall the latest CPython release of every minor line from a git checkout"
)]
struct Args {
    #[arg(short = 'd', long, help = "Path to the CPython git checkout")]
    repo_dir: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'm', long, help = "Lowest version to install, inclusive")]
    min_version: Option<String>,

    #[arg(short = 'M', long, help = "Highest version to install, inclusive")]
    max_version: Option<String>,

    #[arg(long, help = "Fast-forward from origin before selecting tags")]
    pull: bool,

    #[arg(
        long = "configure-flag",
        value_name = "FLAG",
        help = "Extra configure flag, repeatable"
    )]
    configure_flags: Vec<String>,

    #[arg(short = 'j', long, help = "Parallel make jobs")]
    jobs: Option<u32>,

    #[arg(long, help = "Skip distro detection and dependency installation")]
    skip_deps: bool,

    #[arg(short = 'y', long, help = "Skip confirmation prompts")]
    yes: bool,

    #[arg(long, help = "Show the selected releases without building")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("cpython-install {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let repo_dir = match args.repo_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => {
            ui::display_error("--repo-dir is required (path to a CPython checkout)");
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(&repo_dir) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    // Bounds: CLI wins over config, config over the built-in default
    let min_version = args
        .min_version
        .clone()
        .unwrap_or_else(|| config.versions.minimum.clone());
    let max_version = args.max_version.clone().or_else(|| config.versions.maximum.clone());

    let bounds = match VersionBounds::parse(Some(&min_version), max_version.as_deref()) {
        Ok(bounds) => bounds,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Pull before tag discovery so freshly published tags participate
    if args.pull {
        ui::display_status("Pulling latest changes from origin...");
        match repo.pull("origin") {
            Ok(()) => ui::display_success("Fast-forwarded from origin"),
            Err(e) => {
                ui::display_error(&format!("Pull failed: {}", e));
                std::process::exit(1);
            }
        }
    } else {
        ui::display_status("Skipping pull, using local tags");
    }

    let tags = match repo.list_tags() {
        Ok(tags) => tags,
        Err(e) => {
            ui::display_error(&format!("Failed to list tags: {}", e));
            std::process::exit(1);
        }
    };

    let releases = select_latest_per_minor(&tags, &bounds);

    if releases.is_empty() {
        ui::display_status("No release tags match the requested bounds, nothing to do");
        return Ok(());
    }

    ui::display_selected_releases(&releases);

    if args.dry_run {
        ui::display_status("Dry run, stopping before dependency installation and builds");
        return Ok(());
    }

    if !args.yes {
        let prompt = format!(
            "Build and altinstall {} release(s)? This can take hours",
            releases.len()
        );
        if !ui::confirm_action(&prompt)? {
            println!("Operation cancelled by user.");
            return Ok(());
        }
    }

    // Install build dependencies before the first configure run
    if args.skip_deps || config.behavior.skip_dependency_install {
        ui::display_status("Skipping build dependency installation");
    } else {
        let family = match distro::detect() {
            Ok(family) => family,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };

        ui::display_status(&format!(
            "Installing build dependencies ({} family)...",
            family.name()
        ));
        if let Err(e) = distro::install_build_dependencies(family, &CommandRunner::system()) {
            ui::display_error(&format!("Dependency installation failed: {}", e));
            std::process::exit(1);
        }
        ui::display_success("Build dependencies installed");
    }

    // Merge build settings: config flags first, then the repeatable CLI flags
    let mut build = config.build.clone();
    build.configure_flags.extend(args.configure_flags.iter().cloned());
    if args.jobs.is_some() {
        build.jobs = args.jobs;
    }

    let pipeline = BuildPipeline::new(&repo_dir, &build);
    let driver = BuildDriver::new(&repo, &pipeline);

    let report = match driver.run(&releases) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&format!("Failed to restore repository state: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_run_summary(&report);

    Ok(())
}
