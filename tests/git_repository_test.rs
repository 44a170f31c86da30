// tests/git_repository_test.rs
//
// Exercises Git2Repository against real repositories created on disk.
use cpython_install::build::{BuildDriver, MockBuilder};
use cpython_install::domain::{select_latest_per_minor, VersionBounds};
use cpython_install::git::{Git2Repository, Repository};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Helper to create a commit of a single file
fn commit_file(repo: &git2::Repository, name: &str, content: &str, message: &str) -> git2::Oid {
    let workdir = repo.workdir().expect("Repo should have a worktree");
    fs::write(workdir.join(name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get signature");

    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("Could not peel HEAD")],
        Err(_) => vec![],
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}

// Helper function to setup a temporary git repo with release tags
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = git2::Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let first = commit_file(&repo, "VERSION", "3.11.8\n", "Release 3.11.8");
    repo.tag_lightweight("v3.11.8", &repo.find_object(first, None).unwrap(), false)
        .expect("Could not create tag");

    let second = commit_file(&repo, "VERSION", "3.12.0\n", "Release 3.12.0");
    repo.tag_lightweight("v3.12.0", &repo.find_object(second, None).unwrap(), false)
        .expect("Could not create tag");

    // A tag selection must ignore
    repo.tag_lightweight("backup-2024", &repo.find_object(second, None).unwrap(), false)
        .expect("Could not create tag");

    temp_dir
}

fn branch_shorthand(path: &Path) -> String {
    let raw = git2::Repository::open(path).unwrap();
    let head = raw.head().unwrap();
    head.shorthand().unwrap().to_string()
}

#[test]
fn test_list_tags_returns_every_label() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    let mut tags = repo.list_tags().unwrap();
    tags.sort();

    assert_eq!(tags, vec!["backup-2024", "v3.11.8", "v3.12.0"]);
}

#[test]
fn test_current_ref_on_a_branch_is_the_shorthand() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    assert_eq!(
        repo.current_ref().unwrap(),
        branch_shorthand(temp_dir.path())
    );
}

#[test]
fn test_current_ref_when_detached_is_the_commit_id() {
    let temp_dir = setup_test_repo();

    let raw = git2::Repository::open(temp_dir.path()).unwrap();
    let commit_id = raw
        .revparse_single("v3.11.8")
        .unwrap()
        .peel(git2::ObjectType::Commit)
        .unwrap()
        .id();
    raw.set_head_detached(commit_id).unwrap();

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    assert_eq!(repo.current_ref().unwrap(), commit_id.to_string());
}

#[test]
fn test_checkout_tag_detaches_and_updates_worktree() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    repo.checkout("v3.11.8").unwrap();

    let contents = fs::read_to_string(temp_dir.path().join("VERSION")).unwrap();
    assert_eq!(contents, "3.11.8\n");

    let raw = git2::Repository::open(temp_dir.path()).unwrap();
    assert!(raw.head_detached().unwrap());
}

#[test]
fn test_checkout_branch_name_stays_on_the_branch() {
    let temp_dir = setup_test_repo();
    let branch = branch_shorthand(temp_dir.path());
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    repo.checkout("v3.11.8").unwrap();
    repo.checkout(&branch).unwrap();

    let raw = git2::Repository::open(temp_dir.path()).unwrap();
    assert!(!raw.head_detached().unwrap());
    assert_eq!(raw.head().unwrap().shorthand().unwrap(), branch);

    let contents = fs::read_to_string(temp_dir.path().join("VERSION")).unwrap();
    assert_eq!(contents, "3.12.0\n");
}

#[test]
fn test_discard_changes_sweeps_modified_and_untracked_files() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    fs::write(temp_dir.path().join("VERSION"), "dirty\n").unwrap();
    fs::write(temp_dir.path().join("junk.txt"), "build litter\n").unwrap();

    repo.discard_changes().unwrap();

    let contents = fs::read_to_string(temp_dir.path().join("VERSION")).unwrap();
    assert_eq!(contents, "3.12.0\n");
    assert!(!temp_dir.path().join("junk.txt").exists());
}

#[test]
fn test_checkout_unknown_ref_is_an_error() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    let err = repo.checkout("does-not-exist").unwrap_err();
    assert!(err.to_string().contains("Cannot resolve ref"));
}

#[test]
fn test_pull_with_detached_head_fails() {
    let temp_dir = setup_test_repo();

    let raw = git2::Repository::open(temp_dir.path()).unwrap();
    let commit_id = raw
        .revparse_single("v3.11.8")
        .unwrap()
        .peel(git2::ObjectType::Commit)
        .unwrap()
        .id();
    raw.set_head_detached(commit_id).unwrap();

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let err = repo.pull("origin").unwrap_err();
    assert!(err.to_string().contains("detached HEAD"));
}

#[test]
fn test_pull_from_unknown_remote_fails() {
    let temp_dir = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    let err = repo.pull("origin").unwrap_err();
    assert!(err.to_string().contains("Remote 'origin' not found"));
}

#[test]
fn test_driver_round_trip_on_a_real_repository() {
    let temp_dir = setup_test_repo();
    let branch = branch_shorthand(temp_dir.path());

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let builder = MockBuilder::new();

    let bounds = VersionBounds::new(None, None);
    let releases = select_latest_per_minor(&repo.list_tags().unwrap(), &bounds);
    assert_eq!(releases.len(), 2);

    let driver = BuildDriver::new(&repo, &builder);
    let report = driver.run(&releases).unwrap();

    assert_eq!(report.installed(), 2);
    assert_eq!(builder.built(), vec!["v3.12.0", "v3.11.8"]);

    // Back on the branch we started from, with the worktree at its tip
    let raw = git2::Repository::open(temp_dir.path()).unwrap();
    assert!(!raw.head_detached().unwrap());
    assert_eq!(raw.head().unwrap().shorthand().unwrap(), branch);

    let contents = fs::read_to_string(temp_dir.path().join("VERSION")).unwrap();
    assert_eq!(contents, "3.12.0\n");
}
