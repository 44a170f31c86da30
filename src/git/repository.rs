use crate::error::{InstallError, Result};
use git2::build::CheckoutBuilder;
use git2::{Repository as Git2Repo, ResetType};
use std::path::Path;
use tracing::{debug, warn};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Updates the current branch to match its remote counterpart via fast-forward merge.
    ///
    /// Similar to `git pull --ff-only`: a branch that has diverged from the
    /// remote is left untouched. After a successful fast-forward the worktree
    /// is checked out to the new tip, since the build steps read files from it.
    fn fast_forward(&self, branch_name: &str, remote_name: &str) -> Result<()> {
        // Get the remote-tracking branch OID
        let remote_tracking_name = format!("{}/{}", remote_name, branch_name);
        let remote_ref = match self
            .repo
            .find_reference(&format!("refs/remotes/{}", remote_tracking_name))
        {
            Ok(r) => r,
            Err(_) => {
                // Remote branch doesn't exist, nothing to update
                return Ok(());
            }
        };

        let remote_oid = remote_ref.target().ok_or_else(|| {
            InstallError::remote(format!(
                "Remote {} reference is invalid",
                remote_tracking_name
            ))
        })?;

        let branch_ref_name = format!("refs/heads/{}", branch_name);
        let mut local_ref = self.repo.find_reference(&branch_ref_name).map_err(|e| {
            InstallError::repo(format!("Cannot find branch '{}': {}", branch_name, e))
        })?;

        let local_oid = match local_ref.target() {
            Some(oid) => oid,
            None => {
                // Local branch reference is invalid
                return Ok(());
            }
        };

        if local_oid == remote_oid {
            debug!("Branch '{}' is already up to date", branch_name);
            return Ok(());
        }

        // Check if we can fast-forward: remote must be reachable from local's perspective
        let can_fast_forward = self.repo.graph_descendant_of(remote_oid, local_oid)?;

        if !can_fast_forward {
            warn!(
                "Branch '{}' has diverged from {}, leaving it as is",
                branch_name, remote_tracking_name
            );
            return Ok(());
        }

        local_ref.set_target(
            remote_oid,
            &format!("fast-forward from {}", remote_tracking_name),
        )?;

        // The builds read source files from the worktree, so move it to the new tip
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo.checkout_head(Some(&mut checkout))?;

        debug!("Fast-forwarded '{}' to {}", branch_name, remote_oid);
        Ok(())
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn current_ref(&self) -> Result<String> {
        let head = self.repo.head()?;

        if self.repo.head_detached()? {
            let oid = head
                .target()
                .ok_or_else(|| InstallError::repo("HEAD has no target"))?;
            Ok(oid.to_string())
        } else {
            let shorthand = head
                .shorthand()
                .ok_or_else(|| InstallError::repo("HEAD name is not valid UTF-8"))?;
            Ok(shorthand.to_string())
        }
    }

    fn discard_changes(&self) -> Result<()> {
        // Stage everything first so untracked files are swept by the hard
        // reset, matching `git add -A && git reset --hard`.
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;

        let head = self.repo.revparse_single("HEAD")?;

        let mut checkout = CheckoutBuilder::new();
        checkout.force().remove_untracked(true);
        self.repo.reset(&head, ResetType::Hard, Some(&mut checkout))?;

        Ok(())
    }

    fn checkout(&self, refname: &str) -> Result<()> {
        let (object, reference) = self.repo.revparse_ext(refname).map_err(|e| {
            InstallError::repo(format!("Cannot resolve ref '{}': {}", refname, e))
        })?;

        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo.checkout_tree(&object, Some(&mut checkout))?;

        match reference {
            // Branches move HEAD symbolically so later commits stay on the branch
            Some(branch_ref) if branch_ref.is_branch() => {
                let name = branch_ref
                    .name()
                    .ok_or_else(|| InstallError::repo("Branch name is not valid UTF-8"))?;
                self.repo.set_head(name)?;
            }
            // Tags and raw commits leave HEAD detached at the underlying commit
            _ => {
                let commit = object.peel(git2::ObjectType::Commit)?;
                self.repo.set_head_detached(commit.id())?;
            }
        }

        debug!("Checked out '{}'", refname);
        Ok(())
    }

    fn pull(&self, remote_name: &str) -> Result<()> {
        if self.repo.head_detached()? {
            return Err(InstallError::remote(
                "Cannot pull with a detached HEAD, check out a branch first",
            ));
        }

        let head = self.repo.head()?;
        let branch_name = head
            .shorthand()
            .ok_or_else(|| InstallError::repo("HEAD name is not valid UTF-8"))?
            .to_string();

        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| InstallError::remote(format!("Remote '{}' not found", remote_name)))?;

        let mut fetch_options = git2::FetchOptions::new();

        // Set credentials callback for authentication
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            // SSH key authentication
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                // Try different key types in order of preference
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                // Try SSH agent as fallback
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            // Fall back to default credentials
            git2::Cred::default()
        });

        fetch_options.remote_callbacks(callbacks);

        // Use explicit refspecs to fetch all branches and tags from the remote.
        // The refspecs mean:
        // - "+refs/heads/*:refs/remotes/{remote_name}/*" - Fetch all remote branches
        // - "+refs/tags/*:refs/tags/*" - Fetch all tags
        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        let refspecs = &[refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];
        remote.fetch(refspecs, Some(&mut fetch_options), None).map_err(|e| {
            InstallError::remote(format!("Failed to fetch from remote '{}': {}", remote_name, e))
        })?;

        // After fetching, try to fast-forward the current branch with its remote counterpart
        self.fast_forward(&branch_name, remote_name)?;

        Ok(())
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}
