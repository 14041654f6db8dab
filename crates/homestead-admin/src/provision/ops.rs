use std::fs::{DirBuilder, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use nix::unistd::{Gid, Uid, User};

use super::ProvisionError;

/// Numeric owner of a provisioned account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub uid: u32,
    pub gid: u32,
}

/// The OS-level primitives the provisioning procedure depends on.
///
/// Split out as a trait so the procedure itself can be exercised in
/// tests without creating real accounts. [`HostOps`] is the production
/// implementation. All calls are synchronous and blocking, with no
/// timeout: a hung `adduser` hangs the tool.
pub trait AccountOps {
    /// Creates the OS account with logins disabled and no extra
    /// metadata.
    fn create_account(&self, username: &str) -> Result<(), ProvisionError>;

    /// Path of the `authorized_keys` file for `username`'s account.
    fn credential_path(&self, username: &str) -> PathBuf;

    /// Writes the key material to `path` with restrictive permissions,
    /// creating the parent `.ssh` directory first if needed.
    fn install_credential(&self, path: &Path, key: &[u8]) -> Result<(), ProvisionError>;

    /// Resolves the account's numeric uid and gid by name.
    fn resolve_owner(&self, username: &str) -> Result<Owner, ProvisionError>;

    /// Transfers ownership of `path` to `owner`.
    fn chown(&self, path: &Path, owner: Owner) -> Result<(), ProvisionError>;
}

/// [`AccountOps`] backed by the real host: `adduser`, the local user
/// database, and filesystem ownership calls.
#[derive(Debug, Clone)]
pub struct HostOps {
    home_root: PathBuf,
}

impl Default for HostOps {
    fn default() -> Self {
        Self {
            home_root: PathBuf::from("/home"),
        }
    }
}

impl HostOps {
    /// Overrides the root under which account home directories live.
    pub fn with_home_root(home_root: impl Into<PathBuf>) -> Self {
        Self {
            home_root: home_root.into(),
        }
    }
}

impl AccountOps for HostOps {
    fn create_account(&self, username: &str) -> Result<(), ProvisionError> {
        let output = Command::new("adduser")
            .args(["--disabled-login", "--gecos", "", username])
            .output()?;
        if !output.status.success() {
            return Err(ProvisionError::CommandFailed {
                command: "adduser".to_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }

    fn credential_path(&self, username: &str) -> PathBuf {
        self.home_root
            .join(username)
            .join(".ssh")
            .join("authorized_keys")
    }

    fn install_credential(&self, path: &Path, key: &[u8]) -> Result<(), ProvisionError> {
        if let Some(ssh_dir) = path.parent() {
            if !ssh_dir.exists() {
                create_private_dir(ssh_dir)?;
            }
        }
        let mut file = open_owner_only(path)?;
        file.write_all(key)?;
        Ok(())
    }

    fn resolve_owner(&self, username: &str) -> Result<Owner, ProvisionError> {
        let user = User::from_name(username)
            .map_err(|errno| std::io::Error::from_raw_os_error(errno as i32))?
            .ok_or_else(|| ProvisionError::UnknownAccount {
                username: username.to_owned(),
            })?;
        Ok(Owner {
            uid: user.uid.as_raw(),
            gid: user.gid.as_raw(),
        })
    }

    fn chown(&self, path: &Path, owner: Owner) -> Result<(), ProvisionError> {
        nix::unistd::chown(
            path,
            Some(Uid::from_raw(owner.uid)),
            Some(Gid::from_raw(owner.gid)),
        )
        .map_err(|errno| std::io::Error::from_raw_os_error(errno as i32))?;
        Ok(())
    }
}

fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    DirBuilder::new().recursive(true).mode(0o700).create(path)
}

fn open_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}
