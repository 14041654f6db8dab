use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use homestead_core::{Error, FsStore, MemStore, Request, RequestId, RequestStore, Status};
use tempfile::TempDir;

use super::*;

fn alice() -> Request {
    Request::pending("alice", "a@example.com", "testing", "ssh-ed25519 AAAA")
}

/// Records every OS call instead of performing it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OsCall {
    CreateAccount(String),
    InstallCredential(PathBuf, Vec<u8>),
    ResolveOwner(String),
    Chown(PathBuf, Owner),
}

#[derive(Default)]
struct RecordingOps {
    calls: Mutex<Vec<OsCall>>,
}

impl RecordingOps {
    fn calls(&self) -> Vec<OsCall> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OsCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AccountOps for RecordingOps {
    fn create_account(&self, username: &str) -> Result<(), ProvisionError> {
        self.lock().push(OsCall::CreateAccount(username.to_owned()));
        Ok(())
    }

    fn credential_path(&self, username: &str) -> PathBuf {
        PathBuf::from(format!("/home/{username}/.ssh/authorized_keys"))
    }

    fn install_credential(&self, path: &Path, key: &[u8]) -> Result<(), ProvisionError> {
        self.lock()
            .push(OsCall::InstallCredential(path.to_owned(), key.to_vec()));
        Ok(())
    }

    fn resolve_owner(&self, username: &str) -> Result<Owner, ProvisionError> {
        self.lock().push(OsCall::ResolveOwner(username.to_owned()));
        Ok(Owner { uid: 1042, gid: 1042 })
    }

    fn chown(&self, path: &Path, owner: Owner) -> Result<(), ProvisionError> {
        self.lock().push(OsCall::Chown(path.to_owned(), owner));
        Ok(())
    }
}

#[test]
fn load_failure_is_fatal() {
    let store = MemStore::new();
    let ops = RecordingOps::default();
    let err = run(&store, &ops, RequestId::generate(), true).unwrap_err();
    assert!(matches!(err, ProvisionError::Store(Error::NotFound { .. })));
    assert!(ops.calls().is_empty());
}

#[test]
fn non_pending_request_is_rejected_before_any_os_call() {
    let store = MemStore::new();
    let mut request = alice();
    request.status = Status::AccountCreated;
    let id = store.save(&request).unwrap();

    let ops = RecordingOps::default();
    let err = run(&store, &ops, id, true).unwrap_err();
    assert!(matches!(
        err,
        ProvisionError::NotPending { id: got, status: Status::AccountCreated } if got == id
    ));
    assert!(ops.calls().is_empty());
}

#[test]
fn dry_run_prints_and_touches_nothing() {
    let store = MemStore::new();
    let id = store.save(&alice()).unwrap();

    let ops = RecordingOps::default();
    match run(&store, &ops, id, false).unwrap() {
        Outcome::DryRun(request) => assert_eq!(request, alice()),
        other => panic!("expected dry run, got {other:?}"),
    }
    assert!(ops.calls().is_empty());
    assert_eq!(store.load(id).unwrap().status, Status::Pending);
}

#[test]
fn execute_runs_the_full_procedure_in_order() {
    let store = MemStore::new();
    let id = store.save(&alice()).unwrap();

    let ops = RecordingOps::default();
    let outcome = run(&store, &ops, id, true).unwrap();

    let key_path = PathBuf::from("/home/alice/.ssh/authorized_keys");
    let ssh_dir = PathBuf::from("/home/alice/.ssh");
    let owner = Owner { uid: 1042, gid: 1042 };
    assert_eq!(
        ops.calls(),
        vec![
            OsCall::CreateAccount("alice".to_owned()),
            OsCall::InstallCredential(key_path.clone(), b"ssh-ed25519 AAAA".to_vec()),
            OsCall::ResolveOwner("alice".to_owned()),
            OsCall::Chown(key_path.clone(), owner),
            OsCall::Chown(ssh_dir, owner),
        ]
    );

    match outcome {
        Outcome::Provisioned { request, credential_path } => {
            assert_eq!(request.status, Status::AccountCreated);
            assert_eq!(credential_path, key_path);
        }
        other => panic!("expected provisioned, got {other:?}"),
    }
    assert_eq!(store.load(id).unwrap().status, Status::AccountCreated);
}

#[test]
fn key_with_platform_line_endings_is_normalized() {
    let store = MemStore::new();
    let mut request = alice();
    request.ssh_public_key = "ssh-ed25519 AAAA\r\nBBBB".to_owned();
    let id = store.save(&request).unwrap();

    let ops = RecordingOps::default();
    run(&store, &ops, id, true).unwrap();

    let installed = ops
        .calls()
        .into_iter()
        .find_map(|call| match call {
            OsCall::InstallCredential(_, key) => Some(key),
            _ => None,
        })
        .expect("no credential installed");
    assert_eq!(installed, b"ssh-ed25519 AAAABBBB");
}

#[test]
fn normalize_strips_only_cr_and_lf() {
    assert_eq!(
        normalize_key("ssh-ed25519 AAAA\r\nBBBB"),
        "ssh-ed25519 AAAABBBB"
    );
    assert_eq!(normalize_key("a\nb\rc\r\n"), "abc");
    assert_eq!(normalize_key("tabs\tand spaces stay"), "tabs\tand spaces stay");
}

#[test]
fn pending_worklist_reports_only_pending_records() {
    let store = MemStore::new();
    let pending_id = store.save(&alice()).unwrap();
    let mut done = alice();
    done.username = "bob".to_owned();
    done.status = Status::AccountCreated;
    store.save(&done).unwrap();

    let worklist = pending(&store).unwrap();
    assert_eq!(worklist, vec![("alice".to_owned(), pending_id)]);
}

#[test]
fn pending_worklist_skips_unreadable_records() {
    let dir = TempDir::new().unwrap();
    let store = FsStore::open(dir.path()).unwrap();
    let good = store.save(&alice()).unwrap();
    // A corrupt record must not hide the rest of the worklist.
    std::fs::write(
        dir.path().join(RequestId::generate().file_name()),
        b"{ not json",
    )
    .unwrap();

    let worklist = pending(&store).unwrap();
    assert_eq!(worklist, vec![("alice".to_owned(), good)]);
}

#[test]
fn end_to_end_against_the_filesystem_store() {
    let dir = TempDir::new().unwrap();
    let store = FsStore::open(dir.path().join("requests")).unwrap();
    let id = store.save(&alice()).unwrap();

    let ops = RecordingOps::default();
    run(&store, &ops, id, true).unwrap();

    // The status survives a fresh store over the same directory.
    let reopened = FsStore::open(dir.path().join("requests")).unwrap();
    assert_eq!(reopened.load(id).unwrap().status, Status::AccountCreated);

    // Provisioning the same id again is rejected up front.
    let ops = RecordingOps::default();
    let err = run(&reopened, &ops, id, true).unwrap_err();
    assert!(matches!(err, ProvisionError::NotPending { .. }));
    assert!(ops.calls().is_empty());
}

#[test]
fn host_ops_paths_follow_the_home_layout() {
    let ops = HostOps::default();
    assert_eq!(
        ops.credential_path("alice"),
        PathBuf::from("/home/alice/.ssh/authorized_keys")
    );
}

#[test]
fn host_ops_installs_credentials_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    let ops = HostOps::with_home_root(home.path());
    std::fs::create_dir(home.path().join("alice")).unwrap();

    let path = ops.credential_path("alice");
    ops.install_credential(&path, b"ssh-ed25519 AAAA").unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"ssh-ed25519 AAAA");
    let file_mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(file_mode & 0o777, 0o600);
    let dir_mode = std::fs::metadata(path.parent().unwrap())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(dir_mode & 0o777, 0o700);
}
