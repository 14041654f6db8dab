use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an account request.
///
/// Only two states exist. A request is created `Pending` by the
/// submission path and is moved to `AccountCreated` exactly once, by a
/// successful provisioning run. There is no other transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Awaiting administrative provisioning.
    Pending,
    /// Terminal: the OS account exists and the SSH key is installed.
    AccountCreated,
}

impl Status {
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::AccountCreated => f.write_str("AccountCreated"),
        }
    }
}

/// A single account request, as submitted through the signup form.
///
/// The serde field names are the on-disk record format shared with the
/// admin tool; renaming one is a breaking change for request
/// directories already on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// Free-text motivation from the submitter.
    #[serde(rename = "Why")]
    pub why: String,
    /// Raw key material as pasted into the form. May contain stray
    /// CR/LF bytes; these are only stripped at provisioning time.
    #[serde(rename = "SSHPublicKey")]
    pub ssh_public_key: String,
    #[serde(rename = "Status")]
    pub status: Status,
}

impl Request {
    /// Builds a new `Pending` request from submitted form fields.
    pub fn pending(
        username: impl Into<String>,
        email: impl Into<String>,
        why: impl Into<String>,
        ssh_public_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            why: why.into(),
            ssh_public_key: ssh_public_key.into(),
            status: Status::Pending,
        }
    }

    /// Presence check over the four submitted fields.
    ///
    /// Purely syntactic: email and key formats are not inspected here.
    /// A request failing this check is never persisted.
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty()
            && !self.email.is_empty()
            && !self.why.is_empty()
            && !self.ssh_public_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Request {
        Request::pending("name", "test@example.com", "foo bar baz", "123")
    }

    #[test]
    fn new_requests_start_pending() {
        assert_eq!(complete().status, Status::Pending);
    }

    #[test]
    fn complete_request_is_valid() {
        assert!(complete().is_valid());
    }

    #[test]
    fn any_empty_field_invalidates() {
        let blank_one: [fn(&mut Request); 4] = [
            |r| r.username.clear(),
            |r| r.email.clear(),
            |r| r.why.clear(),
            |r| r.ssh_public_key.clear(),
        ];
        for blank in blank_one {
            let mut request = complete();
            blank(&mut request);
            assert!(!request.is_valid(), "expected {request:?} to be invalid");
        }
    }

    #[test]
    fn status_serializes_by_variant_name() {
        assert_eq!(serde_json::to_string(&Status::Pending).unwrap(), "\"Pending\"");
        assert_eq!(
            serde_json::to_string(&Status::AccountCreated).unwrap(),
            "\"AccountCreated\""
        );
    }
}
