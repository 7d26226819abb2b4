//! Host-side error vocabulary
//!
//! Every host API failure is normalized into `HostError` before it reaches
//! the query engine; the guest-facing NTSTATUS translation lives in
//! [`crate::nt::status`].

use thiserror::Error;

/// Error vocabulary of the host file APIs.
///
/// Named variants cover the codes the status translator has explicit
/// mappings for; anything else travels as `Os` with the raw errno.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    #[error("invalid function")]
    InvalidFunction,

    #[error("file not found")]
    FileNotFound,

    #[error("path not found")]
    PathNotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("invalid handle")]
    InvalidHandle,

    #[error("not enough memory")]
    NotEnoughMemory,

    #[error("sharing violation")]
    SharingViolation,

    #[error("request not supported")]
    NotSupported,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("buffer overflow")]
    BufferOverflow,

    #[error("more data is available")]
    MoreData,

    #[error("call not implemented")]
    CallNotImplemented,

    #[error("privilege not held")]
    PrivilegeNotHeld,

    #[error("host error code {0}")]
    Os(i32),
}

impl HostError {
    /// Map a POSIX errno value into the host error vocabulary.
    #[cfg(unix)]
    pub fn from_errno(errno: i32) -> Self {
        match errno {
            libc::EBADF => HostError::InvalidHandle,
            libc::ENOENT => HostError::FileNotFound,
            libc::ENOTDIR => HostError::PathNotFound,
            libc::EACCES => HostError::AccessDenied,
            libc::EPERM => HostError::PrivilegeNotHeld,
            libc::ENOMEM => HostError::NotEnoughMemory,
            libc::EINVAL => HostError::InvalidParameter,
            libc::ENOSYS => HostError::CallNotImplemented,
            libc::EOPNOTSUPP => HostError::NotSupported,
            libc::ETXTBSY | libc::EBUSY => HostError::SharingViolation,
            other => HostError::Os(other),
        }
    }

    /// Grab the calling thread's current errno and map it.
    #[cfg(unix)]
    pub fn last_os_error() -> Self {
        Self::from_errno(
            std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or_default(),
        )
    }

    /// The closed set of errors that mean "this host call does not exist
    /// here" and permit the single legacy-query fallback. Terminal errors
    /// (access denied, not found, ...) are deliberately excluded.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            HostError::CallNotImplemented | HostError::InvalidFunction | HostError::NotSupported
        )
    }
}
