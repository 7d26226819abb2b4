//! ntshim - NT file-information compatibility layer
//!
//! Answers file-metadata queries from a guest expecting the NT
//! file-introspection protocol by querying the POSIX host underneath and
//! re-encoding the results into the guest's binary structures and NTSTATUS
//! vocabulary.
//!
//! # Features
//!
//! - **Information classes**: Basic, Standard, Position, Name, and
//!   AttributeTag queries with byte-exact output layouts
//! - **Two-tier host probing**: modern per-facet queries with a single
//!   legacy whole-file fallback when the host lacks the modern call
//! - **Status translation**: a total host-error to NTSTATUS mapping
//! - **Tick time**: 100ns-tick conversions between the 1601 and 1970 epochs
//! - **Bitmap runs**: caller-owned bit-vector range operations for
//!   handle/slot bookkeeping
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::os::fd::AsRawFd;
//! use ntshim::{query_information, Handle, IoStatusBlock, UnixHost};
//!
//! let file = File::open("/tmp/data.bin")?;
//! let handle = Handle::from_raw(file.as_raw_fd() as usize);
//!
//! let mut io_status = IoStatusBlock::default();
//! let mut buffer = [0u8; 24];
//! // 5 = standard information: sizes, link count, directory flag
//! let status = query_information(&UnixHost::new(), handle, &mut io_status, &mut buffer, 5);
//!
//! assert!(status.is_success());
//! println!("end of file: {}", u64::from_le_bytes(buffer[8..16].try_into()?));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod host;
pub mod nt;
pub mod query;

// Re-export main types
pub use error::HostError;
pub use host::{Handle, HostFiles};
#[cfg(unix)]
pub use host::UnixHost;
pub use nt::bitmap::Bitmap;
pub use nt::info::FileInformationClass;
pub use nt::status::NtStatus;
pub use nt::time::seconds_since_1970;
pub use query::{query_information, IoStatusBlock};
