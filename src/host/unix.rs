//! POSIX host backend
//!
//! Modern per-facet queries go through `statx` (Linux); the legacy
//! whole-file query is `fstat`, which every Unix answers. On non-Linux
//! hosts the modern calls report "call not implemented" so the engine's
//! legacy fallback carries the load.

use crate::error::HostError;
use crate::host::{
    Handle, HostAttributeTagInfo, HostBasicInfo, HostFileInformation, HostFiles, HostStandardInfo,
};
use crate::nt::info::{file_attributes, REPARSE_TAG_SYMLINK};
use crate::nt::time::ticks_from_unix;

/// Stateless backend over the calling process's file descriptors.
///
/// A [`Handle`]'s raw value is interpreted as a file descriptor; the
/// backend never takes ownership of it.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixHost;

impl UnixHost {
    pub fn new() -> Self {
        UnixHost
    }
}

fn fd(handle: Handle) -> libc::c_int {
    handle.as_raw() as libc::c_int
}

/// Synthesize guest attribute flags from a POSIX file mode.
fn attributes_from_mode(mode: u32) -> u32 {
    let mut attributes = 0;
    if mode & libc::S_IFMT as u32 == libc::S_IFDIR as u32 {
        attributes |= file_attributes::DIRECTORY;
    }
    if mode & libc::S_IFMT as u32 == libc::S_IFLNK as u32 {
        attributes |= file_attributes::REPARSE_POINT;
    }
    if mode & 0o222 == 0 {
        attributes |= file_attributes::READONLY;
    }
    if attributes == 0 {
        attributes = file_attributes::NORMAL;
    }
    attributes
}

#[cfg(target_os = "linux")]
fn query_statx(handle: Handle) -> Result<libc::statx, HostError> {
    let mut stx: libc::statx = unsafe { std::mem::zeroed() };
    let empty = c"";
    let ret = unsafe {
        libc::statx(
            fd(handle),
            empty.as_ptr(),
            libc::AT_EMPTY_PATH,
            libc::STATX_BASIC_STATS | libc::STATX_BTIME,
            &mut stx,
        )
    };
    if ret != 0 {
        let error = HostError::last_os_error();
        tracing::trace!(fd = handle.as_raw(), %error, "statx failed");
        return Err(error);
    }
    Ok(stx)
}

#[cfg(target_os = "linux")]
fn statx_ticks(ts: &libc::statx_timestamp) -> u64 {
    ticks_from_unix(ts.tv_sec, ts.tv_nsec)
}

fn query_fstat(handle: Handle) -> Result<libc::stat, HostError> {
    let mut st: libc::stat = unsafe { std::mem::zeroed() };
    if unsafe { libc::fstat(fd(handle), &mut st) } != 0 {
        return Err(HostError::last_os_error());
    }
    Ok(st)
}

impl HostFiles for UnixHost {
    fn basic_info(&self, handle: Handle) -> Result<HostBasicInfo, HostError> {
        #[cfg(target_os = "linux")]
        {
            let stx = query_statx(handle)?;
            // Filesystems without birth-time support leave STATX_BTIME
            // unset; the write time is the closest stand-in.
            let creation = if stx.stx_mask & libc::STATX_BTIME != 0 {
                statx_ticks(&stx.stx_btime)
            } else {
                statx_ticks(&stx.stx_mtime)
            };
            Ok(HostBasicInfo {
                creation_time: creation,
                last_access_time: statx_ticks(&stx.stx_atime),
                last_write_time: statx_ticks(&stx.stx_mtime),
                change_time: statx_ticks(&stx.stx_ctime),
                file_attributes: attributes_from_mode(stx.stx_mode as u32),
            })
        }
        #[cfg(not(target_os = "linux"))]
        {
            let _ = handle;
            Err(HostError::CallNotImplemented)
        }
    }

    fn standard_info(&self, handle: Handle) -> Result<HostStandardInfo, HostError> {
        #[cfg(target_os = "linux")]
        {
            let stx = query_statx(handle)?;
            Ok(HostStandardInfo {
                allocation_size: stx.stx_blocks * 512,
                end_of_file: stx.stx_size,
                number_of_links: stx.stx_nlink,
                // An open file whose last name is gone is delete-pending
                // in guest terms.
                delete_pending: stx.stx_nlink == 0,
                directory: stx.stx_mode as u32 & libc::S_IFMT as u32 == libc::S_IFDIR as u32,
            })
        }
        #[cfg(not(target_os = "linux"))]
        {
            let _ = handle;
            Err(HostError::CallNotImplemented)
        }
    }

    fn attribute_tag_info(&self, handle: Handle) -> Result<HostAttributeTagInfo, HostError> {
        #[cfg(target_os = "linux")]
        {
            let stx = query_statx(handle)?;
            let attributes = attributes_from_mode(stx.stx_mode as u32);
            let reparse_tag = if attributes & file_attributes::REPARSE_POINT != 0 {
                REPARSE_TAG_SYMLINK
            } else {
                0
            };
            Ok(HostAttributeTagInfo {
                file_attributes: attributes,
                reparse_tag,
            })
        }
        #[cfg(not(target_os = "linux"))]
        {
            let _ = handle;
            Err(HostError::CallNotImplemented)
        }
    }

    fn by_handle_info(&self, handle: Handle) -> Result<HostFileInformation, HostError> {
        let st = query_fstat(handle)?;
        Ok(HostFileInformation {
            file_attributes: attributes_from_mode(st.st_mode as u32),
            // fstat has no birth time; mtime stands in, matching the
            // modern path on filesystems without birth-time support.
            creation_time: ticks_from_unix(st.st_mtime, st.st_mtime_nsec as u32),
            last_access_time: ticks_from_unix(st.st_atime, st.st_atime_nsec as u32),
            last_write_time: ticks_from_unix(st.st_mtime, st.st_mtime_nsec as u32),
            file_size: st.st_size as u64,
            number_of_links: st.st_nlink as u32,
        })
    }

    fn current_offset(&self, handle: Handle) -> Result<u64, HostError> {
        // Relative seek by zero: reports the cursor without moving it.
        let offset = unsafe { libc::lseek(fd(handle), 0, libc::SEEK_CUR) };
        if offset < 0 {
            return Err(HostError::last_os_error());
        }
        Ok(offset as u64)
    }

    fn file_name(&self, handle: Handle) -> Result<Vec<u16>, HostError> {
        #[cfg(target_os = "linux")]
        {
            // Validate the descriptor first so a stale fd reports
            // invalid-handle rather than a proc-path lookup error.
            query_fstat(handle)?;
            let link = format!("/proc/self/fd/{}", fd(handle));
            let path = std::fs::read_link(link).map_err(|e| {
                HostError::from_errno(e.raw_os_error().unwrap_or(libc::EINVAL))
            })?;
            // Guest-style name: backslash-separated.
            let name = path.to_string_lossy().replace('/', "\\");
            Ok(name.encode_utf16().collect())
        }
        #[cfg(not(target_os = "linux"))]
        {
            let _ = handle;
            Err(HostError::CallNotImplemented)
        }
    }
}
