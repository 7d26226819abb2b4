//! File-information query engine
//!
//! Validates the guest's request, dispatches by information class, probes
//! the modern host query first and falls back to the legacy whole-file
//! query only for the closed "unsupported" error set, then encodes the
//! result into the caller's buffer.

use crate::error::HostError;
use crate::host::{Handle, HostBasicInfo, HostFileInformation, HostFiles};
use crate::nt::info::{
    file_attributes, write_name_info, FileAttributeTagInformation, FileBasicInformation,
    FileInformationClass, FilePositionInformation, FileStandardInformation, NAME_INFO_PREFIX,
};
use crate::nt::status::NtStatus;

// ============================================================================
// I/O Status Block
// ============================================================================

/// Result block handed back to the guest alongside the return status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoStatusBlock {
    pub status: NtStatus,
    /// Bytes produced in the caller's buffer.
    pub information: u64,
}

impl Default for IoStatusBlock {
    fn default() -> Self {
        Self {
            status: NtStatus::Success,
            information: 0,
        }
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Answer a guest file-information query.
///
/// `class_value` is the raw information-class ordinal as the guest passed
/// it. Both the return value and `io_status.status` carry the final
/// status; `io_status.information` holds the bytes written (zero on every
/// failure except a name-query overflow, which reports the total required
/// length instead).
pub fn query_information<H: HostFiles>(
    host: &H,
    handle: Handle,
    io_status: &mut IoStatusBlock,
    buffer: &mut [u8],
    class_value: u32,
) -> NtStatus {
    if handle.is_null() {
        return complete(io_status, NtStatus::InvalidParameter, 0);
    }

    let Some(class) = FileInformationClass::from_u32(class_value) else {
        return complete(io_status, NtStatus::InvalidInfoClass, 0);
    };

    if let Some(size) = class.fixed_size() {
        if buffer.len() < size {
            return complete(io_status, NtStatus::InfoLengthMismatch, 0);
        }
    }

    tracing::trace!(
        ?class,
        handle = handle.as_raw(),
        buffer_len = buffer.len(),
        "query information"
    );

    let (status, written) = match class {
        FileInformationClass::Basic => query_basic(host, handle, buffer),
        FileInformationClass::Standard => query_standard(host, handle, buffer),
        FileInformationClass::AttributeTag => query_attribute_tag(host, handle, buffer),
        FileInformationClass::Position => query_position(host, handle, buffer),
        FileInformationClass::Name => query_name(host, handle, buffer),
    };
    complete(io_status, status, written)
}

fn complete(io_status: &mut IoStatusBlock, status: NtStatus, written: usize) -> NtStatus {
    io_status.status = status;
    io_status.information = written as u64;
    status
}

// ============================================================================
// Modern/Legacy Probe
// ============================================================================

/// Ordered host probe: the modern facet query first, then — only when it
/// failed with an "unsupported" error — exactly one legacy whole-file
/// query, re-derived into the facet by `derive`. Any other modern failure,
/// and any legacy failure, surfaces unchanged.
fn query_with_fallback<T>(
    modern: impl FnOnce() -> Result<T, HostError>,
    legacy: impl FnOnce() -> Result<HostFileInformation, HostError>,
    derive: impl FnOnce(HostFileInformation) -> T,
) -> Result<T, HostError> {
    match modern() {
        Ok(value) => Ok(value),
        Err(error) if error.is_unsupported() => {
            tracing::debug!(%error, "modern host query unavailable, trying legacy query");
            legacy().map(derive)
        }
        Err(error) => Err(error),
    }
}

// ============================================================================
// Per-Class Handlers
// ============================================================================

fn query_basic<H: HostFiles>(host: &H, handle: Handle, buffer: &mut [u8]) -> (NtStatus, usize) {
    let result = query_with_fallback(
        || host.basic_info(handle),
        || host.by_handle_info(handle),
        |legacy| HostBasicInfo {
            creation_time: legacy.creation_time,
            last_access_time: legacy.last_access_time,
            last_write_time: legacy.last_write_time,
            // The legacy query has no change-time concept.
            change_time: legacy.last_write_time,
            file_attributes: legacy.file_attributes,
        },
    );
    match result {
        Ok(info) => encode(
            FileBasicInformation {
                creation_time: info.creation_time,
                last_access_time: info.last_access_time,
                last_write_time: info.last_write_time,
                change_time: info.change_time,
                file_attributes: info.file_attributes,
            }
            .write_to(buffer),
        ),
        Err(error) => (NtStatus::from_host(error), 0),
    }
}

fn query_standard<H: HostFiles>(host: &H, handle: Handle, buffer: &mut [u8]) -> (NtStatus, usize) {
    let result = query_with_fallback(
        || host.standard_info(handle),
        || host.by_handle_info(handle),
        |legacy| crate::host::HostStandardInfo {
            // One size field in the legacy query; report it for both.
            allocation_size: legacy.file_size,
            end_of_file: legacy.file_size,
            number_of_links: legacy.number_of_links,
            delete_pending: false,
            directory: legacy.file_attributes & file_attributes::DIRECTORY != 0,
        },
    );
    match result {
        Ok(info) => encode(
            FileStandardInformation {
                allocation_size: info.allocation_size,
                end_of_file: info.end_of_file,
                number_of_links: info.number_of_links,
                delete_pending: info.delete_pending,
                directory: info.directory,
            }
            .write_to(buffer),
        ),
        Err(error) => (NtStatus::from_host(error), 0),
    }
}

fn query_attribute_tag<H: HostFiles>(
    host: &H,
    handle: Handle,
    buffer: &mut [u8],
) -> (NtStatus, usize) {
    let result = query_with_fallback(
        || host.attribute_tag_info(handle),
        || host.by_handle_info(handle),
        |legacy| crate::host::HostAttributeTagInfo {
            file_attributes: legacy.file_attributes,
            // The legacy query cannot report reparse data.
            reparse_tag: 0,
        },
    );
    match result {
        Ok(info) => encode(
            FileAttributeTagInformation {
                file_attributes: info.file_attributes,
                reparse_tag: info.reparse_tag,
            }
            .write_to(buffer),
        ),
        Err(error) => (NtStatus::from_host(error), 0),
    }
}

fn query_position<H: HostFiles>(host: &H, handle: Handle, buffer: &mut [u8]) -> (NtStatus, usize) {
    match host.current_offset(handle) {
        Ok(offset) => encode(
            FilePositionInformation {
                current_byte_offset: offset,
            }
            .write_to(buffer),
        ),
        Err(error) => (NtStatus::from_host(error), 0),
    }
}

fn query_name<H: HostFiles>(host: &H, handle: Handle, buffer: &mut [u8]) -> (NtStatus, usize) {
    if buffer.len() < NAME_INFO_PREFIX {
        return (NtStatus::InfoLengthMismatch, 0);
    }
    match host.file_name(handle) {
        Ok(name) => match write_name_info(buffer, &name) {
            // Truncated: fail with overflow but report the total length
            // the caller should retry with.
            Some(enc) if enc.truncated => (NtStatus::BufferOverflow, enc.required),
            Some(enc) => (NtStatus::Success, enc.written),
            None => (NtStatus::InfoLengthMismatch, 0),
        },
        Err(error) => (NtStatus::from_host(error), 0),
    }
}

fn encode(written: Option<usize>) -> (NtStatus, usize) {
    match written {
        Some(written) => (NtStatus::Success, written),
        // Unreachable for fixed classes (length is pre-validated), kept
        // as the failure contract for the encoders.
        None => (NtStatus::InfoLengthMismatch, 0),
    }
}
