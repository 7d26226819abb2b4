#![allow(missing_docs)]
#![cfg(unix)]

use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::os::fd::AsRawFd;

use byteorder::{ByteOrder, LittleEndian};
use ntshim::nt::info::file_attributes;
use ntshim::{query_information, Handle, IoStatusBlock, NtStatus, UnixHost};

const BASIC: u32 = 4;
const STANDARD: u32 = 5;
const NAME: u32 = 9;
const POSITION: u32 = 14;
const ATTRIBUTE_TAG: u32 = 35;

fn handle_of(file: &File) -> Handle {
    Handle::from_raw(file.as_raw_fd() as usize)
}

fn query(file: &File, buffer: &mut [u8], class: u32) -> (NtStatus, u64) {
    let mut io_status = IoStatusBlock::default();
    let status = query_information(&UnixHost::new(), handle_of(file), &mut io_status, buffer, class);
    assert_eq!(status, io_status.status);
    (status, io_status.information)
}

#[test]
fn standard_info_of_hard_linked_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("payload.bin");
    let mut file = File::create(&path)?;
    file.write_all(&[0x5A; 42])?;
    file.sync_all()?;
    fs::hard_link(&path, dir.path().join("second"))?;
    fs::hard_link(&path, dir.path().join("third"))?;

    let file = File::open(&path)?;
    let mut buffer = [0u8; 24];
    let (status, information) = query(&file, &mut buffer, STANDARD);
    assert_eq!(status, NtStatus::Success);
    assert_eq!(information, 24);

    let allocation = LittleEndian::read_u64(&buffer[0..8]);
    let end_of_file = LittleEndian::read_u64(&buffer[8..16]);
    let links = LittleEndian::read_u32(&buffer[16..20]);
    assert_eq!(end_of_file, 42);
    assert!(allocation >= 42, "allocation {allocation}");
    assert_eq!(links, 3);
    assert_eq!(buffer[20], 0, "delete pending");
    assert_eq!(buffer[21], 0, "directory");
    Ok(())
}

#[test]
fn standard_info_of_directory() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let file = File::open(dir.path())?;
    let mut buffer = [0u8; 24];
    let (status, _) = query(&file, &mut buffer, STANDARD);
    assert_eq!(status, NtStatus::Success);
    assert_eq!(buffer[21], 1, "directory flag");
    Ok(())
}

#[test]
fn basic_info_reports_plausible_ticks() -> Result<(), Box<dyn Error>> {
    let file = tempfile::NamedTempFile::new()?;
    let mut buffer = [0u8; 40];
    let (status, information) = query(file.as_file(), &mut buffer, BASIC);
    assert_eq!(status, NtStatus::Success);
    assert_eq!(information, 40);

    // All four timestamps must land after 1970 in guest ticks.
    let epoch_1970 = 11_644_473_600u64 * 10_000_000;
    for field in 0..4 {
        let ticks = LittleEndian::read_u64(&buffer[field * 8..field * 8 + 8]);
        assert!(ticks > epoch_1970, "timestamp field {field}: {ticks}");
    }
    let attributes = LittleEndian::read_u32(&buffer[32..36]);
    assert_eq!(attributes & file_attributes::DIRECTORY, 0);
    assert_ne!(attributes, 0);
    Ok(())
}

#[test]
fn basic_info_short_buffer_is_rejected_without_host_call() -> Result<(), Box<dyn Error>> {
    let file = tempfile::NamedTempFile::new()?;
    let mut buffer = [0u8; 39];
    let (status, information) = query(file.as_file(), &mut buffer, BASIC);
    assert_eq!(status, NtStatus::InfoLengthMismatch);
    assert_eq!(information, 0);
    Ok(())
}

#[test]
fn attribute_tag_of_regular_file() -> Result<(), Box<dyn Error>> {
    let file = tempfile::NamedTempFile::new()?;
    let mut buffer = [0u8; 8];
    let (status, information) = query(file.as_file(), &mut buffer, ATTRIBUTE_TAG);
    assert_eq!(status, NtStatus::Success);
    assert_eq!(information, 8);
    assert_eq!(LittleEndian::read_u32(&buffer[4..8]), 0, "reparse tag");
    Ok(())
}

#[test]
fn position_probe_does_not_move_the_cursor() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cursor.bin");
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&path)?;
    file.write_all(&[0u8; 256])?;
    file.seek(SeekFrom::Start(100))?;

    let mut buffer = [0u8; 8];
    let (status, information) = query(&file, &mut buffer, POSITION);
    assert_eq!(status, NtStatus::Success);
    assert_eq!(information, 8);
    assert_eq!(LittleEndian::read_u64(&buffer), 100);
    assert_eq!(file.stream_position()?, 100);
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn name_info_round_trip_and_overflow() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("named.bin");
    File::create(&path)?;
    let file = File::open(&path)?;

    let expected = path.to_string_lossy().replace('/', "\\");
    let expected_bytes = expected.encode_utf16().count() * 2;

    let mut buffer = vec![0u8; 4 + expected_bytes + 32];
    let (status, information) = query(&file, &mut buffer, NAME);
    assert_eq!(status, NtStatus::Success);
    assert_eq!(information as usize, 4 + expected_bytes);

    let length = LittleEndian::read_u32(&buffer[0..4]) as usize;
    assert_eq!(length, expected_bytes);
    let units: Vec<u16> = buffer[4..4 + length]
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .collect();
    assert_eq!(String::from_utf16(&units)?, expected);

    // Undersized buffer: overflow with the full required length.
    let mut small = [0u8; 12];
    let (status, information) = query(&file, &mut small, NAME);
    assert_eq!(status, NtStatus::BufferOverflow);
    assert_eq!(information as usize, 4 + expected_bytes);
    assert_eq!(LittleEndian::read_u32(&small[0..4]) as usize, expected_bytes);
    Ok(())
}

#[test]
fn stale_descriptor_translates_to_invalid_handle() {
    let stale = Handle::from_raw(1_000_000);
    let mut io_status = IoStatusBlock::default();
    let mut buffer = [0u8; 24];
    let status = query_information(&UnixHost::new(), stale, &mut io_status, &mut buffer, STANDARD);
    assert_eq!(status, NtStatus::InvalidHandle);
    assert_eq!(io_status.information, 0);
}
