// HAL - hal-driver
// Module: file driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`FileDriver`]: open/close/read/write/seek, info queries, and
//! directory operations (spec §6, grounded on `flight/hal/file_driver.hpp`).

use alloc::string::String;
use alloc::vec::Vec;

use hal_error::Result;

use crate::driver::Driver;

/// How [`FileDriver::open`] should create/truncate/position the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Open for reading; fails if the file does not exist.
    Read,
    /// Open for writing, truncating any existing content.
    Write,
    /// Open for writing, positioned at the end of any existing content.
    Append,
    /// Open for both reading and writing without truncating.
    ReadWrite,
}

/// The reference point for [`FileDriver::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekFrom {
    /// Relative to the start of the file.
    Start,
    /// Relative to the current position.
    Current,
    /// Relative to the end of the file.
    End,
}

/// Opaque handle to an open file, valid only within the driver that opened
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(pub u32);

/// Metadata returned by [`FileDriver::info`].
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Size in bytes.
    pub size: u64,
    /// True if this path names a directory rather than a regular file.
    pub is_directory: bool,
    /// True if the underlying filesystem marks this path read-only.
    pub is_read_only: bool,
}

/// One entry returned by [`FileDriver::list_directory`].
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Entry name, relative to the directory listed.
    pub name: String,
    /// True if this entry is itself a directory.
    pub is_directory: bool,
}

/// What this backend's filesystem supports beyond the required surface.
#[derive(Debug, Clone, Copy)]
pub struct FileSystemCapabilities {
    /// True if [`FileDriver::map_file`] is implemented.
    pub supports_mmap: bool,
    /// True if [`FileDriver::lock_file`] is implemented.
    pub supports_locking: bool,
    /// True if reads/writes may be issued without blocking the caller.
    pub supports_async_io: bool,
}

/// File and directory access (spec §6).
pub trait FileDriver: Driver {
    /// What this backend's filesystem supports.
    fn capabilities(&self) -> FileSystemCapabilities;

    /// Open `path` with `mode`.
    fn open(&mut self, path: &str, mode: FileMode) -> Result<FileHandle>;
    /// Close a handle opened by this driver.
    fn close(&mut self, handle: FileHandle) -> Result<()>;

    /// Read up to `buffer.len()` bytes, returning the number actually read
    /// (`0` at end of file).
    fn read(&mut self, handle: FileHandle, buffer: &mut [u8]) -> Result<usize>;
    /// Write `data`, returning the number of bytes actually written.
    fn write(&mut self, handle: FileHandle, data: &[u8]) -> Result<usize>;
    /// Reposition the handle's cursor, returning the new absolute offset.
    fn seek(&mut self, handle: FileHandle, offset: i64, from: SeekFrom) -> Result<u64>;
    /// The handle's current absolute offset.
    fn tell(&self, handle: FileHandle) -> Result<u64>;

    /// Metadata for `path` without opening it.
    fn info(&self, path: &str) -> Result<FileInfo>;
    /// True if `path` names an existing file or directory.
    fn exists(&self, path: &str) -> bool;

    /// Create a directory at `path`. Fails with `invalid_parameter` if a
    /// parent component does not exist.
    fn create_directory(&mut self, path: &str) -> Result<()>;
    /// List `path`'s immediate children.
    fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>>;

    /// Map `length` bytes of `handle` starting at `offset` into memory,
    /// returning a [`crate::memory::MemoryRegion`]-style offset the caller
    /// reads through [`hal_memory`](https://docs.rs/hal-memory). Fails with
    /// `feature_not_supported` unless
    /// [`FileSystemCapabilities::supports_mmap`] is true.
    fn map_file(&mut self, handle: FileHandle, offset: u64, length: usize) -> Result<&[u8]>;
    /// Take an advisory lock on `handle`. Fails with
    /// `feature_not_supported` unless
    /// [`FileSystemCapabilities::supports_locking`] is true.
    fn lock_file(&mut self, handle: FileHandle, exclusive: bool) -> Result<()>;
}
