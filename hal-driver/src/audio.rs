// HAL - hal-driver
// Module: audio driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`AudioDriver`]: stream lifecycle, buffer submission, and mixing
//! controls (spec §6, grounded on `flight/hal/audio_driver.hpp`).

use hal_error::Result;

use crate::driver::Driver;

/// Opaque handle to a playback stream, valid only within the driver that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub u32);

/// Describes a stream to [`AudioDriver::create_stream`].
#[derive(Debug, Clone, Copy)]
pub struct StreamDesc {
    /// Samples per second.
    pub sample_rate: u32,
    /// Number of interleaved channels (1 = mono, 2 = stereo).
    pub channels: u8,
    /// Requested ring-buffer size in frames.
    pub buffer_frames: u32,
}

/// What this backend's mixer/output device supports.
#[derive(Debug, Clone, Copy)]
pub struct AudioCapabilities {
    /// Maximum simultaneous streams this backend can mix.
    pub max_streams: u32,
    /// True if per-stream 3D positioning is available.
    pub supports_3d_positioning: bool,
    /// True if a low-latency output path can be requested.
    pub supports_low_latency_mode: bool,
}

/// A stream's position in 3D space, consumed when
/// [`AudioCapabilities::supports_3d_positioning`] is true.
#[derive(Debug, Clone, Copy)]
pub struct Position3D {
    /// X coordinate in the listener's reference frame.
    pub x: f32,
    /// Y coordinate in the listener's reference frame.
    pub y: f32,
    /// Z coordinate in the listener's reference frame.
    pub z: f32,
}

/// Stream creation, playback control, and output mixing (spec §6).
pub trait AudioDriver: Driver {
    /// What this backend supports.
    fn capabilities(&self) -> AudioCapabilities;

    /// Open a new playback stream.
    fn create_stream(&mut self, desc: StreamDesc) -> Result<StreamHandle>;
    /// Close a stream opened by this driver.
    fn destroy_stream(&mut self, handle: StreamHandle);

    /// Begin or resume playback.
    fn play_stream(&mut self, handle: StreamHandle) -> Result<()>;
    /// Suspend playback without releasing buffered data.
    fn pause_stream(&mut self, handle: StreamHandle) -> Result<()>;
    /// Stop playback and discard buffered data.
    fn stop_stream(&mut self, handle: StreamHandle) -> Result<()>;

    /// Copy interleaved PCM samples into the stream's ring buffer.
    fn write_stream_data(&mut self, handle: StreamHandle, samples: &[i16]) -> Result<()>;
    /// Borrow the stream's write buffer directly, for backends that support
    /// zero-copy submission.
    fn get_stream_buffer(&mut self, handle: StreamHandle) -> Result<&mut [i16]>;
    /// Mark a buffer obtained from [`AudioDriver::get_stream_buffer`] as
    /// ready for playback.
    fn commit_stream_buffer(&mut self, handle: StreamHandle, frames_written: u32) -> Result<()>;

    /// Set one stream's output volume, `0.0..=1.0`.
    fn set_stream_volume(&mut self, handle: StreamHandle, volume: f32) -> Result<()>;
    /// Position a stream in 3D space. Fails with `feature_not_supported`
    /// unless [`AudioCapabilities::supports_3d_positioning`] is true.
    fn set_stream_position(&mut self, handle: StreamHandle, position: Position3D) -> Result<()>;

    /// Set the overall output volume, `0.0..=1.0`.
    fn set_master_volume(&mut self, volume: f32);
    /// The overall output volume.
    fn master_volume(&self) -> f32;

    /// Trade mixing latency for CPU/power cost. Fails with
    /// `feature_not_supported` unless
    /// [`AudioCapabilities::supports_low_latency_mode`] is true.
    fn set_latency_mode(&mut self, low_latency: bool) -> Result<()>;
}
