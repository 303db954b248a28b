// HAL - hal-driver
// Module: video driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`VideoDriver`]: frame presentation, GPU resource creation, and
//! command-buffer draw submission (spec §6, grounded on
//! `flight/hal/video_driver.hpp`).

use hal_error::Result;

use crate::driver::Driver;

/// Pixel formats the core names. Backends are free to support formats
/// outside this set internally; this is only the set the core contract
/// can query and request by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 5:6:5 packed RGB, no alpha.
    R5G6B5,
    /// 8:8:8:8 RGBA, the common desktop default.
    R8G8B8A8,
    /// Compressed S3TC/DXT1, common on desktop GPUs.
    Dxt1,
    /// PowerVR texture compression, used on Dreamcast-class hardware.
    Pvrtc4,
}

/// Draw primitive topology for [`CommandBuffer::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Unconnected points.
    Points,
    /// Independent line segments.
    Lines,
    /// Independent triangles.
    Triangles,
    /// A connected triangle strip.
    TriangleStrip,
}

/// Opaque handle to a GPU texture, valid only within the driver that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque handle to a GPU vertex/index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Opaque handle to a compiled shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Display mode and backbuffer configuration passed to
/// [`VideoDriver::initialize_display`].
#[derive(Debug, Clone, Copy)]
pub struct VideoConfig {
    /// Backbuffer width in pixels.
    pub width: u32,
    /// Backbuffer height in pixels.
    pub height: u32,
    /// Whether to request exclusive fullscreen.
    pub fullscreen: bool,
    /// Whether to synchronize `present` to the display's refresh rate.
    pub vsync: bool,
}

/// What this backend's GPU (or software rasterizer) can do.
#[derive(Debug, Clone, Copy)]
pub struct VideoCapabilities {
    /// Largest square texture dimension, in texels.
    pub max_texture_size: u32,
    /// True if fragment shaders are programmable rather than fixed-function.
    pub supports_fragment_shaders: bool,
    /// True if this backend supports `TriangleStrip`/instancing-style batching.
    pub supports_instancing: bool,
}

/// Describes a texture to [`VideoDriver::create_texture`].
#[derive(Debug, Clone, Copy)]
pub struct TextureDesc {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Pixel layout.
    pub format: PixelFormat,
    /// True if this texture will be bound as a render target.
    pub is_render_target: bool,
}

/// Describes a vertex/index buffer to [`VideoDriver::create_buffer`].
#[derive(Debug, Clone, Copy)]
pub struct BufferDesc {
    /// Size in bytes.
    pub size: usize,
    /// True if the buffer will be rewritten frequently (e.g. streaming
    /// vertex data) rather than uploaded once.
    pub is_dynamic: bool,
}

/// Records draw state and submission calls for one frame. Obtained from
/// [`VideoDriver::begin_frame`] and submitted via
/// [`VideoDriver::end_frame`].
pub trait CommandBuffer {
    /// Set the viewport rectangle, in pixels.
    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32);
    /// Clear the current render target to `color` (packed RGBA).
    fn clear(&mut self, color: u32);
    /// Bind `buffer` as the vertex source for subsequent draws.
    fn set_vertex_buffer(&mut self, buffer: BufferHandle);
    /// Bind `shader` for subsequent draws.
    fn set_shader(&mut self, shader: ShaderHandle);
    /// Submit a non-indexed draw call.
    fn draw(&mut self, kind: PrimitiveKind, first: u32, count: u32);
    /// Submit an indexed draw call against the currently bound index buffer.
    fn draw_indexed(&mut self, kind: PrimitiveKind, count: u32, offset: u32);
}

/// Frame presentation, GPU resource creation, and draw submission
/// (spec §6).
pub trait VideoDriver: Driver {
    /// Create the display surface/backbuffer.
    fn initialize_display(&mut self, config: VideoConfig) -> Result<()>;
    /// What this backend supports.
    fn capabilities(&self) -> VideoCapabilities;
    /// True if `format` can be sampled or rendered to by this backend.
    fn supports_format(&self, format: PixelFormat) -> bool;

    /// Start recording a frame's draw commands.
    fn begin_frame(&mut self) -> Result<&mut dyn CommandBuffer>;
    /// Finish recording and submit the frame's commands to the GPU.
    fn end_frame(&mut self) -> Result<()>;
    /// Present the completed frame to the display.
    fn present(&mut self);

    /// Upload a new texture.
    fn create_texture(&mut self, desc: TextureDesc) -> Result<TextureHandle>;
    /// Upload a new vertex/index buffer.
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<BufferHandle>;
    /// Compile a shader from backend-specific source.
    fn create_shader(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ShaderHandle>;

    /// Release a texture created by this driver.
    fn destroy_texture(&mut self, handle: TextureHandle);
    /// Release a buffer created by this driver.
    fn destroy_buffer(&mut self, handle: BufferHandle);
    /// Release a shader created by this driver.
    fn destroy_shader(&mut self, handle: ShaderHandle);
}
