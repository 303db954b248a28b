// HAL - hal-driver
// Module: input driver contract
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! [`InputDriver`]: polling, button/axis/pointer state, haptics, and
//! device enumeration (spec §6, grounded on `flight/hal/input_driver.hpp`).

use hal_error::Result;

use crate::driver::Driver;

/// Broad class of input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// A gamepad or joystick.
    Gamepad,
    /// A keyboard.
    Keyboard,
    /// A pointing device (mouse or trackball).
    Mouse,
    /// A touchscreen or trackpad.
    Touch,
}

/// A connected input device.
#[derive(Debug, Clone, Copy)]
pub struct DeviceInfo {
    /// Per-backend device id, stable for the life of the connection.
    pub id: u32,
    /// What class of device this is.
    pub kind: DeviceKind,
    /// True if this device can be rumbled via [`InputDriver::set_rumble`].
    pub supports_rumble: bool,
}

/// A pressed/released/held state, distinct from a boolean so callers can
/// detect edges without keeping their own previous-frame snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Not pressed.
    Released,
    /// Became pressed this poll.
    JustPressed,
    /// Held down since a prior poll.
    Held,
    /// Became released this poll.
    JustReleased,
}

/// One active touch contact.
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    /// Per-contact id, stable while the finger stays down.
    pub id: u32,
    /// X position in screen pixels.
    pub x: f32,
    /// Y position in screen pixels.
    pub y: f32,
}

/// What this backend's connected devices support.
#[derive(Debug, Clone, Copy)]
pub struct InputCapabilities {
    /// Maximum simultaneous gamepads this backend can track.
    pub max_gamepads: u32,
    /// True if any connected device reports multi-touch.
    pub supports_multi_touch: bool,
    /// True if any connected device supports haptic feedback.
    pub supports_haptics: bool,
}

/// Device polling and state queries (spec §6).
pub trait InputDriver: Driver {
    /// What this backend's connected devices support.
    fn capabilities(&self) -> InputCapabilities;
    /// Every currently connected device.
    fn connected_devices(&self) -> &[DeviceInfo];

    /// Refresh cached device state. Must be called once per frame before
    /// any `get_*_state` query reflects new input.
    fn poll(&mut self);

    /// A gamepad button's state. `button` is backend-defined (no fixed
    /// enumeration is imposed here since controller layouts vary by
    /// platform).
    fn button_state(&self, device_id: u32, button: u32) -> ButtonState;
    /// A gamepad axis value in `-1.0..=1.0` (or `0.0..=1.0` for triggers).
    fn axis_value(&self, device_id: u32, axis: u32) -> f32;

    /// Current pointer position in screen pixels.
    fn mouse_position(&self) -> (i32, i32);
    /// Currently active touch contacts.
    fn touch_points(&self) -> &[TouchPoint];

    /// Drive haptic feedback on `device_id`. Fails with
    /// `feature_not_supported` if the device cannot rumble.
    fn set_rumble(&mut self, device_id: u32, low_freq: f32, high_freq: f32, duration_ms: u32) -> Result<()>;
}
