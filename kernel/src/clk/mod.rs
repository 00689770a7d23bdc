// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Clock framework.
//!
//! A clock driver implements [`ClkOps`] and hands its hardware to a [`Clk`],
//! which owns the fixed parent rate and serializes every operation so a
//! rate change always runs to completion before the next one starts.

use crate::{
    config::MAX_CLK_NAME_LEN,
    error::{code, Result},
    sync::SpinLock,
};
use core::sync::atomic::{AtomicU32, Ordering};

/// Operations a clock driver provides to the framework.
pub trait ClkOps: Send {
    /// Computes the current output rate from the hardware state.
    fn recalc_rate(&self, parent_rate: u32) -> u32;

    /// Returns the supported rate closest to `rate`.
    fn round_rate(&self, rate: u32, parent_rate: u32) -> Result<u32>;

    /// Programs the hardware for `rate`.
    fn set_rate(&mut self, rate: u32, parent_rate: u32) -> Result<()>;
}

/// A registered clock.
#[derive(Debug)]
pub struct Clk<T: ClkOps> {
    name: &'static str,
    parent_rate: u32,
    enable_count: AtomicU32,
    hw: SpinLock<T>,
}

impl<T: ClkOps> Clk<T> {
    /// Names longer than [`MAX_CLK_NAME_LEN`] bytes are cut short.
    pub fn new(name: &'static str, parent_rate: u32, hw: T) -> Self {
        let name = truncate_name(name);
        Self {
            name,
            parent_rate,
            enable_count: AtomicU32::new(0),
            hw: SpinLock::new(hw),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent_rate(&self) -> u32 {
        self.parent_rate
    }

    /// The PLLs driven through this framework have no gate, so enabling
    /// only tracks users.
    pub fn prepare_enable(&self) -> Result<()> {
        self.enable_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1))
            .map_err(|_| code::EBUSY)?;
        Ok(())
    }

    pub fn disable(&self) {
        if self
            .enable_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_err()
        {
            log::warn!("{}: unbalanced disable", self.name);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enable_count.load(Ordering::Acquire) > 0
    }

    pub fn get_rate(&self) -> u32 {
        self.hw.lock().recalc_rate(self.parent_rate)
    }

    pub fn round_rate(&self, rate: u32) -> Result<u32> {
        self.hw.lock().round_rate(rate, self.parent_rate)
    }

    /// Requests an exact rate. The hardware is reprogrammed on every call,
    /// so a request that failed before is never reported as done.
    pub fn set_rate(&self, rate: u32) -> Result<()> {
        self.hw.lock().set_rate(rate, self.parent_rate).inspect_err(|e| {
            log::error!("{}: failed to set rate {} Hz: {}", self.name, rate, e);
        })
    }

    /// Runs `f` with exclusive access to the clock hardware.
    pub fn with_hw<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.hw.lock())
    }
}

fn truncate_name(name: &'static str) -> &'static str {
    if name.len() <= MAX_CLK_NAME_LEN {
        return name;
    }
    let mut end = MAX_CLK_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    log::warn!("clock name {} truncated to {} bytes", name, end);
    &name[..end]
}
