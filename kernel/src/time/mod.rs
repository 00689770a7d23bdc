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

//! Delay capability handed to drivers that must wait for hardware to settle.
//!
//! Drivers take any [`DelayNs`] so the waiting strategy can be swapped for a
//! recording fake in tests.

use crate::config::DEFAULT_LOOPS_PER_USEC;
pub use embedded_hal::delay::DelayNs;

/// Calibrated busy-wait delay.
///
/// Spins `loops_per_usec` times per elapsed microsecond, rounding partial
/// microseconds up so a requested delay is never shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyDelay {
    loops_per_usec: u32,
}

impl BusyDelay {
    pub const fn new(loops_per_usec: u32) -> Self {
        Self { loops_per_usec }
    }

    pub const fn loops_per_usec(&self) -> u32 {
        self.loops_per_usec
    }

    /// Number of spin iterations needed to cover `ns` nanoseconds.
    pub fn loops_for_ns(&self, ns: u32) -> u64 {
        (u64::from(ns) * u64::from(self.loops_per_usec)).div_ceil(1000)
    }
}

impl Default for BusyDelay {
    fn default() -> Self {
        Self::new(DEFAULT_LOOPS_PER_USEC)
    }
}

impl DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        for _ in 0..self.loops_for_ns(ns) {
            core::hint::spin_loop();
        }
    }
}
