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

//! Board constants of the AXS10x/HS platforms.

/// ARC core PLL dividers.
pub const ARC_PLL_DIV_BASE: usize = 0xF000_0080;
pub const ARC_PLL_LOCK_BASE: usize = 0xF000_0100;

/// Pixel clock PLL dividers.
pub const PGU_PLL_DIV_BASE: usize = 0xE001_0080;
pub const PGU_PLL_LOCK_BASE: usize = 0xE000_0110;

pub const ARC_PLL_PARENT_RATE: u32 = 33_333_333;
pub const PGU_PLL_PARENT_RATE: u32 = 27_000_000;

/// Rate the ARC core runs at out of reset.
pub const DEFAULT_CPU_RATE: u32 = 33_333_333;

/// Settle time before the lock flag is sampled.
pub const PLL_MAX_LOCK_TIME_US: u32 = 100;

/// Largest difference, in Hz, between an advertised CPU frequency and the
/// rate the PLL can produce for it.
pub const HS_CPUFREQ_MAX_DEVIATION: u32 = 1000;

/// Fastest rate the ARC PLL can be switched to.
pub const ARC_PLL_MAX_RATE: u32 = 125_000_000;

/// Busy-wait calibration for the delay loop. The CPU runs off the ARC PLL,
/// so counting at its fastest rate keeps delays at least as long as asked.
pub const LOOPS_PER_USEC: u32 = ARC_PLL_MAX_RATE / 1_000_000;
