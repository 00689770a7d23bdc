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

// FIXME: We should use kconfig to generate this file.

/// Busy-wait calibration used when a board does not provide its own.
/// Counts `spin_loop` iterations per microsecond.
pub const DEFAULT_LOOPS_PER_USEC: u32 = 100;

/// Largest clock name accepted by [`crate::clk::Clk::new`].
pub const MAX_CLK_NAME_LEN: usize = 32;

/// Transition latency reported by drivers which cannot tell how long a
/// frequency change takes.
pub const ETERNAL_LATENCY_NS: u32 = u32::MAX;

/// Scale between the clock framework (Hz) and the cpufreq framework (kHz).
pub const HZ_PER_KHZ: u32 = 1000;
