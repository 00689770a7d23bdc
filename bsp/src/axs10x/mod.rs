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

//! Synopsys AXS10x/HS development platforms.

pub mod divider;
mod error;
pub mod pll;
pub mod regs;
mod static_ref;
pub mod sys_config;
pub mod table;

#[cfg(feature = "arc_pll")]
pub mod cpufreq;

#[cfg(test)]
mod testing;

pub use error::PllError;
pub use pll::{PllClock, RateChangeState};
pub use regs::{PllMmio, PllRegs};
pub use table::{DividerConfig, DividerTable, PllVariant};

use crate::kernel::{clk::Clk, time::BusyDelay};

pub type PllClk = Clk<PllClock<PllMmio, BusyDelay>>;

fn busy_delay() -> BusyDelay {
    BusyDelay::new(sys_config::LOOPS_PER_USEC)
}

/// Clock of the ARC core PLL.
///
/// # Safety
///
/// Must be called at most once, the returned clock owns the PLL registers.
#[cfg(feature = "arc_pll")]
pub unsafe fn arc_pll_clk() -> PllClk {
    // SAFETY: fixed board addresses, exclusivity forwarded to the caller.
    let regs = unsafe {
        PllMmio::new(
            sys_config::ARC_PLL_DIV_BASE,
            sys_config::ARC_PLL_LOCK_BASE,
        )
    };
    Clk::new(
        "arc-pll",
        sys_config::ARC_PLL_PARENT_RATE,
        PllClock::new(PllVariant::Arc, regs, busy_delay()),
    )
}

/// Clock of the graphics unit pixel PLL.
///
/// # Safety
///
/// Must be called at most once, the returned clock owns the PLL registers.
#[cfg(feature = "pgu_pll")]
pub unsafe fn pgu_pll_clk() -> PllClk {
    // SAFETY: fixed board addresses, exclusivity forwarded to the caller.
    let regs = unsafe {
        PllMmio::new(
            sys_config::PGU_PLL_DIV_BASE,
            sys_config::PGU_PLL_LOCK_BASE,
        )
    };
    Clk::new(
        "pgu-pll",
        sys_config::PGU_PLL_PARENT_RATE,
        PllClock::new(PllVariant::Pgu, regs, busy_delay()),
    )
}
