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

//! CPU frequency scaling for the ARC HS core.
//!
//! The core clock is the ARC PLL, so the policy can only move between the
//! rates in its divider table.

use super::sys_config::HS_CPUFREQ_MAX_DEVIATION;
use crate::kernel::{
    clk::{Clk, ClkOps},
    config::{ETERNAL_LATENCY_NS, HZ_PER_KHZ},
    cpufreq::{Driver, FrequencyTable, Policy, PolicyData, TableIndex},
    error::{code, Result},
};

/// Advertised frequencies in kHz. 80 MHz only exists on the simulator, the
/// PLL rejects it.
pub static HS_FREQ_TABLE: [u32; 6] = [33_333, 50_000, 75_000, 80_000, 90_000, 100_000];

pub struct HsCpufreq<'a, T: ClkOps> {
    clk: &'a Clk<T>,
}

impl<'a, T: ClkOps> HsCpufreq<'a, T> {
    pub fn new(clk: &'a Clk<T>) -> Self {
        Self { clk }
    }

    pub fn table() -> FrequencyTable {
        FrequencyTable::new(&HS_FREQ_TABLE)
    }
}

impl<T: ClkOps> Driver for HsCpufreq<'_, T> {
    const NAME: &'static str = "hs-cpufreq";

    fn init(&self, policy: &mut Policy) -> Result<()> {
        self.clk.prepare_enable()?;
        policy
            .set_cur(self.clk.get_rate() / HZ_PER_KHZ)
            .set_freq_table(Self::table())?
            .set_transition_latency_ns(ETERNAL_LATENCY_NS);
        Ok(())
    }

    fn verify(&self, data: &mut PolicyData) -> Result<()> {
        data.generic_verify(&Self::table())
    }

    fn target_index(&self, policy: &mut Policy, index: TableIndex) -> Result<()> {
        let khz = policy.freq_table()?.freq(index)?;
        let target = khz.checked_mul(HZ_PER_KHZ).ok_or(code::EINVAL)?;

        let rounded = self.clk.round_rate(target).map_err(|e| {
            log::error!("{}: cannot round {} Hz: {}", Self::NAME, target, e);
            code::EINVAL
        })?;
        if rounded.abs_diff(target) > HS_CPUFREQ_MAX_DEVIATION {
            log::error!(
                "{}: {} kHz not reachable, closest clock rate is {} Hz",
                Self::NAME,
                khz,
                rounded
            );
            return Err(code::EINVAL);
        }

        self.clk.set_rate(rounded).map_err(|e| {
            log::error!("{}: setting {} Hz failed: {}", Self::NAME, rounded, e);
            code::EINVAL
        })
    }

    fn get(&self, _cpu: u32) -> Result<u32> {
        Ok(self.clk.get_rate() / HZ_PER_KHZ)
    }
}
