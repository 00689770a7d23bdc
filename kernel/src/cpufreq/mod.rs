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

//! CPU frequency scaling framework.
//!
//! Frequencies are in kHz throughout, as the policy layer expects. A driver
//! implements [`Driver`] and is bound to one [`Policy`] by a
//! [`Registration`], which also performs table lookups for frequency
//! requests.

use crate::{
    config::ETERNAL_LATENCY_NS,
    error::{code, Result},
};

/// CPU frequency selection relations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Relation {
    /// Select the lowest frequency at or above target.
    Low,
    /// Select the highest frequency below or at target.
    High,
    /// Select the closest frequency to the target, the lower one on a tie.
    Close,
}

/// An index known to be valid for the [`FrequencyTable`] that produced it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TableIndex(usize);

impl From<TableIndex> for usize {
    #[inline]
    fn from(index: TableIndex) -> Self {
        index.0
    }
}

/// Frequencies, in kHz, advertised to the policy layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    freqs: &'static [u32],
}

impl FrequencyTable {
    pub const fn new(freqs: &'static [u32]) -> Self {
        Self { freqs }
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    pub fn freq(&self, index: TableIndex) -> Result<u32> {
        self.freqs.get(index.0).copied().ok_or(code::EINVAL)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.freqs.iter().copied()
    }

    pub fn contains(&self, khz: u32) -> bool {
        self.freqs.contains(&khz)
    }

    pub fn min(&self) -> Option<u32> {
        self.iter().min()
    }

    pub fn max(&self) -> Option<u32> {
        self.iter().max()
    }

    /// Picks the entry for `target` among the frequencies within
    /// `[min, max]`. The table does not need to be sorted.
    ///
    /// When no entry satisfies the relation on its preferred side, the
    /// nearest entry on the other side is used instead, like the host
    /// framework does.
    pub fn target_index(
        &self,
        target: u32,
        relation: Relation,
        min: u32,
        max: u32,
    ) -> Result<TableIndex> {
        let valid = || {
            self.freqs
                .iter()
                .copied()
                .enumerate()
                .filter(move |&(_, f)| f >= min && f <= max)
        };
        let at_or_above = || {
            valid()
                .filter(|&(_, f)| f >= target)
                .min_by_key(|&(i, f)| (f, i))
        };
        let at_or_below = || {
            valid()
                .filter(|&(_, f)| f <= target)
                .max_by_key(|&(i, f)| (f, core::cmp::Reverse(i)))
        };
        let found = match relation {
            Relation::Low => at_or_above().or_else(at_or_below),
            Relation::High => at_or_below().or_else(at_or_above),
            Relation::Close => match (at_or_below(), at_or_above()) {
                (Some(lo), Some(hi)) => {
                    if hi.1 - target < target - lo.1 {
                        Some(hi)
                    } else {
                        Some(lo)
                    }
                }
                (lo, hi) => lo.or(hi),
            },
        };
        found.map(|(i, _)| TableIndex(i)).ok_or(code::EINVAL)
    }
}

/// Limits a policy is being verified against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PolicyData {
    pub min: u32,
    pub max: u32,
    pub cpuinfo_min: u32,
    pub cpuinfo_max: u32,
}

impl PolicyData {
    pub fn verify_within_cpu_limits(&mut self) {
        self.min = self.min.clamp(self.cpuinfo_min, self.cpuinfo_max);
        self.max = self.max.clamp(self.cpuinfo_min, self.cpuinfo_max);
        if self.min > self.max {
            self.min = self.max;
        }
    }

    /// Makes sure at least one table frequency lies within `[min, max]`,
    /// raising `max` to the next larger table frequency if none does.
    pub fn generic_verify(&mut self, table: &FrequencyTable) -> Result<()> {
        if table.is_empty() {
            return Err(code::EINVAL);
        }
        self.verify_within_cpu_limits();
        if table.iter().any(|f| f >= self.min && f <= self.max) {
            return Ok(());
        }
        let next_larger = table
            .iter()
            .filter(|&f| f > self.max)
            .min()
            .ok_or(code::EINVAL)?;
        self.max = next_larger;
        self.verify_within_cpu_limits();
        Ok(())
    }
}

/// Frequency scaling state of one CPU.
#[derive(Clone, Debug)]
pub struct Policy {
    cpu: u32,
    cur: u32,
    limits: PolicyData,
    transition_latency_ns: u32,
    freq_table: Option<FrequencyTable>,
}

impl Policy {
    pub fn new(cpu: u32) -> Self {
        Self {
            cpu,
            cur: 0,
            limits: PolicyData {
                min: 0,
                max: u32::MAX,
                cpuinfo_min: 0,
                cpuinfo_max: u32::MAX,
            },
            transition_latency_ns: ETERNAL_LATENCY_NS,
            freq_table: None,
        }
    }

    pub fn cpu(&self) -> u32 {
        self.cpu
    }

    pub fn cur(&self) -> u32 {
        self.cur
    }

    pub fn set_cur(&mut self, khz: u32) -> &mut Self {
        self.cur = khz;
        self
    }

    pub fn min(&self) -> u32 {
        self.limits.min
    }

    pub fn max(&self) -> u32 {
        self.limits.max
    }

    pub fn limits(&self) -> PolicyData {
        self.limits
    }

    pub fn transition_latency_ns(&self) -> u32 {
        self.transition_latency_ns
    }

    pub fn set_transition_latency_ns(&mut self, latency_ns: u32) -> &mut Self {
        self.transition_latency_ns = latency_ns;
        self
    }

    pub fn freq_table(&self) -> Result<&FrequencyTable> {
        self.freq_table.as_ref().ok_or(code::ENOENT)
    }

    /// Publishes `table` and derives the hardware limits from it.
    pub fn set_freq_table(&mut self, table: FrequencyTable) -> Result<&mut Self> {
        let (Some(min), Some(max)) = (table.min(), table.max()) else {
            return Err(code::EINVAL);
        };
        self.limits = PolicyData {
            min,
            max,
            cpuinfo_min: min,
            cpuinfo_max: max,
        };
        self.freq_table = Some(table);
        Ok(self)
    }
}

/// CPU frequency driver.
pub trait Driver {
    /// Driver's name.
    const NAME: &'static str;

    /// Driver's `init` callback.
    fn init(&self, policy: &mut Policy) -> Result<()>;

    /// Driver's `verify` callback.
    fn verify(&self, data: &mut PolicyData) -> Result<()>;

    /// Driver's `target_index` callback.
    fn target_index(&self, policy: &mut Policy, index: TableIndex) -> Result<()>;

    /// Driver's `get` callback, current frequency in kHz.
    fn get(&self, cpu: u32) -> Result<u32>;
}

/// A driver bound to the policy of one CPU.
pub struct Registration<D: Driver> {
    driver: D,
    policy: Policy,
}

impl<D: Driver> Registration<D> {
    pub fn new(driver: D, cpu: u32) -> Result<Self> {
        let mut policy = Policy::new(cpu);
        driver.init(&mut policy).inspect_err(|e| {
            log::error!("{}: init failed for cpu{}: {}", D::NAME, cpu, e);
        })?;
        policy.freq_table()?;
        log::info!("{}: registered for cpu{}, cur {} kHz", D::NAME, cpu, policy.cur());
        Ok(Self { driver, policy })
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Applies new user limits after the driver verified them.
    pub fn set_limits(&mut self, min: u32, max: u32) -> Result<()> {
        let mut data = PolicyData {
            min,
            max,
            ..self.policy.limits
        };
        self.driver.verify(&mut data)?;
        self.policy.limits = data;
        Ok(())
    }

    /// Switches to the table frequency selected for `target_khz`.
    ///
    /// The policy only records the new frequency once the driver reports
    /// success; on failure it keeps describing the previous state.
    pub fn set_target(&mut self, target_khz: u32, relation: Relation) -> Result<u32> {
        let table = *self.policy.freq_table()?;
        let index = table.target_index(
            target_khz,
            relation,
            self.policy.min(),
            self.policy.max(),
        )?;
        let freq = table.freq(index)?;
        if freq == self.policy.cur {
            return Ok(freq);
        }
        match self.driver.target_index(&mut self.policy, index) {
            Ok(()) => {
                log::debug!(
                    "{}: cpu{} {} kHz -> {} kHz",
                    D::NAME,
                    self.policy.cpu,
                    self.policy.cur,
                    freq
                );
                self.policy.cur = freq;
                Ok(freq)
            }
            Err(e) => {
                log::warn!(
                    "{}: cpu{} transition to {} kHz failed: {}",
                    D::NAME,
                    self.policy.cpu,
                    freq,
                    e
                );
                Err(e)
            }
        }
    }

    pub fn get(&self) -> Result<u32> {
        self.driver.get(self.policy.cpu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use core::cell::Cell;
    use proptest::prelude::*;

    static TABLE: FrequencyTable = FrequencyTable::new(&[100, 300, 200, 400]);

    #[test]
    fn test_target_index_relations() {
        let pick = |target, relation| {
            let index = TABLE.target_index(target, relation, 0, u32::MAX).unwrap();
            TABLE.freq(index).unwrap()
        };
        assert_eq!(pick(250, Relation::Low), 300);
        assert_eq!(pick(250, Relation::High), 200);
        assert_eq!(pick(240, Relation::Close), 200);
        assert_eq!(pick(260, Relation::Close), 300);
        // Ties go to the lower frequency.
        assert_eq!(pick(250, Relation::Close), 200);
        // Fall back to the other side when nothing qualifies.
        assert_eq!(pick(500, Relation::Low), 400);
        assert_eq!(pick(50, Relation::High), 100);
        assert_eq!(pick(300, Relation::Low), 300);
    }

    #[test]
    fn test_target_index_respects_limits() {
        let index = TABLE.target_index(400, Relation::Low, 100, 300).unwrap();
        assert_eq!(TABLE.freq(index), Ok(300));
        assert_eq!(
            TABLE.target_index(400, Relation::Low, 310, 390),
            Err(code::EINVAL)
        );
    }

    #[test]
    fn test_table_bounds() {
        assert_eq!(TABLE.min(), Some(100));
        assert_eq!(TABLE.max(), Some(400));
    }

    #[test]
    fn test_generic_verify_raises_max_to_next_larger() {
        let mut data = PolicyData {
            min: 210,
            max: 290,
            cpuinfo_min: 100,
            cpuinfo_max: 400,
        };
        data.generic_verify(&TABLE).unwrap();
        assert_eq!((data.min, data.max), (210, 300));
    }

    #[test]
    fn test_generic_verify_clamps_to_cpuinfo() {
        let mut data = PolicyData {
            min: 10,
            max: 1000,
            cpuinfo_min: 100,
            cpuinfo_max: 400,
        };
        data.generic_verify(&TABLE).unwrap();
        assert_eq!((data.min, data.max), (100, 400));
    }

    struct FakeDriver {
        cur: Cell<u32>,
        fail: Cell<bool>,
    }

    impl Driver for FakeDriver {
        const NAME: &'static str = "fake-cpufreq";

        fn init(&self, policy: &mut Policy) -> Result<()> {
            policy.set_freq_table(TABLE)?.set_cur(self.cur.get());
            Ok(())
        }

        fn verify(&self, data: &mut PolicyData) -> Result<()> {
            data.generic_verify(&TABLE)
        }

        fn target_index(&self, _policy: &mut Policy, index: TableIndex) -> Result<()> {
            if self.fail.get() {
                return Err(code::EINVAL);
            }
            self.cur.set(TABLE.freq(index)?);
            Ok(())
        }

        fn get(&self, _cpu: u32) -> Result<u32> {
            Ok(self.cur.get())
        }
    }

    fn registration() -> Registration<FakeDriver> {
        Registration::new(
            FakeDriver {
                cur: Cell::new(100),
                fail: Cell::new(false),
            },
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_registration_fills_cpuinfo_from_table() {
        let reg = registration();
        let policy = reg.policy();
        assert_eq!(policy.cur(), 100);
        assert_eq!((policy.min(), policy.max()), (100, 400));
        assert_eq!(policy.limits().cpuinfo_max, 400);
        assert_eq!(policy.transition_latency_ns(), ETERNAL_LATENCY_NS);
    }

    #[test]
    fn test_set_target_updates_cur_on_success() {
        let mut reg = registration();
        assert_eq!(reg.set_target(350, Relation::Low), Ok(400));
        assert_eq!(reg.policy().cur(), 400);
        assert_eq!(reg.get(), Ok(400));
    }

    #[test]
    fn test_failed_transition_keeps_policy() {
        let mut reg = registration();
        reg.driver().fail.set(true);
        assert_eq!(reg.set_target(300, Relation::Low), Err(code::EINVAL));
        assert_eq!(reg.policy().cur(), 100);
    }

    #[test]
    fn test_set_limits_runs_verify() {
        let mut reg = registration();
        reg.set_limits(210, 290).unwrap();
        assert_eq!((reg.policy().min(), reg.policy().max()), (210, 300));
        assert_eq!(reg.set_target(100, Relation::High), Ok(300));
    }

    #[test]
    fn test_init_without_table_is_rejected() {
        struct NoTable;
        impl Driver for NoTable {
            const NAME: &'static str = "no-table";
            fn init(&self, _policy: &mut Policy) -> Result<()> {
                Ok(())
            }
            fn verify(&self, _data: &mut PolicyData) -> Result<()> {
                Ok(())
            }
            fn target_index(&self, _policy: &mut Policy, _index: TableIndex) -> Result<()> {
                Ok(())
            }
            fn get(&self, _cpu: u32) -> Result<u32> {
                Ok(0)
            }
        }
        let err: Error = Registration::new(NoTable, 1).err().unwrap();
        assert_eq!(err, code::ENOENT);
    }

    proptest! {
        #[test]
        fn close_relation_picks_a_nearest_entry(target in 0u32..600) {
            let index = TABLE.target_index(target, Relation::Close, 0, u32::MAX).unwrap();
            let picked = TABLE.freq(index).unwrap();
            let best = TABLE.iter().map(|f| f.abs_diff(target)).min().unwrap();
            prop_assert_eq!(picked.abs_diff(target), best);
        }
    }
}
