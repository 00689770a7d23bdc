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

//! PLL clock driver.
//!
//! A rate change resolves the divider triple from the variant's table,
//! writes the input and feedback dividers with updates held back, then
//! commits everything through the output divider and waits for relock.

use super::{
    divider::{self, encode},
    regs::{DividerReg, PllRegs},
    sys_config::PLL_MAX_LOCK_TIME_US,
    table::{DividerConfig, DividerTable, PllVariant},
    PllError,
};
use crate::kernel::{
    clk::ClkOps,
    error::{code, Error, Result},
};
use embedded_hal::delay::DelayNs;

/// Last step reached by a rate change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateChangeState {
    #[default]
    Idle,
    Resolving,
    Programming,
    AwaitingLock,
    Locked,
    TimedOut,
}

#[derive(Debug)]
pub struct PllClock<R: PllRegs, D: DelayNs> {
    table: DividerTable,
    regs: R,
    delay: D,
    state: RateChangeState,
}

impl<R: PllRegs, D: DelayNs> PllClock<R, D> {
    pub fn new(variant: PllVariant, regs: R, delay: D) -> Self {
        Self::with_table(variant.table(), regs, delay)
    }

    pub fn with_table(table: DividerTable, regs: R, delay: D) -> Self {
        Self {
            table,
            regs,
            delay,
            state: RateChangeState::Idle,
        }
    }

    /// Picks the variant from a device tree compatible string.
    pub fn from_compatible(compatible: &str, regs: R, delay: D) -> Result<Self> {
        let Some(variant) = PllVariant::from_compatible(compatible) else {
            log::warn!("no PLL variant for {}", compatible);
            return Err(code::ENODEV);
        };
        Ok(Self::new(variant, regs, delay))
    }

    pub fn state(&self) -> RateChangeState {
        self.state
    }

    pub fn table(&self) -> &DividerTable {
        &self.table
    }

    pub fn regs(&self) -> &R {
        &self.regs
    }

    pub fn recalc(&self, parent_rate: u32) -> u32 {
        divider::recalc_rate(
            parent_rate,
            self.regs.read_divider(DividerReg::Input),
            self.regs.read_divider(DividerReg::Feedback),
            self.regs.read_divider(DividerReg::Output),
        )
    }

    pub fn round(&self, rate: u32, parent_rate: u32) -> core::result::Result<u32, PllError> {
        self.table
            .select_nearest(rate, parent_rate)
            .inspect_err(|_| log::error!("invalid parent rate {} Hz", parent_rate))
    }

    /// Switches the PLL to exactly `rate`. A timeout leaves the new dividers
    /// in place.
    pub fn program(&mut self, rate: u32, parent_rate: u32) -> core::result::Result<(), PllError> {
        self.state = RateChangeState::Resolving;
        let cfg = match self.table.resolve(rate, parent_rate) {
            Ok(cfg) => cfg,
            Err(_) => {
                self.state = RateChangeState::Idle;
                log::error!(
                    "rate {} Hz not supported with parent {} Hz",
                    rate,
                    parent_rate
                );
                return Err(PllError::InvalidRate { rate, parent_rate });
            }
        };

        self.state = RateChangeState::Programming;
        self.write_dividers(&cfg);

        self.state = RateChangeState::AwaitingLock;
        self.delay.delay_us(PLL_MAX_LOCK_TIME_US);
        if !self.regs.is_locked() {
            self.state = RateChangeState::TimedOut;
            log::error!("PLL did not lock at {} Hz", rate);
            return Err(PllError::TimedOut {
                waited_us: PLL_MAX_LOCK_TIME_US,
            });
        }

        self.state = RateChangeState::Locked;
        log::debug!(
            "PLL locked at {} Hz (idiv {} fbdiv {} odiv {})",
            rate,
            cfg.idiv,
            cfg.fbdiv,
            cfg.odiv
        );
        Ok(())
    }

    fn write_dividers(&mut self, cfg: &DividerConfig) {
        self.regs
            .write_divider(DividerReg::Input, encode(cfg.idiv, false));
        self.regs
            .write_divider(DividerReg::Feedback, encode(cfg.fbdiv, false));
        // The update pulse on the output divider latches all three.
        self.regs
            .write_divider(DividerReg::Output, encode(cfg.odiv, true));
    }
}

impl<R: PllRegs, D: DelayNs + Send> ClkOps for PllClock<R, D> {
    fn recalc_rate(&self, parent_rate: u32) -> u32 {
        self.recalc(parent_rate)
    }

    fn round_rate(&self, rate: u32, parent_rate: u32) -> Result<u32> {
        self.round(rate, parent_rate).map_err(Error::from)
    }

    fn set_rate(&mut self, rate: u32, parent_rate: u32) -> Result<()> {
        self.program(rate, parent_rate).map_err(Error::from)
    }
}

#[cfg(all(test, feature = "pgu_pll", feature = "arc_pll"))]
mod tests {
    use super::*;
    use crate::{
        axs10x::{
            divider::decode,
            testing::{FakeRegs, RecordingDelay},
        },
        kernel::clk::Clk,
    };

    const PGU_PARENT: u32 = 27_000_000;
    const ARC_PARENT: u32 = 33_333_333;

    fn pgu(regs: FakeRegs) -> PllClock<FakeRegs, RecordingDelay> {
        PllClock::new(PllVariant::Pgu, regs, RecordingDelay::default())
    }

    fn pgu_at_25m() -> FakeRegs {
        FakeRegs::programmed(DividerConfig::new(25_200_000, 1, 84, 90))
    }

    #[test]
    fn test_programming_order() {
        let mut pll = pgu(pgu_at_25m());
        pll.program(50_000_000, PGU_PARENT).unwrap();

        let writes = &pll.regs().writes;
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0], (DividerReg::Input, encode(1, false)));
        assert_eq!(writes[1], (DividerReg::Feedback, encode(100, false)));
        assert_eq!(writes[2], (DividerReg::Output, encode(54, true)));
        assert!(writes[..2].iter().all(|(_, v)| v.no_update()));
        assert!(!writes[2].1.no_update());
        assert_eq!(pll.state(), RateChangeState::Locked);
        assert_eq!(pll.recalc(PGU_PARENT), 50_000_000);
    }

    #[test]
    fn test_waits_lock_window_once() {
        let mut pll = pgu(pgu_at_25m());
        pll.program(74_250_000, PGU_PARENT).unwrap();
        assert_eq!(pll.delay.total_ns, u64::from(PLL_MAX_LOCK_TIME_US) * 1000);
    }

    #[test]
    fn test_lock_timeout_keeps_dividers() {
        let mut pll = pgu(pgu_at_25m().never_locks());
        assert_eq!(
            pll.program(50_000_000, PGU_PARENT),
            Err(PllError::TimedOut { waited_us: 100 })
        );
        assert_eq!(pll.state(), RateChangeState::TimedOut);
        assert_eq!(pll.regs().writes.len(), 3);
        assert_eq!(decode(pll.regs().fbdiv), 100);
    }

    #[test]
    fn test_retry_after_timeout_fails_again() {
        let clk = Clk::new(
            "pgu-pll",
            PGU_PARENT,
            pgu(FakeRegs::programmed(DividerConfig::new(50_000_000, 1, 100, 54)).never_locks()),
        );
        assert_eq!(clk.set_rate(50_000_000), Err(code::ETIMEDOUT));
        assert_eq!(clk.get_rate(), 50_000_000);
        assert_eq!(clk.set_rate(50_000_000), Err(code::ETIMEDOUT));
        assert_eq!(clk.with_hw(|pll| pll.regs().writes.len()), 6);
        assert_eq!(clk.with_hw(|pll| pll.state()), RateChangeState::TimedOut);
    }

    #[test]
    fn test_unsupported_rate_writes_nothing() {
        let mut pll = pgu(pgu_at_25m());
        assert_eq!(
            pll.program(51_000_000, PGU_PARENT),
            Err(PllError::InvalidRate {
                rate: 51_000_000,
                parent_rate: PGU_PARENT
            })
        );
        assert_eq!(pll.state(), RateChangeState::Idle);
        assert!(pll.regs().writes.is_empty());
        assert_eq!(pll.delay.total_ns, 0);
    }

    #[test]
    fn test_wrong_parent_is_invalid_rate() {
        let mut pll = pgu(pgu_at_25m());
        assert!(matches!(
            pll.program(50_000_000, ARC_PARENT),
            Err(PllError::InvalidRate { .. })
        ));
        assert_eq!(pll.round(50_000_000, ARC_PARENT), Err(PllError::NotFound));
    }

    #[test]
    fn test_recalc_from_hardware() {
        let pll = pgu(pgu_at_25m());
        assert_eq!(pll.recalc(PGU_PARENT), 25_200_000);
        assert_eq!(pgu(FakeRegs::default()).recalc(PGU_PARENT), 0);
    }

    #[test]
    fn test_from_compatible() {
        let pll = PllClock::from_compatible(
            "snps,axs10x-arc-pll-clock",
            FakeRegs::default(),
            RecordingDelay::default(),
        )
        .unwrap();
        assert_eq!(*pll.table(), PllVariant::Arc.table());
        assert!(matches!(
            PllClock::from_compatible(
                "snps,hsdk-pll-clock",
                FakeRegs::default(),
                RecordingDelay::default()
            ),
            Err(e) if e == code::ENODEV
        ));
    }

    #[test]
    fn test_through_clock_framework() {
        let clk = Clk::new(
            "arc-pll",
            ARC_PARENT,
            PllClock::new(
                PllVariant::Arc,
                FakeRegs::programmed(DividerConfig::new(33_333_333, 1, 1, 1)),
                RecordingDelay::default(),
            ),
        );
        assert_eq!(clk.get_rate(), 33_333_333);
        assert_eq!(clk.round_rate(80_000_000), Ok(75_000_000));
        clk.set_rate(75_000_000).unwrap();
        assert_eq!(clk.get_rate(), 74_999_999);
        assert_eq!(clk.set_rate(80_000_000), Err(code::EINVAL));
        assert_eq!(clk.with_hw(|pll| pll.state()), RateChangeState::Idle);
        clk.with_hw(|pll| pll.regs.locked = false);
        assert_eq!(clk.set_rate(100_000_000), Err(code::ETIMEDOUT));
    }
}
