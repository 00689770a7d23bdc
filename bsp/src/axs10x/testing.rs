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

//! Host fakes for the PLL register bank and the delay.

use super::{
    divider::{encode, PackedDividerRegister},
    regs::{DividerReg, PllRegs},
    table::DividerConfig,
};
use embedded_hal::delay::DelayNs;

#[derive(Debug, Default)]
pub(crate) struct FakeRegs {
    pub idiv: PackedDividerRegister,
    pub fbdiv: PackedDividerRegister,
    pub odiv: PackedDividerRegister,
    pub locked: bool,
    pub writes: Vec<(DividerReg, PackedDividerRegister)>,
}

impl FakeRegs {
    /// Bank already programmed for `cfg`, lock flag set.
    pub fn programmed(cfg: DividerConfig) -> Self {
        Self {
            idiv: encode(cfg.idiv, false),
            fbdiv: encode(cfg.fbdiv, false),
            odiv: encode(cfg.odiv, true),
            locked: true,
            writes: Vec::new(),
        }
    }

    pub fn never_locks(mut self) -> Self {
        self.locked = false;
        self
    }
}

impl PllRegs for FakeRegs {
    fn read_divider(&self, reg: DividerReg) -> PackedDividerRegister {
        match reg {
            DividerReg::Input => self.idiv,
            DividerReg::Feedback => self.fbdiv,
            DividerReg::Output => self.odiv,
        }
    }

    fn write_divider(&mut self, reg: DividerReg, value: PackedDividerRegister) {
        self.writes.push((reg, value));
        match reg {
            DividerReg::Input => self.idiv = value,
            DividerReg::Feedback => self.fbdiv = value,
            DividerReg::Output => self.odiv = value,
        }
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
