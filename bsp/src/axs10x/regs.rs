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

//! Register map of the AXS10x PLLs.

use super::{divider::PackedDividerRegister, static_ref::StaticRef};
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite},
};

register_structs! {
    pub PllRegisters {
        /// Input (reference) divider
        (0x000 => idiv: ReadWrite<u32>),
        /// Feedback divider
        (0x004 => fbdiv: ReadWrite<u32>),
        /// Output divider, its update bit commits all three
        (0x008 => odiv: ReadWrite<u32>),
        (0x00C => @END),
    },
    pub PllLockRegisters {
        (0x000 => status: ReadOnly<u32, LOCK_STATUS::Register>),
        (0x004 => @END),
    }
}

register_bitfields![u32,
    LOCK_STATUS [
        /// PLL output is stable
        LOCK OFFSET(0) NUMBITS(1) []
    ]
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerReg {
    Input,
    Feedback,
    Output,
}

/// Access to one PLL's dividers and lock flag.
pub trait PllRegs: Send {
    fn read_divider(&self, reg: DividerReg) -> PackedDividerRegister;
    fn write_divider(&mut self, reg: DividerReg, value: PackedDividerRegister);
    fn is_locked(&self) -> bool;
}

/// Memory mapped PLL. The lock flag sits in a separate block.
#[derive(Debug, Clone, Copy)]
pub struct PllMmio {
    dividers: StaticRef<PllRegisters>,
    lock: StaticRef<PllLockRegisters>,
}

impl PllMmio {
    /// # Safety
    ///
    /// Both addresses must point at the register blocks of the same PLL and
    /// no other `PllMmio` may be created for them.
    pub const unsafe fn new(dividers_base: usize, lock_base: usize) -> Self {
        // SAFETY: forwarded to the caller.
        unsafe {
            Self {
                dividers: StaticRef::new(dividers_base as *const PllRegisters),
                lock: StaticRef::new(lock_base as *const PllLockRegisters),
            }
        }
    }

    fn divider(&self, reg: DividerReg) -> &ReadWrite<u32> {
        match reg {
            DividerReg::Input => &self.dividers.idiv,
            DividerReg::Feedback => &self.dividers.fbdiv,
            DividerReg::Output => &self.dividers.odiv,
        }
    }
}

impl PllRegs for PllMmio {
    fn read_divider(&self, reg: DividerReg) -> PackedDividerRegister {
        self.divider(reg).get().into()
    }

    fn write_divider(&mut self, reg: DividerReg, value: PackedDividerRegister) {
        self.divider(reg).set(value.raw());
    }

    fn is_locked(&self) -> bool {
        self.lock.status.is_set(LOCK_STATUS::LOCK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axs10x::divider::encode;

    fn leak_words<const N: usize>(words: [u32; N]) -> usize {
        Box::leak(Box::new(words)).as_mut_ptr() as usize
    }

    #[test]
    fn test_mmio_layout() {
        let dividers = leak_words([0u32; 3]);
        let lock = leak_words([0u32; 1]);
        let mut mmio = unsafe { PllMmio::new(dividers, lock) };

        mmio.write_divider(DividerReg::Input, encode(2, false));
        mmio.write_divider(DividerReg::Feedback, encode(45, false));
        mmio.write_divider(DividerReg::Output, encode(10, true));

        let words = unsafe { core::slice::from_raw_parts(dividers as *const u32, 3) };
        assert_eq!(words[0], encode(2, false).raw());
        assert_eq!(words[1], encode(45, false).raw());
        assert_eq!(words[2], encode(10, true).raw());
        assert_eq!(mmio.read_divider(DividerReg::Feedback), encode(45, false));
    }

    #[test]
    fn test_lock_is_bit_zero() {
        let dividers = leak_words([0u32; 3]);
        let lock_base = leak_words([0xFFFF_FFFEu32]);
        let mmio = unsafe { PllMmio::new(dividers, lock_base) };
        assert!(!mmio.is_locked());
        unsafe { core::ptr::write_volatile(lock_base as *mut u32, 1) };
        assert!(mmio.is_locked());
    }
}
