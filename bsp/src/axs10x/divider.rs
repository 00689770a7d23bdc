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

//! Encoding of the PLL divider registers.
//!
//! Every divider register of the PLL splits its ratio into two half-period
//! counters, so an odd ratio needs the edge bit to balance the duty cycle:
//!
//! ```text
//! |31        15|    14    |   13   |  12  |11      6|5       0|
//! |  reserved  | NOUPDATE | BYPASS | EDGE | HIGHTIME| LOWTIME |
//! ```

use tock_registers::{register_bitfields, LocalRegisterCopy};

register_bitfields![u32,
    DIV [
        /// Low half-period, in reference cycles
        LOW OFFSET(0) NUMBITS(6) [],
        /// High half-period, in reference cycles
        HIGH OFFSET(6) NUMBITS(6) [],
        /// Adds half a cycle for odd ratios
        EDGE OFFSET(12) NUMBITS(1) [],
        /// Divide by one, LOW and HIGH are ignored
        BYPASS OFFSET(13) NUMBITS(1) [],
        /// Hold the new value until a write with this bit clear
        NOUPD OFFSET(14) NUMBITS(1) []
    ]
];

/// Largest ratio the two 6-bit half-period fields can express.
pub const MAX_DIVIDER: u32 = 126;

/// Raw value of one divider register.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedDividerRegister(u32);

impl PackedDividerRegister {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    fn fields(self) -> LocalRegisterCopy<u32, DIV::Register> {
        LocalRegisterCopy::new(self.0)
    }

    pub fn low(self) -> u32 {
        self.fields().read(DIV::LOW)
    }

    pub fn high(self) -> u32 {
        self.fields().read(DIV::HIGH)
    }

    pub fn edge(self) -> bool {
        self.fields().is_set(DIV::EDGE)
    }

    pub fn bypass(self) -> bool {
        self.fields().is_set(DIV::BYPASS)
    }

    pub fn no_update(self) -> bool {
        self.fields().is_set(DIV::NOUPD)
    }
}

impl From<u32> for PackedDividerRegister {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<PackedDividerRegister> for u32 {
    fn from(reg: PackedDividerRegister) -> Self {
        reg.0
    }
}

impl core::fmt::Debug for PackedDividerRegister {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PackedDividerRegister")
            .field("raw", &format_args!("{:#06x}", self.0))
            .field("low", &self.low())
            .field("high", &self.high())
            .field("edge", &self.edge())
            .field("bypass", &self.bypass())
            .field("no_update", &self.no_update())
            .finish()
    }
}

/// Packs an integer ratio into the register layout.
///
/// `update` selects whether this write commits the pending dividers. Ratios
/// above [`MAX_DIVIDER`] are truncated to the field widths, as the hardware
/// would.
pub fn encode(divider: u32, update: bool) -> PackedDividerRegister {
    debug_assert!(divider >= 1, "divider ratio must be at least 1");
    let half = divider >> 1;
    let odd = divider % 2;
    let mut reg = LocalRegisterCopy::<u32, DIV::Register>::new(0);
    reg.write(
        DIV::LOW.val(half + odd)
            + DIV::HIGH.val(half)
            + DIV::EDGE.val(odd)
            + DIV::BYPASS.val(u32::from(divider == 1))
            + DIV::NOUPD.val(u32::from(!update)),
    );
    PackedDividerRegister(reg.get())
}

/// Effective ratio programmed in `reg`.
pub fn decode(reg: PackedDividerRegister) -> u32 {
    if reg.bypass() {
        return 1;
    }
    reg.high() + reg.low()
}

/// Output rate of the PLL for the given divider registers:
/// `parent * fbdiv / (idiv * odiv)`, rounded down.
///
/// Returns 0 when an input or output divider reads back as zero, which the
/// hardware only reports before it was ever programmed.
pub fn recalc_rate(
    parent_rate: u32,
    idiv: PackedDividerRegister,
    fbdiv: PackedDividerRegister,
    odiv: PackedDividerRegister,
) -> u32 {
    let numerator = u64::from(parent_rate) * u64::from(decode(fbdiv));
    let denominator = u64::from(decode(idiv)) * u64::from(decode(odiv));
    let Some(rate) = numerator.checked_div(denominator) else {
        log::warn!("PLL dividers not programmed: idiv={:?} odiv={:?}", idiv, odiv);
        return 0;
    };
    u32::try_from(rate).unwrap_or(u32::MAX)
}
