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

//! Divider tables of the supported PLL variants.

use super::PllError;
#[cfg(feature = "arc_pll")]
use super::sys_config::ARC_PLL_PARENT_RATE;
#[cfg(feature = "pgu_pll")]
use super::sys_config::PGU_PLL_PARENT_RATE;
use crate::kernel::drivers::of::{self, DeviceId};

/// Divider settings producing `rate` from the parent clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerConfig {
    pub rate: u32,
    pub idiv: u32,
    pub fbdiv: u32,
    pub odiv: u32,
}

impl DividerConfig {
    pub const fn new(rate: u32, idiv: u32, fbdiv: u32, odiv: u32) -> Self {
        Self {
            rate,
            idiv,
            fbdiv,
            odiv,
        }
    }
}

/// Every entry usable with one parent rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentTable {
    pub parent_rate: u32,
    pub entries: &'static [DividerConfig],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerTable(&'static [ParentTable]);

impl DividerTable {
    pub const fn new(parents: &'static [ParentTable]) -> Self {
        Self(parents)
    }

    /// Entries for `parent_rate`. Parent rates are matched exactly.
    pub fn entries(&self, parent_rate: u32) -> Result<&'static [DividerConfig], PllError> {
        self.0
            .iter()
            .find(|t| t.parent_rate == parent_rate)
            .map(|t| t.entries)
            .ok_or(PllError::NotFound)
    }

    /// Supported rate closest to `requested`. On equal distance the entry
    /// listed first wins.
    pub fn select_nearest(&self, requested: u32, parent_rate: u32) -> Result<u32, PllError> {
        let (first, rest) = self
            .entries(parent_rate)?
            .split_first()
            .ok_or(PllError::NotFound)?;
        let mut best = first.rate;
        for cfg in rest {
            if requested.abs_diff(cfg.rate) < requested.abs_diff(best) {
                best = cfg.rate;
            }
        }
        Ok(best)
    }

    /// Entry programming exactly `rate`.
    pub fn resolve(&self, rate: u32, parent_rate: u32) -> Result<DividerConfig, PllError> {
        self.entries(parent_rate)?
            .iter()
            .find(|cfg| cfg.rate == rate)
            .copied()
            .ok_or(PllError::NotFound)
    }
}

#[cfg(feature = "pgu_pll")]
static PGU_PLL_TABLE: [ParentTable; 1] = [ParentTable {
    parent_rate: PGU_PLL_PARENT_RATE,
    entries: &[
        DividerConfig::new(25_200_000, 1, 84, 90),
        DividerConfig::new(50_000_000, 1, 100, 54),
        DividerConfig::new(74_250_000, 1, 44, 16),
    ],
}];

#[cfg(feature = "arc_pll")]
static ARC_PLL_TABLE: [ParentTable; 1] = [ParentTable {
    parent_rate: ARC_PLL_PARENT_RATE,
    entries: &[
        DividerConfig::new(33_333_333, 1, 1, 1),
        DividerConfig::new(50_000_000, 1, 30, 20),
        DividerConfig::new(75_000_000, 2, 45, 10),
        DividerConfig::new(90_000_000, 2, 54, 10),
        DividerConfig::new(100_000_000, 1, 30, 10),
        DividerConfig::new(125_000_000, 2, 45, 6),
    ],
}];

/// Hardware variant of the PLL, which fixes its divider table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PllVariant {
    /// Core clock PLL of the ARC CPU.
    #[cfg(feature = "arc_pll")]
    Arc,
    /// Pixel clock PLL of the graphics unit.
    #[cfg(feature = "pgu_pll")]
    Pgu,
}

pub static PLL_OF_MATCH: &[DeviceId<PllVariant>] = &[
    #[cfg(feature = "arc_pll")]
    DeviceId::new("snps,axs10x-arc-pll-clock", PllVariant::Arc),
    #[cfg(feature = "pgu_pll")]
    DeviceId::new("snps,axs10x-pgu-pll-clock", PllVariant::Pgu),
];

impl PllVariant {
    pub fn from_compatible(compatible: &str) -> Option<Self> {
        of::match_compatible(PLL_OF_MATCH, compatible).copied()
    }

    pub fn table(self) -> DividerTable {
        match self {
            #[cfg(feature = "arc_pll")]
            PllVariant::Arc => DividerTable::new(&ARC_PLL_TABLE),
            #[cfg(feature = "pgu_pll")]
            PllVariant::Pgu => DividerTable::new(&PGU_PLL_TABLE),
        }
    }
}
