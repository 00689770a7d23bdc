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

//! Host framework for the AXS10x/HS board drivers.
//!
//! The board support crate plugs its PLL and CPU frequency drivers into the
//! contracts defined here: the clock framework in [`clk`], the frequency
//! scaling framework in [`cpufreq`] and the compatible-string match tables in
//! [`drivers::of`].

#![cfg_attr(not(test), no_std)]

pub mod clk;
pub mod config;
pub mod cpufreq;
pub mod drivers;
pub mod error;
pub mod logger;
pub mod sync;
pub mod time;
