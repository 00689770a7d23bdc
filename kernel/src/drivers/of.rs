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

//! Compatible-string match tables.
//!
//! Boards describe each device variant with a compatible string; drivers
//! keep a table mapping those strings to the per-variant data they are
//! constructed with.

/// One entry of a match table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId<T: 'static> {
    compatible: &'static str,
    data: T,
}

impl<T: 'static> DeviceId<T> {
    pub const fn new(compatible: &'static str, data: T) -> Self {
        Self { compatible, data }
    }

    pub fn compatible(&self) -> &'static str {
        self.compatible
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

/// Returns the data of the first entry whose compatible string is
/// `compatible`.
pub fn match_compatible<'a, T>(table: &'a [DeviceId<T>], compatible: &str) -> Option<&'a T> {
    table
        .iter()
        .find(|id| id.compatible == compatible)
        .map(DeviceId::data)
}
