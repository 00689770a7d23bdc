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

use crate::kernel::error::{code, Error};

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum PllError {
    #[error("No divider table entry found")]
    NotFound,
    #[error("Invalid rate {rate} Hz for parent rate {parent_rate} Hz")]
    InvalidRate { rate: u32, parent_rate: u32 },
    #[error("PLL not locked after {waited_us} us")]
    TimedOut { waited_us: u32 },
}

impl From<PllError> for Error {
    fn from(error: PllError) -> Self {
        match error {
            PllError::NotFound => code::EINVAL,
            PllError::InvalidRate { .. } => code::EINVAL,
            PllError::TimedOut { .. } => code::ETIMEDOUT,
        }
    }
}
