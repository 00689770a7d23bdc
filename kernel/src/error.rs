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

use core::fmt;

pub mod code {
    pub const EOK: super::Error = super::Error(0);
    pub const ERROR: super::Error = super::Error(-255);
    pub const EPERM: super::Error = super::Error(-libc::EPERM);
    pub const ENOENT: super::Error = super::Error(-libc::ENOENT);
    pub const EIO: super::Error = super::Error(-libc::EIO);
    pub const EBUSY: super::Error = super::Error(-libc::EBUSY);
    pub const ENODEV: super::Error = super::Error(-libc::ENODEV);
    pub const EINVAL: super::Error = super::Error(-libc::EINVAL);
    pub const ERANGE: super::Error = super::Error(-libc::ERANGE);
    pub const ETIMEDOUT: super::Error = super::Error(-libc::ETIMEDOUT);
}

const UNKNOW_STR: &str = "EUNKNOW";
const EOK_STR: &str = "OK";
const ERROR_STR: &str = "ERROR";
const EPERM_STR: &str = "Operation not permitted";
const ENOENT_STR: &str = "No such file or directory";
const EIO_STR: &str = "Input/output error";
const EBUSY_STR: &str = "Device or resource busy";
const ENODEV_STR: &str = "No such device";
const EINVAL_STR: &str = "Invalid argument";
const ERANGE_STR: &str = "Result out of range";
const ETIMEDOUT_STR: &str = "Timed out";

/// Errno-style error shared by every framework entry point.
///
/// The wrapped value is always the negated errno, the way drivers hand it
/// back to the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Error(i32);

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub const fn from_errno(errno: i32) -> Error {
        Error(errno)
    }

    pub const fn to_errno(self) -> i32 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        match *self {
            code::EOK => EOK_STR,
            code::ERROR => ERROR_STR,
            code::EPERM => EPERM_STR,
            code::ENOENT => ENOENT_STR,
            code::EIO => EIO_STR,
            code::EBUSY => EBUSY_STR,
            code::ENODEV => ENODEV_STR,
            code::EINVAL => EINVAL_STR,
            code::ERANGE => ERANGE_STR,
            code::ETIMEDOUT => ETIMEDOUT_STR,
            _ => UNKNOW_STR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

impl From<Error> for i32 {
    fn from(error: Error) -> Self {
        error.to_errno()
    }
}
