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

//! Handle for memory mapped register blocks.

use core::{fmt, ops::Deref, ptr::NonNull};

/// `&'static T` built from a fixed bus address.
///
/// The dereference happens on use, so a `StaticRef` can be stored in a
/// `const` even though the address has no allocation at compile time.
pub struct StaticRef<T> {
    ptr: NonNull<T>,
}

impl<T> StaticRef<T> {
    /// # Safety
    ///
    /// `ptr` must be non-null, aligned for `T` and stay valid for the rest
    /// of the program.
    pub const unsafe fn new(ptr: *const T) -> Self {
        Self {
            // SAFETY: non-null per the caller's contract.
            ptr: unsafe { NonNull::new_unchecked(ptr.cast_mut()) },
        }
    }
}

impl<T> Clone for StaticRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StaticRef<T> {}

impl<T> fmt::Debug for StaticRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticRef").field(&self.ptr).finish()
    }
}

impl<T> Deref for StaticRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: valid for the program duration per `StaticRef::new`.
        unsafe { self.ptr.as_ref() }
    }
}

// SAFETY: register blocks are shared hardware; access is serialised by the
// owning clock's lock.
unsafe impl<T> Send for StaticRef<T> {}
unsafe impl<T> Sync for StaticRef<T> {}
