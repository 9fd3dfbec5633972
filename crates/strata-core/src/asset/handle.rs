// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::Asset;
use std::{ops::Deref, sync::Arc};

/// A thread-safe, reference-counted handle to a loaded asset.
///
/// Cloning a handle is cheap and shares the same data. Use
/// [`AssetHandle::ptr_eq`] to tell a shared instance from a private copy.
#[derive(Debug)]
pub struct AssetHandle<T: Asset>(Arc<T>);

impl<T: Asset> AssetHandle<T> {
    /// Creates a new `AssetHandle` that takes ownership of the asset data.
    pub fn new(asset: T) -> Self {
        Self(Arc::new(asset))
    }

    /// Returns `true` if both handles point at the same asset instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of handles currently sharing this instance.
    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }
}

impl<T: Asset + Clone> AssetHandle<T> {
    /// Deep-copies the asset into a new, unshared handle.
    pub fn deep_clone(&self) -> Self {
        Self::new(T::clone(&self.0))
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Asset> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Blob(u32);
    impl Asset for Blob {}

    #[test]
    fn clone_shares_instance() {
        let a = AssetHandle::new(Blob(7));
        let b = a.clone();
        assert!(AssetHandle::ptr_eq(&a, &b));
        assert_eq!(AssetHandle::strong_count(&a), 2);
    }

    #[test]
    fn deep_clone_is_distinct() {
        let a = AssetHandle::new(Blob(7));
        let b = a.deep_clone();
        assert!(!AssetHandle::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }
}
