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

//! A macro to declare typed bitflag sets.

/// Declares a bitflag newtype with set operations, bitwise operators and a
/// `Debug` impl that prints the names of the flags that are set.
///
/// ```
/// strata_core::strata_bitflags! {
///     /// Example flags.
///     pub struct Demo: u32 {
///         /// First.
///         const A = 1 << 0;
///         /// Second.
///         const B = 1 << 1;
///     }
/// }
///
/// let both = Demo::A | Demo::B;
/// assert!(both.contains(Demo::A));
/// assert_eq!(format!("{:?}", both), "Demo { A | B }");
/// ```
#[macro_export]
macro_rules! strata_bitflags {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident: $ty:ty {
            $(
                $(#[$flag_attr:meta])*
                const $flag_name:ident = $flag_value:expr;
            )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name {
            bits: $ty,
        }

        impl $name {
            /// No flags set.
            pub const EMPTY: Self = Self { bits: 0 };

            $(
                $(#[$flag_attr])*
                pub const $flag_name: Self = Self { bits: $flag_value };
            )*

            /// Builds a set from raw bits. Unknown bits are kept.
            pub const fn from_bits_retain(bits: $ty) -> Self {
                Self { bits }
            }

            /// The raw bits.
            pub const fn bits(&self) -> $ty {
                self.bits
            }

            /// `true` if no flag is set.
            pub const fn is_empty(&self) -> bool {
                self.bits == 0
            }

            /// `true` if every flag of `other` is set in `self`.
            pub const fn contains(&self, other: Self) -> bool {
                (self.bits & other.bits) == other.bits
            }

            /// `true` if `self` and `other` share at least one flag.
            pub const fn intersects(&self, other: Self) -> bool {
                (self.bits & other.bits) != 0
            }

            /// Sets the flags of `other`.
            pub fn insert(&mut self, other: Self) {
                self.bits |= other.bits;
            }

            /// Clears the flags of `other`.
            pub fn remove(&mut self, other: Self) {
                self.bits &= !other.bits;
            }

            /// Sets or clears the flags of `other`.
            pub fn set(&mut self, other: Self, value: bool) {
                if value {
                    self.insert(other);
                } else {
                    self.remove(other);
                }
            }
        }

        impl core::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, other: Self) -> Self {
                Self { bits: self.bits | other.bits }
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, other: Self) -> Self {
                Self { bits: self.bits & other.bits }
            }
        }

        impl core::ops::Not for $name {
            type Output = Self;
            fn not(self) -> Self {
                Self { bits: !self.bits }
            }
        }

        impl core::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, other: Self) {
                self.bits |= other.bits;
            }
        }

        impl core::ops::BitAndAssign for $name {
            fn bitand_assign(&mut self, other: Self) {
                self.bits &= other.bits;
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut remaining = self.bits;
                let mut first = true;

                write!(f, "{} {{ ", stringify!($name))?;
                $(
                    if ($flag_value != 0) && (remaining & $flag_value) == $flag_value {
                        if !first {
                            write!(f, " | ")?;
                        }
                        write!(f, "{}", stringify!($flag_name))?;
                        remaining &= !$flag_value;
                        first = false;
                    }
                )*
                if remaining != 0 {
                    if !first {
                        write!(f, " | ")?;
                    }
                    write!(f, "UNKNOWN({:#x})", remaining)?;
                    first = false;
                }
                if first {
                    write!(f, "EMPTY")?;
                }
                write!(f, " }}")
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::strata_bitflags! {
        /// Flags for macro verification.
        pub struct TestFlags: u32 {
            const FLAG_A = 1 << 0;
            const FLAG_B = 1 << 1;
            const FLAG_C = 1 << 2;
        }
    }

    #[test]
    fn test_empty_flags() {
        let flags = TestFlags::EMPTY;
        assert!(flags.is_empty());
        assert!(flags.contains(TestFlags::EMPTY));
        assert_eq!(TestFlags::default(), TestFlags::EMPTY);
        assert_eq!(format!("{:?}", flags), "TestFlags { EMPTY }");
    }

    #[test]
    fn test_set_and_remove() {
        let mut flags = TestFlags::FLAG_A;
        flags.set(TestFlags::FLAG_C, true);
        assert_eq!(format!("{:?}", flags), "TestFlags { FLAG_A | FLAG_C }");
        flags.set(TestFlags::FLAG_A, false);
        assert_eq!(flags, TestFlags::FLAG_C);
    }

    #[test]
    fn test_mask_out_with_not() {
        let flags = TestFlags::FLAG_A | TestFlags::FLAG_B | TestFlags::FLAG_C;
        let masked = flags & !(TestFlags::FLAG_A | TestFlags::FLAG_B);
        assert_eq!(masked, TestFlags::FLAG_C);
        assert!(flags.intersects(TestFlags::FLAG_B));
        assert!(!masked.intersects(TestFlags::FLAG_B));
    }

    #[test]
    fn test_unknown_bits_in_debug() {
        let flags = TestFlags::FLAG_B | TestFlags::from_bits_retain(1 << 8);
        assert_eq!(
            format!("{:?}", flags),
            "TestFlags { FLAG_B | UNKNOWN(0x100) }"
        );
    }
}
