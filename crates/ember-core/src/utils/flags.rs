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

//! A declarative macro for device flag masks (clear masks, memory barriers).

/// Declares a `Copy` bit mask type with named constants.
///
/// The generated type supports `|`, `|=`, `&`, [`contains`](#method.contains) and
/// prints the names of its set flags in its `Debug` output.
#[macro_export]
#[doc(hidden)]
macro_rules! ember_flags {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident: $ty:ty {
            $(
                $(#[$flag_attr:meta])*
                const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name($ty);

        impl $name {
            /// No flag set.
            pub const EMPTY: Self = Self(0);

            $(
                $(#[$flag_attr])*
                pub const $flag: Self = Self($value);
            )*

            /// Builds a mask from raw bits, keeping unknown bits.
            pub const fn from_bits_retain(bits: $ty) -> Self {
                Self(bits)
            }

            /// Returns the raw bits of the mask.
            pub const fn bits(self) -> $ty {
                self.0
            }

            /// Returns `true` if every flag of `other` is set in `self`.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Returns `true` if no flag is set.
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl core::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl core::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut rest = self.0;
                let mut names = Vec::new();
                $(
                    if $value != 0 && rest & $value == $value {
                        names.push(stringify!($flag));
                        rest &= !$value;
                    }
                )*
                write!(f, "{}(", stringify!($name))?;
                if names.is_empty() && rest == 0 {
                    write!(f, "EMPTY")?;
                } else {
                    write!(f, "{}", names.join(" | "))?;
                    if rest != 0 {
                        if !names.is_empty() {
                            write!(f, " | ")?;
                        }
                        write!(f, "{:#x}", rest)?;
                    }
                }
                write!(f, ")")
            }
        }
    };
}
