/******************************************\
|==========================================|
|          Macro: impl_enum_table          |
|==========================================|
\******************************************/

/// Generates a variant table and the index helpers for a fieldless enum.
///
/// It provides:
/// - `const ALL: [Self; NUM]`: every variant in declaration order.
/// - `const NUM: usize`: number of variants.
/// - `const fn index(&self) -> usize`: position of the variant in `ALL`.
/// - `fn from_index(index: usize) -> Option<Self>`: checked inverse of `index`.
/// - `fn iter() -> impl DoubleEndedIterator<Item = Self>`: iterator over `ALL`.
#[macro_export]
macro_rules! impl_enum_table {
    ($enum_name:ident, [$($variant:ident),+ $(,)?]) => {
        impl $enum_name {
            #[doc=concat!("Every ", stringify!($enum_name), " variant in declaration order")]
            pub const ALL: [$enum_name; 0usize $(+ { let _ = stringify!($variant); 1usize })+] =
                [$($enum_name::$variant),+];

            #[doc=concat!("Number of elements in the ", stringify!($enum_name), " enum")]
            pub const NUM: usize = Self::ALL.len();

            #[doc=concat!("Converts ", stringify!($enum_name), " to its table index")]
            #[inline]
            pub const fn index(&self) -> usize {
                *self as usize
            }

            #[doc=concat!("Converts a table index back to ", stringify!($enum_name))]
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            #[doc=concat!("Returns iterator for all the elements in ", stringify!($enum_name))]
            pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
                Self::ALL.into_iter()
            }
        }
    };
}

/******************************************\
|==========================================|
|             Macro: impl_op               |
|==========================================|
\******************************************/

/// Helper macro to implement a standard binary operator (e.g., `Add`, `Sub`)
/// for a struct that wraps a single value (e.g., `MyStruct(value)`).
#[macro_export]
macro_rules! impl_op {
    ($struct_name:ident, $op_name:ident, $method_name:ident, $op:tt) => {
        impl std::ops::$op_name for $struct_name {
            type Output = Self;

            fn $method_name(self, rhs: Self) -> Self::Output {
                Self(self.0 $op rhs.0)
            }
        }
    };
}

/******************************************\
|==========================================|
|          Macro: impl_assign_op           |
|==========================================|
\******************************************/

/// Helper macro to implement an assignment operator (e.g., `AddAssign`)
/// for a struct. It assumes the corresponding binary operator is already defined.
#[macro_export]
macro_rules! impl_assign_op {
    ($struct_name:ident, $op_name:ident, $method_name:ident, $op:tt) => {
        impl std::ops::$op_name for $struct_name {
            fn $method_name(&mut self, rhs: $struct_name) {
                *self = *self $op rhs;
            }
        }
    };
}

/******************************************\
|==========================================|
|           Macro: impl_ari_ops            |
|==========================================|
\******************************************/

/// Implements `+`, `-` and `*` plus their assignment forms for a newtype
/// against another instance of the same newtype.
#[macro_export]
macro_rules! impl_ari_ops {
    ($struct_name:ident) => {
        $crate::impl_op!($struct_name, Add, add, +);
        $crate::impl_op!($struct_name, Sub, sub, -);
        $crate::impl_op!($struct_name, Mul, mul, *);

        $crate::impl_assign_op!($struct_name, AddAssign, add_assign, +);
        $crate::impl_assign_op!($struct_name, SubAssign, sub_assign, -);
        $crate::impl_assign_op!($struct_name, MulAssign, mul_assign, *);
    };
}
