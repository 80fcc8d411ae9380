//! Index types for model storage.
//!
//! Using `NonZeroU32` enables `Option<T>` niche optimization (no extra space).

use std::num::NonZeroU32;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create from a 0-based index.
            #[must_use]
            pub fn from_index(index: usize) -> Self {
                Self(NonZeroU32::MIN.saturating_add(index as u32))
            }

            /// Get the 0-based index.
            #[must_use]
            pub const fn index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }
    };
}

define_id!(
    /// Document identifier.
    DocumentId
);

define_id!(
    /// Package identifier.
    PackageId
);

define_id!(
    /// Type identifier. The first ids are reserved for the primitive types.
    TypeId
);

define_id!(
    /// Service identifier.
    ServiceId
);

define_id!(
    /// Service reference (placeholder) identifier.
    ServiceRefId
);
