//! Helper macro for port error enums carrying stable numeric codes.

/// Declares a `thiserror` enum where every variant has named fields, a
/// numeric code and a display message.
///
/// For each variant a snake-case constructor taking `impl Into<_>` per field
/// is generated, plus a `code()` accessor.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } = $code:literal => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    /// Builds the matching variant from its fields.
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*

            /// Stable numeric code for this failure.
            #[must_use]
            pub const fn code(&self) -> u16 {
                match self {
                    $( Self::$variant { .. } => $code, )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
