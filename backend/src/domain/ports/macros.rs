//! `define_port_error!` declares a `thiserror` enum for a port together with
//! snake_case constructors, so adapters can write
//! `OfferRepositoryError::connection(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unavailable => "collaborator unavailable",
            Rejected { message: String } => "rejected: {message}",
            Mismatch { expected: u32, found: u32 } => "expected {expected}, found {found}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(
            SamplePortError::unavailable().to_string(),
            "collaborator unavailable"
        );
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(
            SamplePortError::rejected("duplicate key").to_string(),
            "rejected: duplicate key"
        );
    }

    #[test]
    fn multiple_fields_keep_their_types() {
        let err = SamplePortError::mismatch(3_u32, 2_u32);
        assert_eq!(err, SamplePortError::Mismatch { expected: 3, found: 2 });
        assert_eq!(err.to_string(), "expected 3, found 2");
    }
}
