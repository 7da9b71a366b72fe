//! Helper macro for declaring driven-port error enums.
//!
//! Each variant names the [`ErrorCode`](crate::domain::ErrorCode) it maps to
//! when the failure crosses into a service, so adapters only describe what went
//! wrong and the HTTP status follows from the declaration.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
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
            #[doc = "Construct the `" $variant "` variant."]
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
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal as $code:ident
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

            /// Error code this failure maps to at the service boundary.
            pub fn error_code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $( Self::$variant { .. } => $crate::domain::ErrorCode::$code, )*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(value: $name) -> Self {
                $crate::domain::Error::new(value.error_code(), value.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::domain::{Error, ErrorCode};

    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "connection lost: {message}" as ServiceUnavailable,
            Query { message: String } => "query failed: {message}" as InternalError,
            Duplicate { name: String, count: u32 } => "duplicate {name} ({count})" as Conflict,
            Closed => "closed" as ServiceUnavailable,
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::connection("timeout");
        assert_eq!(err.to_string(), "connection lost: timeout");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::duplicate("Investor", 2_u32);
        assert_eq!(err.to_string(), "duplicate Investor (2)");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
    }

    #[test]
    fn variants_map_to_declared_codes() {
        assert_eq!(
            SamplePortError::query("boom").error_code(),
            ErrorCode::InternalError
        );
        let error = Error::from(SamplePortError::duplicate("x", 1_u32));
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "duplicate x (1)");
    }
}
