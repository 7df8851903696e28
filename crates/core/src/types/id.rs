//! Newtype IDs for type-safe entity references.
//!
//! The synchronizer juggles ids from three systems (its own database, the
//! inventory service, and the storefront) and they are all plain integers on
//! the wire. Use the `define_id!` macro to create wrappers that keep them
//! apart.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around an integer (`i32` unless given) with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `get()`
/// - `From` implementations in both directions
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use catalog_sync_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(LedgerEntryId, i64);
///
/// let warehouse = WarehouseId::new(1);
/// let entry = LedgerEntryId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WarehouseId = entry;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        $crate::define_id!($name, i32);
    };
    ($name:ident, $repr:ty) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($repr);

        impl $name {
            /// Create a new ID from its raw value.
            #[must_use]
            pub const fn new(id: $repr) -> Self {
                Self(id)
            }

            /// Get the underlying raw value.
            #[must_use]
            pub const fn get(&self) -> $repr {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$repr> for $name {
            fn from(id: $repr) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $repr {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <$repr as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <$repr as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <$repr as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <$repr as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

// Tenant ("company") as known by the inventory service.
define_id!(TenantId);
// Local records.
define_id!(ConnectionId);
define_id!(SyncLineId, i64);
// Remote records.
define_id!(InventoryProductId);
define_id!(StorefrontProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trips_through_raw_value() {
        let id = StorefrontProductId::new(55);
        assert_eq!(id.get(), 55);
        assert_eq!(i32::from(id), 55);
        assert_eq!(StorefrontProductId::from(55), id);
    }

    #[test]
    fn test_id_display_is_raw_value() {
        assert_eq!(SyncLineId::new(9_000_000_000).to_string(), "9000000000");
        assert_eq!(TenantId::new(1).to_string(), "1");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&InventoryProductId::new(22)).unwrap();
        assert_eq!(json, "22");
        let back: InventoryProductId = serde_json::from_str("22").unwrap();
        assert_eq!(back, InventoryProductId::new(22));
    }
}
