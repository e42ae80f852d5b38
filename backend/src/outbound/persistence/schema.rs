//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    /// Sales territories.
    ///
    /// `demographics` holds the attribute map as compact JSON text.
    territories (id) {
        /// Identity primary key.
        id -> Int4,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Ordered postal codes.
        zip_codes -> Array<Text>,
        /// Serialized demographics object.
        demographics -> Text,
    }
}
