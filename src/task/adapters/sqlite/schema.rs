//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Trimmed, non-empty title.
        title -> Text,
        /// Free-form notes.
        notes -> Text,
        /// Optional `YYYY-MM-DD` commit-by date.
        commit_by -> Nullable<Text>,
        /// Creation timestamp (RFC 3339, milliseconds, UTC).
        created_at -> Text,
        /// Last update timestamp (RFC 3339, milliseconds, UTC).
        updated_at -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Optional palette label colour.
        label_color -> Nullable<Text>,
    }
}
