pub mod frequency;
pub mod hot_keys;

/// Column names assigned to the headerless key-statistics files.
pub const KEYS_COLUMN: &str = "Keys";
pub const FREQUENCIES_COLUMN: &str = "Frequencies";
