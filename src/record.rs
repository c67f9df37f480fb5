//! The occupancy record: one bookable room-night and its wire layout.
//!
//! A record body on disk is always [`RECORD_LENGTH`] bytes:
//!
//! ```text
//! deleted (1) | name (64) | location (64) | size (4) | smoking (1)
//!             | rate (8)  | date (10)     | owner (8)
//! ```
//!
//! The record address is a positional index maintained by the store and is
//! never encoded in the body. Accessors return canonical field values:
//! truncated to wire width, empty for unset. Deletion is a soft flag; a
//! deleted record stays in memory and on disk.

use std::fmt;

use jiff::civil::Date;

use crate::normalize;

/// Width of the deleted flag, in bytes.
pub const DELETED_LENGTH: usize = 1;

/// Width of the hotel name field.
pub const NAME_LENGTH: usize = 64;

/// Width of the city field.
pub const LOCATION_LENGTH: usize = 64;

/// Width of the maximum-occupancy field.
pub const SIZE_LENGTH: usize = 4;

/// Width of the smoking flag.
pub const SMOKING_LENGTH: usize = 1;

/// Width of the nightly rate field, currency symbol included.
pub const RATE_LENGTH: usize = 8;

/// Width of the date field, textual `yyyy/mm/dd`.
pub const DATE_LENGTH: usize = 10;

/// Width of the customer id field.
pub const OWNER_LENGTH: usize = 8;

/// Total encoded record body length: 132 bytes for this schema.
pub const RECORD_LENGTH: usize = DELETED_LENGTH
    + NAME_LENGTH
    + LOCATION_LENGTH
    + SIZE_LENGTH
    + SMOKING_LENGTH
    + RATE_LENGTH
    + DATE_LENGTH
    + OWNER_LENGTH;

/// One bookable room-night.
///
/// Constructed either from the raw field sequence read from storage
/// ([`Occupancy::from_fields`]) or from fully typed parts
/// ([`Occupancy::new`]); mutated in place through setters during edits.
/// Records are never destroyed in memory — deletion is the flag, persisted
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occupancy {
    address: u64,
    deleted: u8,
    name: Option<String>,
    location: Option<String>,
    size: i32,
    smoking: char,
    rate: Option<String>,
    date: Option<Date>,
    owner: Option<String>,
}

impl Occupancy {
    /// Builds a record from the ordered field strings read from storage.
    ///
    /// Positional: name, location, size, smoking, rate, date, owner, then
    /// the deleted-flag byte (the first byte of that field's raw bytes).
    /// Fields beyond the supplied length default: text to unset, size to 0,
    /// smoking to blank, date to unset, deleted to 0.
    ///
    /// This never fails. Malformed size and date fields degrade through
    /// [`normalize`] with a diagnostic rather than aborting the decode.
    pub fn from_fields<S: AsRef<str>>(address: u64, fields: &[S]) -> Self {
        let text = |i: usize| fields.get(i).map(|f| f.as_ref().trim().to_string());
        Self {
            address,
            name: text(0),
            location: text(1),
            size: fields.get(2).map_or(0, |f| normalize::size(f.as_ref())),
            smoking: fields
                .get(3)
                .and_then(|f| f.as_ref().chars().next())
                .map_or(' ', normalize::smoking),
            rate: text(4),
            date: fields
                .get(5)
                .and_then(|f| normalize::date(f.as_ref(), normalize::DATE_PATTERN)),
            owner: text(6),
            deleted: fields
                .get(7)
                .and_then(|f| f.as_ref().as_bytes().first().copied())
                .unwrap_or(0),
        }
    }

    /// Builds a record from fully typed parts.
    #[allow(clippy::too_many_arguments)] // One parameter per wire field, in wire order.
    pub fn new(
        address: u64,
        name: impl Into<String>,
        location: impl Into<String>,
        size: i32,
        smoking: char,
        rate: impl Into<String>,
        date: Option<Date>,
        owner: impl Into<String>,
        deleted: u8,
    ) -> Self {
        Self {
            address,
            deleted,
            name: Some(name.into()),
            location: Some(location.into()),
            size,
            smoking: normalize::smoking(smoking),
            rate: Some(rate.into()),
            date,
            owner: Some(owner.into()),
        }
    }

    /// The record's byte offset in the store. Assigned once, never changed.
    pub fn address(&self) -> u64 {
        self.address
    }

    /// The raw deleted-flag byte: 0 active, nonzero deleted.
    pub fn deleted(&self) -> u8 {
        self.deleted
    }

    /// Whether the soft-delete flag is set.
    pub fn is_deleted(&self) -> bool {
        self.deleted > 0
    }

    pub fn set_deleted(&mut self, deleted: u8) {
        self.deleted = deleted;
    }

    /// Hotel name, truncated to [`NAME_LENGTH`]. Empty when unset.
    pub fn name(&self) -> String {
        normalize::truncate(self.name.as_deref(), NAME_LENGTH)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Hotel city, truncated to [`LOCATION_LENGTH`]. Empty when unset.
    pub fn location(&self) -> String {
        normalize::truncate(self.location.as_deref(), LOCATION_LENGTH)
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Maximum occupancy. 0 means no value set.
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn set_size(&mut self, size: i32) {
        self.size = size;
    }

    /// Whether smoking is permitted in the room.
    pub fn is_smoking(&self) -> bool {
        self.smoking == 'Y'
    }

    /// The canonical smoking flag: `'Y'`, `'N'`, or `' '` (unset).
    pub fn smoking(&self) -> char {
        self.smoking
    }

    /// Sets the smoking flag, canonicalizing through [`normalize::smoking`].
    pub fn set_smoking(&mut self, smoking: char) {
        self.smoking = normalize::smoking(smoking);
    }

    /// Nightly rate including the currency symbol, truncated to
    /// [`RATE_LENGTH`]. Empty when unset.
    pub fn rate(&self) -> String {
        normalize::truncate(self.rate.as_deref(), RATE_LENGTH)
    }

    pub fn set_rate(&mut self, rate: impl Into<String>) {
        self.rate = Some(rate.into());
    }

    /// The night this record relates to, when one is set.
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<Date>) {
        self.date = date;
    }

    /// The date in the wire pattern `yyyy/mm/dd`. Empty when unset.
    pub fn formatted_date(&self) -> String {
        normalize::format_date(self.date, normalize::DATE_PATTERN)
    }

    /// The date in the given strftime-style pattern.
    ///
    /// An unset date or an invalid pattern yields the empty string.
    pub fn formatted_date_with(&self, pattern: &str) -> String {
        normalize::format_date(self.date, pattern)
    }

    /// Whether a customer currently holds this room-night.
    pub fn has_owner(&self) -> bool {
        self.owner.as_deref().is_some_and(|o| !o.is_empty())
    }

    /// Id of the customer holding this record, truncated to
    /// [`OWNER_LENGTH`]. Empty when unset.
    pub fn owner(&self) -> String {
        normalize::truncate(self.owner.as_deref(), OWNER_LENGTH)
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = Some(owner.into());
    }

    /// Renders the record as the ordered field strings written back to
    /// storage: name, location, size, smoking, rate, date, owner.
    ///
    /// The deleted flag is deliberately absent from this sequence — the
    /// store persists it through a separate call, so decode reads eight
    /// fields while encode writes seven. Size 0 and the blank smoking flag
    /// render as empty fields, not as literal values.
    pub fn to_wire_fields(&self) -> [String; 7] {
        [
            self.name(),
            self.location(),
            if self.size == 0 {
                String::new()
            } else {
                self.size.to_string()
            },
            if self.smoking == ' ' {
                String::new()
            } else {
                self.smoking.to_string()
            },
            self.rate(),
            self.formatted_date(),
            self.owner(),
        ]
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Occupancy {{ address: {}, deleted: {} ({}), name: {:?}, \
             location: {:?}, size: {}, smoking: {:?} ({}), rate: {:?}, \
             date: {:?}, owner: {:?} }}",
            self.address,
            self.deleted,
            self.is_deleted(),
            self.name(),
            self.location(),
            self.size,
            self.smoking,
            self.is_smoking(),
            self.rate(),
            self.formatted_date(),
            self.owner(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::hash::{DefaultHasher, Hash, Hasher};

    use jiff::civil::date;

    const FIELDS: [&str; 7] = [
        "Grand Hotel",
        "Springfield",
        "2",
        "Y",
        "$100",
        "2024/03/15",
        "12345678",
    ];

    fn hash_of(record: &Occupancy) -> u64 {
        let mut hasher = DefaultHasher::new();
        record.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn record_length_is_132_bytes() {
        assert_eq!(RECORD_LENGTH, 132);
    }

    #[test]
    fn decodes_a_well_formed_field_sequence() {
        let record = Occupancy::from_fields(0, &FIELDS);

        assert_eq!(record.address(), 0);
        assert_eq!(record.name(), "Grand Hotel");
        assert_eq!(record.location(), "Springfield");
        assert_eq!(record.size(), 2);
        assert_eq!(record.smoking(), 'Y');
        assert!(record.is_smoking());
        assert_eq!(record.rate(), "$100");
        assert_eq!(record.date(), Some(date(2024, 3, 15)));
        assert_eq!(record.owner(), "12345678");
        assert_eq!(record.deleted(), 0);
        assert!(!record.is_deleted());
    }

    #[test]
    fn decode_reads_the_deleted_flag_from_the_eighth_field() {
        let mut fields: Vec<String> = FIELDS.iter().map(ToString::to_string).collect();
        fields.push(String::from('\u{1}'));

        let record = Occupancy::from_fields(3, &fields);
        assert_eq!(record.deleted(), 1);
        assert!(record.is_deleted());
    }

    #[test]
    fn decode_defaults_missing_trailing_fields() {
        let record = Occupancy::from_fields(0, &["Grand Hotel"]);

        assert_eq!(record.name(), "Grand Hotel");
        assert_eq!(record.location(), "");
        assert_eq!(record.size(), 0);
        assert_eq!(record.smoking(), ' ');
        assert_eq!(record.rate(), "");
        assert_eq!(record.date(), None);
        assert_eq!(record.owner(), "");
        assert_eq!(record.deleted(), 0);
    }

    #[test]
    fn decode_of_empty_sequence_yields_a_blank_record() {
        let record = Occupancy::from_fields(7, &[] as &[&str]);

        assert_eq!(record.address(), 7);
        assert_eq!(record.to_wire_fields(), [""; 7].map(String::from));
    }

    #[test]
    fn unparsable_size_degrades_to_zero() {
        let record =
            Occupancy::from_fields(0, &["Grand Hotel", "Springfield", "abc", "Y", "$100"]);
        assert_eq!(record.size(), 0);
    }

    #[test]
    fn unparsable_date_degrades_to_unset() {
        let record = Occupancy::from_fields(
            0,
            &["Grand Hotel", "Springfield", "2", "Y", "$100", "next week"],
        );
        assert_eq!(record.date(), None);
        assert_eq!(record.formatted_date(), "");
    }

    #[test]
    fn decode_trims_text_fields() {
        let record = Occupancy::from_fields(0, &["  Grand Hotel  ", " Springfield "]);
        assert_eq!(record.name(), "Grand Hotel");
        assert_eq!(record.location(), "Springfield");
    }

    #[test]
    fn name_longer_than_the_field_truncates_to_width() {
        let long = "x".repeat(70);
        let mut record = Occupancy::from_fields(0, &[long.as_str()]);

        assert_eq!(record.name().len(), NAME_LENGTH);
        assert_eq!(record.name(), long[..NAME_LENGTH]);

        record.set_owner("123456789");
        assert_eq!(record.owner(), "12345678");
    }

    #[test]
    fn wire_fields_reproduce_decoded_values() {
        let record = Occupancy::from_fields(0, &FIELDS);
        assert_eq!(record.to_wire_fields(), FIELDS.map(String::from));
    }

    #[test]
    fn size_zero_and_blank_smoking_render_as_empty_fields() {
        let record = Occupancy::new(0, "Grand Hotel", "Springfield", 0, ' ', "$100", None, "", 0);
        let fields = record.to_wire_fields();

        assert_eq!(fields[2], "");
        assert_eq!(fields[3], "");
        assert_eq!(fields[5], "");
    }

    #[test]
    fn typed_constructor_canonicalizes_smoking() {
        let record = Occupancy::new(0, "Grand Hotel", "Springfield", 2, '1', "$100", None, "", 0);
        assert_eq!(record.smoking(), 'Y');
    }

    #[test]
    fn setters_mutate_in_place() {
        let mut record = Occupancy::from_fields(0, &FIELDS);

        record.set_name("Budget Inn");
        record.set_location("Shelbyville");
        record.set_size(4);
        record.set_smoking('n');
        record.set_rate("$80");
        record.set_date(Some(date(2024, 4, 1)));
        record.set_owner("87654321");
        record.set_deleted(1);

        assert_eq!(
            record.to_wire_fields(),
            ["Budget Inn", "Shelbyville", "4", "N", "$80", "2024/04/01", "87654321"]
                .map(String::from)
        );
        assert!(record.is_deleted());
    }

    #[test]
    fn has_owner_requires_a_nonempty_owner() {
        let taken = Occupancy::from_fields(0, &FIELDS);
        assert!(taken.has_owner());

        let free = Occupancy::from_fields(0, &FIELDS[..6]);
        assert!(!free.has_owner());
    }

    #[test]
    fn identically_decoded_records_are_equal_and_hash_equal() {
        let a = Occupancy::from_fields(5, &FIELDS);
        let b = Occupancy::from_fields(5, &FIELDS);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn records_at_different_addresses_are_not_equal() {
        let a = Occupancy::from_fields(0, &FIELDS);
        let b = Occupancy::from_fields(132, &FIELDS);
        assert_ne!(a, b);
    }

    #[test]
    fn deleted_flag_participates_in_equality() {
        let a = Occupancy::from_fields(0, &FIELDS);
        let mut b = Occupancy::from_fields(0, &FIELDS);
        b.set_deleted(1);
        assert_ne!(a, b);
    }

    #[test]
    fn display_shows_raw_flags_with_their_boolean_reading() {
        let record = Occupancy::from_fields(0, &FIELDS);
        let shown = record.to_string();

        assert!(shown.contains("deleted: 0 (false)"));
        assert!(shown.contains("smoking: 'Y' (true)"));
        assert!(shown.contains("Grand Hotel"));
        assert!(shown.contains("2024/03/15"));
    }
}
