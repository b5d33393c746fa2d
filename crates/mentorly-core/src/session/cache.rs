use super::model::MenteeId;
use crate::record::{Record, RecordType};
use std::collections::HashMap;

/// Saved data for one record type of one mentee.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedRecords {
    Single(Record),
    Multi(Vec<Record>),
}

impl CachedRecords {
    /// Builds the cache entry for `record_type` from a fetched list.
    ///
    /// Single-record types keep the first record; an empty list caches
    /// nothing.
    pub fn from_fetched(record_type: RecordType, mut records: Vec<Record>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        if record_type.is_multi_record() {
            Some(Self::Multi(records))
        } else {
            Some(Self::Single(records.swap_remove(0)))
        }
    }

    pub fn single(&self) -> Option<&Record> {
        match self {
            Self::Single(record) => Some(record),
            Self::Multi(_) => None,
        }
    }

    pub fn records(&self) -> &[Record] {
        match self {
            Self::Single(record) => std::slice::from_ref(record),
            Self::Multi(records) => records,
        }
    }
}

/// Session-local record cache: mentee -> record type -> saved data.
///
/// Never persisted; it lives and dies with the controller.
#[derive(Debug, Default)]
pub struct RecordCache {
    entries: HashMap<MenteeId, HashMap<RecordType, CachedRecords>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything cached for `mentee` with a freshly fetched set.
    pub fn replace_for(
        &mut self,
        mentee: MenteeId,
        fetched: impl IntoIterator<Item = (RecordType, Vec<Record>)>,
    ) {
        let entries = fetched
            .into_iter()
            .filter_map(|(record_type, records)| {
                CachedRecords::from_fetched(record_type, records).map(|c| (record_type, c))
            })
            .collect();
        self.entries.insert(mentee, entries);
    }

    pub fn get(&self, mentee: MenteeId, record_type: RecordType) -> Option<&CachedRecords> {
        self.entries.get(&mentee)?.get(&record_type)
    }

    pub fn store_single(&mut self, mentee: MenteeId, record_type: RecordType, record: Record) {
        self.entries
            .entry(mentee)
            .or_default()
            .insert(record_type, CachedRecords::Single(record));
    }

    pub fn store_multi(&mut self, mentee: MenteeId, record_type: RecordType, records: Vec<Record>) {
        self.entries
            .entry(mentee)
            .or_default()
            .insert(record_type, CachedRecords::Multi(records));
    }

    /// Record types cached for `mentee`.
    pub fn record_types(&self, mentee: MenteeId) -> Vec<RecordType> {
        let mut types: Vec<_> = self
            .entries
            .get(&mentee)
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default();
        types.sort_by_key(|t| t.as_str());
        types
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
