//! Collapse repeated festival names, last occurrence wins.

use std::collections::HashMap;

use crate::models::FestivalRecord;

/// Keep one record per `name`, preferring the one seen last.
///
/// Output is ordered by where each name first appeared. That order carries no
/// meaning; callers should not rely on it.
pub fn dedupe_by_name(records: Vec<FestivalRecord>) -> Vec<FestivalRecord> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut out: Vec<FestivalRecord> = Vec::with_capacity(records.len());

    for record in records {
        match slots.get(&record.name) {
            Some(&slot) => out[slot] = record,
            None => {
                slots.insert(record.name.clone(), out.len());
                out.push(record);
            }
        }
    }

    out
}
