//! Weekday-keyed schedule persisted in the `weekData` slot.
//!
//! Persisted as `{"day0": [...], ..., "day6": [...]}` with only non-empty
//! days present. Unknown keys in stored data are dropped on load.

use crate::model::schedule::{
    parse_weekday_slot_key, weekday_slot_key, BlockId, ScheduleBlock, DAYS_PER_WEEK,
};
use crate::model::task::normalize_text;
use crate::repo::{position_of, CollectionError, CollectionResult};
use crate::store::{load_json_entries, save_json, KvStore, StoreResult, WEEK_DATA_SLOT};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Vec<ScheduleBlock>; DAYS_PER_WEEK],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from persisted `dayN` entries.
    pub fn from_entries(entries: BTreeMap<String, Vec<ScheduleBlock>>) -> Self {
        let mut schedule = Self::default();
        for (key, blocks) in entries {
            if let Some(index) = parse_weekday_slot_key(&key) {
                schedule.days[index] = blocks;
            }
        }
        schedule
    }

    pub fn load(store: &dyn KvStore) -> Self {
        Self::from_entries(load_json_entries(store, WEEK_DATA_SLOT))
    }

    pub fn persist(&self, store: &mut dyn KvStore) -> StoreResult<()> {
        save_json(store, WEEK_DATA_SLOT, &self.to_entries())
    }

    /// Persisted shape; empty weekdays are omitted.
    pub fn to_entries(&self) -> BTreeMap<String, &[ScheduleBlock]> {
        self.days
            .iter()
            .enumerate()
            .filter(|(_, blocks)| !blocks.is_empty())
            .map(|(index, blocks)| (weekday_slot_key(index), blocks.as_slice()))
            .collect()
    }

    /// Blocks for a Monday-first weekday index.
    pub fn blocks(&self, weekday: u8) -> CollectionResult<&[ScheduleBlock]> {
        let index = checked_weekday(weekday)?;
        Ok(&self.days[index])
    }

    /// Block count per weekday, Monday-first.
    pub fn counts(&self) -> [usize; DAYS_PER_WEEK] {
        std::array::from_fn(|index| self.days[index].len())
    }

    pub fn total_blocks(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Appends a block. `Ok(None)` when `text` is blank.
    pub fn add(&mut self, weekday: u8, text: &str) -> CollectionResult<Option<BlockId>> {
        let index = checked_weekday(weekday)?;
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };
        let block = ScheduleBlock::new(text);
        let id = block.id;
        self.days[index].push(block);
        Ok(Some(id))
    }

    /// Removes by position within a weekday. Out-of-range positions are ignored.
    pub fn remove_at(&mut self, weekday: u8, index: usize) -> CollectionResult<Option<ScheduleBlock>> {
        let day = checked_weekday(weekday)?;
        let blocks = &mut self.days[day];
        Ok((index < blocks.len()).then(|| blocks.remove(index)))
    }

    /// Removes a block by id from whichever weekday holds it.
    pub fn remove(&mut self, id: BlockId) -> CollectionResult<ScheduleBlock> {
        self.days
            .iter_mut()
            .find_map(|blocks| {
                position_of(blocks.as_slice(), id, |block| block.id).map(|index| blocks.remove(index))
            })
            .ok_or(CollectionError::NotFound(id))
    }
}

fn checked_weekday(weekday: u8) -> CollectionResult<usize> {
    let index = usize::from(weekday);
    if index < DAYS_PER_WEEK {
        Ok(index)
    } else {
        Err(CollectionError::InvalidWeekday(weekday))
    }
}

#[cfg(test)]
mod tests {
    use super::WeeklySchedule;
    use crate::repo::CollectionError;
    use std::collections::BTreeMap;

    #[test]
    fn add_rejects_out_of_range_weekday() {
        let mut schedule = WeeklySchedule::new();
        assert_eq!(
            schedule.add(7, "Math"),
            Err(CollectionError::InvalidWeekday(7))
        );
        assert_eq!(schedule.add(0, "   "), Ok(None));
        assert_eq!(schedule.total_blocks(), 0);
    }

    #[test]
    fn emptied_weekday_disappears_from_persisted_shape() {
        let mut schedule = WeeklySchedule::new();
        schedule.add(0, "Math").unwrap();
        schedule.add(3, "Chem").unwrap();
        schedule.remove_at(3, 0).unwrap();

        let entries = schedule.to_entries();
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["day0"]);
    }

    #[test]
    fn from_entries_ignores_unknown_keys() {
        let raw = r#"{"day1":["Bio"],"day9":["x"],"notes":["y"]}"#;
        let entries: BTreeMap<String, Vec<_>> = serde_json::from_str(raw).unwrap();
        let schedule = WeeklySchedule::from_entries(entries);
        assert_eq!(schedule.counts(), [0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn remove_by_id_searches_every_weekday() {
        let mut schedule = WeeklySchedule::new();
        schedule.add(2, "Art").unwrap();
        let id = schedule.add(5, "Music").unwrap().unwrap();
        assert_eq!(schedule.remove(id).unwrap().text, "Music");
        assert_eq!(schedule.remove(id), Err(CollectionError::NotFound(id)));
    }
}
