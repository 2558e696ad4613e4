use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One past completion, as shown in the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock time, `HH:MM:SS`.
    pub time: String,
}

impl CompletionRecord {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
        }
    }
}

/// Session-local, append-only completion log in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<CompletionRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: CompletionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[CompletionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&CompletionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompletionRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a CompletionRecord;
    type IntoIter = std::slice::Iter<'a, CompletionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn record_formats_date_and_time() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(8, 5, 9)
            .unwrap();
        let rec = CompletionRecord::at(now);
        assert_eq!(rec.date, "2026-03-07");
        assert_eq!(rec.time, "08:05:09");
    }

    #[test]
    fn history_keeps_insertion_order() {
        let mut history = History::new();
        assert!(history.is_empty());
        for (date, time) in [("2026-01-01", "18:00:00"), ("2026-01-02", "18:00:00")] {
            history.push(CompletionRecord {
                date: date.into(),
                time: time.into(),
            });
        }
        assert_eq!(history.len(), 2);
        let dates: Vec<_> = history.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2026-01-01", "2026-01-02"]);
        assert_eq!(history.last().unwrap().date, "2026-01-02");
    }
}
