use crate::error::QuakeError;
use crate::record::{parse_line, EarthquakeRecord, ParsedLine};
use std::path::Path;

/// Date-ordered earthquake catalog with a forward-only read cursor.
///
/// A database always holds at least one record, so the time bounds are
/// always defined.
#[derive(Debug, Clone)]
pub struct EarthquakeDatabase {
    records: Vec<EarthquakeRecord>,
    cursor: usize,
    skipped_lines: usize,
}

impl EarthquakeDatabase {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuakeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| QuakeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Malformed lines are skipped and counted, never fatal.
    pub fn parse(content: &str) -> Result<Self, QuakeError> {
        let mut records = Vec::new();
        let mut skipped_lines = 0;

        for (line_number, line) in content.lines().enumerate() {
            match parse_line(line) {
                Ok(ParsedLine::Record(record)) => records.push(record),
                Ok(ParsedLine::Ignored) => {}
                Err(err) => {
                    log::debug!("skipping catalog line {}: {}", line_number + 1, err);
                    skipped_lines += 1;
                }
            }
        }

        if records.is_empty() {
            return Err(QuakeError::EmptyCatalog {
                skipped: skipped_lines,
            });
        }

        let mut database = Self::from_records(records)?;
        database.skipped_lines = skipped_lines;
        Ok(database)
    }

    /// Sorts by date and fills in each record's normalized magnitude.
    pub fn from_records(mut records: Vec<EarthquakeRecord>) -> Result<Self, QuakeError> {
        if records.is_empty() {
            return Err(QuakeError::EmptyCatalog { skipped: 0 });
        }

        records.sort_by_key(EarthquakeRecord::time);

        let (min_mag, max_mag) = records
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.magnitude), hi.max(r.magnitude))
            });
        let range = max_mag - min_mag;
        for record in &mut records {
            record.normalized_magnitude = if range > 0.0 {
                (record.magnitude - min_mag) / range
            } else {
                0.0
            };
        }

        Ok(Self {
            records,
            cursor: 0,
            skipped_lines: 0,
        })
    }

    /// Returns the next record due at `current_time` and advances past it.
    /// Call repeatedly to drain everything that is due.
    pub fn next_quake(&mut self, current_time: i64) -> Option<&EarthquakeRecord> {
        let record = self.records.get(self.cursor)?;
        if record.time() > current_time {
            return None;
        }
        self.cursor += 1;
        Some(record)
    }

    pub fn min_time(&self) -> i64 {
        self.records[0].time()
    }

    pub fn max_time(&self) -> i64 {
        self.records[self.records.len() - 1].time()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Positions the cursor so the next record returned is the first one
    /// strictly after `time`.
    pub fn seek(&mut self, time: i64) {
        self.cursor = self.records.partition_point(|r| r.time() <= time);
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records not yet returned by [`next_quake`](Self::next_quake).
    pub fn pending(&self) -> usize {
        self.records.len() - self.cursor
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
Date       Time             Lat       Lon  Depth   Mag Magt
-----------------------------------------------------------
1964/03/28 03:36:16.00  61.0200 -147.6500  25.00  9.20   Mw
1906/04/18 13:12:21.00  37.7500 -122.5500   8.00  7.90   Mw
1960/05/22 19:11:20.00 -38.2400  -73.0500  25.00  9.50   Mw
";

    fn times(db: &mut EarthquakeDatabase, now: i64) -> Vec<i64> {
        let mut out = Vec::new();
        while let Some(record) = db.next_quake(now) {
            out.push(record.time());
        }
        out
    }

    #[test]
    fn test_parse_sorts_by_date_and_counts_skipped_lines() {
        let db = EarthquakeDatabase::parse(CATALOG).unwrap();

        assert_eq!(db.len(), 3);
        assert_eq!(db.skipped_lines(), 2);
        let magnitudes: Vec<f32> = db.records().iter().map(|r| r.magnitude).collect();
        assert_eq!(magnitudes, vec![7.9, 9.5, 9.2]);
        assert!(db.min_time() < db.max_time());
    }

    #[test]
    fn test_normalized_magnitude_spans_unit_range() {
        let db = EarthquakeDatabase::parse(CATALOG).unwrap();
        let normalized: Vec<f32> = db.records().iter().map(|r| r.normalized_magnitude).collect();

        assert_eq!(normalized[0], 0.0);
        assert_eq!(normalized[1], 1.0);
        assert!((normalized[2] - 0.8125).abs() < 1e-4);
    }

    #[test]
    fn test_equal_magnitudes_normalize_to_zero() {
        let db = EarthquakeDatabase::parse(
            "2000/01/01 00:00:00.00 0 0 10 6.0\n2001/01/01 00:00:00.00 0 0 10 6.0\n",
        )
        .unwrap();
        assert!(db.records().iter().all(|r| r.normalized_magnitude == 0.0));
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let err = EarthquakeDatabase::parse("# nothing here\nnot a quake\n").unwrap_err();
        assert!(matches!(err, QuakeError::EmptyCatalog { skipped: 1 }));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = EarthquakeDatabase::load("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, QuakeError::Io { .. }));
    }

    #[test]
    fn test_next_quake_drains_due_records_in_order() {
        let mut db = EarthquakeDatabase::parse(CATALOG).unwrap();
        let all: Vec<i64> = db.records().iter().map(|r| r.time()).collect();

        assert_eq!(times(&mut db, all[0] - 1), Vec::<i64>::new());
        assert_eq!(times(&mut db, all[1]), vec![all[0], all[1]]);
        assert_eq!(times(&mut db, all[1]), Vec::<i64>::new());
        assert_eq!(times(&mut db, all[2]), vec![all[2]]);
        assert_eq!(db.pending(), 0);
        assert!(db.next_quake(i64::MAX).is_none());
    }

    #[test]
    fn test_reset_replays_from_earliest() {
        let mut db = EarthquakeDatabase::parse(CATALOG).unwrap();
        let first = times(&mut db, i64::MAX);

        db.reset();

        assert_eq!(times(&mut db, i64::MAX), first);
    }

    #[test]
    fn test_seek_skips_records_at_or_before_time() {
        let mut db = EarthquakeDatabase::parse(CATALOG).unwrap();
        let all: Vec<i64> = db.records().iter().map(|r| r.time()).collect();

        db.seek(all[1]);

        assert!(db.next_quake(all[1]).is_none());
        assert_eq!(times(&mut db, i64::MAX), vec![all[2]]);

        db.seek(i64::MIN);
        assert_eq!(db.pending(), 3);
    }
}
