use crate::clock::{ClockTick, SimulationClock};
use crate::config::QuakeVisConfig;
use crate::database::EarthquakeDatabase;
use crate::earth::Earth;
use crate::marker::MarkerId;
use crate::settings::{SettingChange, VisSettings};

/// Outcome of one [`QuakeVis::update`] call, for whatever mirrors the
/// markers into a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub now: Option<i64>,
    pub clock: ClockTick,
    pub spawned: Vec<MarkerId>,
    /// Markers removed this tick, by expiry or by a seek.
    pub expired: Vec<MarkerId>,
}

impl TickReport {
    pub fn skipped() -> Self {
        Self {
            now: None,
            clock: ClockTick::Idle,
            spawned: Vec::new(),
            expired: Vec::new(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.clock == ClockTick::Idle
    }
}

/// Ties the catalog, the clock and the earth together.
#[derive(Debug, Clone)]
pub struct QuakeVis {
    pub earth: Earth,
    pub clock: SimulationClock,
    pub settings: VisSettings,
    database: Option<EarthquakeDatabase>,
    /// Removals caused by `apply` between ticks, reported with the next tick.
    pending_removals: Vec<MarkerId>,
}

impl QuakeVis {
    pub fn new(config: &QuakeVisConfig) -> Self {
        Self {
            earth: Earth::from_config(config),
            clock: SimulationClock::new(config.playback.millis_per_second),
            settings: VisSettings::from_config(&config.playback),
            database: None,
            pending_removals: Vec::new(),
        }
    }

    pub fn attach_database(&mut self, database: EarthquakeDatabase) {
        log::debug!(
            "earthquake catalog ready: {} records, {} lines skipped",
            database.len(),
            database.skipped_lines()
        );
        self.database = Some(database);
    }

    pub fn database(&self) -> Option<&EarthquakeDatabase> {
        self.database.as_ref()
    }

    /// `(min, max)` of the catalog, once loaded.
    pub fn time_bounds(&self) -> Option<(i64, i64)> {
        self.database.as_ref().map(|db| (db.min_time(), db.max_time()))
    }

    pub fn apply(&mut self, change: SettingChange) {
        self.settings.apply(change);
        match change {
            SettingChange::DebugMode(enabled) => {
                self.earth.toggle_debug_mode(enabled);
            }
            SettingChange::Seek(time) => self.seek(time),
            _ => {}
        }
    }

    fn seek(&mut self, time: i64) {
        let Some(database) = self.database.as_mut() else {
            return;
        };
        let time = self.clock.seek(time, database.min_time(), database.max_time());
        // Records at the new instant are due on the next tick.
        database.seek(time.saturating_sub(1));
        let removed = self.earth.clear_markers();
        self.pending_removals.extend(removed);
    }

    /// Rebuilds the earth, clock and settings from `config`, keeping the
    /// catalog and restarting playback from its first record.
    pub fn reconfigure(&mut self, config: &QuakeVisConfig) {
        let removed = self.earth.clear_markers();
        self.pending_removals.extend(removed);
        self.earth = Earth::from_config(config);
        self.clock = SimulationClock::new(config.playback.millis_per_second);
        self.settings = VisSettings::from_config(&config.playback);
        if let Some(database) = self.database.as_mut() {
            database.reset();
        }
    }

    /// One frame: advance the clock, spawn due quakes, animate, expire.
    /// Does nothing at all until a catalog is attached.
    pub fn update(&mut self, delta_time: f32) -> TickReport {
        let Some(database) = self.database.as_mut() else {
            return TickReport::skipped();
        };

        let clock = self.clock.advance(
            delta_time,
            self.settings.playback_speed,
            database.min_time(),
            database.max_time(),
        );
        if clock == ClockTick::Wrapped {
            database.reset();
        }
        let now = self.clock.now().unwrap_or_else(|| database.min_time());

        let mut spawned = Vec::new();
        while let Some(record) = database.next_quake(now) {
            spawned.push(self.earth.create_earthquake(record));
        }

        self.earth.update(delta_time, &self.settings);
        let mut expired = std::mem::take(&mut self.pending_removals);
        expired.extend(self.earth.animate_earthquakes(now));

        TickReport {
            now: Some(now),
            clock,
            spawned,
            expired,
        }
    }
}

impl Default for QuakeVis {
    fn default() -> Self {
        Self::new(&QuakeVisConfig::default())
    }
}
