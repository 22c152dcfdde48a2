//! Repeating-cycle scheduler for the marker ripple sequence
//!
//! The ripple animation is a fixed-length cycle divided into per-marker
//! windows. Rather than nesting ad hoc timers, the cycle is an explicit
//! sequence of `(offset, marker)` entries replayed against a clock, so the
//! timing contract is testable without wall-clock delays.

use std::time::Duration;

/// Cycle length used when no override is given
pub const DEFAULT_CYCLE: Duration = Duration::from_secs(12);

/// One scheduled ripple: fire `marker`'s ripple when the cycle clock
/// reaches `offset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEntry {
    pub offset: Duration,
    pub marker: usize,
}

/// An ordered sequence of ripple windows over one fixed-length cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSchedule {
    cycle: Duration,
    entries: Vec<CycleEntry>,
}

impl CycleSchedule {
    /// Divide `cycle` into equal windows, one per marker, in marker order.
    /// A zero-length cycle is clamped to one millisecond so the player
    /// cannot spin.
    pub fn evenly_divided(cycle: Duration, markers: usize) -> Self {
        let cycle = cycle.max(Duration::from_millis(1));
        if markers == 0 {
            return Self {
                cycle,
                entries: Vec::new(),
            };
        }

        let window = cycle / markers as u32;
        let entries = (0..markers)
            .map(|i| CycleEntry {
                offset: window * i as u32,
                marker: i,
            })
            .collect();
        Self { cycle, entries }
    }

    /// Total cycle length
    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// The scheduled entries in offset order
    pub fn entries(&self) -> &[CycleEntry] {
        &self.entries
    }
}

/// Replays a [`CycleSchedule`] against a monotonic clock, re-synchronizing
/// its timing reference once per cycle wrap.
///
/// The caller advances the player with absolute elapsed times; `tick`
/// returns the entries whose windows were reached since the previous call,
/// in schedule order. There is no cancellation path.
#[derive(Debug, Clone)]
pub struct CyclePlayer {
    schedule: CycleSchedule,
    reference: Duration,
    next: usize,
}

impl CyclePlayer {
    /// Create a player with its reference at the start of the clock
    pub fn new(schedule: CycleSchedule) -> Self {
        Self {
            schedule,
            reference: Duration::ZERO,
            next: 0,
        }
    }

    /// The schedule being replayed
    pub fn schedule(&self) -> &CycleSchedule {
        &self.schedule
    }

    /// Advance the player to absolute time `now`, returning every entry
    /// that became due. When the clock passes the end of a cycle the
    /// reference is re-synchronized by whole cycles, so a stalled clock
    /// skips ahead instead of replaying missed cycles.
    pub fn tick(&mut self, now: Duration) -> Vec<CycleEntry> {
        let entries = &self.schedule.entries;
        let mut fired = Vec::new();

        loop {
            while self.next < entries.len()
                && self.reference + entries[self.next].offset <= now
            {
                fired.push(entries[self.next].clone());
                self.next += 1;
            }

            if self.next == entries.len() && now >= self.reference + self.schedule.cycle {
                let elapsed = now - self.reference;
                let whole = (elapsed.as_nanos() / self.schedule.cycle.as_nanos()).max(1);
                self.reference += self.schedule.cycle * whole as u32;
                self.next = 0;
                continue;
            }

            return fired;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_evenly_divided_offsets() {
        let schedule = CycleSchedule::evenly_divided(ms(1200), 4);
        let offsets: Vec<_> = schedule.entries().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, [ms(0), ms(300), ms(600), ms(900)]);
        assert_eq!(schedule.cycle(), ms(1200));
    }

    #[test]
    fn test_evenly_divided_no_markers() {
        let schedule = CycleSchedule::evenly_divided(ms(1200), 0);
        assert!(schedule.entries().is_empty());
    }

    #[test]
    fn test_zero_cycle_clamped() {
        let schedule = CycleSchedule::evenly_divided(Duration::ZERO, 2);
        assert!(schedule.cycle() >= ms(1));
    }

    #[test]
    fn test_entries_fire_in_window_order() {
        let mut player = CyclePlayer::new(CycleSchedule::evenly_divided(ms(1000), 2));

        assert_eq!(player.tick(ms(0)).len(), 1); // marker 0 at offset 0
        assert!(player.tick(ms(200)).is_empty()); // between windows
        let fired = player.tick(ms(500));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].marker, 1);
    }

    #[test]
    fn test_cycle_wraps_and_fires_again() {
        let mut player = CyclePlayer::new(CycleSchedule::evenly_divided(ms(1000), 2));

        assert_eq!(player.tick(ms(999)).len(), 2); // whole first cycle
        let fired = player.tick(ms(1000)); // wrap: marker 0 of cycle two
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].marker, 0);
    }

    #[test]
    fn test_coarse_tick_fires_everything_due() {
        let mut player = CyclePlayer::new(CycleSchedule::evenly_divided(ms(1000), 4));
        let fired = player.tick(ms(800));
        assert_eq!(
            fired.iter().map(|e| e.marker).collect::<Vec<_>>(),
            [0, 1, 2, 3]
        );
    }

    #[test]
    fn test_stalled_clock_resynchronizes() {
        let mut player = CyclePlayer::new(CycleSchedule::evenly_divided(ms(1000), 2));
        assert_eq!(player.tick(ms(999)).len(), 2);

        // The clock jumps three and a half cycles ahead: missed cycles are
        // skipped, not replayed, and the reference lands on a cycle start
        let fired = player.tick(ms(4600));
        assert_eq!(
            fired.iter().map(|e| e.marker).collect::<Vec<_>>(),
            [0, 1]
        );

        // Next window is marker 0 of the cycle starting at 5000
        assert!(player.tick(ms(4900)).is_empty());
        let fired = player.tick(ms(5000));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].marker, 0);
    }

    #[test]
    fn test_empty_schedule_never_fires() {
        let mut player = CyclePlayer::new(CycleSchedule::evenly_divided(ms(1000), 0));
        assert!(player.tick(ms(10_000)).is_empty());
        assert!(player.tick(ms(20_000)).is_empty());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let schedule = CycleSchedule::evenly_divided(ms(900), 3);
        let run = |instants: &[u64]| {
            let mut player = CyclePlayer::new(schedule.clone());
            instants
                .iter()
                .flat_map(|&t| player.tick(ms(t)))
                .map(|e| e.marker)
                .collect::<Vec<_>>()
        };

        let instants = [0, 150, 300, 450, 600, 750, 900, 1050];
        assert_eq!(run(&instants), run(&instants));
    }
}
