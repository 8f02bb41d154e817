//! Affirmation placement scheduling.
//!
//! Every phrase is repeated `R` times, the resulting list is shuffled, and a
//! cursor walks from the lead-in toward the trail window in nominal steps of
//! `duration / (N x R)` plus up to three seconds of jitter either way. The walk
//! stops at the trail window even if entries remain; those entries are simply
//! not placed. Jitter can make neighbouring placements overlap, which the mixer
//! handles additively.

use entrain_spec::{EDGE_WINDOW_SECONDS, JITTER_SECONDS};
use rand::seq::SliceRandom;
use rand::Rng;

/// One scheduled affirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    /// Position in the shuffled entry list.
    pub index: usize,
    /// Phrase to speak.
    pub phrase: &'a str,
    /// First frame the clip is mixed into.
    pub start_frame: usize,
}

/// Ordered placements plus the size of the list they were drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementSchedule<'a> {
    placements: Vec<Placement<'a>>,
    total_entries: usize,
}

impl<'a> PlacementSchedule<'a> {
    /// Placements in cursor order.
    pub fn placements(&self) -> &[Placement<'a>] {
        &self.placements
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Affirmations x repetitions, before truncation.
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Entries dropped because the cursor reached the trail window.
    pub fn dropped(&self) -> usize {
        self.total_entries - self.placements.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement<'a>> {
        self.placements.iter()
    }
}

impl<'s, 'a> IntoIterator for &'s PlacementSchedule<'a> {
    type Item = &'s Placement<'a>;
    type IntoIter = std::slice::Iter<'s, Placement<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

/// Repeats the phrase list `repetitions` times, whole list after whole list.
pub fn expand_entries(phrases: &[String], repetitions: usize) -> Vec<&str> {
    let mut entries = Vec::with_capacity(phrases.len() * repetitions);
    for _ in 0..repetitions {
        entries.extend(phrases.iter().map(String::as_str));
    }
    entries
}

/// Places affirmations over a track of fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffirmationScheduler {
    total_frames: usize,
    sample_rate: u32,
}

impl AffirmationScheduler {
    /// Creates a scheduler for a track of `total_frames` frames.
    pub fn new(total_frames: usize, sample_rate: u32) -> Self {
        Self {
            total_frames,
            sample_rate,
        }
    }

    fn seconds_to_frames(&self, seconds: u32) -> i64 {
        seconds as i64 * self.sample_rate as i64
    }

    /// First frame at or after which no placement may start.
    pub fn tail_boundary(&self) -> i64 {
        self.total_frames as i64 - self.seconds_to_frames(EDGE_WINDOW_SECONDS)
    }

    /// Nominal frames between placements for `entries` entries.
    pub fn interval_frames(&self, entries: usize) -> i64 {
        if entries == 0 || self.sample_rate == 0 {
            return 0;
        }
        let total_seconds = self.total_frames as f64 / self.sample_rate as f64;
        let interval = total_seconds / entries as f64;
        (interval * self.sample_rate as f64) as i64
    }

    /// Builds the placement schedule.
    ///
    /// The shuffle and the jitter both draw from `rng`, so a seeded RNG gives a
    /// reproducible schedule. A cursor that jitters below zero is placed at
    /// frame 0.
    pub fn schedule<'a, R: Rng + ?Sized>(
        &self,
        phrases: &'a [String],
        repetitions: usize,
        rng: &mut R,
    ) -> PlacementSchedule<'a> {
        let mut entries = expand_entries(phrases, repetitions);
        entries.shuffle(rng);

        let total_entries = entries.len();
        let interval = self.interval_frames(total_entries);
        let jitter = self.seconds_to_frames(JITTER_SECONDS);
        let boundary = self.tail_boundary();

        let mut cursor = self.seconds_to_frames(EDGE_WINDOW_SECONDS);
        let mut placements = Vec::new();

        for (index, phrase) in entries.into_iter().enumerate() {
            if cursor >= boundary {
                break;
            }

            placements.push(Placement {
                index,
                phrase,
                start_frame: cursor.max(0) as usize,
            });

            cursor += interval + rng.gen_range(-jitter..=jitter);
        }

        if placements.len() < total_entries {
            log::warn!(
                "placed {} of {} affirmations before the trail window",
                placements.len(),
                total_entries
            );
        }

        PlacementSchedule {
            placements,
            total_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use pretty_assertions::assert_eq;

    const SR: u32 = 22050;

    fn phrases(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("phrase {i}")).collect()
    }

    fn five_minutes() -> AffirmationScheduler {
        AffirmationScheduler::new(300 * SR as usize, SR)
    }

    #[test]
    fn test_expand_entries_repeats_each_phrase() {
        let list = phrases(4);
        let entries = expand_entries(&list, 3);

        assert_eq!(entries.len(), 12);
        for phrase in &list {
            assert_eq!(entries.iter().filter(|e| **e == phrase.as_str()).count(), 3);
        }
        assert_eq!(&entries[..4], &entries[4..8]);
    }

    #[test]
    fn test_single_affirmation_lands_at_thirty_seconds() {
        let list = vec!["Relax".to_string()];
        let schedule = five_minutes().schedule(&list, 1, &mut create_rng(7));

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.total_entries(), 1);
        assert_eq!(schedule.placements()[0].phrase, "Relax");
        assert_eq!(schedule.placements()[0].start_frame, 30 * SR as usize);
    }

    #[test]
    fn test_dense_schedule_is_truncated() {
        let list = phrases(20);
        let scheduler = five_minutes();

        let mut placed = 0;
        for seed in 0..16 {
            let schedule = scheduler.schedule(&list, 10, &mut create_rng(seed));
            assert_eq!(schedule.total_entries(), 200);
            assert!(schedule.len() <= 200);
            placed += schedule.len();
        }

        // Nominal walk fits 160; jitter is zero-mean
        let mean = placed as f64 / 16.0;
        assert!(mean < 190.0, "mean placements {mean}");
        assert!(mean > 130.0, "mean placements {mean}");
    }

    #[test]
    fn test_placements_respect_windows() {
        let list = phrases(10);
        let scheduler = five_minutes();
        let schedule = scheduler.schedule(&list, 5, &mut create_rng(99));

        for placement in &schedule {
            assert!((placement.start_frame as i64) < scheduler.tail_boundary());
        }
        assert_eq!(schedule.placements()[0].start_frame, 30 * SR as usize);
    }

    #[test]
    fn test_steps_stay_within_jitter() {
        let list = phrases(10);
        let scheduler = AffirmationScheduler::new(1200 * SR as usize, SR);
        let schedule = scheduler.schedule(&list, 2, &mut create_rng(3));
        let interval = scheduler.interval_frames(20);
        let jitter = 3 * SR as i64;

        for pair in schedule.placements().windows(2) {
            let step = pair[1].start_frame as i64 - pair[0].start_frame as i64;
            assert!(step >= interval - jitter && step <= interval + jitter);
        }
    }

    #[test]
    fn test_indices_follow_shuffled_order() {
        let list = phrases(6);
        let schedule = AffirmationScheduler::new(600 * SR as usize, SR).schedule(
            &list,
            1,
            &mut create_rng(11),
        );
        let indices: Vec<usize> = schedule.iter().map(|p| p.index).collect();
        assert_eq!(indices, (0..schedule.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let list = phrases(8);
        let scheduler = five_minutes();
        let a = scheduler.schedule(&list, 2, &mut create_rng(5));
        let b = scheduler.schedule(&list, 2, &mut create_rng(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_phrases_schedules_nothing() {
        let schedule = five_minutes().schedule(&[], 3, &mut create_rng(1));
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_entries(), 0);
        assert_eq!(schedule.dropped(), 0);
    }

    #[test]
    fn test_track_shorter_than_edges_schedules_nothing() {
        let list = phrases(2);
        let scheduler = AffirmationScheduler::new(50 * SR as usize, SR);
        let schedule = scheduler.schedule(&list, 1, &mut create_rng(1));
        assert!(schedule.is_empty());
        assert_eq!(schedule.dropped(), 2);
    }

    #[test]
    fn test_cursor_below_zero_is_clamped() {
        // 2000 entries over 100 s: 0.05 s nominal steps against 3 s jitter
        let list = phrases(1000);
        let scheduler = AffirmationScheduler::new(100 * SR as usize, SR);
        for seed in 0..4 {
            let schedule = scheduler.schedule(&list, 2, &mut create_rng(seed));
            assert!(schedule
                .iter()
                .all(|p| (p.start_frame as i64) < scheduler.tail_boundary()));
        }
    }
}
