//! In-place gain and overlay on the committed track.
//!
//! Both passes work sample by sample on the 16-bit buffer: each value is
//! widened to `f32`, scaled or summed, clipped to +/-32767 and truncated back
//! to `i16`. No second full-length buffer is ever allocated.

use crate::track::{AudioTrack, SAMPLE_LIMIT};

/// Seconds of audio scaled per gain chunk.
pub const GAIN_CHUNK_SECONDS: u32 = 30;

#[inline]
fn commit(value: f32) -> i16 {
    value.clamp(-SAMPLE_LIMIT, SAMPLE_LIMIT) as i16
}

/// Scales every sample of the track by `gain`.
pub fn apply_gain(track: &mut AudioTrack, gain: f32) {
    let chunk_frames = track.frames_per(GAIN_CHUNK_SECONDS).max(1);
    for chunk in track.frames_mut().chunks_mut(chunk_frames) {
        for frame in chunk.iter_mut() {
            frame[0] = commit(frame[0] as f32 * gain);
            frame[1] = commit(frame[1] as f32 * gain);
        }
    }
}

/// Adds a mono clip, scaled by `gain`, to both channels starting at `start`.
///
/// The clip is cut at the end of the track. Returns the number of frames
/// actually mixed.
pub fn overlay(track: &mut AudioTrack, start: usize, clip: &[i16], gain: f32) -> usize {
    let total = track.num_frames();
    if start >= total {
        return 0;
    }

    let end = start.saturating_add(clip.len()).min(total);
    let region = &mut track.frames_mut()[start..end];

    for (frame, &sample) in region.iter_mut().zip(clip) {
        let voice = sample as f32 * gain;
        frame[0] = commit(frame[0] as f32 + voice);
        frame[1] = commit(frame[1] as f32 + voice);
    }

    end - start
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gain_scales_and_truncates() {
        let mut track = AudioTrack::from_frames(vec![[1000, -1000], [3, -3]], 8000);
        apply_gain(&mut track, 0.5);
        assert_eq!(track.frames(), &[[500, -500], [1, -1]]);
    }

    #[test]
    fn test_gain_clips_symmetrically() {
        let mut track = AudioTrack::from_frames(vec![[20000, -20000], [i16::MIN, 0]], 8000);
        apply_gain(&mut track, 2.0);
        assert_eq!(track.frames(), &[[32767, -32767], [-32767, 0]]);
    }

    #[test]
    fn test_gain_covers_partial_last_chunk() {
        // 2.5 chunks at 10 Hz
        let mut track = AudioTrack::from_frames(vec![[100, 100]; 750], 10);
        apply_gain(&mut track, 0.1);
        assert!(track.frames().iter().all(|f| *f == [10, 10]));
    }

    #[test]
    fn test_overlay_adds_to_both_channels() {
        let mut track = AudioTrack::from_frames(vec![[100, -100]; 6], 8000);
        let mixed = overlay(&mut track, 2, &[1000, 2000], 0.5);
        assert_eq!(mixed, 2);
        assert_eq!(
            track.frames(),
            &[
                [100, -100],
                [100, -100],
                [600, 400],
                [1100, 900],
                [100, -100],
                [100, -100],
            ]
        );
    }

    #[test]
    fn test_overlay_is_cut_at_track_end() {
        let mut track = AudioTrack::silent(4, 8000);
        let mixed = overlay(&mut track, 2, &[10, 20, 30, 40], 1.0);
        assert_eq!(mixed, 2);
        assert_eq!(track.frames(), &[[0, 0], [0, 0], [10, 10], [20, 20]]);
    }

    #[test]
    fn test_overlay_past_end_is_noop() {
        let mut track = AudioTrack::silent(4, 8000);
        assert_eq!(overlay(&mut track, 4, &[10], 1.0), 0);
        assert_eq!(overlay(&mut track, usize::MAX, &[10], 1.0), 0);
        assert_eq!(track.peak(), 0);
    }

    #[test]
    fn test_overlapping_clips_sum_and_clip() {
        let mut track = AudioTrack::silent(3, 8000);
        overlay(&mut track, 0, &[30000, 30000], 1.0);
        overlay(&mut track, 1, &[30000, -5000], 1.0);
        assert_eq!(track.frames(), &[[30000, 30000], [32767, 32767], [-5000, -5000]]);
    }
}
