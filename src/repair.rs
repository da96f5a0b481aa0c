//! The two repair passes for defects in client-recorded keypress data.
//!
//! The recording client computes each sample's delta as "time since this
//! beat" when less than half the beat interval has elapsed, otherwise as
//! "negative time until the next beat" — but always stamps the sample with
//! the current beat number. It also evaluates beat progress once per frame,
//! so a frame straddling a beat boundary can measure a delta against a beat
//! that has already passed. Both defects leave samples attributed to a beat
//! number one lower than the beat the press actually belongs to; the passes
//! below reassign those samples.
//!
//! The passes must run at most once per recording. Applied to already-valid
//! data they reinterpret it and corrupt the beat numbers;
//! [`crate::model::Recording::repair`] enforces the single application.

use crate::model::Sample;

/// Apply both repair passes in their required order.
///
/// Same length, same order; only `beat` is ever mutated, only upward.
pub fn repair_samples(samples: &mut [Sample]) {
    repair_negative_deltas(samples);
    repair_delta_regressions(samples);
}

/// Pass 1: a sample with a negative delta was pressed in the back half of a
/// beat, so it belongs to the following beat, not the one the client stamped.
///
/// Left-to-right sweep holding the affected beat number. A negative delta
/// marks its sample's original beat number as affected; the triggering sample
/// and every following sample still carrying that beat number move up one
/// beat. The marker clears once a sample's beat number no longer matches it.
pub fn repair_negative_deltas(samples: &mut [Sample]) {
    let mut affected: Option<u32> = None;

    for sample in samples.iter_mut() {
        let beat = sample.beat;
        if sample.delta < 0.0 {
            affected = Some(beat);
        }

        match affected {
            Some(bad) if beat == bad => sample.beat += 1,
            Some(_) => affected = None,
            None => {}
        }
    }
}

/// Pass 2: within one beat, recording order is chronological, so a delta can
/// never decrease. A decrease means the client measured the later sample
/// against an already-passed beat; that sample and the rest of the beat's run
/// belong one beat up.
///
/// Left-to-right sweep over consecutive pairs. A same-beat pair whose delta
/// strictly decreases marks that beat number as bad starting at the later
/// sample; from there on every sample carrying the bad beat number moves up
/// one beat. The marker never clears within the pass. Pair comparisons read
/// the already-updated predecessor, so a bumped sample ends the run it left.
pub fn repair_delta_regressions(samples: &mut [Sample]) {
    let mut bad_beat: Option<u32> = None;

    for i in 1..samples.len() {
        if samples[i - 1].beat == samples[i].beat && samples[i - 1].delta > samples[i].delta {
            bad_beat = Some(samples[i].beat);
        }

        if bad_beat == Some(samples[i].beat) {
            samples[i].beat += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(beat: u32, delta: f64) -> Sample {
        Sample::new(beat, 1, delta, 57)
    }

    fn beats(samples: &[Sample]) -> Vec<u32> {
        samples.iter().map(|s| s.beat).collect()
    }

    #[test]
    fn negative_delta_bumps_trigger_and_run() {
        let mut samples = vec![sample(5, -0.05), sample(5, 0.1)];
        repair_negative_deltas(&mut samples);
        assert_eq!(beats(&samples), vec![6, 6]);
    }

    #[test]
    fn negative_delta_run_ends_when_beat_advances() {
        let mut samples = vec![sample(5, -0.05), sample(6, 0.2), sample(5, 0.1)];
        repair_negative_deltas(&mut samples);
        // The third sample still carries beat 5, but the run ended at beat 6.
        assert_eq!(beats(&samples), vec![6, 6, 5]);
    }

    #[test]
    fn negative_delta_noop_without_trigger() {
        let mut samples = vec![sample(3, 0.01), sample(3, 0.02), sample(4, 0.1)];
        repair_negative_deltas(&mut samples);
        assert_eq!(beats(&samples), vec![3, 3, 4]);
    }

    #[test]
    fn delta_regression_bumps_from_decrease() {
        let mut samples = vec![sample(3, 0.10), sample(3, 0.20), sample(3, 0.05)];
        repair_delta_regressions(&mut samples);
        assert_eq!(beats(&samples), vec![3, 3, 4]);
    }

    #[test]
    fn delta_regression_marker_never_clears() {
        let mut samples = vec![
            sample(3, 0.10),
            sample(3, 0.20),
            sample(3, 0.05),
            sample(3, 0.30),
        ];
        repair_delta_regressions(&mut samples);
        // The fourth sample still matches the bad beat and moves up too.
        assert_eq!(beats(&samples), vec![3, 3, 4, 4]);
    }

    #[test]
    fn delta_regression_ignores_decrease_across_beats() {
        let mut samples = vec![sample(3, 0.20), sample(4, 0.10)];
        repair_delta_regressions(&mut samples);
        assert_eq!(beats(&samples), vec![3, 4]);
    }

    #[test]
    fn both_passes_compose() {
        let mut samples = vec![sample(5, -0.05), sample(5, 0.10), sample(5, 0.08)];
        repair_samples(&mut samples);
        // Pass 1 moves the run to beat 6; pass 2 catches the 0.10 -> 0.08
        // regression inside it.
        assert_eq!(beats(&samples), vec![6, 6, 7]);
    }

    #[test]
    fn clean_recording_is_untouched() {
        let original = vec![
            sample(1, 0.01),
            sample(1, 0.05),
            sample(2, 0.00),
            sample(2, 0.12),
            sample(4, 0.03),
        ];
        let mut samples = original.clone();
        repair_samples(&mut samples);
        assert_eq!(samples, original);
    }

    #[test]
    fn empty_and_singleton_are_untouched() {
        let mut empty: Vec<Sample> = Vec::new();
        repair_samples(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![sample(9, -0.2)];
        let before = single[0];
        repair_samples(&mut single);
        // A lone negative delta still triggers pass 1.
        assert_eq!(single[0].beat, before.beat + 1);

        let mut single = vec![sample(9, 0.2)];
        let before = single[0];
        repair_samples(&mut single);
        assert_eq!(single[0], before);
    }

    #[test]
    fn repair_is_not_idempotent() {
        let original = vec![sample(5, -0.05), sample(5, 0.1)];

        let mut once = original.clone();
        repair_samples(&mut once);

        let mut twice = once.clone();
        repair_samples(&mut twice);

        // The deltas still look like triggers, so a second application keeps
        // shifting beats. This is the hazard the repaired flag guards.
        assert_ne!(beats(&once), beats(&twice));
        assert_eq!(beats(&once), vec![6, 6]);
        assert_eq!(beats(&twice), vec![7, 7]);
    }

    fn arb_sample() -> impl Strategy<Value = Sample> {
        (0u32..10_000, 0i32..=1, -0.25f64..0.25, -1i32..512)
            .prop_map(|(beat, on_beat, delta, key)| Sample::new(beat, on_beat, delta, key))
    }

    proptest! {
        #[test]
        fn repair_preserves_length_and_payload(
            original in proptest::collection::vec(arb_sample(), 0..64),
        ) {
            let mut repaired = original.clone();
            repair_samples(&mut repaired);

            prop_assert_eq!(repaired.len(), original.len());
            for (before, after) in original.iter().zip(&repaired) {
                prop_assert!(after.beat >= before.beat);
                prop_assert_eq!(after.on_beat, before.on_beat);
                prop_assert_eq!(after.key, before.key);
                prop_assert_eq!(after.delta, before.delta);
            }
        }
    }
}
