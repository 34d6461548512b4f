use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use gazeplot_core::{EyeMovement, FixationQuery, FixationSet, GazeRecord, StimulusDims};

/// Builds a synthetic export: a repeating mix of fixations, saccades, and
/// gap rows across three participants and two stimuli.
fn synthetic_records(rows: usize) -> Vec<GazeRecord> {
    (0..rows)
        .map(|i| {
            let fraction = (i % 100) as f64 / 100.0;
            let movement = match i % 4 {
                0 | 1 => EyeMovement::Fixation,
                2 => EyeMovement::Saccade,
                _ => EyeMovement::Unclassified,
            };
            let on_stimulus = i % 3 != 0;
            GazeRecord {
                participant: format!("Participant{}", i % 3 + 1),
                stimulus: if on_stimulus {
                    "Question-pic".to_string()
                } else {
                    "Intro-pic".to_string()
                },
                movement: movement.clone(),
                norm_x: movement.is_fixation().then_some(fraction),
                norm_y: movement.is_fixation().then_some(1.0 - fraction),
                duration_ms: 60.0 + (i % 9) as f64 * 40.0,
            }
        })
        .collect()
}

pub fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group
        .sample_size(60)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));

    let records = synthetic_records(10_000);
    let dims = StimulusDims {
        width: 1920,
        height: 1080,
    };

    group.bench_function("all_participants_10k", |b| {
        let query = FixationQuery {
            stimulus: "Question-pic".to_string(),
            participant: None,
        };
        b.iter(|| {
            let set = FixationSet::extract(black_box(&records), &query, dims).unwrap();
            black_box(set.len());
        });
    });

    group.bench_function("single_participant_10k", |b| {
        let query = FixationQuery {
            stimulus: "Question-pic".to_string(),
            participant: Some("Participant2".to_string()),
        };
        b.iter(|| {
            let set = FixationSet::extract(black_box(&records), &query, dims).unwrap();
            black_box(set.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
