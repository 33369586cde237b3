//! Unit tests for contiguous segment grouping.

use runflow::recording::{group_contiguous, LogSegment, SetLabel};
use runflow::workouts::StepKind;

fn segments_from(ids: &[Option<&str>]) -> Vec<LogSegment> {
    ids.iter()
        .map(|id| {
            let segment = LogSegment::new(StepKind::Run, 1.0, 300.0);
            match id {
                Some(id) => segment.in_group(id),
                None => segment,
            }
        })
        .collect()
}

/// Every sequence of `len` ids drawn from {none, a, b}.
fn all_sequences(len: usize) -> Vec<Vec<Option<&'static str>>> {
    let alphabet = [None, Some("a"), Some("b")];
    let mut sequences = vec![Vec::new()];
    for _ in 0..len {
        sequences = sequences
            .into_iter()
            .flat_map(|seq| {
                alphabet.iter().map(move |id| {
                    let mut next = seq.clone();
                    next.push(*id);
                    next
                })
            })
            .collect();
    }
    sequences
}

#[test]
fn test_groups_are_maximal_contiguous_runs() {
    for ids in all_sequences(5) {
        let segments = segments_from(&ids);
        let groups = group_contiguous(&segments);

        // Groups tile the input in order
        let mut next = 0;
        for group in &groups {
            assert_eq!(group.start, next, "{:?}", ids);
            assert!(!group.is_empty());
            next = group.indices().end;

            // Never merges different ids or non-adjacent runs
            for item in group.items {
                assert_eq!(item.group_id.as_deref(), group.group_id, "{:?}", ids);
            }
            if group.group_id.is_none() {
                assert_eq!(group.len(), 1);
            }
        }
        assert_eq!(next, segments.len());

        // Never splits a run of equal ids
        for pair in groups.windows(2) {
            let same = pair[0].group_id.is_some() && pair[0].group_id == pair[1].group_id;
            assert!(!same, "{:?}", ids);
        }
    }
}

#[test]
fn test_separated_runs_stay_separate() {
    let segments = segments_from(&[Some("a"), Some("a"), None, Some("a")]);
    let groups = group_contiguous(&segments);

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].len(), 2);
    assert!(groups[0].is_averaged());
    assert!(!groups[2].is_averaged());
}

#[test]
fn test_group_averages_skip_recoveries() {
    let segments = vec![
        LogSegment::new(StepKind::Interval, 0.4, 100.0)
            .in_group("g"),
        LogSegment::new(StepKind::Recover, 0.2, 90.0).in_group("g"),
        LogSegment::new(StepKind::Interval, 0.4, 104.0)
            .in_group("g"),
        LogSegment::new(StepKind::Recover, 0.2, 90.0).in_group("g"),
    ];
    let groups = group_contiguous(&segments);
    assert_eq!(groups.len(), 1);

    let group = groups[0];
    let averages = group.averages();
    assert!((averages.distance - 0.4).abs() < 1e-12);
    assert_eq!(averages.duration, 102.0);
    assert_eq!(averages.pace, "4:15");
    assert_eq!(group.label(), SetLabel::Interval);
    assert_eq!(group.set_count(), 2);
}

#[test]
fn test_recover_only_group() {
    let segments = vec![
        LogSegment::new(StepKind::Recover, 0.0, 60.0).in_group("r"),
        LogSegment::new(StepKind::Recover, 0.0, 60.0).in_group("r"),
    ];
    let groups = group_contiguous(&segments);
    let averages = groups[0].averages();

    assert_eq!(averages.duration, 60.0);
    assert_eq!(averages.pace, "-");
    assert_eq!(groups[0].label(), SetLabel::Group);
    assert_eq!(groups[0].set_count(), 2);
}
