//! Integration tests for forward selection and backward elimination.

mod common;

use knn_select::{
    loocv_accuracy, run_backward_search, run_forward_search, Dataset, FeatureSubset,
    GreedySearch, SearchConfig, SearchDirection, SearchEvent,
};

fn candidates(events: &[SearchEvent], wanted_level: usize) -> Vec<(FeatureSubset, f64)> {
    events
        .iter()
        .filter_map(|event| match event {
            SearchEvent::Candidate {
                level,
                subset,
                accuracy,
            } if *level == wanted_level => Some((subset.clone(), *accuracy)),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Forward selection
// ---------------------------------------------------------------------------

#[test]
fn forward_selects_separating_feature() {
    let data = common::separable();
    let (best, accuracy) = run_forward_search(&data);
    assert_eq!(best, FeatureSubset::from_iter([1]));
    assert_eq!(accuracy, 1.0);

    let outcome = GreedySearch::forward(&data).run();
    assert_eq!(outcome.levels[0].feature, 1);
    assert_eq!(outcome.levels[0].accuracy, 1.0);
}

#[test]
fn forward_level_one_candidates_are_single_features() {
    let data = common::noisy(24, 5);
    let events: Vec<SearchEvent> = GreedySearch::forward(&data).events().collect();
    let level_one = candidates(&events, 1);
    assert_eq!(level_one.len(), 5);
    for (f, (subset, accuracy)) in (1..=5).zip(level_one) {
        assert_eq!(subset.as_slice(), &[f]);
        let single = loocv_accuracy(&data, &FeatureSubset::from_iter([f])).unwrap();
        assert_eq!(accuracy, single);
    }
}

#[test]
fn forward_grows_by_one_each_level() {
    let data = common::noisy(20, 6);
    let outcome = GreedySearch::forward(&data).run();
    assert_eq!(outcome.levels.len(), 6);
    for (i, level) in outcome.levels.iter().enumerate() {
        assert_eq!(level.level, i + 1);
        assert_eq!(level.subset.len(), i + 1);
        assert!(level.subset.contains(level.feature));
    }
    assert_eq!(outcome.levels.last().unwrap().subset, data.all_features());
}

#[test]
fn forward_best_dominates_full_set_and_singles() {
    let data = common::noisy(30, 6);
    let (_, best) = run_forward_search(&data);
    let full = loocv_accuracy(&data, &data.all_features()).unwrap();
    assert!(best >= full);
    for f in 1..=6 {
        let single = loocv_accuracy(&data, &FeatureSubset::from_iter([f])).unwrap();
        assert!(best >= single, "feature {} alone beats best", f);
    }
}

#[test]
fn forward_subset_keeps_selection_order() {
    let data = common::noisy(30, 6);
    let outcome = GreedySearch::forward(&data).run();
    let picked: Vec<usize> = outcome.levels.iter().map(|l| l.feature).collect();
    assert_eq!(outcome.levels.last().unwrap().subset.as_slice(), picked.as_slice());
}

#[test]
fn forward_tie_goes_to_lower_feature() {
    // feature 3 duplicates feature 1, feature 2 is noise
    let data = Dataset::from_rows(vec![
        vec![1.0, 0.0, 3.0, 0.0],
        vec![1.0, 0.2, 1.0, 0.2],
        vec![2.0, 4.0, 2.0, 4.0],
        vec![2.0, 4.3, 0.0, 4.3],
    ])
    .unwrap();
    let outcome = GreedySearch::forward(&data).run();
    assert_eq!(outcome.levels[0].feature, 1);
    assert_eq!(outcome.levels[0].accuracy, 1.0);
    assert_eq!(outcome.best_subset.as_slice(), &[1]);
}

#[test]
fn level_choice_is_committed_even_when_worse() {
    let data = common::separable();
    let outcome = GreedySearch::forward(&data).run();
    assert_eq!(outcome.levels[1].feature, 2);
    assert_eq!(outcome.best_subset.as_slice(), &[1]);
}

// ---------------------------------------------------------------------------
// Backward elimination
// ---------------------------------------------------------------------------

#[test]
fn backward_initial_best_is_full_set_accuracy() {
    // with every removal worse, the full set stays the best subset
    let data = Dataset::from_rows(vec![
        vec![1.0, 0.0, 0.0],
        vec![1.0, 0.1, 0.1],
        vec![2.0, 0.0, 1.0],
        vec![2.0, 0.1, 1.1],
        vec![3.0, 1.0, 0.0],
        vec![3.0, 1.1, 0.1],
    ])
    .unwrap();
    let full = loocv_accuracy(&data, &data.all_features()).unwrap();
    assert_eq!(full, 1.0);
    let (best, accuracy) = run_backward_search(&data);
    assert_eq!(best, data.all_features());
    assert_eq!(accuracy, full);
}

#[test]
fn backward_shrinks_by_one_each_level() {
    let data = common::noisy(20, 5);
    let outcome = GreedySearch::backward(&data).run();
    assert_eq!(outcome.levels.len(), 5);
    for (i, level) in outcome.levels.iter().enumerate() {
        assert_eq!(level.subset.len(), 5 - (i + 1));
        assert!(!level.subset.contains(level.feature));
    }
    assert!(outcome.levels.last().unwrap().subset.is_empty());
}

#[test]
fn backward_candidates_remove_one_feature() {
    let data = common::noisy(20, 4);
    let events: Vec<SearchEvent> = GreedySearch::backward(&data).events().collect();
    let level_one = candidates(&events, 1);
    let removed: Vec<FeatureSubset> = level_one.into_iter().map(|(s, _)| s).collect();
    assert_eq!(
        removed,
        vec![
            FeatureSubset::from_iter([2, 3, 4]),
            FeatureSubset::from_iter([1, 3, 4]),
            FeatureSubset::from_iter([1, 2, 4]),
            FeatureSubset::from_iter([1, 2, 3]),
        ]
    );
}

#[test]
fn backward_best_dominates_full_set() {
    let data = common::noisy(30, 6);
    let (_, best) = run_backward_search(&data);
    let full = loocv_accuracy(&data, &data.all_features()).unwrap();
    assert!(best >= full);
}

#[test]
fn backward_tie_removes_first_feature() {
    // both columns are identical, so removing either gives the same accuracy
    let data = Dataset::from_rows(vec![
        vec![1.0, 0.0, 0.0],
        vec![1.0, 0.3, 0.3],
        vec![2.0, 3.0, 3.0],
        vec![2.0, 3.2, 3.2],
    ])
    .unwrap();
    let outcome = GreedySearch::backward(&data).run();
    assert_eq!(outcome.levels[0].feature, 1);
    assert_eq!(outcome.levels[0].subset.as_slice(), &[2]);
}

// ---------------------------------------------------------------------------
// No features
// ---------------------------------------------------------------------------

#[test]
fn no_features_reports_degenerate_accuracy() {
    let data = Dataset::from_rows(vec![vec![1.0], vec![1.0], vec![2.0]]).unwrap();
    let degenerate = loocv_accuracy(&data, &FeatureSubset::new()).unwrap();

    for direction in [SearchDirection::Forward, SearchDirection::Backward] {
        let search = GreedySearch::new(&data, SearchConfig::new(direction, false));
        let events: Vec<SearchEvent> = search.events().collect();
        assert_eq!(
            events,
            vec![SearchEvent::Finished {
                best_subset: FeatureSubset::new(),
                best_accuracy: degenerate,
            }]
        );
    }
}

// ---------------------------------------------------------------------------
// Event stream
// ---------------------------------------------------------------------------

#[test]
fn events_restart_from_scratch() {
    let data = common::noisy(16, 4);
    let search = GreedySearch::backward(&data);
    let first: Vec<SearchEvent> = search.events().collect();
    let second: Vec<SearchEvent> = search.events().collect();
    assert_eq!(first, second);
}

#[test]
fn events_are_lazy() {
    let data = common::noisy(16, 4);
    let mut events = GreedySearch::forward(&data).events();
    match events.next() {
        Some(SearchEvent::Candidate { level, subset, .. }) => {
            assert_eq!(level, 1);
            assert_eq!(subset.as_slice(), &[1]);
        }
        other => panic!("expected a candidate, got {:?}", other),
    }
}

#[test]
fn finished_event_comes_last_exactly_once() {
    let data = common::noisy(16, 4);
    let events: Vec<SearchEvent> = GreedySearch::forward(&data).events().collect();
    let finished = events
        .iter()
        .filter(|e| matches!(e, SearchEvent::Finished { .. }))
        .count();
    assert_eq!(finished, 1);
    assert!(matches!(events.last(), Some(SearchEvent::Finished { .. })));
    // 4 + 3 + 2 + 1 candidates, 4 choices, 1 finish
    assert_eq!(events.len(), 10 + 4 + 1);
}

#[test]
fn observer_sees_every_event() {
    let data = common::noisy(16, 4);
    let search = GreedySearch::forward(&data);
    let mut seen = Vec::new();
    let outcome = search.run_with(|event| seen.push(event.clone()));
    let expected: Vec<SearchEvent> = search.events().collect();
    assert_eq!(seen, expected);
    assert_eq!(outcome.levels.len(), 4);
}

#[test]
fn failing_observer_stops_the_search() {
    let data = common::noisy(16, 4);
    let search = GreedySearch::forward(&data);
    let mut calls = 0;
    let result = search.try_run_with(|_| {
        calls += 1;
        if calls == 3 {
            Err("stop")
        } else {
            Ok(())
        }
    });
    assert_eq!(result.unwrap_err(), "stop");
    assert_eq!(calls, 3);
}

#[test]
fn parallel_search_matches_sequential() {
    let data = common::noisy(40, 7);
    for direction in [SearchDirection::Forward, SearchDirection::Backward] {
        let sequential: Vec<SearchEvent> = GreedySearch::new(&data, SearchConfig::new(direction, false))
            .events()
            .collect();
        let parallel: Vec<SearchEvent> = GreedySearch::new(&data, SearchConfig::new(direction, true))
            .events()
            .collect();
        assert_eq!(sequential, parallel);
    }
}

#[test]
fn outcome_serializes_to_json() {
    let data = common::separable();
    let outcome = GreedySearch::forward(&data).run();
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"direction\":\"forward\""));
    assert!(json.contains("\"best_subset\":[1]"));
}
