//! Greedy wrapper feature selection driven by leave-one-out 1-NN accuracy.
//!
//! Forward selection starts from the empty subset and adds one feature per
//! level; backward elimination starts from every feature and removes one per
//! level. Both run through the same state machine, [`SearchEvents`], which
//! differs only in the starting subset, how candidates are formed and when
//! the search stops.
//!
//! Within a level the first candidate evaluated becomes the provisional best
//! and later candidates replace it only with strictly greater accuracy, so
//! ties go to the candidate seen first. The chosen feature is committed even
//! when it makes the subset worse. The best subset over all levels is kept
//! separately and is replaced only on strict improvement.
use std::collections::VecDeque;
use std::convert::Infallible;
use std::iter::FusedIterator;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{SearchConfig, SearchDirection};
use crate::data_handling::Dataset;
use crate::evaluation::loocv_accuracy_unchecked;
use crate::feature_selection::subset::FeatureSubset;

/// Progress notifications produced while a search runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// One candidate subset was evaluated.
    Candidate {
        level: usize,
        subset: FeatureSubset,
        accuracy: f64,
    },
    /// The best candidate of a level was committed. `feature` was added
    /// (forward) or removed (backward); `subset` is the new current subset.
    LevelChosen {
        level: usize,
        feature: usize,
        subset: FeatureSubset,
        accuracy: f64,
    },
    /// Emitted once, after the last level.
    Finished {
        best_subset: FeatureSubset,
        best_accuracy: f64,
    },
}

impl SearchEvent {
    /// Level the event belongs to; `None` for `Finished`.
    pub fn level(&self) -> Option<usize> {
        match self {
            SearchEvent::Candidate { level, .. } | SearchEvent::LevelChosen { level, .. } => {
                Some(*level)
            }
            SearchEvent::Finished { .. } => None,
        }
    }
}

/// The feature committed at one level of the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: usize,
    pub feature: usize,
    pub subset: FeatureSubset,
    pub accuracy: f64,
}

/// Summary of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub direction: SearchDirection,
    pub best_subset: FeatureSubset,
    pub best_accuracy: f64,
    pub levels: Vec<LevelResult>,
}

/// A greedy search over the feature subsets of one dataset.
///
/// The search itself holds no progress; every call to [`GreedySearch::events`]
/// or [`GreedySearch::run`] starts again from the first level.
pub struct GreedySearch<'a> {
    data: &'a Dataset,
    config: SearchConfig,
}

impl<'a> GreedySearch<'a> {
    pub fn new(data: &'a Dataset, config: SearchConfig) -> Self {
        GreedySearch { data, config }
    }

    pub fn forward(data: &'a Dataset) -> Self {
        Self::new(data, SearchConfig::new(SearchDirection::Forward, false))
    }

    pub fn backward(data: &'a Dataset) -> Self {
        Self::new(data, SearchConfig::new(SearchDirection::Backward, false))
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Lazy sequence of progress events, ending with `SearchEvent::Finished`.
    pub fn events(&self) -> SearchEvents<'a> {
        SearchEvents::new(self.data, &self.config)
    }

    /// Run the search to completion.
    pub fn run(&self) -> SearchOutcome {
        self.run_with(|_| {})
    }

    /// Run the search to completion, passing every event to `observer`.
    pub fn run_with<F>(&self, mut observer: F) -> SearchOutcome
    where
        F: FnMut(&SearchEvent),
    {
        match self.try_run_with(|event| {
            observer(event);
            Ok::<(), Infallible>(())
        }) {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Like [`GreedySearch::run_with`], but stops at the first error the
    /// observer returns. No further candidates are evaluated after that.
    pub fn try_run_with<F, E>(&self, mut observer: F) -> Result<SearchOutcome, E>
    where
        F: FnMut(&SearchEvent) -> Result<(), E>,
    {
        let mut outcome = SearchOutcome {
            direction: self.config.direction,
            best_subset: FeatureSubset::new(),
            best_accuracy: 0.0,
            levels: Vec::new(),
        };

        for event in self.events() {
            observer(&event)?;
            match event {
                SearchEvent::Candidate { .. } => {}
                SearchEvent::LevelChosen {
                    level,
                    feature,
                    subset,
                    accuracy,
                } => outcome.levels.push(LevelResult {
                    level,
                    feature,
                    subset,
                    accuracy,
                }),
                SearchEvent::Finished {
                    best_subset,
                    best_accuracy,
                } => {
                    outcome.best_subset = best_subset;
                    outcome.best_accuracy = best_accuracy;
                }
            }
        }

        Ok(outcome)
    }
}

/// Forward selection from the empty subset; returns the best subset seen.
pub fn run_forward_search(data: &Dataset) -> (FeatureSubset, f64) {
    let outcome = GreedySearch::forward(data).run();
    (outcome.best_subset, outcome.best_accuracy)
}

/// Backward elimination from the full subset; returns the best subset seen.
pub fn run_backward_search(data: &Dataset) -> (FeatureSubset, f64) {
    let outcome = GreedySearch::backward(data).run();
    (outcome.best_subset, outcome.best_accuracy)
}

struct Candidate {
    feature: usize,
    subset: FeatureSubset,
    accuracy: Option<f64>,
}

/// Iterator driving one run of the greedy search.
///
/// Candidates are evaluated when their event is pulled, unless the search is
/// parallel, in which case a whole level is scored up front and then replayed
/// in order.
pub struct SearchEvents<'a> {
    data: &'a Dataset,
    direction: SearchDirection,
    parallel: bool,
    started: bool,
    finished: bool,
    level: usize,
    current: FeatureSubset,
    pending: VecDeque<Candidate>,
    level_best: Option<(usize, f64)>,
    best_subset: FeatureSubset,
    best_accuracy: f64,
}

impl<'a> SearchEvents<'a> {
    fn new(data: &'a Dataset, config: &SearchConfig) -> Self {
        SearchEvents {
            data,
            direction: config.direction,
            parallel: config.parallel,
            started: false,
            finished: false,
            level: 0,
            current: FeatureSubset::new(),
            pending: VecDeque::new(),
            level_best: None,
            best_subset: FeatureSubset::new(),
            best_accuracy: 0.0,
        }
    }

    /// Current subset and best-so-far, set up on the first pull.
    fn start(&mut self) {
        self.started = true;
        let n_features = self.data.n_features();

        match self.direction {
            SearchDirection::Forward => {
                self.current = FeatureSubset::new();
                self.best_subset = FeatureSubset::new();
                self.best_accuracy = 0.0;
                if n_features == 0 {
                    self.best_accuracy = loocv_accuracy_unchecked(self.data, &self.current);
                }
            }
            SearchDirection::Backward => {
                self.current = self.data.all_features();
                self.best_subset = self.current.clone();
                self.best_accuracy = loocv_accuracy_unchecked(self.data, &self.current);
            }
        }

        if n_features == 0 {
            log::warn!("Dataset has no feature columns; nothing to search");
        }
        log::info!(
            "Beginning {} over {} features, starting from {} ({:.1}%)",
            self.direction,
            n_features,
            self.current,
            self.best_accuracy * 100.0
        );

        self.begin_level();
    }

    fn is_exhausted(&self) -> bool {
        match self.direction {
            SearchDirection::Forward => self.current.len() == self.data.n_features(),
            SearchDirection::Backward => self.current.is_empty(),
        }
    }

    /// Queue the candidates of the next level, if any remain.
    fn begin_level(&mut self) {
        if self.is_exhausted() {
            return;
        }
        self.level += 1;

        let features: Vec<usize> = match self.direction {
            SearchDirection::Forward => (1..=self.data.n_features())
                .filter(|&f| !self.current.contains(f))
                .collect(),
            SearchDirection::Backward => self.current.iter().collect(),
        };

        let mut pending: Vec<Candidate> = features
            .into_iter()
            .map(|feature| Candidate {
                feature,
                subset: match self.direction {
                    SearchDirection::Forward => self.current.with(feature),
                    SearchDirection::Backward => self.current.without(feature),
                },
                accuracy: None,
            })
            .collect();

        if self.parallel {
            let data = self.data;
            pending.par_iter_mut().for_each(|candidate| {
                candidate.accuracy = Some(loocv_accuracy_unchecked(data, &candidate.subset));
            });
        }

        self.pending = pending.into();
    }

    fn evaluate_next(&mut self, candidate: Candidate) -> SearchEvent {
        let accuracy = match candidate.accuracy {
            Some(accuracy) => accuracy,
            None => loocv_accuracy_unchecked(self.data, &candidate.subset),
        };

        match self.level_best {
            Some((_, best)) if accuracy <= best => {}
            _ => self.level_best = Some((candidate.feature, accuracy)),
        }

        log::debug!(
            "Level {}: using feature(s) {} accuracy is {:.1}%",
            self.level,
            candidate.subset,
            accuracy * 100.0
        );

        SearchEvent::Candidate {
            level: self.level,
            subset: candidate.subset,
            accuracy,
        }
    }

    fn commit(&mut self, feature: usize, accuracy: f64) -> SearchEvent {
        match self.direction {
            SearchDirection::Forward => self.current.insert(feature),
            SearchDirection::Backward => self.current.remove(feature),
        };

        if accuracy > self.best_accuracy {
            self.best_accuracy = accuracy;
            self.best_subset = self.current.clone();
        }

        log::info!(
            "Level {}: {} feature {} -> {} with accuracy {:.1}%",
            self.level,
            match self.direction {
                SearchDirection::Forward => "added",
                SearchDirection::Backward => "removed",
            },
            feature,
            self.current,
            accuracy * 100.0
        );

        let event = SearchEvent::LevelChosen {
            level: self.level,
            feature,
            subset: self.current.clone(),
            accuracy,
        };
        self.begin_level();
        event
    }

    fn finish(&mut self) -> SearchEvent {
        self.finished = true;
        log::info!(
            "Finished {}. The best feature subset is {}, which has an accuracy of {:.1}%",
            self.direction,
            self.best_subset,
            self.best_accuracy * 100.0
        );
        SearchEvent::Finished {
            best_subset: self.best_subset.clone(),
            best_accuracy: self.best_accuracy,
        }
    }
}

impl<'a> Iterator for SearchEvents<'a> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.start();
        }

        if let Some(candidate) = self.pending.pop_front() {
            return Some(self.evaluate_next(candidate));
        }
        if let Some((feature, accuracy)) = self.level_best.take() {
            return Some(self.commit(feature, accuracy));
        }
        Some(self.finish())
    }
}

impl<'a> FusedIterator for SearchEvents<'a> {}
