//! Birth-death partial tracking.
//!
//! Links the peaks detected in one frame to the peaks of the next, deciding
//! per partial whether it continues, fades out, or is dropped, and which
//! candidates start new partials. Matching is greedy in ascending frequency
//! order with one level of lookahead to the next partial; the outcome for
//! each partial is an explicit [`TrackEvent`] so every edge case of the
//! matcher is independently observable.

use senoide_core::{PartialFrame, Peak};

/// Outcome of resolving one existing partial against the candidate pool,
/// or of a leftover candidate after all partials are resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
    /// The partial claimed a candidate and continues with it.
    Continuing(Peak),
    /// No usable candidate; the partial fades with a zero-magnitude peak
    /// held for exactly one frame.
    Dying(Peak),
    /// The partial was already silent and found no candidate; it is dropped.
    Dead,
    /// A candidate no partial claimed starts a new, initially silent partial.
    Born(Peak),
}

/// Stateful peak matcher carrying the current partial set across frames.
///
/// Lifecycle: create, call [`track`](Self::track) once per frame strictly in
/// time order, then discard. The state is unset until the first frame.
pub struct PartialTracker {
    tolerance: f32,
    current: Option<PartialFrame>,
}

impl PartialTracker {
    /// Create a tracker with the given relative frequency tolerance.
    ///
    /// A candidate matches a partial at frequency `f` when it lies within
    /// `tolerance * f` of it.
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            current: None,
        }
    }

    /// The current partial set, if any frame has been tracked yet.
    pub fn current(&self) -> Option<&PartialFrame> {
        self.current.as_ref()
    }

    /// Discard the tracking state, as before the first frame.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Advance the tracker by one frame of candidate peaks.
    ///
    /// The first frame is adopted unchanged (sorted by frequency). Later
    /// frames are matched against the current partials; the returned frame
    /// is also the new tracker state.
    pub fn track(&mut self, candidates: Vec<Peak>) -> PartialFrame {
        let candidates = PartialFrame::from_peaks(candidates);

        let next = match self.current.take() {
            None => candidates,
            Some(current) => {
                let events = match_frames(current.peaks(), candidates.into_peaks(), self.tolerance);
                let peaks = events
                    .into_iter()
                    .filter_map(|event| match event {
                        TrackEvent::Continuing(p) | TrackEvent::Dying(p) | TrackEvent::Born(p) => {
                            Some(p)
                        }
                        TrackEvent::Dead => None,
                    })
                    .collect();
                PartialFrame::from_peaks(peaks)
            }
        };

        tracing::trace!(partials = next.len(), "tracked frame");
        self.current = Some(next.clone());
        next
    }
}

/// Resolve one frame transition into per-partial events.
///
/// `current` must be sorted ascending by frequency, as must `pool`. Events
/// for existing partials come first in `current` order, followed by a
/// [`TrackEvent::Born`] for every unclaimed candidate. Exposed separately
/// from [`PartialTracker`] so the matching rules can be tested without
/// threading state.
pub fn match_frames(current: &[Peak], mut pool: Vec<Peak>, tolerance: f32) -> Vec<TrackEvent> {
    let mut events = Vec::with_capacity(current.len() + pool.len());

    for (i, partial) in current.iter().enumerate() {
        let next = current.get(i + 1);
        events.push(resolve_partial(partial, next, &mut pool, tolerance));
    }

    // Whatever remains was claimed by nobody: born silent, audible only if
    // matched again on a later frame.
    for candidate in pool {
        events.push(TrackEvent::Born(Peak::silent(
            candidate.frequency,
            candidate.phase,
        )));
    }

    events
}

fn resolve_partial(
    partial: &Peak,
    next: Option<&Peak>,
    pool: &mut Vec<Peak>,
    tolerance: f32,
) -> TrackEvent {
    let window = tolerance * partial.frequency;

    // First candidate inside the window...
    let mut j = 0;
    while j < pool.len() && (partial.frequency - pool[j].frequency).abs() > window {
        j += 1;
    }
    // ...then slide right while the next one is strictly closer.
    while j + 1 < pool.len()
        && (pool[j].frequency - partial.frequency).abs()
            > (pool[j + 1].frequency - partial.frequency).abs()
    {
        j += 1;
    }

    if j == pool.len() {
        return fade(partial);
    }

    if j == pool.len() - 1 {
        // Last remaining candidate: claim it unconditionally.
        return TrackEvent::Continuing(pool.remove(j));
    }

    if let Some(next) = next
        && (next.frequency - pool[j].frequency).abs() < (partial.frequency - pool[j].frequency).abs()
    {
        // The match sits closer to the next partial and likely belongs to
        // it. Settle for the candidate just below, if it is in window;
        // otherwise fade and leave the contested candidate in the pool.
        if j > 0 && (partial.frequency - pool[j - 1].frequency).abs() < window {
            return TrackEvent::Continuing(pool.remove(j - 1));
        }
        return fade(partial);
    }

    TrackEvent::Continuing(pool.remove(j))
}

fn fade(partial: &Peak) -> TrackEvent {
    if partial.magnitude > 0.0 {
        TrackEvent::Dying(Peak::silent(partial.frequency, partial.phase))
    } else {
        TrackEvent::Dead
    }
}
