//! Frame-driven progress scheduler.
//!
//! A transition is a callback plus a duration. It is polled once per rendered
//! frame until it has run with a ratio of exactly `1.0`, then removed. There
//! is no cancellation: a transition that has started always runs to
//! completion.

use std::fmt;

use web_time::Duration;

/// Progress passed to a transition callback on each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionTick {
    /// Elapsed time divided by duration, clamped to `1.0`.
    pub ratio: f32,
    /// Fraction of the duration elapsed since the previous frame. Not clamped.
    pub ratio_delta: f32,
}
impl TransitionTick {
    /// Returns whether this is the final tick of the transition.
    pub fn is_complete(self) -> bool {
        self.ratio >= 1.0
    }
}

type TickFn<C> = Box<dyn FnMut(&mut C, TransitionTick)>;

struct Transition<C> {
    on_tick: TickFn<C>,
    duration: Duration,
    /// Timestamp of the previous frame, or `None` before the first frame.
    last_frame: Option<Duration>,
    /// Total time elapsed since the first frame.
    elapsed: Duration,
}
impl<C> Transition<C> {
    /// Advances the transition to `now`. Returns `true` once it has run its
    /// final tick.
    fn advance(&mut self, ctx: &mut C, now: Duration) -> bool {
        let Some(last_frame) = self.last_frame.replace(now) else {
            // The first frame only establishes the time origin.
            return false;
        };
        let delta = now.saturating_sub(last_frame);
        self.elapsed += delta;

        let tick = if self.duration.is_zero() {
            TransitionTick {
                ratio: 1.0,
                ratio_delta: 1.0,
            }
        } else {
            let duration = self.duration.as_secs_f32();
            TransitionTick {
                ratio: (self.elapsed.as_secs_f32() / duration).min(1.0),
                ratio_delta: delta.as_secs_f32() / duration,
            }
        };

        (self.on_tick)(ctx, tick);
        tick.is_complete()
    }
}

/// Set of independent transitions, each advanced once per frame.
///
/// `C` is the state that transition callbacks mutate. It is passed in on every
/// [`TransitionScheduler::tick()`] rather than captured, so that callbacks
/// stay `'static`.
pub struct TransitionScheduler<C> {
    transitions: Vec<Transition<C>>,
}
impl<C> Default for TransitionScheduler<C> {
    fn default() -> Self {
        Self {
            transitions: vec![],
        }
    }
}
impl<C> fmt::Debug for TransitionScheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionScheduler")
            .field("active", &self.transitions.len())
            .finish()
    }
}
impl<C> TransitionScheduler<C> {
    /// Constructs an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback to be invoked once per frame for `duration`.
    ///
    /// The first frame after registration establishes the time origin and
    /// does not invoke the callback. The last invocation always has
    /// `ratio == 1.0`.
    pub fn schedule(
        &mut self,
        duration: Duration,
        on_tick: impl FnMut(&mut C, TransitionTick) + 'static,
    ) {
        self.transitions.push(Transition {
            on_tick: Box::new(on_tick),
            duration,
            last_frame: None,
            elapsed: Duration::ZERO,
        });
    }

    /// Advances every transition to the frame timestamp `now`, in
    /// registration order, and drops the ones that have finished.
    pub fn tick(&mut self, ctx: &mut C, now: Duration) {
        self.transitions
            .retain_mut(|transition| !transition.advance(ctx, now));
    }

    /// Returns the number of transitions that have not yet finished.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }
    /// Returns whether there are no active transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
