//! Core engine for Valentine - session state machine and orchestration.
//!
//! This crate contains the `App` controller without TUI dependencies. The
//! frontend feeds it input (pointer presses, key actions, viewport size) and
//! frame deltas; it owns every timer and the single text-generation request.

use std::sync::Arc;
use std::time::{Duration, Instant};

mod generation;
mod session_state;

pub use generation::proposal_prompt;
pub use session_state::SessionState;
pub use valentine_providers::{BoxFuture, TextGenerator};
pub use valentine_types::{
    AmbianceEmitter, CelebrationSequence, ConfettiBurst, DecorativeParticle, EvasionState,
    GenerationError, GenerationOutcome, Point, RandomSource, ScreenState, ThreadRandom, Viewport,
    resolve_message,
    ui::{HitRegion, HitRegions, HitTarget, UiOptions},
};

use generation::{PendingMessage, Poll};

/// What a single input did, for the frontend's benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The negative control moved and shrank.
    Evaded,
    /// The proposal was accepted.
    Accepted,
    /// Nothing happened (wrong screen, inert control, empty space).
    Ignored,
}

// ============================================================================
// App
// ============================================================================

/// The single owner of session state.
///
/// Everything that mutates [`SessionState`] goes through here, so screen
/// progression stays monotonic and the message is written exactly once.
pub struct App {
    session: SessionState,
    viewport: Viewport,
    ui_options: UiOptions,
    ambiance: AmbianceEmitter,
    celebration: Option<CelebrationSequence>,
    /// Existence means a generation request is in flight.
    pending: Option<PendingMessage>,
    generator: Arc<dyn TextGenerator>,
    rng: Box<dyn RandomSource + Send>,
    /// Bursts fired since the frontend last drained them.
    confetti: Vec<ConfettiBurst>,
    hit_regions: HitRegions,
    last_frame: Instant,
    tick: usize,
    torn_down: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("viewport", &self.viewport)
            .field("model", &self.generator.model())
            .field("pending", &self.pending.is_some())
            .field("queued_confetti", &self.confetti.len())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(generator: Arc<dyn TextGenerator>, ui_options: UiOptions) -> Self {
        Self::with_random(generator, ui_options, Box::new(ThreadRandom))
    }

    /// Build with an explicit randomness source (tests use a scripted one).
    pub fn with_random(
        generator: Arc<dyn TextGenerator>,
        ui_options: UiOptions,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        Self {
            session: SessionState::default(),
            viewport: Viewport::default(),
            ui_options,
            ambiance: AmbianceEmitter::new(),
            celebration: None,
            pending: None,
            generator,
            rng,
            confetti: Vec::new(),
            hit_regions: HitRegions::default(),
            last_frame: Instant::now(),
            tick: 0,
            torn_down: false,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn screen(&self) -> ScreenState {
        self.session.screen()
    }

    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn ambiance(&self) -> &AmbianceEmitter {
        &self.ambiance
    }

    pub fn celebration(&self) -> Option<&CelebrationSequence> {
        self.celebration.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    pub fn tick_count(&self) -> usize {
        self.tick
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// An attempt on the negative control.
    ///
    /// Only meaningful on the question screen. Keyboard attempts go through
    /// the same inert gate as pointer presses.
    pub fn attempt_interaction(&mut self) -> InteractionOutcome {
        if self.torn_down || self.screen() != ScreenState::Question {
            return InteractionOutcome::Ignored;
        }
        if !self.session.evasion.accepts_pointer() {
            return InteractionOutcome::Ignored;
        }

        self.session.evasion.attempt(self.viewport, self.rng.as_mut());
        let evasion = &self.session.evasion;
        tracing::debug!(
            interaction_count = evasion.interaction_count(),
            scale = evasion.scale(),
            offset_x = evasion.offset().x,
            offset_y = evasion.offset().y,
            "Negative control evaded"
        );
        InteractionOutcome::Evaded
    }

    /// A pointer press at a terminal cell, resolved against the last frame's
    /// hit regions.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> InteractionOutcome {
        if self.screen() != ScreenState::Question {
            return InteractionOutcome::Ignored;
        }
        let accepts = self.session.evasion.accepts_pointer();
        match self.hit_regions.resolve(column, row, accepts) {
            Some(HitTarget::Negative) => self.attempt_interaction(),
            Some(HitTarget::Affirmative) => self.confirm_affirmative(),
            None => InteractionOutcome::Ignored,
        }
    }

    /// Accept the proposal.
    ///
    /// Moves to the loading screen before anything asynchronous is started,
    /// fires the acceptance burst, then spawns the one generation request.
    pub fn confirm_affirmative(&mut self) -> InteractionOutcome {
        if self.torn_down || !self.session.advance_to(ScreenState::Loading) {
            return InteractionOutcome::Ignored;
        }

        tracing::info!(
            interaction_count = self.session.evasion.interaction_count(),
            model = self.generator.model(),
            "Proposal accepted"
        );
        self.confetti.push(ConfettiBurst::acceptance());
        self.pending = Some(PendingMessage::spawn(&self.generator, proposal_prompt()));
        InteractionOutcome::Accepted
    }

    /// Hit regions recorded by the renderer for the current frame.
    pub fn set_hit_regions(&mut self, regions: HitRegions) {
        self.hit_regions = regions;
    }

    pub fn hit_regions(&self) -> HitRegions {
        self.hit_regions
    }

    // ------------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------------

    /// Advance all timers by `delta` and pick up a finished generation.
    pub fn advance(&mut self, delta: Duration) {
        if self.torn_down {
            return;
        }
        self.tick = self.tick.wrapping_add(1);

        self.ambiance.advance(delta, self.rng.as_mut());

        if let Some(sequence) = self.celebration.as_mut() {
            let bursts = sequence.advance(delta, self.rng.as_mut());
            self.confetti.extend(bursts);
        }

        self.poll_generation();
    }

    fn poll_generation(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let outcome = match pending.poll() {
            Poll::Waiting => return,
            Poll::Ready(outcome) => outcome,
        };
        let waited = pending.started().elapsed();
        self.pending = None;

        match &outcome {
            Ok(Some(text)) if !text.trim().is_empty() => {
                tracing::info!(waited_ms = waited.as_millis(), "Celebration message generated");
            }
            Ok(_) => {
                tracing::warn!(waited_ms = waited.as_millis(), "Generation returned no text");
            }
            Err(err) => {
                tracing::warn!(
                    kind = err.kind().as_str(),
                    auth = err.is_auth(),
                    waited_ms = waited.as_millis(),
                    "Generation failed: {err}"
                );
            }
        }

        self.session.message = resolve_message(outcome);
        if self.session.advance_to(ScreenState::Celebration) {
            self.celebration = Some(CelebrationSequence::start());
        }
    }

    /// Bursts fired since the last call.
    pub fn take_confetti(&mut self) -> Vec<ConfettiBurst> {
        std::mem::take(&mut self.confetti)
    }

    /// Get elapsed time since last frame and update timing.
    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    /// Cancel every timer and abort the request in flight. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.ambiance.cancel();
        if let Some(sequence) = self.celebration.as_mut() {
            sequence.cancel();
        }
        if let Some(mut pending) = self.pending.take() {
            pending.abort();
            tracing::debug!("Aborted pending generation on teardown");
        }
        self.confetti.clear();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}
