//! GameController - the main interface for playing a game.
//!
//! This module provides [`GameController`], which sequences calls to the
//! game service and keeps the player's view consistent with the server.
//!
//! # Architecture
//!
//! The controller uses a pure state machine (from quiz-core) for view
//! decisions and interprets the returned actions to perform actual I/O via
//! [`GameApi`].
//!
//! ```text
//! Surface intents → GameController → GameApi → Transport → Network
//!                        ↓     ↑
//!              quiz-core (pure state machine)
//! ```
//!
//! # Stale results
//!
//! Every successful [`start_game`](GameController::start_game) bumps a game
//! generation. Each operation captures the generation when it starts, and
//! anything it learns afterwards is discarded if a newer game has begun in
//! the meantime. The deferred retry of a question fetch is a spawned task
//! that is aborted when a new game starts.
//!
//! # Example
//!
//! ```ignore
//! use zimble_quiz_client::{ClientConfig, GameController, MockTransport, RecordingSurface};
//!
//! let controller = GameController::new(MockTransport::new(), RecordingSurface::new(), &ClientConfig::default());
//! controller.start_game().await;
//! controller.submit_answer("4").await;
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;
use zimble_quiz_core::{
    roster_lines, Action, Event, Feedback, Observed, ProgressTracker, QuestionView, Session,
    ViewState, EMPTY_ANSWER, LOADING_QUESTION, NO_ACTIVE_GAME, STARTING_GAME, SUBMITTING,
};
use zimble_quiz_types::{AnswerRequest, GameId, QuestionResponse, Roster};

use crate::api::{ApiError, GameApi};
use crate::config::ClientConfig;
use crate::surface::Surface;
use crate::transport::Transport;

/// Drives a game against the service and renders it on a [`Surface`].
///
/// Cheap to clone; clones share the same game.
pub struct GameController<T, S> {
    inner: Arc<Inner<T, S>>,
}

struct Inner<T, S> {
    api: GameApi<T, S>,
    surface: Arc<S>,
    retry_delay: Duration,
    state: Mutex<ControllerState>,
}

#[derive(Default)]
struct ControllerState {
    session: Option<Session>,
    generation: u64,
    latest_start: u64,
    view: ViewState,
    progress: ProgressTracker,
    retry: Option<PendingRetry>,
    next_retry_id: u64,
}

struct PendingRetry {
    id: u64,
    handle: AbortHandle,
}

/// What to render along with an event, if it is still current.
#[derive(Default)]
struct Render {
    feedback: Option<Feedback>,
    roster: Option<Roster>,
    started: Option<GameId>,
    game_over: bool,
}

impl Render {
    fn feedback(feedback: Feedback) -> Self {
        Self {
            feedback: Some(feedback),
            ..Self::default()
        }
    }

    fn roster(roster: Roster) -> Self {
        Self {
            roster: Some(roster),
            ..Self::default()
        }
    }

    fn game_started(roster: Roster, game_id: GameId) -> Self {
        Self {
            roster: Some(roster),
            started: Some(game_id),
            ..Self::default()
        }
    }
}

impl<T, S> Clone for GameController<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> GameController<T, S>
where
    T: Transport + 'static,
    S: Surface + 'static,
{
    /// Create a controller. Nothing is rendered until a game starts.
    pub fn new(transport: T, surface: S, config: &ClientConfig) -> Self {
        let surface = Arc::new(surface);
        Self {
            inner: Arc::new(Inner {
                api: GameApi::new(transport, Arc::clone(&surface)),
                surface,
                retry_delay: config.retry_delay(),
                state: Mutex::new(ControllerState::default()),
            }),
        }
    }

    // ===========================================
    // Operations
    // ===========================================

    /// Create a new game, become its first player and load the first question.
    ///
    /// On failure the previous game (if any) stays as it was. When starts
    /// overlap, only the most recent one installs its game.
    pub async fn start_game(&self) {
        let ticket = {
            let mut state = self.lock();
            state.latest_start += 1;
            state.latest_start
        };
        self.inner.surface.feedback(&Feedback::neutral(STARTING_GAME));

        let Ok(game) = self.inner.api.create_game().await else {
            return;
        };
        let session = match Session::from_created(&game) {
            Ok(session) => session,
            Err(e) => {
                self.inner.api.report(ApiError::Protocol(e.to_string()));
                return;
            }
        };

        let generation = {
            let mut state = self.lock();
            if state.latest_start != ticket {
                tracing::debug!(
                    "dropping game {} from superseded start {}",
                    session.game_id(),
                    ticket
                );
                return;
            }
            state.generation += 1;
            if let Some(retry) = state.retry.take() {
                retry.handle.abort();
            }
            state.progress.reset();
            state.session = Some(session.clone());
            state.generation
        };
        tracing::info!(
            "started game {} as player {}",
            session.game_id(),
            session.controlled_player()
        );

        self.run(
            generation,
            Event::GameCreated,
            Render::game_started(game.players, session.game_id().clone()),
        )
        .await;
    }

    /// Load the current question of the active game.
    ///
    /// Does nothing without a game.
    pub async fn fetch_question(&self) {
        if let Some((generation, _)) = self.current() {
            self.drive(generation, vec![Action::FetchQuestion]).await;
        }
    }

    /// Submit an answer as the controlled player.
    ///
    /// Blank answers, and answers without a game, are rejected with a
    /// warning and never reach the network.
    pub async fn submit_answer(&self, text: &str) {
        let answer = text.trim();
        let Some((generation, session)) = self.current() else {
            self.inner.surface.feedback(&Feedback::warning(NO_ACTIVE_GAME));
            return;
        };
        if answer.is_empty() {
            self.inner.surface.feedback(&Feedback::warning(EMPTY_ANSWER));
            return;
        }

        self.apply(
            generation,
            Event::AnswerSubmitted,
            Render::feedback(Feedback::neutral(SUBMITTING)),
        );

        let request = AnswerRequest {
            player_id: session.controlled_player().clone(),
            answer: answer.to_string(),
        };
        match self.inner.api.submit_answer(session.game_id(), &request).await {
            Ok(result) => {
                tracing::debug!(
                    "answer judged {:?}, score now {:?}",
                    result.result,
                    result.your_score
                );
                self.run(
                    generation,
                    Event::AnswerAccepted,
                    Render::feedback(Feedback::answer_result(&result)),
                )
                .await;
            }
            Err(_) => {
                self.apply(generation, Event::AnswerFailed, Render::default());
            }
        }
    }

    /// Fetch the full game state and settle the view on it.
    ///
    /// Does nothing without a game.
    pub async fn check_status(&self) {
        if let Some((generation, _)) = self.current() {
            self.drive(generation, vec![Action::CheckStatus]).await;
        }
    }

    // ===========================================
    // Accessors
    // ===========================================

    /// The view currently shown.
    pub fn view(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// The active session, if a game has started.
    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// Number of games started so far.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// True while a deferred question fetch is scheduled.
    pub fn has_pending_retry(&self) -> bool {
        self.lock()
            .retry
            .as_ref()
            .is_some_and(|retry| !retry.handle.is_finished())
    }

    // ===========================================
    // Action interpreter
    // ===========================================

    /// Apply `event` and then execute the resulting actions.
    async fn run(&self, generation: u64, event: Event, render: Render) {
        let actions = self.apply(generation, event, render);
        self.drive(generation, actions).await;
    }

    /// Execute actions in order, feeding each outcome back into the state
    /// machine. Stops as soon as the generation is superseded.
    async fn drive(&self, generation: u64, actions: Vec<Action>) {
        let mut pending = VecDeque::from(actions);
        while let Some(action) = pending.pop_front() {
            let outcome = match action {
                Action::FetchQuestion => self.load_question(generation).await,
                Action::CheckStatus => self.observe_status(generation).await,
                Action::Reconcile => self.reconcile(generation).await,
                Action::ScheduleRetry => {
                    self.schedule_retry(generation);
                    None
                }
            };
            if let Some((event, render)) = outcome {
                pending.extend(self.apply(generation, event, render));
            }
        }
    }

    async fn load_question(&self, generation: u64) -> Option<(Event, Render)> {
        let session = self.session_for(generation)?;
        self.render_if_current(generation, |surface| {
            surface.feedback(&Feedback::neutral(LOADING_QUESTION))
        });

        let outcome = match self.inner.api.next_question(session.game_id()).await {
            Ok(QuestionResponse::Question(question)) => (
                Event::QuestionReceived(QuestionView::from(&question)),
                Render::default(),
            ),
            Ok(QuestionResponse::Exhausted(notice)) => (
                Event::QuestionsExhausted,
                Render::feedback(Feedback::neutral(notice.message)),
            ),
            Err(e) => (Event::QuestionFailed { kind: e.kind() }, Render::default()),
        };
        Some(outcome)
    }

    async fn observe_status(&self, generation: u64) -> Option<(Event, Render)> {
        let session = self.session_for(generation)?;
        let outcome = match self.inner.api.game_state(session.game_id()).await {
            Ok(game) => {
                let observed = Observed::from(&game);
                let game_over = matches!(observed, Observed::Finished(_));
                (
                    Event::StatusObserved(observed),
                    Render {
                        roster: Some(game.players),
                        game_over,
                        ..Render::default()
                    },
                )
            }
            Err(_) => (Event::StatusUnavailable, Render::default()),
        };
        Some(outcome)
    }

    async fn reconcile(&self, generation: u64) -> Option<(Event, Render)> {
        let session = self.session_for(generation)?;
        let outcome = match self.inner.api.game_state(session.game_id()).await {
            Ok(game) => (
                Event::Reconciled(Some(Observed::from(&game))),
                Render::roster(game.players),
            ),
            Err(_) => (Event::Reconciled(None), Render::default()),
        };
        Some(outcome)
    }

    /// Spawn the single deferred question fetch, replacing any earlier one.
    fn schedule_retry(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation != generation {
            return;
        }
        if let Some(previous) = state.retry.take() {
            previous.handle.abort();
        }

        state.next_retry_id += 1;
        let id = state.next_retry_id;
        let delay = self.inner.retry_delay;
        let controller = self.clone();
        tracing::debug!("retrying question fetch in {:?}", delay);

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.retry_fired(id, generation).await;
        });
        state.retry = Some(PendingRetry {
            id,
            handle: task.abort_handle(),
        });
    }

    async fn retry_fired(&self, id: u64, generation: u64) {
        {
            let mut state = self.lock();
            if state.retry.as_ref().is_some_and(|retry| retry.id == id) {
                state.retry = None;
            }
            if state.generation != generation {
                tracing::debug!("dropping retry from superseded game generation {}", generation);
                return;
            }
        }
        self.drive(generation, vec![Action::FetchQuestion]).await;
    }

    // ===========================================
    // State helpers (never held across .await)
    // ===========================================

    /// Transition the view for `generation` and render the result.
    ///
    /// Returns the follow-up actions, or nothing if the generation is stale.
    fn apply(&self, generation: u64, event: Event, render: Render) -> Vec<Action> {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(
                "discarding {:?} from superseded game generation {}",
                event,
                generation
            );
            return Vec::new();
        }
        let surface = &self.inner.surface;

        if let Some(feedback) = &render.feedback {
            surface.feedback(feedback);
        }
        if let Some(roster) = &render.roster {
            for anomaly in state.progress.scores_observed(roster) {
                tracing::warn!("{}", anomaly);
            }
            if let Some(session) = &state.session {
                surface.roster(&roster_lines(roster, session));
            }
        }
        if let Some(game_id) = &render.started {
            surface.game_started(game_id);
        }
        if let Event::QuestionReceived(question) = &event {
            if let Err(anomaly) = state.progress.question_shown(question.index) {
                tracing::warn!("{}", anomaly);
            }
        }

        // A received question is always redrawn, which also clears the answer input.
        let redraw = matches!(event, Event::QuestionReceived(_));
        let previous = state.view.clone();
        let (view, actions) = previous.clone().on_event(event);
        if redraw || view != previous {
            surface.view(&view);
        }
        state.view = view;

        if render.game_over {
            surface.feedback(&Feedback::game_over());
        }
        actions
    }

    fn render_if_current(&self, generation: u64, render: impl FnOnce(&S)) {
        let state = self.lock();
        if state.generation == generation {
            render(&self.inner.surface);
        }
    }

    fn session_for(&self, generation: u64) -> Option<Session> {
        let state = self.lock();
        if state.generation != generation {
            tracing::debug!("skipping work for superseded game generation {}", generation);
            return None;
        }
        state.session.clone()
    }

    fn current(&self) -> Option<(u64, Session)> {
        let state = self.lock();
        state
            .session
            .clone()
            .map(|session| (state.generation, session))
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
