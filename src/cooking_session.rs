//! # Cooking Session Module
//!
//! State machine that gates guided cooking on ingredient availability and
//! walks the user through the recipe steps.
//!
//! ```text
//! Idle ──check──▶ Checking ──all available──▶ Ready ──start──▶ Cooking
//!  ▲                 │ abort / add missing      │ abort          │ next at last step,
//!  └─────────────────┴──────────────────────────┴────────────────┘ done, exit
//! ```
//!
//! `exit` returns to `Idle` from any state. While cooking, `next`,
//! `previous` and `repeat` keep the step index inside `0..steps.len()`.

use crate::errors::KitchenError;
use crate::grocery::GroceryList;
use crate::ingredient_extractor::IngredientExtractor;
use crate::inventory::Inventory;
use crate::reconciler::{reconcile, ReconcileOptions, Reconciliation};
use crate::step_extractor::extract_steps;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

lazy_static! {
    static ref TIMER_REGEX: Regex = Regex::new(
        r"(?i)(?:(?P<amount>\d+(?:\.\d+)?)\s*(?P<unit>minutes?|mins?|hours?|hrs?|seconds?|secs?)\b)|\bovernight\b"
    )
    .expect("Timer pattern should be valid");
}

/// Rough length of an "overnight" instruction
const OVERNIGHT: Duration = Duration::from_secs(8 * 3600);

/// Timer length suggested by a step such as "simmer for 10 minutes"
///
/// # Examples
///
/// ```rust
/// use kitchenmate::cooking_session::suggest_timer;
/// use std::time::Duration;
///
/// assert_eq!(suggest_timer("Simmer for 10 minutes"), Some(Duration::from_secs(600)));
/// assert_eq!(suggest_timer("Soak overnight"), Some(Duration::from_secs(8 * 3600)));
/// assert_eq!(suggest_timer("Add the minced garlic"), None);
/// ```
pub fn suggest_timer(step: &str) -> Option<Duration> {
    let caps = TIMER_REGEX.captures(step)?;

    let (Some(amount), Some(unit)) = (caps.name("amount"), caps.name("unit")) else {
        return Some(OVERNIGHT);
    };

    let amount: f64 = amount.as_str().parse().ok()?;
    let unit = unit.as_str().to_lowercase();
    let seconds = if unit.starts_with('h') {
        amount * 3600.0
    } else if unit.starts_with('m') {
        amount * 60.0
    } else {
        amount
    };

    (seconds >= 1.0).then(|| Duration::from_secs(seconds as u64))
}

/// Countdown attached to the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimer {
    total: Duration,
    remaining: Duration,
    running_since: Option<Instant>,
}

impl StepTimer {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
            running_since: None,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Time left at `now`
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self
                .remaining
                .saturating_sub(now.saturating_duration_since(since)),
            None => self.remaining,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }

    /// Start or resume counting down
    pub fn start(&mut self, now: Instant) {
        if self.running_since.is_none() && !self.remaining.is_zero() {
            self.running_since = Some(now);
        }
    }

    /// Freeze the countdown
    pub fn pause(&mut self, now: Instant) {
        self.remaining = self.remaining(now);
        self.running_since = None;
    }

    /// Stop and restore the full duration
    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.running_since = None;
    }
}

/// Active guided-cooking session. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookingSession {
    steps: Vec<String>,
    current_step: usize,
    timer: Option<StepTimer>,
}

/// Snapshot of the current step for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// Zero-based index
    pub index: usize,
    pub total: usize,
    pub text: String,
}

impl StepView {
    /// One-based position for announcements
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

impl CookingSession {
    /// Start at step 0. Returns `None` for an empty step list.
    pub fn new(steps: Vec<String>) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        let timer = suggest_timer(&steps[0]).map(StepTimer::new);
        Some(Self {
            steps,
            current_step: 0,
            timer,
        })
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current_step
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == self.steps.len()
    }

    pub fn view(&self) -> StepView {
        StepView {
            index: self.current_step,
            total: self.steps.len(),
            text: self.steps[self.current_step].clone(),
        }
    }

    pub fn timer(&self) -> Option<&StepTimer> {
        self.timer.as_ref()
    }

    fn move_to(&mut self, index: usize) {
        self.current_step = index;
        self.timer = suggest_timer(&self.steps[index]).map(StepTimer::new);
    }
}

/// Cooking-flow states
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CookingState {
    #[default]
    Idle,
    /// Ingredients were checked and some are missing
    Checking {
        recipe: String,
        reconciliation: Reconciliation,
    },
    /// Everything is available; waiting for the user to start
    Ready { recipe: String },
    Cooking(CookingSession),
}

impl CookingState {
    pub fn name(&self) -> &'static str {
        match self {
            CookingState::Idle => "idle",
            CookingState::Checking { .. } => "checking",
            CookingState::Ready { .. } => "ready",
            CookingState::Cooking(_) => "cooking",
        }
    }
}

/// Result of an ingredient check
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// Nothing recognisable in the recipe; the flow stays idle
    NoIngredients,
    /// Some ingredients are missing; the flow waits in `Checking`
    Missing(Reconciliation),
    /// Everything matched; the flow is `Ready`
    AllAvailable(Reconciliation),
}

/// Result of a step command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Now showing this step
    Moved(StepView),
    /// `previous` at step 0; still showing this step
    AlreadyAtFirst(StepView),
    /// Last step done; the flow is idle again
    Completed,
}

/// Owner of the cooking state
#[derive(Debug, Clone, Default)]
pub struct CookingFlow {
    state: CookingState,
}

/// Coarse flow phase, persisted with session snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowPhase {
    Idle,
    Checking,
    Ready,
    Cooking,
}

impl CookingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CookingState {
        &self.state
    }

    pub fn phase(&self) -> FlowPhase {
        match self.state {
            CookingState::Idle => FlowPhase::Idle,
            CookingState::Checking { .. } => FlowPhase::Checking,
            CookingState::Ready { .. } => FlowPhase::Ready,
            CookingState::Cooking(_) => FlowPhase::Cooking,
        }
    }

    pub fn is_cooking(&self) -> bool {
        matches!(self.state, CookingState::Cooking(_))
    }

    /// Current step while cooking
    pub fn current_step(&self) -> Option<StepView> {
        match &self.state {
            CookingState::Cooking(session) => Some(session.view()),
            _ => None,
        }
    }

    fn invalid(&self, command: &str) -> KitchenError {
        KitchenError::InvalidTransition {
            command: command.to_string(),
            state: self.state.name().to_string(),
        }
    }

    /// Extract ingredients from `recipe` and reconcile them with the
    /// inventory.
    ///
    /// Allowed from every state except `Cooking`; re-checking replaces any
    /// earlier check.
    pub fn begin_check(
        &mut self,
        recipe: &str,
        extractor: &IngredientExtractor,
        inventory: &Inventory,
        options: &ReconcileOptions,
    ) -> Result<CheckOutcome, KitchenError> {
        if self.is_cooking() {
            return Err(self.invalid("check"));
        }

        let candidates = extractor.extract(recipe);
        if candidates.is_empty() {
            info!("Ingredient check found nothing");
            self.state = CookingState::Idle;
            return Ok(CheckOutcome::NoIngredients);
        }

        let reconciliation = reconcile(&candidates, inventory, options);
        info!(
            ingredients = candidates.len(),
            missing = reconciliation.missing.len(),
            "Ingredient check finished"
        );

        if reconciliation.all_available() {
            self.state = CookingState::Ready {
                recipe: recipe.to_string(),
            };
            Ok(CheckOutcome::AllAvailable(reconciliation))
        } else {
            self.state = CookingState::Checking {
                recipe: recipe.to_string(),
                reconciliation: reconciliation.clone(),
            };
            Ok(CheckOutcome::Missing(reconciliation))
        }
    }

    /// Drop a pending check
    pub fn abort(&mut self) -> Result<(), KitchenError> {
        match self.state {
            CookingState::Checking { .. } | CookingState::Ready { .. } => {
                debug!("Check aborted");
                self.state = CookingState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("abort")),
        }
    }

    /// Put every missing ingredient on the grocery list and return to idle.
    /// Returns how many items were new to the list.
    pub fn add_missing_to_grocery(&mut self, grocery: &mut GroceryList) -> Result<usize, KitchenError> {
        let CookingState::Checking { reconciliation, .. } = &self.state else {
            return Err(self.invalid("add missing"));
        };

        let added = grocery.add_all(&reconciliation.missing);
        info!(added, "Missing ingredients added to grocery list");
        self.state = CookingState::Idle;
        Ok(added)
    }

    /// Extract steps and start cooking at step 0.
    ///
    /// On `NoSteps` the flow stays `Ready` so the caller can offer manual
    /// entry or abort.
    pub fn start_cooking(&mut self) -> Result<StepView, KitchenError> {
        let recipe = match &self.state {
            CookingState::Ready { recipe } => recipe,
            CookingState::Checking { reconciliation, .. } => {
                return Err(KitchenError::MissingIngredients(
                    reconciliation.missing.clone(),
                ))
            }
            _ => return Err(self.invalid("start")),
        };

        let session = CookingSession::new(extract_steps(recipe)).ok_or(KitchenError::NoSteps)?;
        let view = session.view();
        info!(steps = view.total, "Cooking started");
        self.state = CookingState::Cooking(session);
        Ok(view)
    }

    fn session_mut(&mut self, command: &str) -> Result<&mut CookingSession, KitchenError> {
        if !self.is_cooking() {
            return Err(self.invalid(command));
        }
        match &mut self.state {
            CookingState::Cooking(session) => Ok(session),
            _ => Err(KitchenError::InvalidTransition {
                command: command.to_string(),
                state: "unknown".to_string(),
            }),
        }
    }

    /// Advance one step; at the last step this completes the session
    pub fn next(&mut self) -> Result<StepOutcome, KitchenError> {
        let session = self.session_mut("next")?;
        if session.is_last_step() {
            return Ok(self.finish_cooking());
        }

        let index = session.current_step + 1;
        session.move_to(index);
        Ok(StepOutcome::Moved(session.view()))
    }

    /// Go back one step, staying at step 0
    pub fn previous(&mut self) -> Result<StepOutcome, KitchenError> {
        let session = self.session_mut("previous")?;
        if session.current_step == 0 {
            return Ok(StepOutcome::AlreadyAtFirst(session.view()));
        }

        let index = session.current_step - 1;
        session.move_to(index);
        Ok(StepOutcome::Moved(session.view()))
    }

    /// Re-emit the current step without changing state
    pub fn repeat(&mut self) -> Result<StepView, KitchenError> {
        Ok(self.session_mut("repeat")?.view())
    }

    /// Finish cooking regardless of the current step
    pub fn done(&mut self) -> Result<StepOutcome, KitchenError> {
        self.session_mut("done")?;
        Ok(self.finish_cooking())
    }

    fn finish_cooking(&mut self) -> StepOutcome {
        info!("Cooking completed");
        self.state = CookingState::Idle;
        StepOutcome::Completed
    }

    /// Leave whatever is happening and return to idle
    pub fn exit(&mut self) {
        if !matches!(self.state, CookingState::Idle) {
            debug!(from = self.state.name(), "Exiting cooking flow");
        }
        self.state = CookingState::Idle;
    }

    /// Start (or resume) the current step's timer. `Ok(None)` when the step
    /// has no suggested duration.
    pub fn start_timer(&mut self, now: Instant) -> Result<Option<Duration>, KitchenError> {
        let session = self.session_mut("start timer")?;
        Ok(session.timer.as_mut().map(|timer| {
            timer.start(now);
            timer.remaining(now)
        }))
    }

    pub fn pause_timer(&mut self, now: Instant) -> Result<Option<Duration>, KitchenError> {
        let session = self.session_mut("pause timer")?;
        Ok(session.timer.as_mut().map(|timer| {
            timer.pause(now);
            timer.remaining(now)
        }))
    }

    pub fn reset_timer(&mut self) -> Result<Option<Duration>, KitchenError> {
        let session = self.session_mut("reset timer")?;
        Ok(session.timer.as_mut().map(|timer| {
            timer.reset();
            timer.total()
        }))
    }

    /// Time left on the current step's timer
    pub fn timer_remaining(&self, now: Instant) -> Option<Duration> {
        match &self.state {
            CookingState::Cooking(session) => session.timer().map(|timer| timer.remaining(now)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE: &str = "Jeera Rice\nIngredients:\n- 1 cup rice\n- 1 tsp cumin\nSteps:\n1. Rinse the rice\n2. Fry cumin in ghee\n3. Cook for 10 minutes";

    fn ready_flow() -> CookingFlow {
        let mut inventory = Inventory::new();
        inventory.set_quantity("rice", 1000);
        inventory.set_quantity("cumin", 100);
        let mut flow = CookingFlow::new();
        let outcome = flow
            .begin_check(
                RECIPE,
                &IngredientExtractor::new(),
                &inventory,
                &ReconcileOptions::default(),
            )
            .unwrap();
        assert!(matches!(outcome, CheckOutcome::AllAvailable(_)));
        flow
    }

    #[test]
    fn test_check_with_everything_available() {
        let flow = ready_flow();
        assert_eq!(flow.phase(), FlowPhase::Ready);
    }

    #[test]
    fn test_check_with_missing_items() {
        let mut flow = CookingFlow::new();
        let outcome = flow
            .begin_check(
                RECIPE,
                &IngredientExtractor::new(),
                &Inventory::new(),
                &ReconcileOptions::default(),
            )
            .unwrap();

        let CheckOutcome::Missing(reconciliation) = outcome else {
            panic!("expected missing ingredients");
        };
        assert_eq!(reconciliation.missing, vec!["rice", "cumin"]);
        assert_eq!(flow.phase(), FlowPhase::Checking);
        assert_eq!(
            flow.start_cooking(),
            Err(KitchenError::MissingIngredients(vec![
                "rice".to_string(),
                "cumin".to_string()
            ]))
        );

        let mut grocery = GroceryList::new();
        assert_eq!(flow.add_missing_to_grocery(&mut grocery).unwrap(), 2);
        assert_eq!(flow.phase(), FlowPhase::Idle);
        assert!(grocery.contains("cumin"));
    }

    #[test]
    fn test_check_with_no_ingredients_stays_idle() {
        let mut flow = CookingFlow::new();
        let outcome = flow
            .begin_check(
                "",
                &IngredientExtractor::new(),
                &Inventory::starter(),
                &ReconcileOptions::default(),
            )
            .unwrap();
        assert_eq!(outcome, CheckOutcome::NoIngredients);
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn test_walk_through_steps() {
        let mut flow = ready_flow();
        let first = flow.start_cooking().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.total, 3);
        assert_eq!(first.text, "Rinse the rice");

        assert!(matches!(
            flow.previous().unwrap(),
            StepOutcome::AlreadyAtFirst(ref view) if view.index == 0
        ));
        assert!(matches!(
            flow.next().unwrap(),
            StepOutcome::Moved(ref view) if view.index == 1
        ));
        assert_eq!(flow.repeat().unwrap().text, "Fry cumin in ghee");
        assert!(matches!(flow.next().unwrap(), StepOutcome::Moved(_)));
        assert_eq!(flow.next().unwrap(), StepOutcome::Completed);
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn test_commands_outside_cooking_are_rejected() {
        let mut flow = CookingFlow::new();
        assert!(matches!(
            flow.next(),
            Err(KitchenError::InvalidTransition { .. })
        ));
        assert!(flow.repeat().is_err());
        assert!(flow.abort().is_err());
        assert!(flow.start_cooking().is_err());
    }

    #[test]
    fn test_ready_without_steps() {
        let mut inventory = Inventory::new();
        inventory.set_quantity("rice", 1000);
        let mut flow = CookingFlow::new();
        flow.begin_check(
            "Ingredients: 1 cup rice",
            &IngredientExtractor::new(),
            &inventory,
            &ReconcileOptions::default(),
        )
        .unwrap();

        assert_eq!(flow.start_cooking(), Err(KitchenError::NoSteps));
        assert_eq!(flow.phase(), FlowPhase::Ready);
    }

    #[test]
    fn test_exit_from_any_state() {
        let mut flow = ready_flow();
        flow.start_cooking().unwrap();
        flow.exit();
        assert_eq!(flow.phase(), FlowPhase::Idle);
        flow.exit();
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn test_empty_session_is_refused() {
        assert!(CookingSession::new(Vec::new()).is_none());
    }

    #[test]
    fn test_step_timer() {
        let mut flow = ready_flow();
        flow.start_cooking().unwrap();
        let start = Instant::now();

        // "Rinse the rice" has no duration
        assert_eq!(flow.start_timer(start).unwrap(), None);

        flow.next().unwrap();
        flow.next().unwrap();
        assert_eq!(flow.start_timer(start).unwrap(), Some(Duration::from_secs(600)));

        let later = start + Duration::from_secs(60);
        assert_eq!(flow.pause_timer(later).unwrap(), Some(Duration::from_secs(540)));
        assert_eq!(flow.timer_remaining(later + Duration::from_secs(100)), Some(Duration::from_secs(540)));
        assert_eq!(flow.reset_timer().unwrap(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_timer_suggestions() {
        let cases = vec![
            ("Boil for 2 hours", Some(7200)),
            ("Rest 30 sec", Some(30)),
            ("Bake 1.5 hrs", Some(5400)),
            ("Cook 5 min", Some(300)),
            ("Serve hot", None),
        ];
        for (step, expected) in cases {
            assert_eq!(
                suggest_timer(step),
                expected.map(Duration::from_secs),
                "Timer for '{}'",
                step
            );
        }
    }
}
