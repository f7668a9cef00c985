//! # Kitchen Session Module
//!
//! One user's kitchen: configuration, pantry, grocery list, recipe book and
//! cooking flow, owned in a single value instead of shared globals. Every
//! command produces a localized reply and leaves the session interactive.

use crate::config::{LanguageMode, SessionConfig};
use crate::cooking_session::{suggest_timer, CheckOutcome, CookingFlow, StepOutcome, StepView};
use crate::diet_filter::annotate;
use crate::errors::KitchenError;
use crate::grocery::{GroceryList, RoutineTemplate};
use crate::ingredient_extractor::IngredientExtractor;
use crate::ingredient_model::IngredientCandidate;
use crate::inventory::{Inventory, StockLevel, EXPIRING_SOON_DAYS};
use crate::lexicon::DietMode;
use crate::localization::LocalizationManager;
use crate::quantity::UnitSystem;
use crate::recipe_book::RecipeBook;
use crate::reconciler::{ReconcileOptions, Reconciliation};
use crate::voice_command::{strip_wake_word, VoiceCommand};
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Persisted session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: SessionConfig,
    pub inventory: Inventory,
    pub grocery_list: GroceryList,
    #[serde(default)]
    pub routine: RoutineTemplate,
    #[serde(default)]
    pub recipe_book: RecipeBook,
    #[serde(default)]
    pub last_recipe: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Typed commands understood outside the voice vocabulary
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Help,
    Recipe(String),
    Check,
    AddMissing,
    Abort,
    Start,
    Inventory,
    SetItem { name: String, quantity: i64 },
    RemoveItem(String),
    Expiry,
    Grocery,
    GroceryAdd(String),
    GroceryRemove(String),
    Bought(String),
    Routine,
    Servings(u32),
    Units(UnitSystem),
    Language(LanguageMode),
    Diet { diet: DietMode, enabled: bool },
    Favourite,
    Rate(u8),
    /// Cooking commands and anything unrecognised
    Voice(VoiceCommand),
}

impl SessionCommand {
    /// Parse one line of user input. A leading wake word is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchenmate::session::SessionCommand;
    /// use kitchenmate::voice_command::VoiceCommand;
    ///
    /// assert_eq!(SessionCommand::parse("servings 4"), SessionCommand::Servings(4));
    /// assert_eq!(
    ///     SessionCommand::parse("Hey chef, next"),
    ///     SessionCommand::Voice(VoiceCommand::Next)
    /// );
    /// ```
    pub fn parse(line: &str) -> Self {
        let line = match strip_wake_word(line) {
            Some(rest) => rest,
            None => line.trim().to_string(),
        };
        let lowered = line.to_lowercase();
        let (head, rest) = match lowered.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (lowered.as_str(), ""),
        };

        let parsed = match (head, rest) {
            ("help", "") => Some(SessionCommand::Help),
            // keep the recipe's original case
            ("recipe", text) if !text.is_empty() => line
                .get(head.len()..)
                .map(|original| SessionCommand::Recipe(original.trim().to_string())),
            ("check", "") => Some(SessionCommand::Check),
            ("add", "missing") => Some(SessionCommand::AddMissing),
            ("abort", "") => Some(SessionCommand::Abort),
            ("start", "") => Some(SessionCommand::Start),
            ("inventory", "") | ("pantry", "") => Some(SessionCommand::Inventory),
            ("set", args) => parse_set(args),
            ("remove", item) if !item.is_empty() => Some(SessionCommand::RemoveItem(item.to_string())),
            ("expiry", "") => Some(SessionCommand::Expiry),
            ("grocery", "") => Some(SessionCommand::Grocery),
            ("grocery", args) => parse_grocery(args),
            ("bought", item) if !item.is_empty() => Some(SessionCommand::Bought(item.to_string())),
            ("routine", "") => Some(SessionCommand::Routine),
            ("servings", n) => n.parse().ok().map(SessionCommand::Servings),
            ("units", system) => system.parse().ok().map(SessionCommand::Units),
            ("language", language) => language.parse().ok().map(SessionCommand::Language),
            ("diet", args) => parse_diet(args),
            ("favourite", "") | ("favorite", "") => Some(SessionCommand::Favourite),
            ("rate", n) => n.parse().ok().map(SessionCommand::Rate),
            _ => None,
        };

        parsed.unwrap_or_else(|| SessionCommand::Voice(VoiceCommand::parse(&line)))
    }
}

fn parse_set(args: &str) -> Option<SessionCommand> {
    let (name, quantity) = args.rsplit_once(char::is_whitespace)?;
    let quantity = quantity.parse().ok()?;
    let name = name.trim();
    (!name.is_empty()).then(|| SessionCommand::SetItem {
        name: name.to_string(),
        quantity,
    })
}

fn parse_grocery(args: &str) -> Option<SessionCommand> {
    let (action, item) = args.split_once(char::is_whitespace)?;
    let item = item.trim().to_string();
    match action {
        "add" => Some(SessionCommand::GroceryAdd(item)),
        "remove" => Some(SessionCommand::GroceryRemove(item)),
        _ => None,
    }
}

fn parse_diet(args: &str) -> Option<SessionCommand> {
    let (diet, state) = args.rsplit_once(char::is_whitespace)?;
    let enabled = match state {
        "on" => true,
        "off" => false,
        _ => return None,
    };
    Some(SessionCommand::Diet {
        diet: diet.parse().ok()?,
        enabled,
    })
}

/// "m:ss", or "h:mm:ss" from an hour up
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Owned per-user session
#[derive(Debug)]
pub struct KitchenSession {
    config: SessionConfig,
    inventory: Inventory,
    grocery: GroceryList,
    routine: RoutineTemplate,
    recipe_book: RecipeBook,
    flow: CookingFlow,
    recipe: Option<String>,
    messages: LocalizationManager,
}

impl KitchenSession {
    /// New session with the starter pantry
    pub fn new(config: SessionConfig) -> Result<Self> {
        Ok(Self {
            config,
            inventory: Inventory::starter(),
            grocery: GroceryList::new(),
            routine: RoutineTemplate::default(),
            recipe_book: RecipeBook::new(),
            flow: CookingFlow::new(),
            recipe: None,
            messages: LocalizationManager::new()?,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn grocery(&self) -> &GroceryList {
        &self.grocery
    }

    pub fn grocery_mut(&mut self) -> &mut GroceryList {
        &mut self.grocery
    }

    pub fn recipe_book(&self) -> &RecipeBook {
        &self.recipe_book
    }

    pub fn recipe_book_mut(&mut self) -> &mut RecipeBook {
        &mut self.recipe_book
    }

    pub fn flow(&self) -> &CookingFlow {
        &self.flow
    }

    pub fn recipe(&self) -> Option<&str> {
        self.recipe.as_deref()
    }

    fn say(&self, key: &str) -> String {
        self.messages.t(self.config.language, key)
    }

    fn say_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.messages
            .get_message_with_args(self.config.language, key, args)
    }

    /// Localized message by key, for front-end replies
    pub fn message(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.say_with(key, args)
    }

    /// Replace the current recipe text. A pending check is dropped; an
    /// active cooking session keeps its steps.
    pub fn load_recipe(&mut self, text: &str) -> String {
        if !self.flow.is_cooking() {
            self.flow.exit();
        }
        self.recipe = Some(text.to_string());
        info!(chars = text.chars().count(), "Recipe loaded");
        self.say_with("recipe-loaded", &[("chars", &text.chars().count().to_string())])
    }

    /// Age expiry estimates by the days elapsed since the last call
    pub fn apply_daily_decay(&mut self, today: NaiveDate) -> i64 {
        self.inventory.apply_daily_decay(today)
    }

    /// Parse and run one line of input
    pub fn handle_command(&mut self, line: &str) -> String {
        self.handle_command_at(line, Instant::now())
    }

    /// [`handle_command`](Self::handle_command) with an explicit clock for
    /// the step timers
    pub fn handle_command_at(&mut self, line: &str, now: Instant) -> String {
        let command = SessionCommand::parse(line);
        debug!(command = ?command, state = self.flow.state().name(), "Handling command");
        self.execute(command, now)
    }

    pub fn execute(&mut self, command: SessionCommand, now: Instant) -> String {
        match command {
            SessionCommand::Help => self.say("help"),
            SessionCommand::Recipe(text) => self.load_recipe(&text),
            SessionCommand::Check => self.check_ingredients(),
            SessionCommand::AddMissing => self.add_missing(),
            SessionCommand::Abort => match self.flow.abort() {
                Ok(()) => self.say("aborted"),
                Err(err) => self.error_reply(err),
            },
            SessionCommand::Start => self.start_cooking(),
            SessionCommand::Inventory => self.render_inventory(),
            SessionCommand::SetItem { name, quantity } => {
                // new items get a shelf-life estimate; updates keep theirs
                if self.inventory.expiry_days(&name).is_some() {
                    self.inventory.set_quantity(&name, quantity);
                } else {
                    let days = self.inventory.add_with_estimated_expiry(
                        &name,
                        quantity,
                        &mut rand::thread_rng(),
                    );
                    debug!(item = %name, days, "Estimated expiry");
                }
                self.say_with(
                    "inventory-set",
                    &[("name", &name), ("quantity", &quantity.to_string())],
                )
            }
            SessionCommand::RemoveItem(name) => {
                let key = if self.inventory.remove(&name) {
                    "inventory-removed"
                } else {
                    "inventory-not-found"
                };
                self.say_with(key, &[("name", &name)])
            }
            SessionCommand::Expiry => self.render_expiry(),
            SessionCommand::Grocery => self.render_grocery(),
            SessionCommand::GroceryAdd(item) => {
                let key = if self.grocery.add(&item) {
                    "grocery-added"
                } else {
                    "grocery-exists"
                };
                self.say_with(key, &[("item", &item)])
            }
            SessionCommand::GroceryRemove(item) => {
                let key = if self.grocery.remove(&item) {
                    "grocery-removed"
                } else {
                    "grocery-not-found"
                };
                self.say_with(key, &[("item", &item)])
            }
            SessionCommand::Bought(item) => {
                let acquired =
                    self.grocery
                        .mark_acquired(&item, &mut self.inventory, &mut rand::thread_rng());
                if acquired.is_some() {
                    self.say_with("bought", &[("item", &item)])
                } else {
                    self.say_with("grocery-not-found", &[("item", &item)])
                }
            }
            SessionCommand::Routine => {
                let added = self.routine.apply_to(&mut self.grocery);
                self.say_with("routine-applied", &[("count", &added.to_string())])
            }
            SessionCommand::Servings(servings) => {
                let servings = self.config.set_servings(servings);
                self.say_with("servings-set", &[("servings", &servings.to_string())])
            }
            SessionCommand::Units(system) => {
                self.config.unit_system = system;
                self.say_with("units-set", &[("system", &system.to_string())])
            }
            SessionCommand::Language(language) => {
                self.config.language = language;
                self.say_with("language-set", &[("language", &language.to_string())])
            }
            SessionCommand::Diet { diet, enabled } => {
                self.config.set_diet(diet, enabled);
                let state = self.say(if enabled { "diet-on" } else { "diet-off" });
                self.say_with("diet-set", &[("diet", &diet.to_string()), ("state", &state)])
            }
            SessionCommand::Favourite => match self.recipe.clone() {
                Some(recipe) => {
                    let name = self.recipe_book.add_favourite(&recipe);
                    self.say_with("favourite-added", &[("name", &name)])
                }
                None => self.say("no-recipe"),
            },
            SessionCommand::Rate(rating) => match self.recipe.clone() {
                Some(recipe) => {
                    self.recipe_book
                        .record_tried(&recipe, rating, Local::now().date_naive());
                    let stars = self
                        .recipe_book
                        .tried()
                        .next()
                        .map(|tried| tried.stars())
                        .unwrap_or_default();
                    self.say_with("rated", &[("stars", &stars)])
                }
                None => self.say("no-recipe"),
            },
            SessionCommand::Voice(voice) => self.handle_voice(voice, now),
        }
    }

    fn error_reply(&self, err: KitchenError) -> String {
        warn!(error = %err, "Command refused");
        match err {
            KitchenError::InvalidTransition { command, state } => {
                self.say_with("invalid-command", &[("command", &command), ("state", &state)])
            }
            KitchenError::NoRecipe => self.say("no-recipe"),
            KitchenError::NoSteps => self.say("no-steps"),
            KitchenError::MissingIngredients(items) => {
                self.say_with("check-missing", &[("items", &items.join(", "))])
            }
        }
    }

    fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            servings: self.config.servings(),
            unit_system: self.config.unit_system,
        }
    }

    /// Run the ingredient gate on the loaded recipe
    pub fn check_ingredients(&mut self) -> String {
        let Some(recipe) = self.recipe.clone() else {
            return self.error_reply(KitchenError::NoRecipe);
        };

        let extractor = IngredientExtractor::with_config(self.config.extraction_config());
        let options = self.reconcile_options();
        match self
            .flow
            .begin_check(&recipe, &extractor, &self.inventory, &options)
        {
            Ok(CheckOutcome::NoIngredients) => self.say("no-ingredients"),
            Ok(CheckOutcome::Missing(reconciliation)) => {
                let mut reply = self.render_reconciliation(&reconciliation);
                reply.push('\n');
                reply.push_str(&self.say_with(
                    "check-missing",
                    &[("items", &reconciliation.missing.join(", "))],
                ));
                reply
            }
            Ok(CheckOutcome::AllAvailable(reconciliation)) => {
                let mut reply = self.render_reconciliation(&reconciliation);
                reply.push('\n');
                reply.push_str(&self.say("check-all-available"));
                reply
            }
            Err(err) => self.error_reply(err),
        }
    }

    fn render_reconciliation(&self, reconciliation: &Reconciliation) -> String {
        let mut lines = vec![self.say_with(
            "check-header",
            &[("servings", &self.config.servings().to_string())],
        )];

        for line in &reconciliation.lines {
            let name = line.candidate.name.as_str();
            let quantity = line.display_quantity.as_str();
            lines.push(match line.stock {
                Some(level) => self.say_with(
                    "check-line-available",
                    &[("name", name), ("quantity", quantity), ("level", &level.to_string())],
                ),
                None => self.say_with("check-line-missing", &[("name", name), ("quantity", quantity)]),
            });
        }

        if reconciliation.total_cost > 0.0 {
            lines.push(self.say_with(
                "check-cost",
                &[("total", &reconciliation.total_cost.to_string())],
            ));
        }

        let candidates: Vec<IngredientCandidate> = reconciliation
            .lines
            .iter()
            .map(|line| line.candidate.clone())
            .collect();
        for note in annotate(&candidates, &self.config.active_diets()) {
            lines.push(self.say_with(
                "diet-note",
                &[
                    ("name", &note.name),
                    ("diet", &note.diet.to_string()),
                    ("substitute", &note.substitute),
                ],
            ));
        }

        lines.join("\n")
    }

    fn add_missing(&mut self) -> String {
        match self.flow.add_missing_to_grocery(&mut self.grocery) {
            Ok(added) => self.say_with("missing-added", &[("count", &added.to_string())]),
            Err(err) => self.error_reply(err),
        }
    }

    fn start_cooking(&mut self) -> String {
        match self.flow.start_cooking() {
            Ok(view) => {
                info!(steps = view.total, "Guided cooking started");
                self.step_reply(&view)
            }
            Err(err) => self.error_reply(err),
        }
    }

    fn step_reply(&self, view: &StepView) -> String {
        let mut reply = self.say_with(
            "step",
            &[
                ("number", &view.number().to_string()),
                ("total", &view.total.to_string()),
                ("text", &view.text),
            ],
        );
        if let Some(duration) = suggest_timer(&view.text) {
            reply.push('\n');
            reply.push_str(&self.say_with("step-timer", &[("time", &format_duration(duration))]));
        }
        reply
    }

    fn timer_reply(&self, key: &str, result: Result<Option<Duration>, KitchenError>) -> String {
        match result {
            Ok(Some(remaining)) => self.say_with(key, &[("time", &format_duration(remaining))]),
            Ok(None) => self.say("no-timer"),
            Err(err) => self.error_reply(err),
        }
    }

    /// Run one cooking command
    pub fn handle_voice(&mut self, command: VoiceCommand, now: Instant) -> String {
        let step_result = match command {
            VoiceCommand::Next => self.flow.next(),
            VoiceCommand::Previous => self.flow.previous(),
            VoiceCommand::Repeat => self.flow.repeat().map(StepOutcome::Moved),
            VoiceCommand::Done => self.flow.done(),
            VoiceCommand::StartTimer | VoiceCommand::ResumeTimer => {
                let result = self.flow.start_timer(now);
                return self.timer_reply("timer-started", result);
            }
            VoiceCommand::PauseTimer => {
                let result = self.flow.pause_timer(now);
                return self.timer_reply("timer-paused", result);
            }
            VoiceCommand::ResetTimer => {
                let result = self.flow.reset_timer();
                return self.timer_reply("timer-reset", result);
            }
            VoiceCommand::Exit => {
                self.flow.exit();
                return self.say("cooking-exit");
            }
            VoiceCommand::Unknown(text) => {
                debug!(text = %text, "Unrecognised command");
                return self.say_with("unknown-command", &[("command", &text)]);
            }
        };

        match step_result {
            Ok(StepOutcome::Moved(view)) => self.step_reply(&view),
            Ok(StepOutcome::AlreadyAtFirst(_)) => self.say("already-first"),
            Ok(StepOutcome::Completed) => self.say("cooking-complete"),
            Err(err) => self.error_reply(err),
        }
    }

    fn render_inventory(&self) -> String {
        if self.inventory.is_empty() {
            return self.say("inventory-empty");
        }

        let mut lines = vec![self.say_with(
            "inventory-header",
            &[("count", &self.inventory.len().to_string())],
        )];
        for item in self.inventory.iter() {
            let expiry = match self.inventory.expiry_days(&item.name) {
                Some(days) if days <= 0 => self.say("expiry-expired-tag"),
                Some(days) if days <= EXPIRING_SOON_DAYS => {
                    self.say_with("expiry-urgent-tag", &[("days", &days.to_string())])
                }
                Some(days) => self.say_with("expiry-ok-tag", &[("days", &days.to_string())]),
                None => String::new(),
            };
            lines.push(self.say_with(
                "inventory-line",
                &[
                    ("name", &item.name),
                    ("quantity", &item.quantity.to_string()),
                    ("level", &StockLevel::classify(item.quantity).to_string()),
                    ("expiry", &expiry),
                ],
            ));
        }

        let low = self.inventory.low_stock_items();
        if !low.is_empty() {
            lines.push(self.say_with("low-stock", &[("items", &low.join(", "))]));
        }
        lines.join("\n")
    }

    fn render_expiry(&self) -> String {
        let alerts = self.inventory.expiry_alerts();
        if alerts.is_empty() {
            return self.say("expiry-none");
        }

        let names = |items: &[(String, i32)]| {
            items
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut lines = Vec::new();
        if !alerts.expired.is_empty() {
            lines.push(self.say_with("expiry-expired", &[("items", &names(alerts.expired.as_slice()))]));
        }
        if !alerts.expiring_soon.is_empty() {
            lines.push(self.say_with("expiry-soon", &[("items", &names(alerts.expiring_soon.as_slice()))]));
        }
        lines.join("\n")
    }

    fn render_grocery(&self) -> String {
        if self.grocery.is_empty() {
            return self.say("grocery-empty");
        }
        let mut lines = vec![self.say_with(
            "grocery-header",
            &[("count", &self.grocery.len().to_string())],
        )];
        lines.extend(self.grocery.iter().map(|item| format!("- {item}")));
        lines.join("\n")
    }

    /// Capture the persistable state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            inventory: self.inventory.clone(),
            grocery_list: self.grocery.clone(),
            routine: self.routine.clone(),
            recipe_book: self.recipe_book.clone(),
            last_recipe: self.recipe.clone(),
            last_updated: Utc::now(),
        }
    }

    /// Replace the persistable state. The cooking flow restarts idle.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        let SessionSnapshot {
            mut config,
            inventory,
            grocery_list,
            routine,
            recipe_book,
            last_recipe,
            last_updated,
        } = snapshot;

        let servings = config.servings();
        config.set_servings(servings);
        self.config = config;
        self.inventory = inventory;
        self.grocery = grocery_list;
        self.routine = routine;
        self.recipe_book = recipe_book;
        self.recipe = last_recipe;
        self.flow = CookingFlow::new();
        info!(saved_at = %last_updated, items = self.inventory.len(), "Session restored");
    }
}
