//! The session controller and analysis reconciler

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use packcraft_ai::GearAdvisor;
use packcraft_analytics::WeightStats;
use packcraft_core::{
    AiStatus, Category, ChatMessage, GearItem, PackAnalysis, Preset, Role, Season, SuggestedItem,
    TripSettings, TripType, WeightSnapshot,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::SessionError;

/// Quiet period before a changed pack triggers a fresh analysis
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);

#[derive(Default)]
struct SessionState {
    pack: Vec<GearItem>,
    settings: TripSettings,
    analysis: Option<PackAnalysis>,
    suggestions: Vec<SuggestedItem>,
    suggestions_loading: bool,
    chat: Vec<ChatMessage>,
    snapshot: Option<WeightSnapshot>,
    status: AiStatus,
}

/// Owner of all per-session planner state
///
/// Cheap to clone; clones share the same underlying session.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    advisor: Arc<dyn GearAdvisor>,
    debounce: Duration,
    /// Monotonic counter identifying the most recently scheduled analysis
    analysis_gen: Arc<AtomicU64>,
    reconcile_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Session {
    pub fn new(advisor: Arc<dyn GearAdvisor>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            advisor,
            debounce: DEFAULT_DEBOUNCE,
            analysis_gen: Arc::new(AtomicU64::new(0)),
            reconcile_task: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    fn locked(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state poisoned")
    }

    // ---- read access -------------------------------------------------

    pub fn pack(&self) -> Vec<GearItem> {
        self.locked().pack.clone()
    }

    pub fn settings(&self) -> TripSettings {
        self.locked().settings.clone()
    }

    pub fn analysis(&self) -> Option<PackAnalysis> {
        self.locked().analysis.clone()
    }

    pub fn suggestions(&self) -> Vec<SuggestedItem> {
        self.locked().suggestions.clone()
    }

    pub fn suggestions_loading(&self) -> bool {
        self.locked().suggestions_loading
    }

    pub fn chat_history(&self) -> Vec<ChatMessage> {
        self.locked().chat.clone()
    }

    pub fn snapshot(&self) -> Option<WeightSnapshot> {
        self.locked().snapshot.clone()
    }

    pub fn status(&self) -> AiStatus {
        self.locked().status
    }

    /// Derived weight statistics for the current pack and settings
    pub fn stats(&self) -> WeightStats {
        let state = self.locked();
        packcraft_analytics::compute(&state.pack, &state.settings)
    }

    // ---- pack mutations ----------------------------------------------

    /// Add a fresh instance of a catalog template to the pack
    pub fn add_item(&self, template: &GearItem) -> GearItem {
        self.push_instance(template.instantiate())
    }

    /// Add a user-entered item; rejected input leaves state untouched
    pub fn add_custom(
        &self,
        name: &str,
        weight_g: f64,
        category: Category,
    ) -> Result<GearItem, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if !weight_g.is_finite() || weight_g < 0.0 {
            return Err(SessionError::InvalidWeight);
        }
        Ok(self.push_instance(GearItem::custom(name, category, weight_g)))
    }

    /// Move a suggestion into the pack, carrying its reason as the note
    pub fn add_suggestion(&self, name: &str) -> Result<GearItem, SessionError> {
        let suggestion = {
            let state = self.locked();
            state
                .suggestions
                .iter()
                .find(|s| s.name == name)
                .cloned()
                .ok_or_else(|| SessionError::UnknownSuggestion(name.to_string()))?
        };

        let mut item = GearItem::custom(
            suggestion.name.clone(),
            suggestion.category,
            suggestion.weight_g,
        );
        item.notes = Some(suggestion.reason.clone());
        Ok(self.push_instance(item))
    }

    fn push_instance(&self, instance: GearItem) -> GearItem {
        {
            let mut state = self.locked();
            state.suggestions.retain(|s| s.name != instance.name);
            state.pack.push(instance.clone());
        }
        self.schedule_analysis();
        instance
    }

    /// Remove a single pack instance; no-op when the id is absent
    pub fn remove(&self, instance_id: &str) -> bool {
        let removed = {
            let mut state = self.locked();
            let before = state.pack.len();
            state.pack.retain(|i| i.id != instance_id);
            state.pack.len() != before
        };
        if removed {
            self.schedule_analysis();
        }
        removed
    }

    /// Empty the pack and reset the analysis synchronously
    pub fn clear(&self) {
        self.locked().pack.clear();
        // Bumps the generation, so any in-flight result is discarded too
        self.schedule_analysis();
    }

    /// Replace settings and pack wholesale from a preset
    ///
    /// Item ids not present in the catalog are silently skipped.
    pub fn apply_preset(&self, preset: &Preset, catalog: &[GearItem]) {
        {
            let mut state = self.locked();
            if context_changed(&state.settings, &preset.settings) {
                state.suggestions.clear();
            }
            state.settings = preset.settings.clone();
            state.pack = preset
                .item_ids
                .iter()
                .filter_map(|id| catalog.iter().find(|item| &item.id == id))
                .map(GearItem::instantiate)
                .collect();
        }
        self.schedule_analysis();
    }

    /// Apply an edit to the trip settings
    ///
    /// Changing trip type or season invalidates the suggestion list; other
    /// fields leave it alone. Any change reschedules the analysis.
    pub fn update_settings(&self, edit: impl FnOnce(&mut TripSettings)) {
        {
            let mut state = self.locked();
            let before = state.settings.clone();
            edit(&mut state.settings);
            if context_changed(&before, &state.settings) {
                state.suggestions.clear();
            }
        }
        self.schedule_analysis();
    }

    /// Whether the analysis names a non-empty strict subset of the pack
    pub fn can_strip(&self) -> bool {
        let state = self.locked();
        match &state.analysis {
            Some(analysis) => {
                !analysis.essential_item_ids.is_empty()
                    && state.pack.len() > analysis.essential_item_ids.len()
            }
            None => false,
        }
    }

    /// Drop every pack item the analysis does not mark essential
    ///
    /// Relative order of the kept items is preserved. Returns the number of
    /// removed items.
    pub fn strip_to_essentials(&self) -> Result<usize, SessionError> {
        if !self.can_strip() {
            return Err(SessionError::NothingToStrip);
        }
        let removed = {
            let mut state = self.locked();
            let essential: HashSet<String> = state
                .analysis
                .as_ref()
                .map(|a| a.essential_item_ids.iter().cloned().collect())
                .unwrap_or_default();
            let before = state.pack.len();
            state.pack.retain(|item| essential.contains(&item.id));
            before - state.pack.len()
        };
        self.schedule_analysis();
        Ok(removed)
    }

    /// Save the current total weight as the one retained checkpoint
    pub fn take_snapshot(&self) -> WeightSnapshot {
        let total = self.stats().total_g;
        let snapshot = WeightSnapshot::now(total);
        self.locked().snapshot = Some(snapshot.clone());
        snapshot
    }

    // ---- analysis reconciler -----------------------------------------

    /// Cancel-and-reschedule the debounced analysis call
    ///
    /// Every qualifying change lands here. Each call bumps the generation;
    /// a sleeping or in-flight task whose generation no longer matches
    /// drops out without touching state, which gives last-scheduled-wins.
    fn schedule_analysis(&self) {
        let generation = self.analysis_gen.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.locked();
            if state.pack.is_empty() {
                // Immediate reset, no debounce, no call
                state.analysis = None;
                return;
            }
        }

        let state = Arc::clone(&self.state);
        let advisor = Arc::clone(&self.advisor);
        let gen_counter = Arc::clone(&self.analysis_gen);
        let debounce = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if gen_counter.load(Ordering::SeqCst) != generation {
                // Superseded during the quiet period
                return;
            }

            let (pack, settings) = {
                let state = state.lock().expect("session state poisoned");
                (state.pack.clone(), state.settings.clone())
            };
            debug!(generation, items = pack.len(), "running pack analysis");

            let result = advisor.analyze_pack(&pack, &settings).await;

            if gen_counter.load(Ordering::SeqCst) != generation {
                debug!(generation, "discarding stale analysis result");
                return;
            }

            let analysis = match result {
                Ok(analysis) => analysis,
                Err(err) => {
                    warn!(error = %err, "pack analysis failed, using empty default");
                    PackAnalysis::unknown()
                }
            };
            state.lock().expect("session state poisoned").analysis = Some(analysis);
        });

        *self
            .reconcile_task
            .lock()
            .expect("reconcile slot poisoned") = Some(handle);
    }

    /// Wait for the most recently scheduled analysis task to finish
    pub async fn settled(&self) {
        let handle = self
            .reconcile_task
            .lock()
            .expect("reconcile slot poisoned")
            .take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    // ---- suggestions -------------------------------------------------

    /// Ask the advisor for missing-item suggestions
    ///
    /// Replaces the list wholesale; a failed call leaves it empty.
    pub async fn request_suggestions(&self) -> Vec<SuggestedItem> {
        {
            let mut state = self.locked();
            if state.suggestions_loading {
                return state.suggestions.clone();
            }
            state.suggestions_loading = true;
        }

        let (pack, settings) = {
            let state = self.locked();
            (state.pack.clone(), state.settings.clone())
        };
        let suggestions = match self.advisor.suggest_items(&pack, &settings).await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "suggestion request failed");
                Vec::new()
            }
        };

        let mut state = self.locked();
        state.suggestions = suggestions.clone();
        state.suggestions_loading = false;
        suggestions
    }

    // ---- advisor-backed chat actions ---------------------------------

    /// Short assessment from the fast model
    pub async fn quick_feedback(&self) -> Result<String, SessionError> {
        let (pack, settings) =
            self.begin_action(AiStatus::Loading, "Give me a quick check on this loadout.")?;
        let response = match self.advisor.quick_feedback(&pack, &settings).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "quick feedback failed");
                "Error generating feedback. Please check your connection.".to_string()
            }
        };
        self.end_action(&response);
        Ok(response)
    }

    /// Long-form review from the deep model
    pub async fn deep_review(&self) -> Result<String, SessionError> {
        let (pack, settings) =
            self.begin_action(AiStatus::Thinking, "Please do a deep review of my gear.")?;
        let response = match self.advisor.deep_review(&pack, &settings).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "deep review failed");
                "Error generating deep review. Please try again.".to_string()
            }
        };
        self.end_action(&response);
        Ok(response)
    }

    /// One conversational turn about the current pack and trip
    pub async fn chat(&self, text: &str) -> Result<String, SessionError> {
        // History snapshot excludes the turn being sent
        let history = {
            let state = self.locked();
            if state.status != AiStatus::Idle {
                return Err(SessionError::Busy);
            }
            state.chat.clone()
        };
        let (pack, settings) = self.begin_action(AiStatus::Loading, text)?;

        let response = match self.advisor.chat(&history, text, &pack, &settings).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "chat turn failed");
                "Sorry, I'm having trouble connecting to the trail satellite (API Error)."
                    .to_string()
            }
        };
        self.end_action(&response);
        Ok(response)
    }

    /// Search-grounded gear lookup
    pub async fn search(&self, query: &str) -> Result<String, SessionError> {
        self.begin_action(AiStatus::Loading, format!("Search info for: {}", query))?;
        let response = match self.advisor.search(query).await {
            Ok(text) => format!("**Search Result:**\n\n{}", text),
            Err(err) => {
                warn!(error = %err, "gear search failed");
                "Could not perform search.".to_string()
            }
        };
        self.end_action(&response);
        Ok(response)
    }

    /// Weight estimate in grams for a named item; failures come back as 0
    pub async fn estimate_weight(&self, item_name: &str) -> f64 {
        match self.advisor.estimate_weight(item_name).await {
            Ok(grams) => grams,
            Err(err) => {
                warn!(error = %err, "weight estimation failed");
                0.0
            }
        }
    }

    fn begin_action(
        &self,
        status: AiStatus,
        user_message: impl Into<String>,
    ) -> Result<(Vec<GearItem>, TripSettings), SessionError> {
        let mut state = self.locked();
        if state.status != AiStatus::Idle {
            return Err(SessionError::Busy);
        }
        state.status = status;
        state.chat.push(ChatMessage::new(Role::User, user_message));
        Ok((state.pack.clone(), state.settings.clone()))
    }

    fn end_action(&self, model_message: &str) {
        let mut state = self.locked();
        state.chat.push(ChatMessage::new(Role::Model, model_message));
        state.status = AiStatus::Idle;
    }
}

/// Trip type or season changing invalidates the suggestion context
fn context_changed(before: &TripSettings, after: &TripSettings) -> bool {
    trip_context(before) != trip_context(after)
}

fn trip_context(settings: &TripSettings) -> (TripType, Season) {
    (settings.trip_type, settings.season)
}
