//! Choice resolution.
//!
//! `Engine` owns the story, the game state, and the undo stack. Resolving a
//! choice runs in two phases so a UI can show the dice before the effects
//! land: [`Engine::begin_choice`] validates the choice and rolls, and
//! [`Engine::complete_choice`] applies effects and moves to the destination.
//! [`Engine::choose`] does both at once.

use wg_core::effect::signed;
use wg_core::{
    Branch, Choice, GameState, InventoryEffect, RollOutcome, Snapshot, Story,
    condition_satisfied,
};
use wg_mechanics::{DiceSource, RngDice, resolve_roll};

use crate::config::{EngineConfig, FailedTransitionPolicy};
use crate::error::{EngineError, EngineResult};
use crate::save::{SavePayload, StoryMeta};
use crate::stats::{ResolvedStat, StatPartition, StatsManager};

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The player moved to the destination.
    Committed,
    /// The destination was missing; the player stayed put.
    Aborted,
}

/// Everything a UI needs to report about a resolved choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOutcome {
    /// Committed or aborted.
    pub status: OutcomeStatus,
    /// The choice that was taken.
    pub choice_id: String,
    /// Branch the choice was taken from.
    pub from: String,
    /// Intended destination, if the choice named one.
    pub to: Option<String>,
    /// The roll made for this choice.
    pub roll: Option<RollOutcome>,
    /// Stat changes that took effect.
    pub applied_stats: Vec<ResolvedStat>,
    /// Inventory changes that took effect.
    pub applied_inventory: Vec<InventoryEffect>,
    /// The journal line written, if any.
    pub journal_entry: Option<String>,
    /// Non-fatal problems; joined, they form the state's `system_error`.
    pub warnings: Vec<String>,
}

impl ChoiceOutcome {
    /// Whether the player moved.
    pub fn is_committed(&self) -> bool {
        self.status == OutcomeStatus::Committed
    }
}

/// Result of [`Engine::begin_choice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Begin {
    /// Another resolution is still pending.
    Ignored,
    /// Dice were rolled; call [`Engine::complete_choice`] to finish.
    AwaitingRoll(RollOutcome),
    /// The choice had no roll and is already resolved.
    Finished(Box<ChoiceOutcome>),
}

/// A choice as offered on the current branch.
#[derive(Debug, Clone, Copy)]
pub struct AvailableChoice<'a> {
    /// The choice.
    pub choice: &'a Choice,
    /// False when its validity condition fails.
    pub enabled: bool,
}

/// A resolution between its roll and its effects.
#[derive(Debug, Clone)]
struct PendingResolution {
    from: String,
    choice: Choice,
    partition: StatPartition,
    roll: Option<RollOutcome>,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Resolving(Box<PendingResolution>),
}

/// The narrative state machine for one play session.
pub struct Engine {
    story: Story,
    stats: StatsManager,
    state: GameState,
    undo_stack: Vec<Snapshot>,
    config: EngineConfig,
    dice: Box<dyn DiceSource>,
    phase: Phase,
}

impl Engine {
    /// Start a session at the story's first branch.
    pub fn new(story: Story, stats: StatsManager, config: EngineConfig) -> Self {
        let state = GameState::new(story.start(), stats.defaults(), config.max_journal_entries);
        let dice = Box::new(RngDice::seeded(config.seed));
        log::info!(
            "starting at \"{}\" with {} stats configured",
            story.start(),
            stats.len()
        );
        Self {
            story,
            stats,
            state,
            undo_stack: Vec::new(),
            config,
            dice,
            phase: Phase::Idle,
        }
    }

    /// Replace the dice source.
    pub fn with_dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    /// The loaded story.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The stat registry.
    pub fn stats(&self) -> &StatsManager {
        &self.stats
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The branch the player is on.
    pub fn current_branch(&self) -> Option<&Branch> {
        self.story.branch(&self.state.current_branch_id)
    }

    /// Whether a rolled choice is waiting for [`Engine::complete_choice`].
    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, Phase::Resolving(_))
    }

    /// Choices on the current branch whose visibility condition holds.
    pub fn visible_choices(&self) -> Vec<AvailableChoice<'_>> {
        let Some(branch) = self.current_branch() else {
            return Vec::new();
        };
        let ctx = self.state.condition_context();
        branch
            .choices
            .iter()
            .filter(|c| condition_satisfied(c.visibility_condition.as_ref(), &ctx))
            .map(|choice| AvailableChoice {
                choice,
                enabled: condition_satisfied(choice.valid_condition.as_ref(), &ctx),
            })
            .collect()
    }

    /// Validate a choice and roll its dice, if any.
    ///
    /// A choice without a roll is resolved immediately. Calls made while a
    /// roll is pending are ignored.
    pub fn begin_choice(&mut self, branch_id: &str, choice_id: &str) -> EngineResult<Begin> {
        if self.is_resolving() {
            log::debug!("ignoring \"{choice_id}\": a resolution is pending");
            return Ok(Begin::Ignored);
        }
        let choice = self.check_choice(branch_id, choice_id)?.clone();

        let roll = match &choice.roll {
            Some(directive) => {
                let state = &self.state;
                Some(resolve_roll(directive, |s| state.stat(s), self.dice.as_mut())?)
            }
            None => None,
        };

        self.undo_stack.push(self.state.snapshot());
        self.state.last_roll = roll.clone();
        self.state.system_error = None;

        let pending = PendingResolution {
            from: self.state.current_branch_id.clone(),
            partition: self.stats.partition_effects(&choice.stats),
            choice,
            roll,
        };

        match pending.roll.clone() {
            Some(outcome) => {
                self.phase = Phase::Resolving(Box::new(pending));
                Ok(Begin::AwaitingRoll(outcome))
            }
            None => Ok(Begin::Finished(Box::new(self.finish(pending)))),
        }
    }

    /// Apply the pending resolution, if there is one.
    pub fn complete_choice(&mut self) -> Option<ChoiceOutcome> {
        match std::mem::take(&mut self.phase) {
            Phase::Idle => None,
            Phase::Resolving(pending) => Some(self.finish(*pending)),
        }
    }

    /// Resolve a choice in one call.
    ///
    /// Returns `None` only when a previous resolution is still pending.
    pub fn choose(
        &mut self,
        branch_id: &str,
        choice_id: &str,
    ) -> EngineResult<Option<ChoiceOutcome>> {
        Ok(match self.begin_choice(branch_id, choice_id)? {
            Begin::Ignored => None,
            Begin::AwaitingRoll(_) => self.complete_choice(),
            Begin::Finished(outcome) => Some(*outcome),
        })
    }

    /// Restore the state from before the most recent committed choice.
    pub fn undo(&mut self) -> bool {
        if self.is_resolving() {
            return false;
        }
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.state.restore(&snapshot, self.stats.defaults());
        log::info!(
            "undo to \"{}\" ({} steps left)",
            self.state.current_branch_id,
            self.undo_stack.len()
        );
        true
    }

    /// Whether [`Engine::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() && !self.is_resolving()
    }

    /// Number of undoable choices.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Start over at the first branch with default stats.
    pub fn reset(&mut self) {
        self.state.reset(self.story.start(), self.stats.defaults());
        self.undo_stack.clear();
        self.phase = Phase::Idle;
        log::info!("reset to \"{}\"", self.story.start());
    }

    /// Capture the state for a save file.
    ///
    /// `meta` supplies the story and stat config locations; the branch fields
    /// are filled in from the current state.
    pub fn save_payload(&self, meta: &StoryMeta) -> SavePayload {
        let meta = StoryMeta {
            start: self.story.start().to_string(),
            current_branch_id: self.state.current_branch_id.clone(),
            current_branch_title: self
                .current_branch()
                .map(|b| b.title.clone())
                .unwrap_or_default(),
            ..meta.clone()
        };
        log::info!("saving at \"{}\"", meta.current_branch_id);
        SavePayload::new(meta, self.state.snapshot())
    }

    /// Replace the state with a saved one. The undo history is cleared.
    ///
    /// A saved branch that is missing or no longer exists restarts the player
    /// at the first branch and sets `system_error`.
    pub fn load_payload(&mut self, payload: &SavePayload) {
        self.phase = Phase::Idle;
        self.undo_stack.clear();
        self.state.restore(&payload.state, self.stats.defaults());

        let saved = self.state.current_branch_id.clone();
        if !self.story.contains(&saved) {
            let start = self.story.start().to_string();
            let message = if saved.is_empty() {
                format!("Saved game has no current branch; restarted at \"{start}\".")
            } else {
                format!("Saved branch \"{saved}\" was not found; restarted at \"{start}\".")
            };
            log::warn!("{message}");
            self.state.set_current_branch(&start);
            self.state.system_error = Some(message);
        }
        log::info!("loaded save at \"{}\"", self.state.current_branch_id);
    }

    fn check_choice(&self, branch_id: &str, choice_id: &str) -> EngineResult<&Choice> {
        let branch = self
            .story
            .branch(branch_id)
            .ok_or_else(|| EngineError::UnknownBranch(branch_id.to_string()))?;
        if branch.id != self.state.current_branch_id {
            return Err(EngineError::NotCurrentBranch {
                branch: branch.id.clone(),
                current: self.state.current_branch_id.clone(),
            });
        }
        let choice = branch
            .choice(choice_id)
            .ok_or_else(|| EngineError::UnknownChoice {
                branch: branch.id.clone(),
                choice: choice_id.to_string(),
            })?;

        let ctx = self.state.condition_context();
        if !condition_satisfied(choice.visibility_condition.as_ref(), &ctx) {
            return Err(EngineError::ChoiceHidden(choice.id.clone()));
        }
        if !condition_satisfied(choice.valid_condition.as_ref(), &ctx) {
            return Err(EngineError::ChoiceDisabled(choice.id.clone()));
        }
        Ok(choice)
    }

    fn finish(&mut self, pending: PendingResolution) -> ChoiceOutcome {
        let PendingResolution {
            from,
            choice,
            partition,
            roll,
        } = pending;

        let evaluation = self.stats.evaluate_effects(
            &partition.allowed,
            roll.as_ref(),
            self.state.last_roll.as_ref(),
        );
        let applied_stats = self
            .stats
            .apply_evaluated_effects(&mut self.state.stats, &evaluation.effects);

        let staged: &[InventoryEffect] = match &roll {
            Some(outcome) if !outcome.success => &[],
            _ => choice.inventory.as_slice(),
        };
        let applied_inventory = self.state.inventory.apply_effects(staged);

        let journal_entry = journal_summary(&choice.text, &applied_stats, &applied_inventory);
        if let Some(entry) = &journal_entry {
            self.state.journal.append(entry.as_str());
        }

        let mut warnings = Vec::new();
        if let Some(message) = unknown_stats_message(&partition.unknown) {
            warnings.push(message);
        }
        let mut issues = evaluation.issues;
        issues.sort();
        warnings.extend(issues);
        for warning in &warnings {
            log::warn!("{warning}");
        }

        let to = match &roll {
            Some(outcome) => Some(outcome.destination().to_string()),
            None => choice.next.clone(),
        };
        let mut outcome = ChoiceOutcome {
            status: OutcomeStatus::Committed,
            choice_id: choice.id,
            from,
            to,
            roll,
            applied_stats,
            applied_inventory,
            journal_entry,
            warnings,
        };

        match outcome.to.as_deref() {
            Some(to) if self.story.contains(to) => {
                self.state.transitions.mark(&outcome.from, to);
                self.state.set_current_branch(to);
                log::info!("{} -> {} via {}", outcome.from, to, outcome.choice_id);
            }
            destination => {
                let message = match destination {
                    Some(to) => format!("Missing branch \"{to}\"."),
                    None => "Choice has no destination.".to_string(),
                };
                log::warn!("{message}");
                let before = self.undo_stack.pop();
                if self.config.failed_transition == FailedTransitionPolicy::Rollback {
                    if let Some(snapshot) = before {
                        self.state.restore(&snapshot, self.stats.defaults());
                    }
                    outcome.applied_stats.clear();
                    outcome.applied_inventory.clear();
                    outcome.journal_entry = None;
                }
                outcome.status = OutcomeStatus::Aborted;
                outcome.warnings.push(message);
            }
        }

        if !outcome.warnings.is_empty() {
            self.state.system_error = Some(outcome.warnings.join(" "));
        }
        outcome
    }
}

/// `"<text> → Stats: a +1 | Inventory: Key +1"`, or `None` if nothing applied.
fn journal_summary(
    text: &str,
    stats: &[ResolvedStat],
    inventory: &[InventoryEffect],
) -> Option<String> {
    let mut sections = Vec::new();
    if !stats.is_empty() {
        let parts: Vec<String> = stats
            .iter()
            .map(|s| format!("{} {}", s.label, signed(s.delta)))
            .collect();
        sections.push(format!("Stats: {}", parts.join(", ")));
    }
    if !inventory.is_empty() {
        let parts: Vec<String> = inventory
            .iter()
            .map(|e| format!("{} {}", e.item, signed(e.delta)))
            .collect();
        sections.push(format!("Inventory: {}", parts.join(", ")));
    }
    if sections.is_empty() {
        None
    } else {
        Some(format!("{text} → {}", sections.join(" | ")))
    }
}

fn unknown_stats_message(names: &[String]) -> Option<String> {
    let mut names = names.to_vec();
    names.sort();
    match names.len() {
        0 => None,
        1 => Some(format!(
            "Unknown stat encountered: {}. Update the stat config.",
            names[0]
        )),
        _ => Some(format!(
            "Unknown stats encountered: {}. Update the stat config.",
            names.join(", ")
        )),
    }
}
