//! Explicitly owned state of one expense-splitting session.
//!
//! The session is the only mutable piece: it validates edits and keeps the
//! roster and expenses consistent. Balances, the settlement plan and the
//! summaries are recomputed from scratch on every call.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info};
use yoanoto_shared::AppConfig;
use yoanoto_shared::types::ExpenseId;

use super::balance::compute_balances;
use super::error::SplitError;
use super::settlement::{SettlementPlanner, SettlementPolicy};
use super::share::{ShareContext, ShareTextRenderer};
use super::summary::SpendingSummary;
use super::types::{Balances, Expense, ExpenseDraft, Participant, SplitTarget, Transaction};

/// Default maximum participant name length, in characters.
pub const DEFAULT_MAX_NAME_LEN: usize = 15;

/// Maximum payment alias length, in characters.
pub const MAX_ALIAS_LEN: usize = 30;

/// Roster, expenses and payment aliases of one group outing.
#[derive(Debug, Clone)]
pub struct SplitSession {
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
    aliases: HashMap<Participant, String>,
    policy: SettlementPolicy,
    max_name_len: usize,
}

impl Default for SplitSession {
    fn default() -> Self {
        Self::new(SettlementPolicy::default(), DEFAULT_MAX_NAME_LEN)
    }
}

impl SplitSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new(policy: SettlementPolicy, max_name_len: usize) -> Self {
        Self {
            participants: Vec::new(),
            expenses: Vec::new(),
            aliases: HashMap::new(),
            policy,
            max_name_len,
        }
    }

    /// Creates an empty session using the application configuration.
    #[must_use]
    pub fn with_config(config: &AppConfig) -> Self {
        Self::new(
            SettlementPolicy::from(&config.settlement),
            config.session.max_name_len,
        )
    }

    // ========== Roster ==========

    /// Adds a participant. The name is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::EmptyName`, `SplitError::NameTooLong` or
    /// `SplitError::DuplicateParticipant`.
    pub fn add_participant(&mut self, name: &str) -> Result<&Participant, SplitError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SplitError::EmptyName);
        }
        if trimmed.chars().count() > self.max_name_len {
            return Err(SplitError::NameTooLong {
                name: trimmed.to_string(),
                max: self.max_name_len,
            });
        }
        if self.is_participant(trimmed) {
            return Err(SplitError::DuplicateParticipant(trimmed.to_string()));
        }

        self.participants.push(Participant::from(trimmed));
        debug!(participant = trimmed, "participant added");
        Ok(&self.participants[self.participants.len() - 1])
    }

    /// Removes a participant and everything that references them.
    ///
    /// Expenses they paid are deleted, they are dropped from every split, and
    /// expenses left with nobody to split among are deleted. Returns how many
    /// expenses were deleted.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::UnknownParticipant` if `name` is not on the roster.
    pub fn remove_participant(&mut self, name: &str) -> Result<usize, SplitError> {
        let Some(pos) = self.participants.iter().position(|p| p.as_str() == name) else {
            return Err(SplitError::UnknownParticipant(name.to_string()));
        };
        let removed = self.participants.remove(pos);
        self.aliases.remove(&removed);

        let before = self.expenses.len();
        self.expenses
            .retain_mut(|expense| expense.payer() != &removed && expense.drop_from_split(name));
        let deleted = before - self.expenses.len();

        info!(participant = name, deleted_expenses = deleted, "participant removed");
        Ok(deleted)
    }

    /// Returns the roster in insertion order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns true if `name` is on the roster.
    #[must_use]
    pub fn is_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.as_str() == name)
    }

    // ========== Expenses ==========

    /// Records an expense and returns its id.
    ///
    /// `SplitTarget::Everyone` expands to the roster as it is right now.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::UnknownParticipant` if the payer or a splitter is
    /// not on the roster, or the validation errors of [`Expense::new`].
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<ExpenseId, SplitError> {
        self.require_participant(draft.payer.as_str())?;

        let split_among = match draft.split {
            SplitTarget::Everyone => self.participants.clone(),
            SplitTarget::Only(names) => {
                for name in &names {
                    self.require_participant(name.as_str())?;
                }
                names
            }
        };

        let expense = Expense::new(draft.payer, draft.amount, split_among, draft.category)?;
        let id = expense.id();
        debug!(
            expense_id = %id,
            payer = %expense.payer(),
            amount = %expense.amount(),
            splitters = expense.split_among().len(),
            "expense added"
        );
        self.expenses.push(expense);
        Ok(id)
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::ExpenseNotFound` if no expense has that id.
    pub fn remove_expense(&mut self, id: ExpenseId) -> Result<Expense, SplitError> {
        let pos = self
            .expenses
            .iter()
            .position(|e| e.id() == id)
            .ok_or(SplitError::ExpenseNotFound(id))?;
        Ok(self.expenses.remove(pos))
    }

    /// Returns the expenses in entry order.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Sum of every expense.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.expenses.iter().map(Expense::amount).sum()
    }

    // ========== Aliases ==========

    /// Sets the payment alias shown next to a creditor; blank clears it.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::UnknownParticipant` or `SplitError::AliasTooLong`.
    pub fn set_alias(&mut self, name: &str, alias: &str) -> Result<(), SplitError> {
        self.require_participant(name)?;
        let alias = alias.trim();
        if alias.chars().count() > MAX_ALIAS_LEN {
            return Err(SplitError::AliasTooLong { max: MAX_ALIAS_LEN });
        }

        let key = Participant::from(name);
        if alias.is_empty() {
            self.aliases.remove(&key);
        } else {
            self.aliases.insert(key, alias.to_string());
        }
        Ok(())
    }

    /// Returns the alias recorded for `name`.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Participants who receive money in the current plan, first-seen order.
    ///
    /// These are the people worth asking for a payment alias.
    #[must_use]
    pub fn alias_candidates(&self) -> Vec<Participant> {
        let mut candidates: Vec<Participant> = Vec::new();
        for tx in self.settlement() {
            if !candidates.contains(&tx.to) {
                candidates.push(tx.to);
            }
        }
        candidates
    }

    // ========== Derived views ==========

    /// Returns true once there are enough people to split anything.
    #[must_use]
    pub fn can_add_expenses(&self) -> bool {
        self.participants.len() >= 2
    }

    /// Returns true once there is something to summarize.
    #[must_use]
    pub fn can_summarize(&self) -> bool {
        !self.expenses.is_empty()
    }

    /// Returns the settlement policy in use.
    #[must_use]
    pub const fn policy(&self) -> &SettlementPolicy {
        &self.policy
    }

    /// Net balance per participant.
    #[must_use]
    pub fn balances(&self) -> Balances {
        compute_balances(&self.participants, &self.expenses)
    }

    /// Transfers that settle the group.
    #[must_use]
    pub fn settlement(&self) -> Vec<Transaction> {
        SettlementPlanner::new(self.policy).simplify(&self.participants, &self.expenses)
    }

    /// Paid/owed breakdown per participant.
    #[must_use]
    pub fn summary(&self) -> SpendingSummary {
        SpendingSummary::compute(&self.participants, &self.expenses, &self.policy)
    }

    /// Shareable text with the expenses and the settlement plan.
    #[must_use]
    pub fn share_text(&self) -> String {
        let transactions = self.settlement();
        ShareTextRenderer::render(&ShareContext {
            participants: &self.participants,
            expenses: &self.expenses,
            transactions: &transactions,
            aliases: &self.aliases,
        })
    }

    fn require_participant(&self, name: &str) -> Result<(), SplitError> {
        if self.is_participant(name) {
            Ok(())
        } else {
            Err(SplitError::UnknownParticipant(name.to_string()))
        }
    }
}
