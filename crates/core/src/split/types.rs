//! Domain types for expense splitting.
//!
//! Participants are plain display names, expenses are validated at
//! construction, and balances/transactions are derived values.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use yoanoto_shared::types::ExpenseId;

use super::error::SplitError;

/// A named party who may pay for or owe a share of an expense.
///
/// Names are case-sensitive and unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    /// Creates a participant from a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Participant {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What an expense was spent on.
///
/// Serialized as the category id (`"carne"`, `"bebidas"`, ...); any other
/// text is kept as a custom category. Custom text that matches a built-in id
/// is folded into the built-in by [`Category::normalized`], so ids read back
/// as the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Meat for the grill.
    Carne,
    /// Drinks.
    Bebidas,
    /// Charcoal.
    Carbon,
    /// Ice.
    Hielo,
    /// Bread.
    Pan,
    /// Pitch or court rental.
    Cancha,
    /// Anything extra (music, decorations...).
    Extras,
    /// Free-text category; blank means the generic "Otro".
    Other(String),
}

impl Category {
    /// Returns the label shown in summaries.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Carne => "🥩 Carne",
            Self::Bebidas => "🍺 Bebidas",
            Self::Carbon => "🔥 Carbón",
            Self::Hielo => "🧊 Hielo",
            Self::Pan => "🍞 Pan",
            Self::Cancha => "⚽ Cancha",
            Self::Extras => "🎵 Extras",
            Self::Other(custom) if custom.trim().is_empty() => "Otro",
            Self::Other(custom) => custom.trim(),
        }
    }

    /// Returns the stable category id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Carne => "carne",
            Self::Bebidas => "bebidas",
            Self::Carbon => "carbon",
            Self::Hielo => "hielo",
            Self::Pan => "pan",
            Self::Cancha => "cancha",
            Self::Extras => "extras",
            Self::Other(custom) if custom.trim().is_empty() => "otro",
            Self::Other(custom) => custom.trim(),
        }
    }

    /// Folds custom text that names a built-in category into that category.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Other(custom) => Self::from(custom),
            builtin => builtin,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "carne" => Self::Carne,
            "bebidas" => Self::Bebidas,
            "carbon" | "carbón" => Self::Carbon,
            "hielo" => Self::Hielo,
            "pan" => Self::Pan,
            "cancha" => Self::Cancha,
            "extras" => Self::Extras,
            "otro" | "" => Self::Other(String::new()),
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.id().to_string()
    }
}

/// A recorded payment by one participant, divided equally among a set of
/// participants.
///
/// Fields are private so every `Expense` in existence satisfies
/// `amount > 0` and a non-empty, duplicate-free split set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    id: ExpenseId,
    payer: Participant,
    amount: Decimal,
    split_among: Vec<Participant>,
    category: Category,
}

impl Expense {
    /// Creates a validated expense.
    ///
    /// Repeated names in `split_among` are collapsed, keeping the first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::NonPositiveAmount` if `amount <= 0` and
    /// `SplitError::EmptySplit` if `split_among` is empty.
    pub fn new(
        payer: impl Into<Participant>,
        amount: Decimal,
        split_among: impl IntoIterator<Item = Participant>,
        category: Category,
    ) -> Result<Self, SplitError> {
        if amount <= Decimal::ZERO {
            return Err(SplitError::NonPositiveAmount(amount));
        }

        let mut seen = HashSet::new();
        let split_among: Vec<Participant> = split_among
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        if split_among.is_empty() {
            return Err(SplitError::EmptySplit);
        }

        Ok(Self {
            id: ExpenseId::new(),
            payer: payer.into(),
            amount,
            split_among,
            category: category.normalized(),
        })
    }

    /// Returns the expense id.
    #[must_use]
    pub const fn id(&self) -> ExpenseId {
        self.id
    }

    /// Returns who paid.
    #[must_use]
    pub const fn payer(&self) -> &Participant {
        &self.payer
    }

    /// Returns the amount paid.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the participants sharing the cost, in entry order.
    #[must_use]
    pub fn split_among(&self) -> &[Participant] {
        &self.split_among
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the exact per-person share (`amount / |split_among|`).
    #[must_use]
    pub fn share(&self) -> Decimal {
        self.amount / Decimal::from(self.split_among.len())
    }

    /// Returns true if `name` paid for or shares this expense.
    #[must_use]
    pub fn involves(&self, name: &str) -> bool {
        self.payer.as_str() == name || self.split_among.iter().any(|p| p.as_str() == name)
    }

    /// Returns true if the expense is split among every member of `roster`.
    #[must_use]
    pub fn is_split_among_everyone(&self, roster: &[Participant]) -> bool {
        self.split_among.len() == roster.len()
            && roster.iter().all(|p| self.split_among.contains(p))
    }

    /// Drops `name` from the split set. Returns false once nobody is left.
    pub(crate) fn drop_from_split(&mut self, name: &str) -> bool {
        self.split_among.retain(|p| p.as_str() != name);
        !self.split_among.is_empty()
    }
}

/// Who an expense is split among, as chosen on the expense form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitTarget {
    /// Everyone on the roster at the time the expense is added.
    Everyone,
    /// Only the listed participants.
    Only(Vec<Participant>),
}

/// Unvalidated expense input, as entered by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Who paid.
    pub payer: Participant,
    /// Amount paid.
    pub amount: Decimal,
    /// Who shares the cost.
    pub split: SplitTarget,
    /// What it was spent on.
    #[serde(default)]
    pub category: Category,
}

/// A participant's signed net balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    /// The participant.
    pub participant: Participant,
    /// Paid minus owed: positive means others owe them.
    pub balance: Decimal,
}

/// Net balances for a group, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances {
    entries: Vec<ParticipantBalance>,
}

impl Balances {
    pub(crate) fn from_entries(entries: Vec<ParticipantBalance>) -> Self {
        Self { entries }
    }

    /// Returns the balance of `name`, if it is part of the group.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.participant.as_str() == name)
            .map(|e| e.balance)
    }

    /// Iterates balances in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &ParticipantBalance> {
        self.entries.iter()
    }

    /// Number of participants with a balance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances; zero up to division residue.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.balance).sum()
    }

    /// Returns the balances left after every transfer is paid.
    ///
    /// The payer's balance rises by the amount and the payee's falls by it.
    #[must_use]
    pub fn after_transfers(&self, transactions: &[Transaction]) -> Self {
        let mut settled = self.clone();
        for tx in transactions {
            for entry in &mut settled.entries {
                if entry.participant == tx.from {
                    entry.balance += tx.amount;
                } else if entry.participant == tx.to {
                    entry.balance -= tx.amount;
                }
            }
        }
        settled
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = &'a ParticipantBalance;
    type IntoIter = std::slice::Iter<'a, ParticipantBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A settlement instruction: `from` pays `to` the given amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Who pays.
    pub from: Participant,
    /// Who receives.
    pub to: Participant,
    /// Amount, rounded by the settlement policy (whole pesos by default).
    pub amount: Decimal,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}
