//! Per-person spending breakdown.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use yoanoto_shared::types::format_pesos;

use super::settlement::{BalanceStatus, SettlementPolicy};
use super::types::{Expense, Participant};

/// What one participant paid and what their fair share was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSpending {
    /// The participant.
    pub participant: Participant,
    /// Total paid out of pocket.
    pub paid: Decimal,
    /// Sum of shares owed across expenses.
    pub owes: Decimal,
    /// `paid - owes`.
    pub net: Decimal,
    /// Standing against the settlement tolerance.
    pub status: BalanceStatus,
}

impl PersonSpending {
    /// Short status line in the group's language, e.g. `Debe $1.500`.
    #[must_use]
    pub fn status_label(&self) -> String {
        match self.status {
            BalanceStatus::Creditor => format!("Le deben ${}", format_pesos(whole(self.net))),
            BalanceStatus::Debtor => format!("Debe ${}", format_pesos(whole(-self.net))),
            BalanceStatus::Settled => "Al día ✓".to_string(),
        }
    }
}

fn whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Group spending totals and the per-person breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingSummary {
    /// Sum of every expense.
    pub total: Decimal,
    /// One row per participant, roster order.
    pub people: Vec<PersonSpending>,
}

impl SpendingSummary {
    /// Builds the summary for a roster and its expenses.
    ///
    /// Expenses naming people outside the roster only count towards `total`.
    #[must_use]
    pub fn compute(
        participants: &[Participant],
        expenses: &[Expense],
        policy: &SettlementPolicy,
    ) -> Self {
        let people = participants
            .iter()
            .map(|participant| {
                let paid: Decimal = expenses
                    .iter()
                    .filter(|e| e.payer() == participant)
                    .map(Expense::amount)
                    .sum();
                let owes: Decimal = expenses
                    .iter()
                    .filter(|e| e.split_among().contains(participant))
                    .map(Expense::share)
                    .sum();
                let net = paid - owes;
                PersonSpending {
                    participant: participant.clone(),
                    paid,
                    owes,
                    net,
                    status: policy.classify(net),
                }
            })
            .collect();

        Self {
            total: expenses.iter().map(Expense::amount).sum(),
            people,
        }
    }

    /// Returns the row for `name`.
    #[must_use]
    pub fn person(&self, name: &str) -> Option<&PersonSpending> {
        self.people.iter().find(|p| p.participant.as_str() == name)
    }
}
