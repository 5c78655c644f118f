//! Net balance calculation.
//!
//! `balance(p) = Σ paid by p − Σ share of p`, computed with exact decimal
//! division. Rounding is left to the settlement planner and presentation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use super::types::{Balances, Expense, Participant, ParticipantBalance};

/// Computes every participant's net balance from the expense list.
///
/// All roster members appear in the result, in roster order, even those
/// without expenses. A payer who is also a splitter both pays the full
/// amount and owes their own share.
///
/// Expenses naming someone outside `participants` are a caller error; the
/// unknown name is appended after the roster so the total still nets to zero.
#[must_use]
pub fn compute_balances(participants: &[Participant], expenses: &[Expense]) -> Balances {
    let mut ledger = BalanceLedger::with_roster(participants);

    for expense in expenses {
        *ledger.slot(expense.payer()) += expense.amount();

        let share = expense.share();
        for member in expense.split_among() {
            *ledger.slot(member) -= share;
        }
    }

    ledger.into_balances()
}

/// Ordered accumulator keyed by participant name.
struct BalanceLedger<'a> {
    entries: Vec<(&'a Participant, Decimal)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> BalanceLedger<'a> {
    fn with_roster(participants: &'a [Participant]) -> Self {
        let mut ledger = Self {
            entries: Vec::with_capacity(participants.len()),
            index: HashMap::with_capacity(participants.len()),
        };
        for participant in participants {
            if ledger.index.contains_key(participant.as_str()) {
                warn!(participant = %participant, "duplicate participant in roster, ignoring");
                continue;
            }
            ledger.push(participant);
        }
        ledger
    }

    fn push(&mut self, participant: &'a Participant) -> usize {
        let idx = self.entries.len();
        self.entries.push((participant, Decimal::ZERO));
        self.index.insert(participant.as_str(), idx);
        idx
    }

    fn slot(&mut self, participant: &'a Participant) -> &mut Decimal {
        let idx = match self.index.get(participant.as_str()) {
            Some(&idx) => idx,
            None => {
                warn!(
                    participant = %participant,
                    "expense references participant outside the roster"
                );
                self.push(participant)
            }
        };
        &mut self.entries[idx].1
    }

    fn into_balances(self) -> Balances {
        Balances::from_entries(
            self.entries
                .into_iter()
                .map(|(participant, balance)| ParticipantBalance {
                    participant: participant.clone(),
                    balance,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::types::Category;
    use rust_decimal_macros::dec;

    fn roster(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|n| Participant::from(*n)).collect()
    }

    fn expense(payer: &str, amount: Decimal, split: &[&str]) -> Expense {
        Expense::new(payer, amount, roster(split), Category::default()).unwrap()
    }

    #[test]
    fn test_no_expenses_everyone_at_zero() {
        let participants = roster(&["Ana", "Beto"]);
        let balances = compute_balances(&participants, &[]);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances.get("Ana"), Some(dec!(0)));
        assert_eq!(balances.get("Beto"), Some(dec!(0)));
    }

    #[test]
    fn test_payer_inside_split_owes_own_share() {
        let participants = roster(&["A", "B", "C"]);
        let expenses = [expense("A", dec!(300), &["A", "B", "C"])];
        let balances = compute_balances(&participants, &expenses);

        assert_eq!(balances.get("A"), Some(dec!(200)));
        assert_eq!(balances.get("B"), Some(dec!(-100)));
        assert_eq!(balances.get("C"), Some(dec!(-100)));
        assert_eq!(balances.total(), dec!(0));
    }

    #[test]
    fn test_payer_outside_split_is_owed_everything() {
        let participants = roster(&["A", "B", "C"]);
        let expenses = [expense("A", dec!(90), &["B", "C"])];
        let balances = compute_balances(&participants, &expenses);

        assert_eq!(balances.get("A"), Some(dec!(90)));
        assert_eq!(balances.get("B"), Some(dec!(-45)));
        assert_eq!(balances.get("C"), Some(dec!(-45)));
    }

    #[test]
    fn test_balances_keep_roster_order() {
        let participants = roster(&["Zoe", "Ana", "Mia"]);
        let expenses = [expense("Mia", dec!(30), &["Zoe", "Ana", "Mia"])];
        let balances = compute_balances(&participants, &expenses);
        let order: Vec<&str> = balances.iter().map(|e| e.participant.as_str()).collect();

        assert_eq!(order, vec!["Zoe", "Ana", "Mia"]);
    }

    #[test]
    fn test_thirds_net_to_zero_within_division_residue() {
        let participants = roster(&["A", "B", "C"]);
        let expenses = [expense("A", dec!(100), &["A", "B", "C"])];
        let balances = compute_balances(&participants, &expenses);

        assert!(balances.total().abs() < dec!(0.000000001));
        assert_eq!(balances.get("A").unwrap().round_dp(2), dec!(66.67));
    }

    #[test]
    fn test_unknown_participant_is_appended() {
        let participants = roster(&["A"]);
        let expenses = [expense("A", dec!(50), &["A", "Ghost"])];
        let balances = compute_balances(&participants, &expenses);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances.get("Ghost"), Some(dec!(-25)));
        assert_eq!(balances.total(), dec!(0));
    }

    #[test]
    fn test_duplicate_roster_entries_are_counted_once() {
        let participants = roster(&["A", "B", "A"]);
        let expenses = [expense("A", dec!(20), &["A", "B"])];
        let balances = compute_balances(&participants, &expenses);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances.get("A"), Some(dec!(10)));
    }
}
