//! Debt simplification: greedy largest-debtor-vs-largest-creditor matching.
//!
//! The algorithm works by:
//! 1. Computing net balances
//! 2. Splitting participants into debtors and creditors, ignoring balances
//!    within the tolerance
//! 3. Sorting both sides by amount, largest first (stable, so ties keep
//!    roster order)
//! 4. Walking both lists with two pointers, settling `min(debt, credit)` at
//!    each step
//!
//! Every step zeroes at least one side, so a group of `n` people never needs
//! more than `n - 1` transfers. The result is not a globally optimal plan
//! (that problem is NP-hard); it is the simple heuristic users expect.
//!
//! Whole-peso balances settle exactly. Otherwise each transfer carries up to
//! half a peso of rounding, and remainders below the tolerance are never
//! transferred. Those remainders can pool on a single unmatched participant,
//! so after the plan a participant in `t` transfers of an `n` person group
//! is within `0.5 * t + n * tolerance` of zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;
use yoanoto_shared::config::SettlementConfig;

use super::balance::compute_balances;
use super::types::{Balances, Expense, Participant, Transaction};

/// Tolerance and rounding applied when planning transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPolicy {
    /// Balances and transfers whose magnitude does not exceed this are ignored.
    pub tolerance: Decimal,
    /// Decimal places kept on emitted transfer amounts.
    pub decimal_places: u32,
}

impl SettlementPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(tolerance: Decimal, decimal_places: u32) -> Self {
        Self {
            tolerance,
            decimal_places,
        }
    }

    /// Rounds a transfer amount, half away from zero.
    #[must_use]
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Classifies a net balance against the tolerance.
    #[must_use]
    pub fn classify(&self, balance: Decimal) -> BalanceStatus {
        if balance > self.tolerance {
            BalanceStatus::Creditor
        } else if balance < -self.tolerance {
            BalanceStatus::Debtor
        } else {
            BalanceStatus::Settled
        }
    }

    /// Returns true once a remaining amount is small enough to move past.
    fn is_exhausted(&self, remaining: Decimal) -> bool {
        remaining < self.tolerance || remaining.is_zero()
    }
}

impl Default for SettlementPolicy {
    /// Half a peso of tolerance, whole-peso transfers.
    fn default() -> Self {
        Self::new(Decimal::new(5, 1), 0)
    }
}

impl From<&SettlementConfig> for SettlementPolicy {
    fn from(config: &SettlementConfig) -> Self {
        Self::new(config.tolerance, config.decimal_places)
    }
}

/// Where a participant stands once balances are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// Others owe this participant.
    Creditor,
    /// This participant owes others.
    Debtor,
    /// Within tolerance of zero.
    Settled,
}

/// One side of the matching: an outstanding amount, always positive.
#[derive(Debug)]
struct Position<'a> {
    participant: &'a Participant,
    amount: Decimal,
}

/// Plans the transfers that settle a group.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementPlanner {
    policy: SettlementPolicy,
}

impl SettlementPlanner {
    /// Creates a planner with the given policy.
    #[must_use]
    pub const fn new(policy: SettlementPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &SettlementPolicy {
        &self.policy
    }

    /// Computes balances and plans the transfers that settle them.
    #[must_use]
    pub fn simplify(&self, participants: &[Participant], expenses: &[Expense]) -> Vec<Transaction> {
        self.plan(&compute_balances(participants, expenses))
    }

    /// Plans transfers for already computed balances.
    #[must_use]
    pub fn plan(&self, balances: &Balances) -> Vec<Transaction> {
        let tolerance = self.policy.tolerance;

        let mut debtors = Vec::new();
        let mut creditors = Vec::new();
        for entry in balances {
            match self.policy.classify(entry.balance) {
                BalanceStatus::Creditor => creditors.push(Position {
                    participant: &entry.participant,
                    amount: entry.balance,
                }),
                BalanceStatus::Debtor => debtors.push(Position {
                    participant: &entry.participant,
                    amount: -entry.balance,
                }),
                BalanceStatus::Settled => {}
            }
        }

        // sort_by is stable: equal amounts keep roster order
        debtors.sort_by(|a, b| b.amount.cmp(&a.amount));
        creditors.sort_by(|a, b| b.amount.cmp(&a.amount));

        let mut transactions = Vec::with_capacity(debtors.len().max(creditors.len()));
        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];
            let settle = debtor.amount.min(creditor.amount);

            if settle > tolerance {
                let amount = self.policy.round(settle);
                if amount > Decimal::ZERO {
                    transactions.push(Transaction {
                        from: debtor.participant.clone(),
                        to: creditor.participant.clone(),
                        amount,
                    });
                }
            }

            debtor.amount -= settle;
            creditor.amount -= settle;

            if self.policy.is_exhausted(debtor.amount) {
                i += 1;
            }
            if self.policy.is_exhausted(creditor.amount) {
                j += 1;
            }
        }

        debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = transactions.len(),
            "settlement planned"
        );

        transactions
    }
}

/// Settles a group with the default policy (0.5 tolerance, whole pesos).
///
/// ```
/// use rust_decimal_macros::dec;
/// use yoanoto_core::split::{Category, Expense, Participant, simplify_debts};
///
/// let group: Vec<Participant> = ["A", "B", "C"].into_iter().map(Participant::from).collect();
/// let dinner = Expense::new("A", dec!(300), group.clone(), Category::Carne).unwrap();
///
/// let plan = simplify_debts(&group, &[dinner]);
/// assert_eq!(plan.len(), 2);
/// assert!(plan.iter().all(|tx| tx.to.as_str() == "A" && tx.amount == dec!(100)));
/// ```
#[must_use]
pub fn simplify_debts(participants: &[Participant], expenses: &[Expense]) -> Vec<Transaction> {
    SettlementPlanner::default().simplify(participants, expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::types::{Category, ParticipantBalance};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn roster(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|n| Participant::from(*n)).collect()
    }

    fn expense(payer: &str, amount: Decimal, split: &[&str]) -> Expense {
        Expense::new(payer, amount, roster(split), Category::default()).unwrap()
    }

    fn balances(entries: &[(&str, Decimal)]) -> Balances {
        Balances::from_entries(
            entries
                .iter()
                .map(|(name, balance)| ParticipantBalance {
                    participant: Participant::from(*name),
                    balance: *balance,
                })
                .collect(),
        )
    }

    fn triples(plan: &[Transaction]) -> Vec<(&str, &str, Decimal)> {
        plan.iter()
            .map(|tx| (tx.from.as_str(), tx.to.as_str(), tx.amount))
            .collect()
    }

    #[test]
    fn test_one_payer_three_way_split() {
        let participants = roster(&["A", "B", "C"]);
        let plan = simplify_debts(&participants, &[expense("A", dec!(300), &["A", "B", "C"])]);

        assert_eq!(
            triples(&plan),
            vec![("B", "A", dec!(100)), ("C", "A", dec!(100))]
        );
    }

    #[test]
    fn test_mutual_payments_cancel_out() {
        let participants = roster(&["A", "B"]);
        let expenses = [
            expense("A", dec!(100), &["A", "B"]),
            expense("B", dec!(100), &["A", "B"]),
        ];
        assert!(simplify_debts(&participants, &expenses).is_empty());
    }

    #[test]
    fn test_no_expenses_no_transfers() {
        assert!(simplify_debts(&roster(&["A", "B", "C"]), &[]).is_empty());
        assert!(simplify_debts(&[], &[]).is_empty());
        assert!(simplify_debts(&roster(&["Solo"]), &[]).is_empty());
    }

    #[rstest]
    #[case::largest_debtor_first(
        &[("A", dec!(-30)), ("B", dec!(-70)), ("C", dec!(100))],
        vec![("B", "C", dec!(70)), ("A", "C", dec!(30))]
    )]
    #[case::debtor_spans_two_creditors(
        &[("A", dec!(60)), ("B", dec!(40)), ("C", dec!(-100))],
        vec![("C", "A", dec!(60)), ("C", "B", dec!(40))]
    )]
    #[case::ties_keep_roster_order(
        &[("X", dec!(-50)), ("Y", dec!(-50)), ("Z", dec!(100))],
        vec![("X", "Z", dec!(50)), ("Y", "Z", dec!(50))]
    )]
    #[case::within_tolerance_ignored(
        &[("A", dec!(0.4)), ("B", dec!(-0.4))],
        vec![]
    )]
    #[case::half_exactly_is_settled(
        &[("A", dec!(0.5)), ("B", dec!(-0.5))],
        vec![]
    )]
    #[case::amounts_round_half_up(
        &[("A", dec!(10.5)), ("B", dec!(-10.5))],
        vec![("B", "A", dec!(11))]
    )]
    #[case::amounts_round_down(
        &[("A", dec!(33.33)), ("B", dec!(-33.33))],
        vec![("B", "A", dec!(33))]
    )]
    fn test_plan_from_balances(
        #[case] entries: &[(&str, Decimal)],
        #[case] expected: Vec<(&str, &str, Decimal)>,
    ) {
        let plan = SettlementPlanner::default().plan(&balances(entries));
        assert_eq!(triples(&plan), expected);
    }

    #[test]
    fn test_residual_below_tolerance_is_dropped() {
        // 100 / 3 leaves each debtor at 33.33..., and the creditor at 66.66...
        let participants = roster(&["A", "B", "C"]);
        let plan = simplify_debts(&participants, &[expense("A", dec!(100), &["A", "B", "C"])]);

        assert_eq!(
            triples(&plan),
            vec![("B", "A", dec!(33)), ("C", "A", dec!(33))]
        );
    }

    #[test]
    fn test_rounding_residue_stays_with_creditor() {
        let participants = roster(&["A", "B", "C"]);
        let expenses = [expense("A", dec!(100), &["A", "B", "C"])];
        let balances = compute_balances(&participants, &expenses);
        let left = balances.after_transfers(&simplify_debts(&participants, &expenses));

        // each 33.33... debt is paid as 33, so A keeps two thirds unpaid
        assert_eq!(left.get("A").unwrap().round_dp(4), dec!(0.6667));
        assert_eq!(left.get("B").unwrap().round_dp(4), dec!(-0.3333));
        assert_eq!(left.get("C").unwrap().round_dp(4), dec!(-0.3333));
        assert!(left.total().abs() < dec!(0.000001));
    }

    #[test]
    fn test_sub_tolerance_leftovers_pool_on_unmatched_debtor() {
        let balances = balances(&[
            ("D1", dec!(-10)),
            ("D2", dec!(-10)),
            ("D3", dec!(-0.8)),
            ("A", dec!(10.4)),
            ("B", dec!(10.4)),
        ]);
        let plan = SettlementPlanner::default().plan(&balances);

        assert_eq!(
            triples(&plan),
            vec![("D1", "A", dec!(10)), ("D2", "B", dec!(10))]
        );
        // A and B stop at 0.4 each, below the tolerance; D3 is never matched
        let left = balances.after_transfers(&plan);
        assert_eq!(left.get("D3"), Some(dec!(-0.8)));
        assert_eq!(left.get("A"), Some(dec!(0.4)));
    }

    #[test]
    fn test_zero_tolerance_still_terminates() {
        let planner = SettlementPlanner::new(SettlementPolicy::new(Decimal::ZERO, 2));
        let participants = roster(&["A", "B", "C"]);
        let plan = planner.simplify(&participants, &[expense("A", dec!(100), &["A", "B", "C"])]);

        assert_eq!(
            triples(&plan),
            vec![("B", "A", dec!(33.33)), ("C", "A", dec!(33.33))]
        );
    }

    #[test]
    fn test_policy_from_config() {
        let config = SettlementConfig {
            tolerance: dec!(0.01),
            decimal_places: 2,
        };
        let policy = SettlementPolicy::from(&config);
        assert_eq!(policy, SettlementPolicy::new(dec!(0.01), 2));
        assert_eq!(policy.round(dec!(1.005)), dec!(1.01));
    }

    #[test]
    fn test_classify() {
        let policy = SettlementPolicy::default();
        assert_eq!(policy.classify(dec!(0.51)), BalanceStatus::Creditor);
        assert_eq!(policy.classify(dec!(-0.51)), BalanceStatus::Debtor);
        assert_eq!(policy.classify(dec!(0.5)), BalanceStatus::Settled);
        assert_eq!(policy.classify(dec!(-0.5)), BalanceStatus::Settled);
        assert_eq!(policy.classify(dec!(0)), BalanceStatus::Settled);
    }
}
