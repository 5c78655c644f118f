//! Expense splitting and debt simplification.
//!
//! Pure calculators ([`compute_balances`], [`simplify_debts`],
//! [`SpendingSummary`]) plus the [`SplitSession`] that owns a group's
//! roster, expenses and payment aliases.

pub mod balance;
pub mod error;
pub mod session;
pub mod settlement;
pub mod share;
pub mod summary;
pub mod types;


pub use balance::compute_balances;
pub use error::SplitError;
pub use session::{MAX_ALIAS_LEN, SplitSession};
pub use settlement::{BalanceStatus, SettlementPlanner, SettlementPolicy, simplify_debts};
pub use share::{ShareContext, ShareTextRenderer, whatsapp_url};
pub use summary::{PersonSpending, SpendingSummary};
pub use types::{
    Balances, Category, Expense, ExpenseDraft, Participant, ParticipantBalance, SplitTarget,
    Transaction,
};
