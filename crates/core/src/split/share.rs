//! Shareable plain-text summary for messaging apps.
//!
//! The text uses WhatsApp markup (`*bold*`, `_italic_`).

use std::collections::HashMap;
use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use yoanoto_shared::types::format_pesos;

use super::types::{Expense, Participant, Transaction};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";
const APP_URL: &str = "https://yoanoto.vercel.app";
const WHATSAPP_SHARE_URL: &str = "https://wa.me/?text=";

/// Everything the share text is built from.
#[derive(Debug, Clone, Copy)]
pub struct ShareContext<'a> {
    /// Group roster.
    pub participants: &'a [Participant],
    /// Recorded expenses.
    pub expenses: &'a [Expense],
    /// Settlement plan.
    pub transactions: &'a [Transaction],
    /// Payment aliases by participant.
    pub aliases: &'a HashMap<Participant, String>,
}

/// Renders the group summary as shareable text.
pub struct ShareTextRenderer;

impl ShareTextRenderer {
    /// Renders the full summary: expenses, total, and who pays whom.
    #[must_use]
    pub fn render(ctx: &ShareContext<'_>) -> String {
        let mut text = String::new();
        Self::write_header(&mut text);
        Self::write_expenses(&mut text, ctx);
        Self::write_total(&mut text, ctx);
        Self::write_transfers(&mut text, ctx);
        Self::write_footer(&mut text);
        text
    }

    fn write_header(text: &mut String) {
        let _ = writeln!(text, "{RULE}");
        let _ = writeln!(text, "💰 *YoAnoto - DIVISIÓN DE GASTOS* 💰");
        let _ = writeln!(text, "{RULE}");
        text.push('\n');
    }

    fn write_expenses(text: &mut String, ctx: &ShareContext<'_>) {
        let _ = writeln!(text, "📋 *DETALLE DE GASTOS:*");
        text.push('\n');
        for expense in ctx.expenses {
            let split_names = if expense.is_split_among_everyone(ctx.participants) {
                "Entre todos".to_string()
            } else {
                expense
                    .split_among()
                    .iter()
                    .map(Participant::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let _ = writeln!(text, "  {}", expense.category().label());
            let _ = writeln!(
                text,
                "  💲 *${}* — Pagó *{}*",
                format_pesos(expense.amount()),
                expense.payer().as_str().to_uppercase()
            );
            let _ = writeln!(
                text,
                "  👥 {split_names} (${} c/u)",
                format_pesos(whole(expense.share()))
            );
            text.push('\n');
        }
    }

    fn write_total(text: &mut String, ctx: &ShareContext<'_>) {
        let total: Decimal = ctx.expenses.iter().map(Expense::amount).sum();
        let _ = writeln!(text, "{RULE}");
        let _ = writeln!(text, "💵 *TOTAL: ${}*", format_pesos(total));
        let _ = writeln!(text, "👥 {} personas", ctx.participants.len());
        let _ = writeln!(text, "{RULE}");
        text.push('\n');
    }

    fn write_transfers(text: &mut String, ctx: &ShareContext<'_>) {
        let _ = writeln!(text, "🔄 *QUIÉN LE PAGA A QUIÉN:*");
        text.push('\n');
        if ctx.transactions.is_empty() {
            let _ = writeln!(text, "  ✅ ¡Están todos al día!");
            return;
        }
        for tx in ctx.transactions {
            let _ = writeln!(text, "  💸 *{}*", tx.from.as_str().to_uppercase());
            let _ = writeln!(text, "      ➡️  le paga a  ➡️");
            let _ = writeln!(text, "  🏦 *{}*", tx.to.as_str().to_uppercase());
            let _ = writeln!(text, "      💲 *${}*", format_pesos(tx.amount));
            if let Some(alias) = ctx.aliases.get(&tx.to) {
                let _ = writeln!(text, "      📲 Alias: *{alias}*");
            }
            text.push('\n');
        }
    }

    fn write_footer(text: &mut String) {
        let _ = writeln!(text, "{RULE}");
        let _ = writeln!(text, "_Hecho con YoAnoto_ 🃏");
        let _ = writeln!(text, "👉 {APP_URL}");
        text.push_str(RULE);
    }
}

fn whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Builds a WhatsApp "share" link carrying `text`.
#[must_use]
pub fn whatsapp_url(text: &str) -> String {
    format!("{WHATSAPP_SHARE_URL}{}", urlencoding::encode(text))
}
