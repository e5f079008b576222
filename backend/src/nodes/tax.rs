//! Tax node: once-a-year progressive income tax

use crate::dag::{ExecutionContext, FinancialNode};
use crate::models::transaction::category;
use crate::models::wallet::WalletState;
use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One progressive tax bracket: `[lower, upper)` taxed at `rate`. `upper`
/// of `None` means unbounded (the top bracket).
#[derive(Debug, Clone, Copy)]
pub struct TaxBracket {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn new(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> Self {
        Self { lower, upper, rate }
    }
}

/// US-style default brackets, used as a literal test anchor rather than a
/// maintained tax table.
pub fn default_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(0.10)),
        TaxBracket::new(dec!(10000), Some(dec!(40000)), dec!(0.12)),
        TaxBracket::new(dec!(40000), Some(dec!(85000)), dec!(0.22)),
        TaxBracket::new(dec!(85000), Some(dec!(160000)), dec!(0.24)),
        TaxBracket::new(dec!(160000), None, dec!(0.32)),
    ]
}

/// Walks `tax_brackets` in order once a year, computing progressive tax on
/// `state.total_income_ytd`.
///
/// Not implemented here: the source's `CapitalGainsTaxNode`, a documented
/// no-op placeholder with no behavior of its own ("handled primarily by
/// IncomeTaxNode in practice").
#[derive(Clone)]
pub struct IncomeTaxNode {
    id: String,
    deps: Vec<String>,
    tax_brackets: Vec<TaxBracket>,
    payment_month: u32,
    payment_day: u32,
    last_payment_year: Option<i32>,
}

impl IncomeTaxNode {
    pub fn new(id: impl Into<String>, tax_brackets: Vec<TaxBracket>) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            tax_brackets,
            payment_month: 12,
            payment_day: 31,
            last_payment_year: None,
        }
    }

    pub fn with_payment_date(mut self, month: u32, day: u32) -> Self {
        self.payment_month = month;
        self.payment_day = day;
        self
    }

    fn progressive_tax(&self, income: Decimal) -> Decimal {
        let mut remaining = income;
        let mut tax = Decimal::ZERO;

        for bracket in &self.tax_brackets {
            if remaining <= Decimal::ZERO {
                break;
            }
            let span = match bracket.upper {
                Some(upper) => upper - bracket.lower,
                None => remaining,
            };
            let taxed_in_bracket = remaining.min(span);
            tax += taxed_in_bracket * bracket.rate;
            remaining -= taxed_in_bracket;
        }

        tax
    }
}

impl FinancialNode for IncomeTaxNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal {
        let date = ctx.current_date;
        if date.month() != self.payment_month || date.day() != self.payment_day || self.last_payment_year == Some(date.year()) {
            return Decimal::ZERO;
        }
        self.last_payment_year = Some(date.year());

        let tax = self.progressive_tax(state.total_income_ytd);
        if tax == Decimal::ZERO {
            return Decimal::ZERO;
        }

        let debit = -tax;
        state.apply_transaction(debit, "annual income tax", category::TAX_INCOME);
        state.taxes_paid_ytd += tax;
        debit
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}
