//! Prize allocator.
//!
//! Ranks gamblers by total points and pays the top three distinct totals
//! 50% / 30% / 20% of the pot. Gamblers sharing a total split that tier's
//! share equally, floored to whole cents. Whatever the floor leaves over,
//! and the share of any tier that does not exist, is not paid out.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::info;

use crate::config::PoolConfig;
use crate::types::Gambler;

/// Share of the pot per tier, best total first.
pub const TIER_SHARES: [Decimal; 3] = [dec!(0.5), dec!(0.3), dec!(0.2)];

/// What one tier paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPayout {
    /// 1-based tier number.
    pub tier: usize,
    pub score: u32,
    pub winners: Vec<String>,
    /// Nominal share of the pot for this tier.
    pub tier_amount: Decimal,
    /// Amount each winner receives.
    pub per_winner: Decimal,
}

impl TierPayout {
    pub fn paid_out(&self) -> Decimal {
        self.per_winner * Decimal::from(self.winners.len())
    }
}

/// Currency formatting for payouts.
#[derive(Debug, Clone)]
pub struct PrizeAllocator {
    currency_symbol: String,
    decimal_separator: String,
}

impl Default for PrizeAllocator {
    fn default() -> Self {
        Self::new("€", ",")
    }
}

impl PrizeAllocator {
    pub fn new(currency_symbol: impl Into<String>, decimal_separator: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            decimal_separator: decimal_separator.into(),
        }
    }

    pub fn from_config(cfg: &PoolConfig) -> Self {
        Self::new(cfg.currency_symbol.clone(), cfg.decimal_separator.clone())
    }

    /// "€ 45,00"
    pub fn format_amount(&self, amount: Decimal) -> String {
        let amount = format!("{:.2}", amount).replace('.', &self.decimal_separator);
        format!("{} {}", self.currency_symbol, amount)
    }

    /// Sort gamblers into the published ranking and set every `prize_amount`.
    ///
    /// The sort is stable, so gamblers with equal totals keep their input order.
    pub fn allocate(&self, pot: Decimal, gamblers: &mut [Gambler]) -> Vec<TierPayout> {
        gamblers.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        for gambler in gamblers.iter_mut() {
            gambler.prize_amount = Some(String::new());
        }

        let mut scores: Vec<u32> = gamblers.iter().map(|g| g.total_points).collect();
        scores.dedup();

        let mut payouts = Vec::with_capacity(TIER_SHARES.len());
        for (i, (&score, share)) in scores.iter().zip(TIER_SHARES).enumerate() {
            let tier_amount = pot * share;
            let winners: Vec<&mut Gambler> = gamblers
                .iter_mut()
                .filter(|g| g.total_points == score)
                .collect();
            let per_winner = (tier_amount / Decimal::from(winners.len()))
                .round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity);
            let formatted = self.format_amount(per_winner);

            let mut names = Vec::with_capacity(winners.len());
            for winner in winners {
                winner.prize_amount = Some(formatted.clone());
                names.push(winner.name.clone());
            }

            info!(
                tier = i + 1,
                score,
                winners = names.len(),
                each = %formatted,
                "Prize tier allocated"
            );

            payouts.push(TierPayout {
                tier: i + 1,
                score,
                winners: names,
                tier_amount,
                per_winner,
            });
        }

        payouts
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
