//! Commission calculation.
//!
//! An engineer earns a fixed share of the service charge on every bill attributed to them.
//! Commission is rounded to the paisa per bill, so the per-bill figures shown in a history
//! always add up to the totals.

use crate::{core::money, entities::bill};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Share of the service charge owed to the engineer
pub const COMMISSION_RATE: Decimal = dec!(0.25);

/// Commission on a service charge: `charge × 0.25`, rounded half away from zero to 2 places.
#[must_use]
pub fn commission_for(charge: Decimal) -> Decimal {
    (charge * COMMISSION_RATE)
        .round_dp_with_strategy(money::MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Commission earned on a stored bill.
#[must_use]
pub fn bill_commission(bill: &bill::Model) -> Decimal {
    commission_for(money::from_minor(bill.service_charge_minor))
}
