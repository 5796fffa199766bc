//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{cart::CartItem, catalog::Catalog, catalog::Monument};

/// Regional sales tax, as a fraction of the subtotal (8.75%).
const TAX_RATE_TEN_THOUSANDTHS: i64 = 875;

/// Errors raised while computing prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A computed amount does not fit in minor units.
    #[error("price calculation overflowed")]
    Overflow,
}

/// The fixed tax rate applied to every order.
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(TAX_RATE_TEN_THOUSANDTHS, 4))
}

/// Suggested retail price for a wholesale base and markup multiplier.
///
/// The product is rounded to whole cents, midpoint away from zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the price cannot be represented in cents.
pub fn msrp(wholesale: Decimal, markup: Decimal) -> Result<Money<'static, Currency>, PricingError> {
    let retail = wholesale
        .checked_mul(markup)
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(major_to_minor(retail)?, iso::USD))
}

/// Format a price for display, e.g. `$25.99`.
pub fn format_price(price: &Money<'_, Currency>) -> String {
    price.to_string()
}

/// A cart item joined with its catalog record and computed prices.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// The originating cart entry
    pub item: CartItem,

    /// Resolved catalog record
    pub monument: Monument,

    /// Price of a single piece
    pub unit_price: Money<'static, Currency>,

    /// `unit_price × quantity`
    pub total_price: Money<'static, Currency>,
}

impl LineItem {
    /// Price a cart item against its catalog record.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line total cannot be represented.
    pub fn new(
        item: CartItem,
        monument: Monument,
        wholesale: Decimal,
    ) -> Result<Self, PricingError> {
        let unit_price = msrp(wholesale, monument.markup_std)?;

        let total_minor = unit_price
            .to_minor_units()
            .checked_mul(i64::from(item.quantity))
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            item,
            monument,
            unit_price,
            total_price: Money::from_minor(total_minor, iso::USD),
        })
    }
}

/// Price every cart item that resolves against the catalog.
///
/// Items whose monument is not in the catalog are skipped.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any line total cannot be represented.
pub fn line_items(
    items: &[CartItem],
    catalog: &Catalog,
    wholesale: Decimal,
) -> Result<Vec<LineItem>, PricingError> {
    items
        .iter()
        .filter_map(|item| {
            catalog
                .find(&item.id)
                .map(|monument| LineItem::new(item.clone(), monument.clone(), wholesale))
        })
        .collect()
}

/// Order-level totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    /// Sum of line totals
    pub subtotal: Money<'static, Currency>,

    /// `subtotal × tax rate`, rounded to cents
    pub tax: Money<'static, Currency>,

    /// Always free
    pub shipping: Money<'static, Currency>,

    /// `subtotal + tax + shipping`
    pub total: Money<'static, Currency>,
}

impl OrderTotals {
    /// Compute totals for the given line items.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Money`]: money arithmetic or currency mismatch error.
    /// - [`PricingError::Overflow`]: the tax amount cannot be represented.
    pub fn from_line_items(line_items: &[LineItem]) -> Result<Self, PricingError> {
        let zero = Money::from_minor(0, iso::USD);

        let subtotal = line_items
            .iter()
            .try_fold(zero, |acc, line| acc.add(line.total_price))?;

        let tax_cents = tax_rate() * Decimal::from(subtotal.to_minor_units());
        let tax = Money::from_minor(round_cents(tax_cents)?, iso::USD);

        let shipping = zero;
        let total = subtotal.add(tax)?.add(shipping)?;

        Ok(Self {
            subtotal,
            tax,
            shipping,
            total,
        })
    }

    /// Grand total in integer cents, as submitted at checkout.
    pub fn amount_cents(&self) -> i64 {
        self.total.to_minor_units()
    }
}

/// Priced line items and their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Resolved, priced lines
    pub line_items: Vec<LineItem>,

    /// Totals over `line_items`
    pub totals: OrderTotals,
}

impl OrderSummary {
    /// Price a cart against the catalog for one wholesale base.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any amount cannot be computed.
    pub fn compute(
        items: &[CartItem],
        catalog: &Catalog,
        wholesale: Decimal,
    ) -> Result<Self, PricingError> {
        let line_items = line_items(items, catalog, wholesale)?;
        let totals = OrderTotals::from_line_items(&line_items)?;

        Ok(Self { line_items, totals })
    }
}

fn major_to_minor(major: Decimal) -> Result<i64, PricingError> {
    let cents = major
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(PricingError::Overflow)?;

    round_cents(cents)
}

fn round_cents(cents: Decimal) -> Result<i64, PricingError> {
    cents
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::Overflow)
}
