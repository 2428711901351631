//! Cart pricing: catalog lookups followed by both discount stages.

use std::collections::BTreeMap;

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::domain::{
    campaigns::{models::Campaign, repository::SqliteCampaignsRepository},
    carts::repository::SqliteCartItemsRepository,
    customers::{models::CustomerId, repository::SqliteCustomersRepository},
    discounts::{CampaignAccumulation, PricedLine, PromotionOutcome, apply_campaigns, apply_promotion},
    orders::errors::AssemblyError,
    payments::models::CheckoutQuote,
    products::repository::SqliteProductsRepository,
    promotions::repository::SqlitePromotionCodesRepository,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct CartPricer {
    customers: SqliteCustomersRepository,
    products: SqliteProductsRepository,
    cart_items: SqliteCartItemsRepository,
    campaigns: SqliteCampaignsRepository,
    promotions: SqlitePromotionCodesRepository,
}

impl CartPricer {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Price the customer's cart as it stands in `tx`.
    ///
    /// Discount sources that are missing or ineligible only reduce the
    /// discount; they never fail the quote.
    pub(crate) async fn quote(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        promotion_code: Option<&str>,
        accumulation: CampaignAccumulation,
        now: Timestamp,
    ) -> Result<CheckoutQuote, AssemblyError> {
        self.customers
            .find_customer(tx, customer)
            .await?
            .ok_or(AssemblyError::CustomerNotFound(customer))?;

        let cart = self.cart_items.get_cart_items(tx, customer).await?;

        if cart.is_empty() {
            return Err(AssemblyError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(cart.len());
        let mut categories = FxHashSet::default();
        let mut subtotal = 0_u64;

        for item in cart {
            let product = self
                .products
                .find_product(tx, item.product_id)
                .await?
                .ok_or(AssemblyError::ProductNotFound(item.product_id))?;

            subtotal = product
                .price
                .checked_mul(item.quantity)
                .and_then(|line| subtotal.checked_add(line))
                .ok_or(AssemblyError::AmountOverflow)?;

            categories.insert(product.category.clone());

            lines.push(PricedLine {
                product_id: product.id,
                category: product.category,
                unit_price: product.price,
                quantity: item.quantity,
            });
        }

        let mut matching: BTreeMap<String, Campaign> = BTreeMap::new();

        for category in &categories {
            for campaign in self.campaigns.list_campaigns_for_category(tx, category).await? {
                matching.entry(campaign.name.clone()).or_insert(campaign);
            }
        }

        let campaigns: Vec<Campaign> = matching.into_values().collect();
        let stage = apply_campaigns(&lines, &campaigns, accumulation, now);

        let promotion = match promotion_code {
            Some(code) => {
                let stored = self.promotions.find_promotion_code(tx, code).await?;
                let outcome = apply_promotion(code, stored.as_ref(), stage.total, now);

                if let PromotionOutcome::NotApplicable { code, reason } = &outcome {
                    info!(customer_id = %customer, code, %reason, "promotion code not applied");
                }

                Some(outcome)
            }
            None => None,
        };

        let total = promotion
            .as_ref()
            .map_or(stage.total, |outcome| outcome.final_amount(stage.total));

        Ok(CheckoutQuote {
            lines,
            campaigns: stage,
            promotion,
            total,
        })
    }
}
