//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        campaigns::MockCampaignsService,
        carts::MockCartsService,
        customers::{MockCustomersService, models::Customer},
        discounts::{DiscountStatus, DiscountTerms, SimpleDiscount},
        orders::{
            MockOrdersService,
            models::{Order, OrderItem},
        },
        payments::MockPaymentsService,
        products::{MockProductsService, models::Product},
        promotions::MockPromotionsService,
        returns::{
            MockReturnsService,
            models::{ReturnRequest, ReturnStatus},
        },
    },
};

use crate::state::State;

/// Context whose services reject every call; tests swap in the one they exercise.
pub(crate) fn app_context() -> AppContext {
    AppContext {
        customers: Arc::new(MockCustomersService::new()),
        products: Arc::new(MockProductsService::new()),
        carts: Arc::new(MockCartsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        promotions: Arc::new(MockPromotionsService::new()),
        campaigns: Arc::new(MockCampaignsService::new()),
        payments: Arc::new(MockPaymentsService::new()),
        returns: Arc::new(MockReturnsService::new()),
    }
}

pub(crate) fn make_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

pub(crate) fn make_customer(id: i64) -> Customer {
    Customer {
        id: id.into(),
        email: format!("customer{id}@example.com"),
        name: format!("Customer {id}"),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(id: i64) -> Product {
    Product {
        id: id.into(),
        category: "books".to_string(),
        price: 10_00,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(customer: i64, order: i64) -> Order {
    Order {
        id: order.into(),
        customer_id: customer.into(),
        items: vec![OrderItem {
            product_id: 1.into(),
            quantity: 2,
            unit_price: 10_00,
        }],
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_return(customer: i64, order: i64, status: ReturnStatus) -> ReturnRequest {
    ReturnRequest {
        customer_id: customer.into(),
        order_id: order.into(),
        reason: "damaged".to_string(),
        description: None,
        status,
        requested_at: Timestamp::UNIX_EPOCH,
        completed_at: None,
    }
}

pub(crate) fn make_terms() -> DiscountTerms {
    DiscountTerms {
        starts_at: Timestamp::UNIX_EPOCH,
        ends_at: Timestamp::MAX,
        usage_limit: Some(10),
        status: DiscountStatus::Active,
        discount: SimpleDiscount::PercentageOff { percentage: 10 },
    }
}
