//! App Router

use salvo::Router;

use crate::{campaigns, carts, customers, orders, payments, products, promotions, returns};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(customer_routes())
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler),
                ),
        )
        .push(
            Router::with_path("promotion-codes")
                .get(promotions::index::handler)
                .delete(promotions::clear::handler)
                .push(
                    Router::with_path("{code}")
                        .get(promotions::get::handler)
                        .put(promotions::upsert::handler)
                        .delete(promotions::delete::handler),
                ),
        )
        .push(
            Router::with_path("campaigns")
                .get(campaigns::index::handler)
                .delete(campaigns::clear::handler)
                .push(
                    Router::with_path("{name}")
                        .get(campaigns::get::handler)
                        .put(campaigns::upsert::handler)
                        .delete(campaigns::delete::handler),
                ),
        )
}

fn customer_routes() -> Router {
    Router::with_path("customers")
        .post(customers::create::handler)
        .push(
            Router::with_path("{customer}")
                .get(customers::get::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .get(carts::items::get::handler)
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .delete(orders::clear::handler)
                        .push(Router::with_path("items").post(orders::items::create::handler))
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .delete(orders::delete::handler)
                                .push(
                                    Router::with_path("items/{product}")
                                        .put(orders::items::update::handler),
                                )
                                .push(
                                    Router::with_path("complete").post(orders::complete::handler),
                                ),
                        ),
                )
                .push(Router::with_path("completed-orders").get(orders::completed::handler))
                .push(Router::with_path("checkout/quote").post(payments::quote::handler))
                .push(Router::with_path("payments").post(payments::create::handler))
                .push(Router::with_path("receipts").get(payments::receipts::handler))
                .push(
                    Router::with_path("returns")
                        .get(returns::index::handler)
                        .post(returns::create::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(returns::get::handler)
                                .push(Router::with_path("status").put(returns::status::handler))
                                .push(
                                    Router::with_path("complete").post(returns::complete::handler),
                                ),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::{
            orders::MockOrdersService,
            returns::{MockReturnsService, models::ReturnStatus},
        },
    };

    use crate::{
        orders::get::OrderResponse,
        returns::get::ReturnResponse,
        test_helpers::{app_context, make_order, make_return, make_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_nested_order_route_resolves_both_ids() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|customer, order| customer.into_i64() == 3 && order.into_i64() == 8)
            .return_once(|customer, order| Ok(make_order(customer.into_i64(), order.into_i64())));

        let service = make_service(
            AppContext {
                orders: Arc::new(orders),
                ..app_context()
            },
            app_router(),
        );

        let mut res = TestClient::get("http://example.com/customers/3/orders/8")
            .send(&service)
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 8);

        Ok(())
    }

    #[tokio::test]
    async fn test_return_route_is_keyed_by_order() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_get_return()
            .once()
            .withf(|customer, order| customer.into_i64() == 3 && order.into_i64() == 8)
            .return_once(|customer, order| {
                Ok(make_return(
                    customer.into_i64(),
                    order.into_i64(),
                    ReturnStatus::Pending,
                ))
            });

        let service = make_service(
            AppContext {
                returns: Arc::new(returns),
                ..app_context()
            },
            app_router(),
        );

        let mut res = TestClient::get("http://example.com/customers/3/returns/8")
            .send(&service)
            .await;

        let body: ReturnResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.order_id, 8);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() -> TestResult {
        let service = make_service(app_context(), app_router());

        let res = TestClient::get("http://example.com/customers/3/wishlist")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
