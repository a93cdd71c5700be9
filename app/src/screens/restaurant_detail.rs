use std::rc::Rc;

use leptos::*;
use leptos_loader::{use_remote_resource, RefetchFn, ResourceOptions, ResourceResult};

use crate::{
    api::{use_endpoints, RestaurantEndpoints},
    config::ApiConfig,
    error::ApiError,
    models::{Product, RestaurantDetail, RestaurantId},
    notifications::use_notifications,
    view_model::{
        availability_label, format_price, restaurant_detail_failure_message, DetailView,
        NO_PRODUCTS,
    },
};

const DEFAULT_PRODUCT_IMAGE: &str = "/assets/product.jpeg";

/// One restaurant, re-fetched whenever the route's id changes.
pub fn use_restaurant_detail(
    endpoints: Rc<dyn RestaurantEndpoints>,
    id: impl Fn() -> RestaurantId + 'static,
    options: ResourceOptions<ApiError>,
) -> ResourceResult<RestaurantDetail, ApiError, impl RefetchFn> {
    let notifications = use_notifications();

    use_remote_resource(
        id,
        move |id| {
            let endpoints = endpoints.clone();
            async move { endpoints.get_detail(id).await }
        },
        options.set_on_failure(move |error| {
            notifications.error(restaurant_detail_failure_message(&error.message));
        }),
    )
}

#[component]
pub fn RestaurantDetailScreen(#[prop(into)] id: MaybeSignal<RestaurantId>) -> impl IntoView {
    let ResourceResult { state, refetch, .. } =
        use_restaurant_detail(use_endpoints(), move || id.get(), ResourceOptions::default());
    let config = ApiConfig::default();

    let body = move || match state.with(|state| DetailView::from(state)) {
        DetailView::Placeholder => view! { <div class="loading">"Loading..."</div> }.into_view(),
        DetailView::Error(message) => view! { <div class="error">{message}</div> }.into_view(),
        DetailView::Entity(restaurant) => {
            view! { <RestaurantDetailView restaurant config=config.clone()/> }.into_view()
        }
    };

    view! {
        <div class="restaurant-detail">
            <button class="refresh" on:click=move |_| refetch()>"Refresh"</button>
            {body}
        </div>
    }
}

#[component]
fn RestaurantDetailView(restaurant: RestaurantDetail, config: ApiConfig) -> impl IntoView {
    let hero = config.asset_url(restaurant.hero_image.as_deref());
    let logo = config.asset_url(restaurant.logo.as_deref());
    let header_style = hero.map(|url| format!("background-image: url('{url}')"));

    let products = if restaurant.products.is_empty() {
        view! { <div class="empty-list">{NO_PRODUCTS}</div> }.into_view()
    } else {
        restaurant
            .products
            .into_iter()
            .map(|product| {
                let image = config
                    .asset_url(product.image.as_deref())
                    .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string());
                view! { <ProductCard product image/> }
            })
            .collect_view()
    };

    view! {
        <div class="restaurant-header" style=header_style>
            <h2>{restaurant.name}</h2>
            {logo.map(|src| view! { <img class="logo" src=src/> })}
            <p class="description">{restaurant.description.unwrap_or_default()}</p>
        </div>
        <div class="products">{products}</div>
    }
}

#[component]
fn ProductCard(product: Product, image: String) -> impl IntoView {
    let availability = availability_label(&product);

    view! {
        <div class="card">
            <img class="card-image" src=image/>
            <h3>{product.name}</h3>
            <p class="description">{product.description.unwrap_or_default()}</p>
            <p class="price">{format_price(product.price)}</p>
            {availability.map(|label| view! { <p class="availability">{label}</p> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::RestaurantSummary, notifications::provide_notifications};
    use async_trait::async_trait;
    use futures::executor::LocalPool;
    use futures_channel::oneshot;
    use leptos_loader::Executor;
    use std::cell::RefCell;
    use std::collections::HashMap;

    type Pending = RefCell<HashMap<u32, oneshot::Sender<Result<RestaurantDetail, ApiError>>>>;

    // Detail responses are released by the test, per restaurant id.
    #[derive(Default)]
    struct ControlledEndpoints {
        pending: Pending,
    }

    impl ControlledEndpoints {
        fn respond(&self, id: u32, result: Result<RestaurantDetail, ApiError>) {
            let sender = self.pending.borrow_mut().remove(&id);
            if let Some(sender) = sender {
                let _ = sender.send(result);
            }
        }
    }

    #[async_trait(?Send)]
    impl RestaurantEndpoints for ControlledEndpoints {
        async fn get_all(&self) -> Result<Vec<RestaurantSummary>, ApiError> {
            Ok(vec![])
        }

        async fn get_detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError> {
            let (sender, receiver) = oneshot::channel();
            self.pending.borrow_mut().insert(id.0, sender);
            receiver
                .await
                .unwrap_or(Err(ApiError::Status { status: 499 }))
        }
    }

    fn detail(id: u32) -> RestaurantDetail {
        RestaurantDetail {
            id: RestaurantId(id),
            name: format!("Restaurant {id}"),
            description: None,
            logo: None,
            hero_image: None,
            products: vec![],
        }
    }

    #[test]
    fn navigating_away_mid_fetch_keeps_latest_restaurant() {
        let runtime = create_runtime();
        let mut pool = LocalPool::new();
        provide_notifications();
        let endpoints = Rc::new(ControlledEndpoints::default());
        let route_id = create_rw_signal(RestaurantId(1));

        let result = use_restaurant_detail(
            endpoints.clone(),
            move || route_id.get(),
            ResourceOptions::default().set_executor(Some(Executor::from_spawner(pool.spawner()))),
        );
        pool.run_until_stalled();

        route_id.set(RestaurantId(2));
        pool.run_until_stalled();

        endpoints.respond(2, Ok(detail(2)));
        pool.run_until_stalled();
        endpoints.respond(1, Ok(detail(1)));
        pool.run_until_stalled();

        assert_eq!(
            result.data.get_untracked().map(|r| r.id),
            Some(RestaurantId(2))
        );
        runtime.dispose();
    }

    #[test]
    fn superseded_failure_is_not_notified() {
        let runtime = create_runtime();
        let mut pool = LocalPool::new();
        let notifications = provide_notifications();
        let endpoints = Rc::new(ControlledEndpoints::default());
        let route_id = create_rw_signal(RestaurantId(1));

        let result = use_restaurant_detail(
            endpoints.clone(),
            move || route_id.get(),
            ResourceOptions::default().set_executor(Some(Executor::from_spawner(pool.spawner()))),
        );
        pool.run_until_stalled();
        route_id.set(RestaurantId(2));
        pool.run_until_stalled();

        endpoints.respond(1, Err(ApiError::Status { status: 500 }));
        endpoints.respond(2, Ok(detail(2)));
        pool.run_until_stalled();

        assert!(notifications.current().is_empty());
        assert!(result.state.get_untracked().is_loaded());
        runtime.dispose();
    }

    #[test]
    fn missing_restaurant_is_notified() {
        let runtime = create_runtime();
        let mut pool = LocalPool::new();
        let notifications = provide_notifications();
        let endpoints = Rc::new(ControlledEndpoints::default());

        let result = use_restaurant_detail(
            endpoints.clone(),
            || RestaurantId(9),
            ResourceOptions::default().set_executor(Some(Executor::from_spawner(pool.spawner()))),
        );
        pool.run_until_stalled();
        endpoints.respond(9, Err(ApiError::Status { status: 404 }));
        pool.run_until_stalled();

        assert_eq!(notifications.current().len(), 1);
        assert_eq!(
            result.error.get_untracked(),
            Some("server responded with status 404".to_string())
        );
        runtime.dispose();
    }
}
