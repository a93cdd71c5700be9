use std::rc::Rc;

use leptos::*;
use leptos_loader::{use_remote_resource, RefetchFn, ResourceOptions, ResourceResult};

use crate::{
    api::{use_endpoints, RestaurantEndpoints},
    auth::use_auth,
    config::ApiConfig,
    error::ApiError,
    models::{RestaurantId, RestaurantSummary},
    notifications::use_notifications,
    view_model::{
        format_price, restaurants_failure_message, service_time_label, ListView, NO_RESTAURANTS,
    },
};

const DEFAULT_RESTAURANT_LOGO: &str = "/assets/restaurantLogo.jpeg";

/// The signed in owner's restaurants. Nothing is fetched while signed out, and
/// signing in as someone else fetches again.
pub fn use_restaurants(
    endpoints: Rc<dyn RestaurantEndpoints>,
    options: ResourceOptions<ApiError>,
) -> ResourceResult<Vec<RestaurantSummary>, ApiError, impl RefetchFn> {
    let auth = use_auth();
    let notifications = use_notifications();

    use_remote_resource(
        move || auth.user_id(),
        move |_user| {
            let endpoints = endpoints.clone();
            async move { endpoints.get_all().await }
        },
        options.set_on_failure(move |error| {
            notifications.error(restaurants_failure_message(&error.message));
        }),
    )
}

#[component]
pub fn RestaurantsScreen(#[prop(into)] on_select: Callback<RestaurantId>) -> impl IntoView {
    let ResourceResult { state, .. } = use_restaurants(use_endpoints(), ResourceOptions::default());
    let config = ApiConfig::default();

    move || match state.with(|state| ListView::from(state)) {
        ListView::Placeholder => view! { <div class="loading">"Loading..."</div> }.into_view(),
        ListView::Empty => view! { <div class="empty-list">{NO_RESTAURANTS}</div> }.into_view(),
        ListView::Error(message) => view! { <div class="error">{message}</div> }.into_view(),
        ListView::Items(restaurants) => restaurants
            .into_iter()
            .map(|restaurant| {
                let logo = config
                    .asset_url(restaurant.logo.as_deref())
                    .unwrap_or_else(|| DEFAULT_RESTAURANT_LOGO.to_string());
                view! { <RestaurantCard restaurant logo on_select/> }
            })
            .collect_view(),
    }
}

// Clicking a card opens that restaurant.
fn select_restaurant(
    restaurant: &RestaurantSummary,
    on_select: Callback<RestaurantId>,
) -> impl Fn() + Copy {
    let id = restaurant.id;
    move || on_select.call(id)
}

#[component]
fn RestaurantCard(
    restaurant: RestaurantSummary,
    logo: String,
    on_select: Callback<RestaurantId>,
) -> impl IntoView {
    let select = select_restaurant(&restaurant, on_select);
    let service_time = service_time_label(&restaurant);

    view! {
        <div class="card" on:click=move |_| select()>
            <img class="card-image" src=logo/>
            <h3>{restaurant.name}</h3>
            <p class="description">{restaurant.description.unwrap_or_default()}</p>
            {service_time
                .map(|minutes| {
                    view! {
                        <p>"Avg. service time: " <span class="highlight">{minutes}</span></p>
                    }
                })}
            <p>
                "Shipping: "
                <span class="highlight">{format_price(restaurant.shipping_costs)}</span>
            </p>
        </div>
    }
}
