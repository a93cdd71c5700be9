//! Restaurant owner screens: the owner's restaurant list and a restaurant's
//! detail page with its products, both loaded through `leptos_loader`.

use leptos::*;
use leptos_loader::{provide_resource_defaults, DefaultResourceOptions};

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod screens;
pub mod view_model;

use crate::{
    api::{provide_endpoints, HttpRestaurantEndpoints},
    auth::provide_auth,
    config::ApiConfig,
    models::RestaurantId,
    notifications::{provide_notifications, FlashMessages},
    screens::{RestaurantDetailScreen, RestaurantsScreen},
};

/// Root component. Selecting a restaurant in the list opens its detail page.
#[component]
pub fn App() -> impl IntoView {
    provide_resource_defaults(DefaultResourceOptions::default());
    let auth = provide_auth();
    provide_notifications();
    provide_endpoints(
        HttpRestaurantEndpoints::new(ApiConfig::default()).with_token(move || auth.token()),
    );

    let selected = create_rw_signal(None::<RestaurantId>);

    view! {
        <FlashMessages/>
        {move || match selected.get() {
            None => {
                view! { <RestaurantsScreen on_select=move |id| selected.set(Some(id))/> }
                    .into_view()
            }
            Some(id) => {
                view! {
                    <button class="back" on:click=move |_| selected.set(None)>"Back"</button>
                    <RestaurantDetailScreen id/>
                }
                    .into_view()
            }
        }}
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "csr")] {
        use wasm_bindgen::prelude::wasm_bindgen;

        #[wasm_bindgen(start)]
        pub fn start() {
            _ = console_log::init_with_level(log::Level::Debug);
            console_error_panic_hook::set_once();

            mount_to_body(App);
        }
    }
}
