//! What the screens draw for each [`LoadState`].
//!
//! Screens render these values and nothing else, so every state of a resource
//! maps to exactly one kind of output.

use leptos_loader::LoadState;

use crate::models::{Product, RestaurantSummary};

/// What a collection screen draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    /// Nothing to show yet.
    Placeholder,
    /// Loaded, but the collection is empty.
    Empty,
    /// The loaded collection.
    Items(Vec<T>),
    /// The latest fetch failed.
    Error(String),
}

impl<T: Clone, E> From<&LoadState<Vec<T>, E>> for ListView<T> {
    fn from(state: &LoadState<Vec<T>, E>) -> Self {
        match state {
            LoadState::Idle | LoadState::Loading(_) => ListView::Placeholder,
            LoadState::Loaded(_, loaded) if loaded.data.is_empty() => ListView::Empty,
            LoadState::Loaded(_, loaded) => ListView::Items(loaded.data.clone()),
            LoadState::Failed(_, error) => ListView::Error(error.message.clone()),
        }
    }
}

/// What a single-entity screen draws.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<T> {
    /// Nothing to show yet.
    Placeholder,
    /// The loaded entity.
    Entity(T),
    /// The latest fetch failed.
    Error(String),
}

impl<T: Clone, E> From<&LoadState<T, E>> for DetailView<T> {
    fn from(state: &LoadState<T, E>) -> Self {
        match state {
            LoadState::Idle | LoadState::Loading(_) => DetailView::Placeholder,
            LoadState::Loaded(_, loaded) => DetailView::Entity(loaded.data.clone()),
            LoadState::Failed(_, error) => DetailView::Error(error.message.clone()),
        }
    }
}

pub const NO_RESTAURANTS: &str = "No restaurants available.";
pub const NO_PRODUCTS: &str = "No products available.";

pub fn restaurants_failure_message(message: &str) -> String {
    format!("There was an error while retrieving restaurants. {message}")
}

pub fn restaurant_detail_failure_message(message: &str) -> String {
    format!("There was an error while retrieving restaurant details. {message}")
}

/// Euro amount with two decimals, e.g. `2.50€`.
pub fn format_price(amount: f64) -> String {
    format!("{amount:.2}€")
}

/// Shown only once the restaurant has an average service time.
pub fn service_time_label(restaurant: &RestaurantSummary) -> Option<String> {
    restaurant
        .average_service_minutes
        .map(|minutes| format!("{minutes} min."))
}

pub fn availability_label(product: &Product) -> Option<&'static str> {
    (!product.availability).then_some("Not available")
}
