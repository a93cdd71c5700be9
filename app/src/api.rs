use std::rc::Rc;

use async_trait::async_trait;
use leptos::*;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use crate::{
    config::ApiConfig,
    error::ApiError,
    models::{RestaurantDetail, RestaurantId, RestaurantSummary},
};

/// The backend calls the screens depend on.
#[async_trait(?Send)]
pub trait RestaurantEndpoints {
    /// Restaurants owned by the signed in user.
    async fn get_all(&self) -> Result<Vec<RestaurantSummary>, ApiError>;

    /// One restaurant with its products.
    async fn get_detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError>;
}

/// Shared handle to the endpoints, stored in context.
#[derive(Clone)]
pub struct Endpoints(pub Rc<dyn RestaurantEndpoints>);

/// Provides the endpoints to the current scope.
pub fn provide_endpoints(endpoints: impl RestaurantEndpoints + 'static) {
    provide_context(Endpoints(Rc::new(endpoints)));
}

/// Retrieves the endpoints from the current scope.
pub fn use_endpoints() -> Rc<dyn RestaurantEndpoints> {
    use_context::<Endpoints>()
        .map(|endpoints| endpoints.0)
        .unwrap_or_else(|| {
            logging::debug_warn!("Restaurant endpoints missing, using HTTP defaults.");
            Rc::new(HttpRestaurantEndpoints::new(ApiConfig::default()))
        })
}

type TokenSource = Rc<dyn Fn() -> Option<String>>;

/// [`RestaurantEndpoints`] over HTTP.
#[derive(Clone)]
pub struct HttpRestaurantEndpoints {
    client: reqwest::Client,
    config: ApiConfig,
    token: TokenSource,
}

impl HttpRestaurantEndpoints {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            token: Rc::new(|| None),
        }
    }

    /// Reads the session token before every request.
    pub fn with_token(self, token: impl Fn() -> Option<String> + 'static) -> Self {
        Self {
            token: Rc::new(token),
            ..self
        }
    }

    async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T, ApiError> {
        let mut request = self.client.get(self.config.endpoint(route));
        if let Some(token) = (self.token)() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait(?Send)]
impl RestaurantEndpoints for HttpRestaurantEndpoints {
    async fn get_all(&self) -> Result<Vec<RestaurantSummary>, ApiError> {
        self.get("users/myrestaurants").await
    }

    async fn get_detail(&self, id: RestaurantId) -> Result<RestaurantDetail, ApiError> {
        self.get(&format!("restaurants/{id}")).await
    }
}
