#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # About Leptos Loader
//!
//! Leptos Loader loads one remote resource (a collection, or a single entity) for a
//! component and keeps its state honest while the component's inputs change.
//!
//! A loader provides:
//! - an explicit [`LoadState`]: idle, loading, loaded or failed
//! - re-fetching whenever the dependency key changes
//! - supersession: only the latest request may update the state
//! - detach on unmount: late results are dropped
//! - failures as values, never as panics or uncaught errors
//!
//! ## Entry points
//! - [`use_remote_resource`](crate::use_resource::use_remote_resource()) - reactive hook for components.
//! - [`RemoteResourceLoader`] - the framework independent state machine underneath.
//!
//! # Feature Flags
//! - `csr` Client-side rendering: timestamps come from the browser clock.
//! - `hydrate` Hydration: same as `csr`.
//! - `ssr` Server-side rendering.
//!
//! # Example
//!
//! ```
//! use leptos::*;
//! use leptos_loader::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Track {
//!     name: String,
//! }
//!
//! async fn get_track(id: u32) -> Result<Track, String> {
//!     todo!()
//! }
//!
//! #[component]
//! fn TrackView(#[prop(into)] id: Signal<u32>) -> impl IntoView {
//!     let ResourceResult { state, .. } =
//!         use_remote_resource(move || id.get(), get_track, ResourceOptions::default());
//!
//!     move || match state.get() {
//!         LoadState::Idle | LoadState::Loading(_) => view! { <p>"Loading..."</p> }.into_view(),
//!         LoadState::Loaded(_, track) => view! { <h2>{track.data.name}</h2> }.into_view(),
//!         LoadState::Failed(_, error) => view! { <p>{error.message}</p> }.into_view(),
//!     }
//! }
//! ```

mod executor;
mod instant;
mod load_state;
mod resource_loader;
mod resource_options;
mod use_resource;

pub use executor::*;
pub use instant::*;
pub use load_state::*;
pub use resource_loader::*;
pub use resource_options::*;
pub use use_resource::*;

/// Requirements for a dependency key.
///
/// A key change triggers a new fetch. An absent key means there is nothing to
/// load, and the loader goes idle.
pub trait ResourceKey: std::fmt::Debug + Clone + PartialEq + 'static {
    /// Whether this key denotes "nothing to load".
    fn is_absent(&self) -> bool;
}

impl<K> ResourceKey for Option<K>
where
    K: std::fmt::Debug + Clone + PartialEq + 'static,
{
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl ResourceKey for String {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

impl ResourceKey for &'static str {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_present_key {
    ($($ty:ty),*) => {
        $(
            impl ResourceKey for $ty {
                fn is_absent(&self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_present_key!((), bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Convenience trait for loaded value requirements.
pub trait ResourceValue: Clone + 'static {}
impl<V> ResourceValue for V where V: Clone + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys() {
        assert!(None::<u32>.is_absent());
        assert!(!Some(0_u32).is_absent());
        assert!(String::new().is_absent());
        assert!(!"route".is_absent());
        assert!(!0_u32.is_absent());
    }
}
