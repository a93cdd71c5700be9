use std::future::Future;
use std::rc::Rc;

use leptos::*;

use crate::{LoadState, RemoteResourceLoader, ResourceKey, ResourceOptions, ResourceValue};

/// Loads a remote resource for the current component.
///
/// - `key` is tracked reactively. Every change re-arms the loader and a fetch for
///   the new key is issued, even if the previous one is still in flight.
/// - An absent key ([`ResourceKey::is_absent`]) leaves the resource idle.
/// - When the component is cleaned up, the loader is detached and late results
///   are dropped.
///
/// Example
/// ```
/// use leptos::*;
/// use leptos_loader::*;
///
/// // Dependency key.
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct UserId(u32);
///
/// impl ResourceKey for UserId {
///     fn is_absent(&self) -> bool {
///         false
///     }
/// }
///
/// // Fetcher
/// async fn get_orders(user: UserId) -> Result<Vec<String>, String> {
///     todo!()
/// }
///
/// fn use_orders(user: impl Fn() -> UserId + 'static) -> ResourceResult<Vec<String>, String, impl RefetchFn> {
///     use_remote_resource(user, get_orders, ResourceOptions::default())
/// }
/// ```
pub fn use_remote_resource<K, V, E, Fu>(
    key: impl Fn() -> K + 'static,
    fetcher: impl Fn(K) -> Fu + 'static,
    options: ResourceOptions<E>,
) -> ResourceResult<V, E, impl RefetchFn>
where
    K: ResourceKey,
    V: ResourceValue,
    E: std::fmt::Display + 'static,
    Fu: Future<Output = Result<V, E>> + 'static,
{
    let loader = RemoteResourceLoader::<K, V, E>::new(options.resolve_executor());
    let fetcher = Rc::new(fetcher);

    let state_signal = RwSignal::new(loader.state());
    loader.subscribe(move |state| state_signal.set(state.clone()));

    if let Some(on_failure) = options.on_failure {
        loader.subscribe(move |state| {
            if let LoadState::Failed(_, error) = state {
                on_failure(error);
            }
        });
    }

    create_isomorphic_effect({
        let loader = loader.clone();
        let fetcher = fetcher.clone();
        move |_| {
            let key = key();
            let fetcher = fetcher.clone();
            let fetch_key = key.clone();
            loader.start(key, move || fetcher(fetch_key));
        }
    });

    on_cleanup({
        let loader = loader.clone();
        move || loader.detach()
    });

    let refetch = move || {
        if let Some(key) = loader.key() {
            let fetcher = fetcher.clone();
            if !loader.reload(move || fetcher(key)) {
                logging::debug_warn!("Refetch ignored: resource is detached");
            }
        }
    };

    let state: Signal<LoadState<V, E>> = state_signal.into();

    ResourceResult {
        state,
        data: Signal::derive(move || state_signal.with(|state| state.data().cloned())),
        is_loading: Signal::derive(move || state_signal.with(LoadState::is_loading)),
        error: Signal::derive(move || {
            state_signal.with(|state| state.error().map(|error| error.message.clone()))
        }),
        refetch,
    }
}

/// Reactive resource result.
#[derive(Clone)]
pub struct ResourceResult<V, E, R>
where
    V: 'static,
    E: 'static,
    R: RefetchFn,
{
    /// The full state of the resource.
    pub state: Signal<LoadState<V, E>>,
    /// The loaded data. `None` unless the latest fetch succeeded.
    pub data: Signal<Option<V>>,
    /// Whether a fetch is in flight.
    pub is_loading: Signal<bool>,
    /// Message of the latest failure, if the latest fetch failed.
    pub error: Signal<Option<String>>,
    /// Fetch the current key again.
    pub refetch: R,
}

/// Convenience Trait alias for a resource's refetch function.
pub trait RefetchFn: Fn() + Clone {}
impl<R: Fn() + Clone> RefetchFn for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Executor, RequestId};
    use futures::executor::LocalPool;
    use futures_channel::oneshot;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    type Responses = Rc<RefCell<HashMap<u32, oneshot::Sender<Result<String, String>>>>>;

    // A fetcher whose responses are sent by the test, per key.
    fn pending_fetcher(
        responses: Responses,
    ) -> impl Fn(Option<u32>) -> futures::future::LocalBoxFuture<'static, Result<String, String>> {
        use futures::FutureExt;
        move |key| {
            let (sender, receiver) = oneshot::channel();
            responses
                .borrow_mut()
                .insert(key.unwrap_or_default(), sender);
            async move { receiver.await.unwrap_or(Err("cancelled".to_string())) }.boxed_local()
        }
    }

    fn respond(responses: &Responses, key: u32, result: Result<String, String>) {
        let sender = responses.borrow_mut().remove(&key);
        if let Some(sender) = sender {
            let _ = sender.send(result);
        }
    }

    #[test]
    fn follows_key_changes() {
        let runtime = create_runtime();
        let mut pool = LocalPool::new();
        let responses = Responses::default();

        let key = create_rw_signal(Some(1_u32));
        let result = use_remote_resource(
            move || key.get(),
            pending_fetcher(responses.clone()),
            ResourceOptions::default().set_executor(Some(Executor::from_spawner(pool.spawner()))),
        );

        assert!(result.is_loading.get_untracked());

        key.set(Some(2));
        assert_eq!(
            result.state.get_untracked(),
            LoadState::Loading(RequestId(2))
        );

        respond(&responses, 2, Ok("two".to_string()));
        respond(&responses, 1, Ok("one".to_string()));
        pool.run_until_stalled();

        assert_eq!(result.data.get_untracked(), Some("two".to_string()));
        assert!(!result.is_loading.get_untracked());
        runtime.dispose();
    }

    #[test]
    fn absent_key_stays_idle() {
        let runtime = create_runtime();
        let pool = LocalPool::new();
        let responses = Responses::default();

        let result = use_remote_resource(
            move || None::<u32>,
            pending_fetcher(responses.clone()),
            ResourceOptions::default().set_executor(Some(Executor::from_spawner(pool.spawner()))),
        );

        assert!(result.state.get_untracked().is_idle());
        assert!(responses.borrow().is_empty(), "No fetch should be issued");
        runtime.dispose();
    }

    #[test]
    fn reports_each_failure_once() {
        let runtime = create_runtime();
        let mut pool = LocalPool::new();
        let responses = Responses::default();
        let failures = Rc::new(Cell::new(0));

        let result = use_remote_resource(
            move || Some(1_u32),
            pending_fetcher(responses.clone()),
            ResourceOptions::default()
                .set_executor(Some(Executor::from_spawner(pool.spawner())))
                .set_on_failure({
                    let failures = failures.clone();
                    move |_| failures.set(failures.get() + 1)
                }),
        );

        respond(&responses, 1, Err("server error".to_string()));
        pool.run_until_stalled();

        assert_eq!(failures.get(), 1);
        assert_eq!(result.error.get_untracked(), Some("server error".to_string()));
        assert_eq!(result.data.get_untracked(), None);
        runtime.dispose();
    }

    #[test]
    fn refetch_reloads_current_key() {
        let runtime = create_runtime();
        let mut pool = LocalPool::new();
        let responses = Responses::default();

        let result = use_remote_resource(
            move || Some(5_u32),
            pending_fetcher(responses.clone()),
            ResourceOptions::default().set_executor(Some(Executor::from_spawner(pool.spawner()))),
        );
        respond(&responses, 5, Err("flaky".to_string()));
        pool.run_until_stalled();
        assert!(result.state.get_untracked().is_failed());

        (result.refetch)();
        assert_eq!(
            result.state.get_untracked(),
            LoadState::Loading(RequestId(2))
        );

        respond(&responses, 5, Ok("five".to_string()));
        pool.run_until_stalled();
        assert_eq!(result.data.get_untracked(), Some("five".to_string()));
        runtime.dispose();
    }
}
