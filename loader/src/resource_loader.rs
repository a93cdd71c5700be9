use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::{Rc, Weak};

use leptos::logging;
use slotmap::{new_key_type, SlotMap};

use crate::{ErrorInfo, Executor, LoadState, RequestId, ResourceData, ResourceKey};

new_key_type! {
    /// Handle to a listener registered with [`RemoteResourceLoader::subscribe`].
    pub struct ListenerKey;
}

type Listener<V, E> = Rc<dyn Fn(&LoadState<V, E>)>;

/// Loads a single remote resource and keeps its [`LoadState`] consistent.
///
/// The loader guarantees that:
/// - Only the most recently issued fetch can change the state. Results of
///   superseded fetches are dropped, whatever order they settle in.
/// - Nothing changes after [`detach`](Self::detach).
/// - A fetch failure never escapes; it becomes [`LoadState::Failed`].
///
/// Handles are cheap to clone and all refer to the same loader.
pub struct RemoteResourceLoader<K, V, E> {
    inner: Rc<LoaderInner<K, V, E>>,
}

struct LoaderInner<K, V, E> {
    state: RefCell<LoadState<V, E>>,
    // Key of the fetch currently considered authoritative.
    key: RefCell<Option<K>>,
    last_issued: Cell<RequestId>,
    // `None` while idle or detached: no settlement may apply.
    authoritative: Cell<Option<RequestId>>,
    detached: Cell<bool>,
    listeners: RefCell<SlotMap<ListenerKey, Listener<V, E>>>,
    // Transitions produced while listeners run, delivered in order afterwards.
    pending: RefCell<VecDeque<LoadState<V, E>>>,
    notifying: Cell<bool>,
    executor: Executor,
}

impl<K, V, E> Clone for RemoteResourceLoader<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, E> std::fmt::Debug for RemoteResourceLoader<K, V, E>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteResourceLoader")
            .field("key", &self.inner.key.borrow())
            .field("last_issued", &self.inner.last_issued.get())
            .field("authoritative", &self.inner.authoritative.get())
            .field("detached", &self.inner.detached.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl<K, V, E> RemoteResourceLoader<K, V, E>
where
    K: ResourceKey,
    V: crate::ResourceValue,
    E: std::fmt::Display + 'static,
{
    /// Creates an idle loader that runs fetches on `executor`.
    pub fn new(executor: Executor) -> Self {
        Self {
            inner: Rc::new(LoaderInner {
                state: RefCell::new(LoadState::Idle),
                key: RefCell::new(None),
                last_issued: Cell::new(RequestId(0)),
                authoritative: Cell::new(None),
                detached: Cell::new(false),
                listeners: RefCell::new(SlotMap::with_key()),
                pending: RefCell::new(VecDeque::new()),
                notifying: Cell::new(false),
                executor,
            }),
        }
    }

    /// Loads the resource for `key`.
    ///
    /// - An absent key (see [`ResourceKey::is_absent`]) moves the loader to
    ///   [`LoadState::Idle`] without calling `fetcher`. Any fetch still in flight
    ///   is dropped when it settles.
    /// - The same key as the current fetch does nothing.
    /// - Any other key issues a new request: the state becomes
    ///   [`LoadState::Loading`] and `fetcher` is called once, immediately.
    pub fn start<F, Fu>(&self, key: K, fetcher: F)
    where
        F: FnOnce() -> Fu,
        Fu: Future<Output = Result<V, E>> + 'static,
    {
        if self.inner.detached.get() {
            logging::debug_warn!("RemoteResourceLoader::start: detached, ignoring {key:?}");
            return;
        }

        if key.is_absent() {
            self.inner.key.replace(None);
            self.inner.authoritative.set(None);
            if !self.with_state(LoadState::is_idle) {
                self.inner.transition(LoadState::Idle);
            }
            return;
        }

        if self.inner.key.borrow().as_ref() == Some(&key) {
            return;
        }

        self.inner.key.replace(Some(key));
        self.issue(fetcher);
    }

    /// Fetches the current key again, even though it has not changed.
    ///
    /// Returns `false` without calling `fetcher` when the loader is idle or detached.
    pub fn reload<F, Fu>(&self, fetcher: F) -> bool
    where
        F: FnOnce() -> Fu,
        Fu: Future<Output = Result<V, E>> + 'static,
    {
        if self.inner.detached.get() || self.inner.key.borrow().is_none() {
            return false;
        }
        self.issue(fetcher);
        true
    }

    /// Stops all further state changes. Listeners are dropped and in-flight
    /// fetches are discarded when they settle.
    ///
    /// Called from inside a listener, no other listener is notified afterwards.
    pub fn detach(&self) {
        if self.inner.detached.replace(true) {
            logging::debug_warn!("RemoteResourceLoader::detach: called more than once");
            return;
        }
        self.inner.authoritative.set(None);
        self.inner.listeners.borrow_mut().clear();
        self.inner.pending.borrow_mut().clear();
    }

    /// Whether [`detach`](Self::detach) has been called.
    pub fn is_detached(&self) -> bool {
        self.inner.detached.get()
    }

    /// A copy of the current state.
    pub fn state(&self) -> LoadState<V, E> {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn with_state<R>(&self, func: impl FnOnce(&LoadState<V, E>) -> R) -> R {
        func(&self.inner.state.borrow())
    }

    /// The key of the current fetch. `None` while idle.
    pub fn key(&self) -> Option<K> {
        self.inner.key.borrow().clone()
    }

    /// The most recently issued request, if any has been issued.
    pub fn latest_request(&self) -> Option<RequestId> {
        let last = self.inner.last_issued.get();
        (last.0 > 0).then_some(last)
    }

    /// Registers a listener that receives every state transition, in order.
    ///
    /// Listeners may call back into the loader. A transition they cause is
    /// delivered to every listener once the current one has been delivered.
    pub fn subscribe(&self, listener: impl Fn(&LoadState<V, E>) + 'static) -> ListenerKey {
        self.inner.listeners.borrow_mut().insert(Rc::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, key: ListenerKey) -> bool {
        self.inner.listeners.borrow_mut().remove(key).is_some()
    }

    fn issue<F, Fu>(&self, fetcher: F)
    where
        F: FnOnce() -> Fu,
        Fu: Future<Output = Result<V, E>> + 'static,
    {
        let request = self.inner.last_issued.get().next();
        self.inner.last_issued.set(request);
        self.inner.authoritative.set(Some(request));
        self.inner.transition(LoadState::Loading(request));

        let fetch = fetcher();
        let loader = Rc::downgrade(&self.inner);
        self.inner.executor.spawn(async move {
            let result = fetch.await;
            settle(loader, request, result);
        });
    }
}

fn settle<K, V, E>(loader: Weak<LoaderInner<K, V, E>>, request: RequestId, result: Result<V, E>)
where
    V: crate::ResourceValue,
    E: std::fmt::Display,
{
    let Some(loader) = loader.upgrade() else {
        return;
    };
    if loader.authoritative.get() != Some(request) {
        logging::debug_warn!("Discarding result of superseded request {request}");
        return;
    }
    let next = match result {
        Ok(data) => LoadState::Loaded(request, ResourceData::now(data)),
        Err(cause) => LoadState::Failed(request, ErrorInfo::new(cause)),
    };
    loader.transition(next);
}

impl<K, V, E> LoaderInner<K, V, E>
where
    V: crate::ResourceValue,
{
    fn transition(&self, state: LoadState<V, E>) {
        self.state.replace(state.clone());
        self.pending.borrow_mut().push_back(state);

        // A listener caused this transition: the outer call delivers it.
        if self.notifying.replace(true) {
            return;
        }

        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(state) = next else {
                break;
            };
            // Snapshot so listeners can call back into the loader.
            let listeners: Vec<Listener<V, E>> =
                self.listeners.borrow().values().cloned().collect();
            for listener in listeners {
                if self.detached.get() {
                    break;
                }
                listener(&state);
            }
        }

        self.notifying.set(false);
    }
}
