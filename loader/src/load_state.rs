use std::rc::Rc;

use crate::Instant;

/// Identifies one fetch attempt of a loader.
///
/// Ids are issued in strictly increasing order per loader, so a larger id always
/// belongs to a newer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    pub(crate) fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The lifecycle of a remote resource.
///
/// Each variant corresponds to what a renderer should draw: nothing requested yet,
/// a fetch in flight, the latest fetch's data, or the latest fetch's failure.
#[derive(Debug, PartialEq, Eq, Default)]
pub enum LoadState<V, E> {
    /// No fetch has been requested, because there is nothing to load
    /// (for example nobody is signed in).
    #[default]
    Idle,

    /// A fetch is in flight.
    Loading(RequestId),

    /// The most recent fetch succeeded.
    Loaded(RequestId, ResourceData<V>),

    /// The most recent fetch failed.
    Failed(RequestId, ErrorInfo<E>),
}

// Only the data needs `Clone`; the error cause is shared.
impl<V: Clone, E> Clone for LoadState<V, E> {
    fn clone(&self) -> Self {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading(id) => LoadState::Loading(*id),
            LoadState::Loaded(id, data) => LoadState::Loaded(*id, data.clone()),
            LoadState::Failed(id, error) => LoadState::Failed(*id, error.clone()),
        }
    }
}

impl<V, E> LoadState<V, E> {
    /// Returns the loaded data, if present.
    pub fn data(&self) -> Option<&V> {
        self.resource_data().map(|r| &r.data)
    }

    /// Returns the loaded data together with its timestamp, if present.
    pub fn resource_data(&self) -> Option<&ResourceData<V>> {
        match self {
            LoadState::Loaded(_, data) => Some(data),
            _ => None,
        }
    }

    /// Returns the failure, if the latest fetch failed.
    pub fn error(&self) -> Option<&ErrorInfo<E>> {
        match self {
            LoadState::Failed(_, error) => Some(error),
            _ => None,
        }
    }

    /// The request this state belongs to. `None` while idle.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            LoadState::Idle => None,
            LoadState::Loading(id) | LoadState::Loaded(id, _) | LoadState::Failed(id, _) => {
                Some(*id)
            }
        }
    }

    /// When the loaded data arrived, if present.
    pub fn updated_at(&self) -> Option<Instant> {
        self.resource_data().map(|r| r.updated_at)
    }

    /// Nothing has been requested.
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    /// A fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }

    /// The latest fetch succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(..))
    }

    /// The latest fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(..))
    }

    /// Transforms the loaded data, keeping request ids and failures intact.
    pub fn map_data<R>(&self, mapper: impl FnOnce(&V) -> R) -> LoadState<R, E> {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading(id) => LoadState::Loading(*id),
            LoadState::Loaded(id, data) => LoadState::Loaded(
                *id,
                ResourceData {
                    data: mapper(&data.data),
                    updated_at: data.updated_at,
                },
            ),
            LoadState::Failed(id, error) => LoadState::Failed(*id, error.clone()),
        }
    }
}

/// Successfully fetched data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceData<V> {
    /// The Data.
    pub data: V,
    /// The instant this data was retrieved.
    pub updated_at: Instant,
}

impl<V> ResourceData<V> {
    /// Wraps data with the current time as its `updated_at`.
    pub fn now(data: V) -> Self {
        Self {
            data,
            updated_at: Instant::now(),
        }
    }
}

/// A failed fetch, in a form a renderer can show.
#[derive(Debug)]
pub struct ErrorInfo<E> {
    /// Human readable message, rendered from the cause.
    pub message: String,
    /// The error the fetch produced.
    pub cause: Rc<E>,
}

impl<E> ErrorInfo<E>
where
    E: std::fmt::Display,
{
    /// Builds the info from the fetch error, using its `Display` output as the message.
    pub fn new(cause: E) -> Self {
        Self {
            message: cause.to_string(),
            cause: Rc::new(cause),
        }
    }
}

impl<E> Clone for ErrorInfo<E> {
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            cause: self.cause.clone(),
        }
    }
}

impl<E: PartialEq> PartialEq for ErrorInfo<E> {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.cause == other.cause
    }
}

impl<E: Eq> Eq for ErrorInfo<E> {}

impl<E> std::fmt::Display for ErrorInfo<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
