use std::rc::Rc;

use crate::{ErrorInfo, Executor};

/// Provides default options to every resource created below the current owner.
pub fn provide_resource_defaults(options: DefaultResourceOptions) {
    leptos::provide_context(options);
}

/// Retrieves the defaults from the current scope, or the built-in defaults if
/// none were provided.
pub fn use_resource_defaults() -> DefaultResourceOptions {
    leptos::use_context::<DefaultResourceOptions>().unwrap_or_default()
}

/// Default options for all resources under a component tree.
#[derive(Debug, Clone, Default)]
pub struct DefaultResourceOptions {
    /// Where fetches are driven. Defaults to [`leptos::spawn_local`].
    pub executor: Executor,
}

/// Callback invoked when a fetch fails.
pub type FailureCallback<E> = Rc<dyn Fn(&ErrorInfo<E>)>;

/**
 * Options for a resource [`use_remote_resource()`](crate::use_remote_resource())
 */
pub struct ResourceOptions<E> {
    /// Overrides the executor from [`DefaultResourceOptions`].
    pub executor: Option<Executor>,
    /// Called once per failed fetch that was not superseded.
    /// Typically used to show an error notification.
    pub on_failure: Option<FailureCallback<E>>,
}

impl<E> ResourceOptions<E> {
    /// Set the executor.
    pub fn set_executor(self, executor: Option<Executor>) -> Self {
        ResourceOptions { executor, ..self }
    }

    /// Set the failure callback.
    pub fn set_on_failure(self, on_failure: impl Fn(&ErrorInfo<E>) + 'static) -> Self {
        ResourceOptions {
            on_failure: Some(Rc::new(on_failure)),
            ..self
        }
    }

    pub(crate) fn resolve_executor(&self) -> Executor {
        self.executor
            .clone()
            .unwrap_or_else(|| use_resource_defaults().executor)
    }
}

impl<E> Default for ResourceOptions<E> {
    fn default() -> Self {
        // Use tree-wide defaults if they exist.
        let defaults = use_resource_defaults();
        Self {
            executor: Some(defaults.executor),
            on_failure: None,
        }
    }
}

impl<E> Clone for ResourceOptions<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            on_failure: self.on_failure.clone(),
        }
    }
}

impl<E> std::fmt::Debug for ResourceOptions<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceOptions")
            .field("executor", &self.executor)
            .field("on_failure", &self.on_failure.as_ref().map(|_| "..."))
            .finish()
    }
}
