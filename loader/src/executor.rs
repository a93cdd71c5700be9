use std::{future::Future, pin::Pin, rc::Rc};

use futures::task::{LocalSpawn, LocalSpawnExt};
use leptos::logging;

type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Drives the awaiting half of a fetch on the current thread.
///
/// A loader never blocks: it hands the fetch future to its executor and applies
/// the result when the executor polls it to completion.
#[derive(Clone)]
pub struct Executor(Rc<dyn Fn(LocalTask)>);

impl Executor {
    /// Runs tasks with [`leptos::spawn_local`].
    pub fn spawn_local() -> Self {
        Executor(Rc::new(|task| leptos::spawn_local(task)))
    }

    /// Runs tasks on a local spawner, such as a [`futures::executor::LocalPool`].
    pub fn from_spawner(spawner: impl LocalSpawn + 'static) -> Self {
        Executor(Rc::new(move |task| {
            if let Err(error) = spawner.spawn_local(task) {
                logging::error!("Failed to spawn resource fetch: {error}");
            }
        }))
    }

    /// Runs tasks with a custom spawn function.
    pub fn new(spawn: impl Fn(Pin<Box<dyn Future<Output = ()>>>) + 'static) -> Self {
        Executor(Rc::new(spawn))
    }

    pub(crate) fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        (self.0)(Box::pin(task))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::spawn_local()
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Executor").field(&"...").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use std::cell::Cell;

    #[test]
    fn spawner_runs_task_when_pool_runs() {
        let mut pool = LocalPool::new();
        let executor = Executor::from_spawner(pool.spawner());
        let ran = Rc::new(Cell::new(false));

        executor.spawn({
            let ran = ran.clone();
            async move { ran.set(true) }
        });

        assert!(!ran.get(), "Task should not run before the pool is polled");
        pool.run_until_stalled();
        assert!(ran.get());
    }

    #[test]
    fn custom_spawn_receives_tasks() {
        let spawned = Rc::new(Cell::new(0));
        let executor = Executor::new({
            let spawned = spawned.clone();
            move |_task| spawned.set(spawned.get() + 1)
        });

        executor.spawn(async {});
        executor.spawn(async {});

        assert_eq!(spawned.get(), 2);
    }
}
