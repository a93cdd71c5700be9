use std::collections::VecDeque;
use std::time::Duration;

use leptos::*;

/// Maximum number of flash messages displayed at once.
const MAX_NOTIFICATIONS: usize = 5;

const DISMISS_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
}

/// Flash messages shown on top of every screen.
#[derive(Clone, Copy)]
pub struct Notifications {
    queue: RwSignal<VecDeque<Notification>>,
    next_id: StoredValue<u64>,
}

impl Notifications {
    fn new() -> Self {
        Self {
            queue: create_rw_signal(VecDeque::new()),
            next_id: store_value(0),
        }
    }

    /// Shows an error message. The oldest message is dropped past the display limit.
    pub fn error(&self, message: impl Into<String>) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        let notification = Notification {
            id,
            message: message.into(),
        };
        logging::error!("{}", notification.message);
        self.queue.update(|queue| {
            while queue.len() >= MAX_NOTIFICATIONS {
                queue.pop_front();
            }
            queue.push_back(notification);
        });
        id
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|queue| queue.retain(|n| n.id != id));
    }

    /// Current messages, oldest first. Tracked.
    pub fn current(&self) -> Vec<Notification> {
        self.queue.with(|queue| queue.iter().cloned().collect())
    }
}

pub fn provide_notifications() -> Notifications {
    let notifications = Notifications::new();
    provide_context(notifications);
    notifications
}

pub fn use_notifications() -> Notifications {
    use_context::<Notifications>()
        .expect("Notifications missing. Call provide_notifications first.")
}

#[component]
pub fn FlashMessages() -> impl IntoView {
    let notifications = use_notifications();

    view! {
        <div class="flash-messages">
            <For
                each=move || notifications.current()
                key=|notification| notification.id
                children=move |notification| {
                    let id = notification.id;
                    set_timeout(move || notifications.dismiss(id), DISMISS_AFTER);
                    view! {
                        <div role="alert" class="flash flash-error">
                            <span>{notification.message}</span>
                            <button on:click=move |_| notifications.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
