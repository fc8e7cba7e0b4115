mod notifier;

pub use notifier::{Notification, PlayerNotifier};
