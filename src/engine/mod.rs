pub mod dispatcher;
pub mod ledger;
pub mod notify;
pub mod score_cache;

pub use dispatcher::PuntDispatcher;
pub use notify::{ConsoleNotifier, Notifier, OutputFormat};
