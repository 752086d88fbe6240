mod handler;

pub use handler::{Action, handle_event};
