mod renderer;

pub use renderer::{Renderer, TerminalGuard};
