mod adapter;
mod buffer;
mod cursor;
mod pane;
mod surface;

pub use adapter::EditorAdapter;
pub use buffer::Buffer;
pub use cursor::Cursor;
pub use pane::EditorPane;
pub use surface::EditorSurface;
