pub mod terminal;

pub use terminal::virtual_terminal;
