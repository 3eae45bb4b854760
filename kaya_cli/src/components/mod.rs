/// Component module exports
pub mod notice;
pub mod select;
pub mod text_input;

pub use notice::{Notice, NoticeLevel, NoticeQueue, NoticeStack};
pub use select::cycle_option;
pub use text_input::TextInput;
