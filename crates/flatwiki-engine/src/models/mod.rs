pub mod page;
pub mod title;

pub use page::Page;
pub use title::{InvalidTitle, Title};
