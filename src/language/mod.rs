//! Languages and their page layouts

mod layout;
mod table;

pub use layout::Layout;
pub use table::{capitalize, Language, LanguageTable};
