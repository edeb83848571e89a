mod list;
mod upsert;

pub use list::preference_list;
pub use upsert::preference_put;
