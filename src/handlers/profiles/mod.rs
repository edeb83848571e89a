mod delete;
mod get;
mod page;
mod upsert;

pub use delete::profile_delete;
pub use get::profile_get;
pub use page::profile_page;
pub use upsert::profile_put;
