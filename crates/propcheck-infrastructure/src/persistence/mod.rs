pub mod slots;

mod database;
mod result_ext;

pub use database::Database;
pub use result_ext::ResultExt;
