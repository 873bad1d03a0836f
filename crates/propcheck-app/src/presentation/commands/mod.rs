pub mod calculator;
pub mod config;
pub mod history;
pub mod report;
pub mod system;


pub use calculator::*;
pub use config::*;
pub use history::*;
pub use report::*;
pub use system::*;
