mod calculation_dto;
mod session_dto;
mod workspace_dto;

pub use calculation_dto::*;
pub use session_dto::*;
pub use workspace_dto::*;
