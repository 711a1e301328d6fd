pub mod handlers;
pub mod responses;

pub use handlers::*;
pub use responses::*;
