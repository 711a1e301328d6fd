pub mod errors;
pub mod events;
pub mod identifiers;
pub mod todo;

pub use errors::*;
pub use events::*;
pub use identifiers::*;
pub use todo::*;
