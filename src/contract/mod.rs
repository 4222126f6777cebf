pub mod export;
pub mod handlers;
pub mod models;
pub mod validation;

pub use export::*;
pub use handlers::*;
pub use models::*;
pub use validation::*;
