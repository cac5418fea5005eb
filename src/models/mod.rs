pub mod analytics;
mod de;
pub mod event;
pub mod user;

pub use analytics::*;
pub use event::*;
pub use user::*;
