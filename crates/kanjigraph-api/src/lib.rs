pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod view;

pub use error::*;
pub use routes::*;
pub use server::*;
pub use state::*;
pub use view::*;
