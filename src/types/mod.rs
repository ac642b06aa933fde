mod id;
mod models;
mod status;

pub use id::ObjectId;
pub use models::*;
pub use status::Status;
