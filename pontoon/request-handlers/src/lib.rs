//! The JSON protocol of the query endpoint: decoding request bodies into
//! typed intents and shaping routed results into HTTP-ready responses.

mod body;
mod handler;
mod response;

pub use body::RequestBody;
pub use handler::RequestHandler;
pub use response::{status_for, HandlerResponse};
