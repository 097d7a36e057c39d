mod bearer_token;
mod request_id;

pub use bearer_token::BearerToken;
pub use request_id::{REQUEST_ID_HEADER, RequestId};
