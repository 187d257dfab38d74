mod envelope;
mod url;

pub use envelope::{Envelope, Status};
pub use url::{AliasResponse, SaveUrlRequest};
