//! Domain types shared by the client and the server.

mod payload;
mod query;
mod result;
mod source;

pub use payload::{Entity, Extract, ImageDescriptor, Payload, Summary, TextSnippet};
pub use query::{MAX_QUERY_CHARS, Query};
pub use result::{AggregateResult, ErrorKind, SourceResult};
pub use source::Source;
