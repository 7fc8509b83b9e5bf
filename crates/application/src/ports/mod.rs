mod resolution_facility;
mod response_sink;

pub use resolution_facility::{PendingQuery, RawAnswer, ResolutionFacility};
pub use response_sink::ResponseSink;
