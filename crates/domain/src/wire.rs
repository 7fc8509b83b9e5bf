//! DNS wire format decoding (RFC 1035 §4.1).
//!
//! Input is untrusted: every read is bounds-checked, compression pointers
//! must point strictly backwards, and the first failure poisons the reader.
pub mod message;
pub mod name;
pub mod reader;
pub mod record;

pub use message::{Header, Message, Question};
pub use name::{Name, MAX_NAME_LEN};
pub use reader::{DecodeError, WireReader};
pub use record::{RecordData, ResourceRecord, Soa, CLASS_IN, TYPE_A, TYPE_AAAA, TYPE_MX, TYPE_PTR};
