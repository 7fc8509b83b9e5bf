pub mod facility;
pub mod forwarding;
pub mod reverse;
pub mod transport;

pub use facility::UpstreamResolutionFacility;
