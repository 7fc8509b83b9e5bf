pub mod dns;

pub use dns::{DnsRequestDispatcher, HandleDnsRequestUseCase};
