mod dispatcher;
mod handle_dns_request;
mod session;

pub use dispatcher::DnsRequestDispatcher;
pub use handle_dns_request::HandleDnsRequestUseCase;
