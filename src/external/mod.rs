pub mod client;
pub mod transport;

pub use transport::{DingtalkReply, HttpResponse, HttpTransport, ReqwestTransport};
