mod directory;
mod http_sender;
mod record_source;

pub use directory::IOrgDirectory;
pub use http_sender::IHttpSender;
pub use record_source::IRecordSource;
