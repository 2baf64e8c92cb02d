pub mod dispatch;
pub mod runtime;
pub mod serve;

pub use dispatch::dispatch;
pub use runtime::build_intake;
pub use serve::handle_channel_message;
