pub mod invoker;
pub mod output;
pub mod push_command;

pub use invoker::{PublishReport, PublishRequest, STDERR_PREFIX, publish};
pub use output::{LogFileSink, MemorySink, RUN_LOG_FILENAME};
pub use push_command::{PushCommand, mask_secret};
