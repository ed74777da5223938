pub mod delimited_payload;
pub mod stdout_channel;
