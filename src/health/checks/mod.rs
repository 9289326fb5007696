//! Built-in health checks for the input pipeline

pub mod build_info;
pub mod config;
pub mod frame_pipeline;
pub mod mailbox;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use frame_pipeline::FramePipelineCheck;
pub use mailbox::MailboxCheck;
