//! Channels — the message transport boundary.

pub mod console;
pub mod traits;

pub use console::{run_console_loop, ConsoleChannel};
pub use traits::{ChannelSender, InboundEvent, OutboundMessage};

/// Create the console channel.
pub fn create_console_channel() -> Box<dyn ChannelSender> {
    Box::new(ConsoleChannel::new())
}
