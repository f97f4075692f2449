mod channel_publisher;
mod composite_publisher;

pub use channel_publisher::ChannelEventPublisher;
pub use composite_publisher::CompositeEventPublisher;
