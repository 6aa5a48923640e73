//! Integration layer: traits implemented by the platform adapter.
//!
//! Herald never talks to the network itself. Entity lookups, reply transport
//! and command publishing are delegated to these traits.

pub mod publisher;
pub mod resolver;
pub mod transport;

pub use publisher::CommandPublisher;
pub use resolver::{BoxedResolver, EntityResolver};
pub use transport::{
    BoxedInteractionTransport, BoxedMessageTransport, InteractionTransport, MessageTransport,
};
