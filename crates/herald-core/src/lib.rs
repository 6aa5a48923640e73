//! # Herald Core
//!
//! The core types of the Herald command dispatch layer.
//!
//! Herald accepts a command invocation from one of two channels (a structured,
//! schema-validated interaction or a free-text message) and hands command
//! logic one normalized, strongly-typed argument set. This crate holds the
//! pieces every other layer agrees on.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! Plain data:
//! - **Entities**: users, members, roles, channels and guilds ([`User`], [`Member`], ...)
//! - **Option Schema**: what a command accepts ([`CommandOption`], [`OptionKind`])
//! - **Resolved Options**: what an invocation supplied ([`ResolvedOption`], [`OptionSet`])
//! - **Incoming Invocations**: the raw [`Interaction`] and [`Message`] shapes
//!
//! ### Integration Layer
//!
//! Traits implemented by the platform integration:
//! - [`EntityResolver`] looks up mentioned entities
//! - [`InteractionTransport`] and [`MessageTransport`] send, edit and delete replies
//! - [`CommandPublisher`] registers slash-compatible schemas with the platform
//!
//! ```text
//! ┌──────────────┐     ┌────────────┐     ┌───────────┐
//! │   Platform   │────▶│ Dispatcher │────▶│  Command  │
//! │ (resolver +  │◀────│ (framework)│◀────│  handler  │
//! │  transports) │     └────────────┘     └───────────┘
//! └──────────────┘
//! ```

pub mod foundation;
pub mod integration;

pub use foundation::{
    ApiError, ApiResult, Attachment, Channel, ChannelKind, CommandData, CommandOption,
    Guild, Interaction, Member, Membership, Message, MessageRef, OptionChoice, OptionError,
    OptionKind, OptionSet, OptionValue, Reply, ResolvedOption, Role, SchemaError, Snowflake, User,
    find_group, is_grouped, validate_options,
};
pub use integration::{
    BoxedInteractionTransport, BoxedMessageTransport, BoxedResolver, CommandPublisher,
    EntityResolver, InteractionTransport, MessageTransport,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::integration::*;
}
