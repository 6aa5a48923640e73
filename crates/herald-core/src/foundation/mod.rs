//! Foundation layer: entities, schemas, resolved options and errors.

pub mod entity;
pub mod error;
pub mod event;
pub mod message;
pub mod options;
pub mod schema;

pub use entity::{Channel, ChannelKind, Guild, Member, Membership, MessageRef, Role, Snowflake, User};
pub use error::{ApiError, ApiResult, OptionError, SchemaError};
pub use event::{Interaction, Message};
pub use message::{Attachment, Reply};
pub use options::{OptionSet, OptionValue, ResolvedOption};
pub use schema::{
    CommandData, CommandOption, OptionChoice, OptionKind, find_group, is_grouped,
    validate_options,
};
