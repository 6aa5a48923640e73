//! Commands and text argument handling.
//!
//! - [`definition`]: the [`Command`] type, its settings and handler services
//! - [`split`]: whitespace tokenizer and prefix detection
//! - [`mention`]: the user, role and channel mention grammar
//! - [`resolve`]: the argument resolution engine
//! - [`usage`]: usage hints shown with argument errors

pub mod definition;
pub mod mention;
pub mod resolve;
pub mod split;
pub mod usage;

pub use definition::{Command, CommandService, CommandSettings, HandlerResponse, HandlerService};
pub use mention::{Mention, parse_id};
pub use resolve::{ArgumentResolver, DEFAULT_PREFIX, IntegerMode};
pub use split::{split_invocation, split_tokens};
pub use usage::format_usage;
