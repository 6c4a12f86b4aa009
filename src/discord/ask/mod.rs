// Discord side of the ask commands.
//
// `events` turns serenity events into the router's inbound types and
// `responders` implements the router's reply ports over serenity.

#[path = "events.rs"]
pub mod events;

#[path = "responders.rs"]
pub mod responders;

pub use events::{handle_interaction, handle_message};
