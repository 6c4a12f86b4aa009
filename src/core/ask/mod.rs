pub mod chunking;
pub mod responders;
pub mod router;

pub use responders::{DeliveryError, InteractionResponder, MessageResponder};
pub use router::{
    CommandRouter, InboundCommand, InboundMessage, InteractionOutcome, MessageOutcome,
};
