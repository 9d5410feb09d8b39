pub mod subscription;
pub mod ticket_gate;

pub use subscription::{SubscriptionProvider, use_subscription};
pub use ticket_gate::{BrowserTicketGate, TicketGateProvider, use_ticket_gate};
