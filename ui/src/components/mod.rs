pub mod event_card;
pub mod layout;
pub mod modal;
pub mod pagination_controls;
pub mod ticket_gate_modal;

pub use event_card::EventCard;
pub use modal::Modal;
pub use pagination_controls::PaginationControls;
pub use ticket_gate_modal::TicketGateModal;
