pub mod event_detail;
pub mod home;
pub mod not_found;
pub mod subscribe;

pub use event_detail::EventDetailPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use subscribe::SubscribePage;
