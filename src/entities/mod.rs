pub mod funding_request;
pub mod idea;
pub mod ideathon_registration;
pub mod negotiation_entry;
pub mod request_view;

pub use funding_request::Entity as FundingRequest;
pub use idea::Entity as Idea;
pub use ideathon_registration::Entity as IdeathonRegistration;
pub use negotiation_entry::Entity as NegotiationEntry;
pub use request_view::Entity as RequestView;
