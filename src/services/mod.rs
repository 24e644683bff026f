pub mod funding_requests;
pub mod registrations;
