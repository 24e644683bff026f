// Export all route modules
pub mod funding_requests;
pub mod registrations;

// Re-export all route handlers for easy importing
pub use funding_requests::*;
pub use registrations::*;
