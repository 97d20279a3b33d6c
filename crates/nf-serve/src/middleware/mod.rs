pub mod correlation;
pub mod requester;
