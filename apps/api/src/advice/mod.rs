// Advice pipeline: sanitize → build prompt → one provider call → record in session history.
// All provider calls go through llm_client; nothing here speaks HTTP to a vendor.

pub mod builder;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod sanitize;
