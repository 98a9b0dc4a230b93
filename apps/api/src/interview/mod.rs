// Interview AI endpoints: thin HTTP wrappers over the ML gateway.
// Nothing here is persisted; callers store drafts and evaluations themselves.

pub mod handlers;
pub mod models;
pub mod validation;
