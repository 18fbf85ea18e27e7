// Side chat assistant: session client, widget orchestrator and HTTP handlers.
// All model calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod session;
pub mod widget;
