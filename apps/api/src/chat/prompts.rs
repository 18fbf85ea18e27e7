// Prompt constants for the chat assistant.

/// Persona the side chat is bound to for the lifetime of a widget.
pub const ASSISTANT_SYSTEM: &str =
    "You are a recruitment assistant. Help the user refine their hiring needs.";
