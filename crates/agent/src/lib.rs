//! Agent runtime: the tool-calling loop that turns requirement text into a
//! saved presentation.
//!
//! The constrained flow:
//! 1. **Category matching** (`tools::analyze_requirements`) - requirements
//!    text to catalog categories, deterministically.
//! 2. **Slide assembly** (`tools`) - the model chooses which slides to build;
//!    layout itself is fixed by the core composer.
//! 3. **Emission** (`tools::save_presentation`) - the deck is written once,
//!    at the end.
//!
//! The model never decides services, colors, or geometry. When it is
//! unavailable the `direct` module produces the same deck without it.

pub mod direct;
pub mod llm;
pub mod matcher;
pub mod runtime;
pub mod tools;

pub use direct::{generate, generate_with_categories, DeckStyle, Generated};
pub use llm::{AgentError, ChatMessage, HttpLlmClient, LlmClient, ToolSpec};
pub use matcher::ModelCategorizer;
pub use runtime::{AgentOutcome, AgentRuntime};
pub use tools::{Session, Tool, ToolRegistry};
