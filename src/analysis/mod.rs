// Obsession analysis pipeline
//
// Six counseling stages built from the same parts: context extraction,
// prompt selection, LLM invocation and response normalization.

pub mod category;
pub mod classifier;
pub mod context;
pub mod conversation;
pub mod invoker;
pub mod normalizer;
pub mod prompts;
pub mod service;
pub mod types;

pub use category::ObsessionCategory;
pub use classifier::Categorizer;
pub use context::extract_user_context;
pub use conversation::{ConversationTurn, Role, TurnContent};
pub use invoker::{InvokerSettings, LlmInvoker};
pub use normalizer::{format_counselor_reply, ResponseNormalizer};
pub use prompts::{select_prompt, PromptTemplate, Stage};
pub use service::AnalysisService;
pub use types::*;
