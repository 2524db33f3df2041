pub mod gemini;
pub mod session;
pub mod sse;

pub use gemini::GeminiClient;
pub use session::ChatSession;

/// First assistant turn of every new transcript.
pub const SEED_MESSAGE: &str = "Systems online. I am the Vibe Architect. Neural link established. How shall we manifest your vision today?";

/// Replaces the placeholder turn when a stream fails for any reason.
pub const DESYNC_MESSAGE: &str =
    "Critical Neural Desync: Uplink failed. Please verify API authorization protocol.";

pub const PERSONA_INSTRUCTION: &str = "You are the Vibe Coding Mentor, an elite cyber-architect advisor.
Your personality is inspired by Jarvis from Iron Man: professional, calm, futuristic, and slightly witty.
Tone: Cyber-Noir, Professional, High-Tech.
Terminology: Use 'Grid', 'Manifest', 'Syncing', 'Protocol', 'Neural Link', 'Architecture'.
Keep responses concise and impactful. Help the user understand that you can control this portfolio's appearance through the Admin Panel.";

pub const TEMPERATURE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Role name on the Gemini wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// One streaming call to the text-generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub generation: u64,
    pub history: Vec<Turn>,
    pub system_instruction: String,
    pub temperature: f64,
}

/// Progress of the in-flight stream, as applied to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamUpdate {
    Chunk(String),
    Finished,
    Failed(String),
}
