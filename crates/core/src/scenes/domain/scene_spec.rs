use serde::{Deserialize, Serialize};

/// How a scene's on-screen length is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Last caption end frame plus the silence buffer.
    FromNarration,
    /// A fixed frame count, e.g. sized to an embedded clip. `Fixed(0)` omits the scene.
    Fixed(u32),
}

/// One declarative scene of the composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSpec {
    /// Identifier used in generated artifacts (`codeWalkthrough`).
    pub key: String,
    /// Audio file name without extension (`code-walkthrough`).
    pub file_stem: String,
    /// Narration text sent to speech synthesis.
    pub text: String,
    #[serde(default = "default_policy")]
    pub duration: DurationPolicy,
}

fn default_policy() -> DurationPolicy {
    DurationPolicy::FromNarration
}

impl SceneSpec {
    pub fn new(key: &str, file_stem: &str, text: &str, duration: DurationPolicy) -> Self {
        Self {
            key: key.to_string(),
            file_stem: file_stem.to_string(),
            text: text.to_string(),
            duration,
        }
    }

    /// Name of the duration constant in the renderer's source,
    /// e.g. `codeWalkthrough` -> `CODE_WALKTHROUGH_DURATION`.
    pub fn duration_constant(&self) -> String {
        let mut name = String::with_capacity(self.key.len() + 10);
        for (i, ch) in self.key.chars().enumerate() {
            if ch.is_uppercase() && i > 0 {
                name.push('_');
            }
            if ch == '-' {
                name.push('_');
            } else {
                name.extend(ch.to_uppercase());
            }
        }
        name.push_str("_DURATION");
        name
    }
}

/// Default demo length in frames (10s at 30 fps), matching a typical clip.
pub const DEFAULT_DEMO_FRAMES: u32 = 300;

/// The promotional video's seven scenes, in playback order.
pub fn default_scenes() -> Vec<SceneSpec> {
    use DurationPolicy::{Fixed, FromNarration};
    vec![
        SceneSpec::new(
            "title",
            "title",
            "Meet ContextWeaver. The Microsoft Copilot agent giving your entire codebase institutional memory.",
            FromNarration,
        ),
        SceneSpec::new(
            "hackIdea",
            "hack-idea",
            "Copilot knows your syntax — but not your team's intent. ContextWeaver fuses Git, ADO, and Teams into one queryable knowledge graph. Grounded answers in seconds.",
            FromNarration,
        ),
        SceneSpec::new(
            "architecture",
            "architecture",
            "Four layers working in concert. Azure Functions capture every commit, ticket, and meeting. Cosmos DB and Azure AI Search store the knowledge graph. GPT-4o and Semantic Kernel orchestrate reasoning, surfaced natively through Copilot Chat.",
            FromNarration,
        ),
        SceneSpec::new(
            "codeWalkthrough",
            "code-walkthrough",
            "The action handler runs hybrid retrieval — combining vector search with graph traversal. GPT-4o generates a grounded, cited answer. The ingestion pipeline extracts intent from every pull request and writes causal relationships into the graph.",
            FromNarration,
        ),
        SceneSpec::new(
            "demo",
            "demo",
            "Here it is in action. Watch as Copilot Chat surfaces the exact context behind a pull request in seconds.",
            Fixed(DEFAULT_DEMO_FRAMES),
        ),
        SceneSpec::new(
            "benefits",
            "benefits",
            "Four wins: institutional memory that outlasts team turnover, ten-times faster onboarding, cross-signal correlation no other tool offers, and zero UI tax — it all lives inside Copilot Chat.",
            FromNarration,
        ),
        SceneSpec::new(
            "futureScope",
            "future-scope",
            "Next: proactive context push, architecture drift detection, multi-repo federation, and a Copilot Studio connector for every team. The journey has just begun.",
            FromNarration,
        ),
    ]
}
