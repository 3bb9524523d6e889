use monitor_core::{Entity, AGGREGATE_ENTITY_ID};

/// A tracked community together with the keyword vocabulary its synthetic
/// activity draws from. Vocabulary order matters: earlier terms start with
/// a higher base intensity.
#[derive(Debug, Clone)]
pub struct EntityProfile {
    pub entity: Entity,
    pub vocabulary: Vec<String>,
}

/// Static, ordered entity configuration. Generation seeds depend on the
/// position of each source entity in this order.
#[derive(Debug, Clone)]
pub struct Catalog {
    profiles: Vec<EntityProfile>,
}

impl Catalog {
    pub fn new(profiles: Vec<EntityProfile>) -> Self {
        Self { profiles }
    }

    /// All entities in configuration order, the aggregate entity included.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.profiles.iter().map(|p| &p.entity)
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities().find(|e| e.id == id)
    }

    /// Generation sources: every profile except the aggregate, in order.
    pub fn sources(&self) -> impl Iterator<Item = &EntityProfile> {
        self.profiles.iter().filter(|p| !p.entity.is_aggregate())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            profile(
                AGGREGATE_ENTITY_ID,
                "All communities",
                "Combined sentiment across r/ChatGPT, r/OpenAI, r/ChatGPTPro, and r/codex.",
                "#f97316",
                "rgba(249, 115, 22, 0.14)",
                &[],
            ),
            profile(
                "chatgpt",
                "r/ChatGPT",
                "Main community for everyday Codex users exploring prompts and workflows.",
                "#818cf8",
                "rgba(129, 140, 248, 0.14)",
                &[
                    "workflow",
                    "memory",
                    "prompting",
                    "shortcuts",
                    "bug report",
                    "update",
                    "templates",
                    "assistants",
                ],
            ),
            profile(
                "openai",
                "r/OpenAI",
                "News-focused subreddit tracking official releases and policy changes.",
                "#38bdf8",
                "rgba(56, 189, 248, 0.14)",
                &[
                    "roadmap", "policy", "release", "earnings", "labs", "preview", "pricing",
                    "security",
                ],
            ),
            profile(
                "chatgptpro",
                "r/ChatGPTPro",
                "Power users comparing pro tooling, automations, and pro-tier support.",
                "#f472b6",
                "rgba(244, 114, 182, 0.14)",
                &[
                    "automation",
                    "scripting",
                    "workspace",
                    "metrics",
                    "failover",
                    "advanced mode",
                    "latency",
                    "voice",
                ],
            ),
            profile(
                "codex",
                "r/codex",
                "Developer-centric conversations about Codex CLI/IDE internals and releases.",
                "#34d399",
                "rgba(52, 211, 153, 0.14)",
                &[
                    "compiler",
                    "extensions",
                    "debugger",
                    "beta build",
                    "workflow",
                    "plugins",
                    "release notes",
                    "telemetry",
                ],
            ),
        ])
    }
}

fn profile(
    id: &str,
    name: &str,
    description: &str,
    accent_color: &str,
    soft_color: &str,
    vocabulary: &[&str],
) -> EntityProfile {
    EntityProfile {
        entity: Entity {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            accent_color: accent_color.to_string(),
            soft_color: soft_color.to_string(),
        },
        vocabulary: vocabulary.iter().map(|t| t.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_is_listed_first_but_not_a_source() {
        let catalog = Catalog::default();
        assert_eq!(catalog.entities().next().unwrap().id, AGGREGATE_ENTITY_ID);
        let sources: Vec<&str> = catalog.sources().map(|p| p.entity.id.as_str()).collect();
        assert_eq!(sources, vec!["chatgpt", "openai", "chatgptpro", "codex"]);
    }

    #[test]
    fn test_every_source_has_eight_terms() {
        let catalog = Catalog::default();
        for source in catalog.sources() {
            assert_eq!(source.vocabulary.len(), 8, "{}", source.entity.id);
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::default();
        assert_eq!(catalog.entity("codex").unwrap().name, "r/codex");
        assert!(catalog.entity("rust").is_none());
        assert_eq!(catalog.entities().count(), 5);
    }
}
