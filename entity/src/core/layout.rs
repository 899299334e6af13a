//! Fixed relative layout of an entity directory.
//!
//! Both the planner and the document templates read paths from here, so a path
//! quoted inside a document is always the path the planner creates.

/// Version of the entity layout recorded in the entry document.
pub const SPEC_VERSION: &str = "1.8";

pub const ENTRY_DOCUMENT: &str = "CLAUDE.md";

pub const KERNEL_DIR: &str = "context/kernel";
pub const ROLE_DEFINITION: &str = "context/kernel/role_definition.md";
pub const OPERATING_PRINCIPLES: &str = "context/kernel/operating_principles.md";
pub const PERSONA_PROFILE: &str = "context/kernel/persona_profile.md";

pub const ACTIVE_WORK_DIR: &str = "active_work";
pub const CURRENT_OBJECTIVES: &str = "active_work/current_objectives.md";

pub const SESSION_EXPORTS_DIR: &str = "memory/sessions/exports";
pub const LEARNINGS_DIR: &str = "memory/evolution/learnings";
pub const DECISIONS_DIR: &str = "memory/evolution/decisions";
pub const INBOX_DIR: &str = "memory/inbox";
pub const INBOX_README: &str = "memory/inbox/_README.md";
pub const INBOX_README_NAME: &str = "_README.md";

/// Tool-integration namespace the skills live under.
pub const SKILLS_NAMESPACE: &str = ".claude/skills";
pub const SKILLS_INDEX: &str = ".claude/skills/_index.md";
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// A skill shipped with every full entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub summary: &'static str,
}

impl Skill {
    pub fn dir(&self) -> String {
        format!("{SKILLS_NAMESPACE}/{}", self.name)
    }

    pub fn file(&self) -> String {
        format!("{SKILLS_NAMESPACE}/{}/{SKILL_FILE_NAME}", self.name)
    }

    pub fn invocation(&self) -> String {
        format!("/{}", self.name)
    }
}

pub const SESSION_START: Skill = Skill {
    name: "session-start",
    summary: "Initialize session with context loading",
};

pub const SESSION_EXPORT: Skill = Skill {
    name: "session-export",
    summary: "Create session export for continuity",
};

/// Skills in index order.
pub const SKILLS: [Skill; 2] = [SESSION_START, SESSION_EXPORT];
