//! Document templates for every file an entity is created with.
//!
//! Each document has exactly one renderer. Renderers are pure: they read the
//! profile (plus an explicit date for the objectives tracker) and never touch
//! the filesystem or the clock. Tier-dependent fragments are chosen by a single
//! `match` on [`Tier`] inside the renderer; the templates only iterate over or
//! test for the data that match produced.

use std::fmt;

use chrono::NaiveDate;
use minijinja::{Environment, UndefinedBehavior, Value, context};
use serde::Serialize;

use super::error::PlanError;
use super::layout::{
    CURRENT_OBJECTIVES, ENTRY_DOCUMENT, INBOX_DIR, INBOX_README, INBOX_README_NAME,
    OPERATING_PRINCIPLES, PERSONA_PROFILE, ROLE_DEFINITION, SESSION_EXPORT, SESSION_EXPORTS_DIR,
    SESSION_START, SKILL_FILE_NAME, SKILLS, SKILLS_INDEX, SKILLS_NAMESPACE, SPEC_VERSION,
};
use super::profile::{EntityProfile, Tier};

const ENTRY_TEMPLATE: &str = include_str!("templates/entry.md");
const ROLE_DEFINITION_TEMPLATE: &str = include_str!("templates/role_definition.md");
const OPERATING_PRINCIPLES_TEMPLATE: &str = include_str!("templates/operating_principles.md");
const PERSONA_PROFILE_TEMPLATE: &str = include_str!("templates/persona_profile.md");
const CURRENT_OBJECTIVES_TEMPLATE: &str = include_str!("templates/current_objectives.md");
const SKILLS_INDEX_TEMPLATE: &str = include_str!("templates/skills_index.md");
const SESSION_START_TEMPLATE: &str = include_str!("templates/session_start.md");
const SESSION_EXPORT_TEMPLATE: &str = include_str!("templates/session_export.md");
const INBOX_README_TEMPLATE: &str = include_str!("templates/inbox_readme.md");

/// Every document an entity can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Entry,
    RoleDefinition,
    OperatingPrinciples,
    PersonaProfile,
    CurrentObjectives,
    SkillsIndex,
    SessionStartSkill,
    SessionExportSkill,
    InboxReadme,
}

impl DocumentKind {
    pub const ALL: [Self; 9] = [
        Self::Entry,
        Self::RoleDefinition,
        Self::OperatingPrinciples,
        Self::PersonaProfile,
        Self::CurrentObjectives,
        Self::SkillsIndex,
        Self::SessionStartSkill,
        Self::SessionExportSkill,
        Self::InboxReadme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::RoleDefinition => "role_definition",
            Self::OperatingPrinciples => "operating_principles",
            Self::PersonaProfile => "persona_profile",
            Self::CurrentObjectives => "current_objectives",
            Self::SkillsIndex => "skills_index",
            Self::SessionStartSkill => "session_start_skill",
            Self::SessionExportSkill => "session_export_skill",
            Self::InboxReadme => "inbox_readme",
        }
    }

    /// Path of the document relative to the entity root.
    pub fn relative_path(self) -> String {
        match self {
            Self::Entry => ENTRY_DOCUMENT.to_string(),
            Self::RoleDefinition => ROLE_DEFINITION.to_string(),
            Self::OperatingPrinciples => OPERATING_PRINCIPLES.to_string(),
            Self::PersonaProfile => PERSONA_PROFILE.to_string(),
            Self::CurrentObjectives => CURRENT_OBJECTIVES.to_string(),
            Self::SkillsIndex => SKILLS_INDEX.to_string(),
            Self::SessionStartSkill => SESSION_START.file(),
            Self::SessionExportSkill => SESSION_EXPORT.file(),
            Self::InboxReadme => INBOX_README.to_string(),
        }
    }

    // `.md` names keep minijinja's auto-escaping off.
    fn template_name(self) -> &'static str {
        match self {
            Self::Entry => "entry.md",
            Self::RoleDefinition => "role_definition.md",
            Self::OperatingPrinciples => "operating_principles.md",
            Self::PersonaProfile => "persona_profile.md",
            Self::CurrentObjectives => "current_objectives.md",
            Self::SkillsIndex => "skills_index.md",
            Self::SessionStartSkill => "session_start.md",
            Self::SessionExportSkill => "session_export.md",
            Self::InboxReadme => "inbox_readme.md",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Entry => ENTRY_TEMPLATE,
            Self::RoleDefinition => ROLE_DEFINITION_TEMPLATE,
            Self::OperatingPrinciples => OPERATING_PRINCIPLES_TEMPLATE,
            Self::PersonaProfile => PERSONA_PROFILE_TEMPLATE,
            Self::CurrentObjectives => CURRENT_OBJECTIVES_TEMPLATE,
            Self::SkillsIndex => SKILLS_INDEX_TEMPLATE,
            Self::SessionStartSkill => SESSION_START_TEMPLATE,
            Self::SessionExportSkill => SESSION_EXPORT_TEMPLATE,
            Self::InboxReadme => INBOX_README_TEMPLATE,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
struct KernelDocument {
    path: &'static str,
    purpose: &'static str,
}

#[derive(Debug, Serialize)]
struct InboxCheck {
    dir: &'static str,
    readme: &'static str,
}

#[derive(Debug, Serialize)]
struct SkillRow {
    name: &'static str,
    invocation: String,
    summary: &'static str,
}

/// Template engine wrapper around minijinja holding every document template.
pub struct TemplateSet {
    env: Environment<'static>,
}

impl TemplateSet {
    pub fn new() -> Result<Self, PlanError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        for kind in DocumentKind::ALL {
            env.add_template(kind.template_name(), kind.source())
                .map_err(|source| PlanError::Render {
                    document: kind,
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Render `kind` for `profile`. `today` only feeds the objectives tracker.
    pub fn render(
        &self,
        kind: DocumentKind,
        profile: &EntityProfile,
        today: NaiveDate,
    ) -> Result<String, PlanError> {
        match kind {
            DocumentKind::Entry => self.entry(profile),
            DocumentKind::RoleDefinition => self.role_definition(profile),
            DocumentKind::OperatingPrinciples => self.operating_principles(profile),
            DocumentKind::PersonaProfile => self.persona_profile(profile),
            DocumentKind::CurrentObjectives => self.current_objectives(profile, today),
            DocumentKind::SkillsIndex => self.skills_index(profile),
            DocumentKind::SessionStartSkill => self.session_start_skill(profile),
            DocumentKind::SessionExportSkill => self.session_export_skill(profile),
            DocumentKind::InboxReadme => self.inbox_readme(),
        }
    }

    /// Root entry document with the numbered boot sequence.
    pub fn entry(&self, profile: &EntityProfile) -> Result<String, PlanError> {
        let ready = "You are ready to work.".to_string();
        let boot_steps = match profile.tier {
            Tier::Minimal => vec![
                format!("Read `{ROLE_DEFINITION}`"),
                format!("Check `{CURRENT_OBJECTIVES}`"),
                ready,
            ],
            Tier::Full => vec![
                format!("Read `{ROLE_DEFINITION}`"),
                format!("Read `{OPERATING_PRINCIPLES}`"),
                format!("Read `{PERSONA_PROFILE}`"),
                format!("Check `{CURRENT_OBJECTIVES}`"),
                format!("Check `{INBOX_DIR}/` for pending items"),
                ready,
            ],
        };
        self.render_template(
            DocumentKind::Entry,
            context! {
                name => &profile.name,
                description => &profile.description,
                tier => profile.tier.number(),
                spec_version => SPEC_VERSION,
                boot_steps => boot_steps,
            },
        )
    }

    pub fn role_definition(&self, profile: &EntityProfile) -> Result<String, PlanError> {
        self.render_template(
            DocumentKind::RoleDefinition,
            context! {
                name => &profile.name,
                description => &profile.description,
                objectives => &profile.objectives,
            },
        )
    }

    /// Autonomous / collaborative / escalation decision framework.
    pub fn operating_principles(&self, profile: &EntityProfile) -> Result<String, PlanError> {
        self.render_template(
            DocumentKind::OperatingPrinciples,
            context! { name => &profile.name },
        )
    }

    pub fn persona_profile(&self, profile: &EntityProfile) -> Result<String, PlanError> {
        self.render_template(
            DocumentKind::PersonaProfile,
            context! { name => &profile.name },
        )
    }

    /// Objectives tracker stamped with `today` as its last-updated date.
    pub fn current_objectives(
        &self,
        profile: &EntityProfile,
        today: NaiveDate,
    ) -> Result<String, PlanError> {
        self.render_template(
            DocumentKind::CurrentObjectives,
            context! {
                name => &profile.name,
                last_updated => today.to_string(),
                objectives => &profile.objectives,
            },
        )
    }

    pub fn skills_index(&self, profile: &EntityProfile) -> Result<String, PlanError> {
        let skills: Vec<SkillRow> = SKILLS
            .iter()
            .map(|skill| SkillRow {
                name: skill.name,
                invocation: skill.invocation(),
                summary: skill.summary,
            })
            .collect();
        self.render_template(
            DocumentKind::SkillsIndex,
            context! {
                name => &profile.name,
                skills => skills,
                namespace => SKILLS_NAMESPACE,
                skill_file => SKILL_FILE_NAME,
            },
        )
    }

    pub fn session_start_skill(&self, profile: &EntityProfile) -> Result<String, PlanError> {
        let role = KernelDocument {
            path: ROLE_DEFINITION,
            purpose: "Who I am",
        };
        let (kernel_documents, inbox, report_step) = match profile.tier {
            Tier::Minimal => (vec![role], None, 3),
            Tier::Full => (
                vec![
                    role,
                    KernelDocument {
                        path: OPERATING_PRINCIPLES,
                        purpose: "How I work",
                    },
                    KernelDocument {
                        path: PERSONA_PROFILE,
                        purpose: "My personality",
                    },
                ],
                Some(InboxCheck {
                    dir: INBOX_DIR,
                    readme: INBOX_README_NAME,
                }),
                4,
            ),
        };
        self.render_template(
            DocumentKind::SessionStartSkill,
            context! {
                name => &profile.name,
                kernel_documents => kernel_documents,
                objectives_path => CURRENT_OBJECTIVES,
                inbox => inbox,
                report_step => report_step,
            },
        )
    }

    pub fn session_export_skill(&self, profile: &EntityProfile) -> Result<String, PlanError> {
        self.render_template(
            DocumentKind::SessionExportSkill,
            context! {
                name => &profile.name,
                exports_dir => SESSION_EXPORTS_DIR,
            },
        )
    }

    pub fn inbox_readme(&self) -> Result<String, PlanError> {
        self.render_template(DocumentKind::InboxReadme, context! {})
    }

    fn render_template(&self, kind: DocumentKind, ctx: Value) -> Result<String, PlanError> {
        self.env
            .get_template(kind.template_name())
            .and_then(|template| template.render(ctx))
            .map_err(|source| PlanError::Render {
                document: kind,
                source,
            })
    }
}
