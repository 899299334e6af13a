//! Scaffold planner: turns a validated profile into the ordered directories and
//! rendered files an entity consists of. Pure; the plan only describes effects.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::error::PlanError;
use super::invariants::validate_plan;
use super::layout::{
    ACTIVE_WORK_DIR, DECISIONS_DIR, INBOX_DIR, KERNEL_DIR, LEARNINGS_DIR, SESSION_EXPORT,
    SESSION_EXPORTS_DIR, SESSION_START,
};
use super::profile::{EntityProfile, Tier};
use super::templates::{DocumentKind, TemplateSet};

/// A file to create, with its fully rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub content: String,
}

/// Everything needed to materialize one entity.
///
/// Directories are listed parents first and all precede the files; every file
/// lives inside (or is an ancestor-covered child of) a planned directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldPlan {
    /// Entity root (`output_root/slug`); also the first directory.
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PlannedFile>,
}

impl ScaffoldPlan {
    pub fn file(&self, kind: DocumentKind) -> Option<&PlannedFile> {
        self.files.iter().find(|file| file.kind == kind)
    }

    /// All planned paths in creation order: directories, then files.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.directories
            .iter()
            .map(PathBuf::as_path)
            .chain(self.files.iter().map(|file| file.path.as_path()))
    }
}

/// Plan the entity described by `profile`, stamping `today` into the objectives tracker.
///
/// Validation runs first; on failure no plan entries are produced.
pub fn plan_scaffold(profile: &EntityProfile, today: NaiveDate) -> Result<ScaffoldPlan, PlanError> {
    profile.validate()?;
    let templates = TemplateSet::new()?;
    let root = profile.entity_root();
    let (relative_dirs, documents) = tier_layout(profile.tier);

    let mut directories = vec![root.clone()];
    directories.extend(relative_dirs.iter().map(|rel| resolve(&root, rel)));

    let files = documents
        .into_iter()
        .map(|kind| {
            Ok::<_, PlanError>(PlannedFile {
                path: resolve(&root, &kind.relative_path()),
                kind,
                content: templates.render(kind, profile, today)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let plan = ScaffoldPlan {
        root,
        directories,
        files,
    };
    let violations = validate_plan(&plan);
    if !violations.is_empty() {
        return Err(PlanError::InvariantViolation(violations));
    }
    debug!(
        root = %plan.root.display(),
        tier = %profile.tier,
        directories = plan.directories.len(),
        files = plan.files.len(),
        "planned entity"
    );
    Ok(plan)
}

/// Directories below the root and documents to render for `tier`, in plan order.
fn tier_layout(tier: Tier) -> (Vec<String>, Vec<DocumentKind>) {
    let mut dirs = vec![KERNEL_DIR.to_string(), ACTIVE_WORK_DIR.to_string()];
    let mut documents = vec![
        DocumentKind::Entry,
        DocumentKind::RoleDefinition,
        DocumentKind::CurrentObjectives,
    ];
    match tier {
        Tier::Minimal => {}
        Tier::Full => {
            dirs.extend([
                SESSION_EXPORTS_DIR.to_string(),
                LEARNINGS_DIR.to_string(),
                DECISIONS_DIR.to_string(),
                INBOX_DIR.to_string(),
                SESSION_START.dir(),
                SESSION_EXPORT.dir(),
            ]);
            documents.extend([
                DocumentKind::OperatingPrinciples,
                DocumentKind::PersonaProfile,
                DocumentKind::SkillsIndex,
                DocumentKind::SessionStartSkill,
                DocumentKind::SessionExportSkill,
                DocumentKind::InboxReadme,
            ]);
        }
    }
    (dirs, documents)
}

/// Join a `/`-separated relative layout path onto `root` component by component.
fn resolve(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}
