//! Orchestration for `entity create` and `entity plan`.
//!
//! Merges command-line input with config defaults into a validated profile,
//! plans the entity, and (for `create`) materializes it through a sink.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::core::layout::SESSION_START;
use crate::core::plan::{ScaffoldPlan, plan_scaffold};
use crate::core::profile::{EntityProfile, ProfileInput, Tier, parse_objectives};
use crate::io::config::EntityConfig;
use crate::io::materialize::{CreationReport, MaterializeOptions, materialize};
use crate::io::sink::ScaffoldSink;

/// Profile fields as collected from the user. Unset fields fall back to config.
#[derive(Debug, Clone, Default)]
pub struct ProfileRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub tier: Option<u8>,
    /// Comma-separated objectives.
    pub objectives: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl ProfileRequest {
    /// Fill unset fields from `config`; relative output dirs resolve against `cwd`.
    pub fn into_input(self, config: &EntityConfig, cwd: &Path) -> ProfileInput {
        let objectives = match self.objectives {
            Some(raw) => parse_objectives(&raw),
            None => config.default_objectives.clone(),
        };
        let output_root = match self.output_dir.or_else(|| config.output_dir.clone()) {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        ProfileInput {
            name: self.name,
            slug: self.slug,
            description: self.description,
            tier: self.tier.unwrap_or(config.default_tier),
            objectives,
            output_root,
        }
    }
}

/// Outcome of `entity create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub profile: EntityProfile,
    pub report: CreationReport,
}

/// Validate the request and plan the entity without touching the filesystem.
pub fn plan_entity(
    request: ProfileRequest,
    config: &EntityConfig,
    cwd: &Path,
    today: NaiveDate,
) -> Result<(EntityProfile, ScaffoldPlan)> {
    let profile = EntityProfile::from_input(request.into_input(config, cwd))?;
    debug!(name = %profile.name, slug = %profile.slug, tier = %profile.tier, "profile validated");
    let plan = plan_scaffold(&profile, today)?;
    Ok((profile, plan))
}

/// Plan the entity and write it through `sink`.
pub fn create_entity<S>(
    request: ProfileRequest,
    config: &EntityConfig,
    cwd: &Path,
    today: NaiveDate,
    sink: &mut S,
    options: &MaterializeOptions,
) -> Result<CreateOutcome>
where
    S: ScaffoldSink + ?Sized,
{
    let (profile, plan) = plan_entity(request, config, cwd, today)?;
    info!(root = %plan.root.display(), force = options.force, "creating entity");
    let report = materialize(&plan, sink, options)
        .with_context(|| format!("create entity {}", profile.name))?;
    Ok(CreateOutcome { profile, report })
}

/// Render `path` relative to `base` as `./...`, falling back to the full path.
pub fn relative_display(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) => Path::new(".").join(rel).display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Follow-up instructions printed after a successful create.
pub fn next_steps(profile: &EntityProfile) -> Vec<String> {
    let mut steps = vec![
        format!("cd \"{}\"", profile.entity_root().display()),
        "Start an agent session in that directory".to_string(),
        "Ask \"Who are you?\" to verify identity".to_string(),
    ];
    if profile.tier == Tier::Full {
        steps.push(format!(
            "Run {} to test boot sequence",
            SESSION_START.invocation()
        ));
    }
    steps
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::core::error::{Field, PlanError, ValidationError};
    use crate::io::sink::{FsSink, SinkError};
    use crate::test_support::{MemorySink, fixed_date};

    fn request(tier: Option<u8>) -> ProfileRequest {
        ProfileRequest {
            name: "Research Assistant".to_string(),
            slug: None,
            description: "literature review support".to_string(),
            tier,
            objectives: Some("Summarize papers, Track citations".to_string()),
            output_dir: None,
        }
    }

    #[test]
    fn request_falls_back_to_config_defaults() {
        let config = EntityConfig {
            default_tier: 1,
            default_objectives: vec!["Ship".to_string()],
            output_dir: Some(PathBuf::from("entities")),
        };
        let mut req = request(None);
        req.objectives = None;
        let input = req.into_input(&config, Path::new("/work"));
        assert_eq!(input.tier, 1);
        assert_eq!(input.objectives, vec!["Ship"]);
        assert_eq!(input.output_root, PathBuf::from("/work/entities"));
    }

    #[test]
    fn flags_override_config() {
        let input = request(Some(2)).into_input(&EntityConfig::default(), Path::new("/work"));
        assert_eq!(input.tier, 2);
        assert_eq!(input.objectives, vec!["Summarize papers", "Track citations"]);
        assert_eq!(input.output_root, PathBuf::from("/work"));
    }

    #[test]
    fn validation_failure_is_downcastable() {
        let mut req = request(Some(2));
        req.slug = Some("My Entity!".to_string());
        let err = plan_entity(req, &EntityConfig::default(), Path::new("/work"), fixed_date())
            .unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().expect("validation error");
        assert_eq!(validation.field, Field::Slug);
        assert!(err.downcast_ref::<PlanError>().is_none());
    }

    #[test]
    fn create_reports_every_path() {
        let mut sink = MemorySink::default();
        let outcome = create_entity(
            request(Some(2)),
            &EntityConfig::default(),
            Path::new("/work"),
            fixed_date(),
            &mut sink,
            &MaterializeOptions::default(),
        )
        .expect("create");
        assert_eq!(outcome.report.created().count(), 18);
        assert_eq!(
            outcome.report.root,
            PathBuf::from("/work").join("research-assistant")
        );
    }

    #[test]
    fn create_twice_without_force_surfaces_target_exists() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = EntityConfig::default();
        let options = MaterializeOptions::default();
        create_entity(request(Some(1)), &config, temp.path(), fixed_date(), &mut FsSink, &options)
            .expect("first create");

        let err = create_entity(
            request(Some(1)),
            &config,
            temp.path(),
            fixed_date(),
            &mut FsSink,
            &options,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SinkError>(),
            Some(SinkError::TargetExists { .. })
        ));
        assert!(format!("{err:#}").contains("already exists"));
    }

    #[test]
    fn force_overwrites_edited_documents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = EntityConfig::default();
        let outcome = create_entity(
            request(Some(2)),
            &config,
            temp.path(),
            fixed_date(),
            &mut FsSink,
            &MaterializeOptions::default(),
        )
        .expect("create");
        let entry = outcome.report.root.join("CLAUDE.md");
        fs::write(&entry, "edited").expect("edit");

        create_entity(
            request(Some(2)),
            &config,
            temp.path(),
            fixed_date(),
            &mut FsSink,
            &MaterializeOptions { force: true },
        )
        .expect("recreate");
        let contents = fs::read_to_string(&entry).expect("read");
        assert!(contents.starts_with("# Welcome, Research Assistant"));
    }

    #[test]
    fn relative_display_prefixes_dot() {
        let base = Path::new("/work");
        assert_eq!(
            relative_display(&base.join("bot").join("CLAUDE.md"), base),
            format!("./{}", Path::new("bot").join("CLAUDE.md").display())
        );
        assert_eq!(relative_display(Path::new("/elsewhere"), base), "/elsewhere");
    }

    #[test]
    fn next_steps_mention_session_start_only_for_full_tier() {
        let full = EntityProfile::from_input(
            request(Some(2)).into_input(&EntityConfig::default(), Path::new("/work")),
        )
        .expect("profile");
        let minimal = EntityProfile::from_input(
            request(Some(1)).into_input(&EntityConfig::default(), Path::new("/work")),
        )
        .expect("profile");
        assert_eq!(next_steps(&full).len(), 4);
        assert!(next_steps(&full)[3].contains("/session-start"));
        assert_eq!(next_steps(&minimal).len(), 3);
    }
}
