//! The per-entity scaffolding pipeline: generate, render, write.

use std::path::{Path, PathBuf};

use chisel_core::{Artifact, Diagnostic, Overwrite, WriteResult, pluralize, relative_path_to_namespace};
use chisel_ir::ClassModel;
use tracing::debug;

use crate::{
    Fragments, SideEffect, TemplateError, TemplateStore, entity_fragments, render,
};

/// The fixed set of artifacts scaffolded per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Data-transfer object with generated field block.
    Dto,
    /// Fluent validator with generated rules.
    Validator,
    /// Entity-type configuration with relationship mapping.
    EntityConfig,
    /// Import/export row mapping.
    ImportMap,
    /// UI form page.
    FormPage,
    /// UI list page.
    ListPage,
    /// API controller.
    Controller,
    /// Created/updated/deleted event handler classes.
    Events,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 8] = [
        ArtifactKind::Dto,
        ArtifactKind::Validator,
        ArtifactKind::EntityConfig,
        ArtifactKind::ImportMap,
        ArtifactKind::FormPage,
        ArtifactKind::ListPage,
        ArtifactKind::Controller,
        ArtifactKind::Events,
    ];

    pub fn describe(&self) -> &'static str {
        match self {
            ArtifactKind::Dto => "DTO",
            ArtifactKind::Validator => "validator",
            ArtifactKind::EntityConfig => "entity configuration",
            ArtifactKind::ImportMap => "import/export map",
            ArtifactKind::FormPage => "form page",
            ArtifactKind::ListPage => "list page",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Events => "event handlers",
        }
    }

    /// Template-tree prefix naming the project layer this artifact lives in.
    fn layer_prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Dto
            | ArtifactKind::Validator
            | ArtifactKind::ImportMap
            | ArtifactKind::Events => "Application",
            ArtifactKind::EntityConfig => "Data",
            ArtifactKind::Controller => "Api",
            ArtifactKind::FormPage | ArtifactKind::ListPage => "Ui",
        }
    }

    /// Target path relative to the owning layer's output root.
    pub fn relative_path(&self, name: &str, plural: &str) -> PathBuf {
        match self {
            ArtifactKind::Dto => format!("{plural}/{name}Dto.cs"),
            ArtifactKind::Validator => format!("{plural}/{name}Validator.cs"),
            ArtifactKind::EntityConfig => format!("Configurations/{name}Config.cs"),
            ArtifactKind::ImportMap => format!("{plural}/{name}ImportMap.cs"),
            ArtifactKind::FormPage => format!("Pages/{plural}/{name}Form.razor"),
            ArtifactKind::ListPage => format!("Pages/{plural}/{plural}List.razor"),
            ArtifactKind::Controller => format!("Controllers/{plural}Controller.cs"),
            ArtifactKind::Events => format!("{plural}/Events/{name}Events.cs"),
        }
        .into()
    }

    /// Path the template store resolves: layer prefix plus relative path.
    pub fn template_path(&self, name: &str, plural: &str) -> PathBuf {
        Path::new(self.layer_prefix()).join(self.relative_path(name, plural))
    }

    fn output_root<'a>(&self, layout: &'a OutputLayout) -> &'a Path {
        match self {
            ArtifactKind::Dto
            | ArtifactKind::Validator
            | ArtifactKind::ImportMap
            | ArtifactKind::Events => &layout.application,
            ArtifactKind::EntityConfig => &layout.data,
            ArtifactKind::Controller => &layout.api,
            ArtifactKind::FormPage | ArtifactKind::ListPage => &layout.ui,
        }
    }
}

/// Output roots of the multi-project application tree.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub application: PathBuf,
    pub data: PathBuf,
    pub api: PathBuf,
    pub ui: PathBuf,
}

impl OutputLayout {
    /// Conventional layout: the four layer projects under one root.
    pub fn under(root: &Path) -> Self {
        Self {
            application: root.join("Application"),
            data: root.join("Data"),
            api: root.join("Api"),
            ui: root.join("Ui"),
        }
    }
}

/// What to scaffold and where.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub output: OutputLayout,
    pub artifacts: Vec<ArtifactKind>,
}

impl ScaffoldPlan {
    /// A plan covering every artifact kind.
    pub fn full(output: OutputLayout) -> Self {
        Self {
            output,
            artifacts: ArtifactKind::ALL.to_vec(),
        }
    }
}

/// A rendered artifact that has not been written yet.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: PathBuf,
    pub content: String,
}

/// Outcome of scaffolding one entity.
#[derive(Debug, Default)]
pub struct ScaffoldResult {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScaffoldResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

struct Rendered {
    root: PathBuf,
    relative: PathBuf,
    content: String,
}

/// Namespace segment for an artifact's target folder:
/// `Pages/Products/ProductForm.razor` → `Pages.Products`.
fn folder_namespace(relative: &Path) -> String {
    relative
        .parent()
        .map(|dir| relative_path_to_namespace(&dir.to_string_lossy()))
        .unwrap_or_default()
}

/// Runs the generate → render → write pipeline for one entity at a time.
///
/// Per-artifact failures (missing template, incomplete relationship
/// metadata, existing target) become diagnostics in the result; they never
/// abort the remaining artifacts or entities.
pub struct Scaffolder<'a> {
    templates: &'a TemplateStore,
    plan: &'a ScaffoldPlan,
    force: bool,
}

impl<'a> Scaffolder<'a> {
    pub fn new(templates: &'a TemplateStore, plan: &'a ScaffoldPlan) -> Self {
        Self {
            templates,
            plan,
            force: false,
        }
    }

    /// Overwrite existing targets instead of skipping them.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Render every artifact without touching the disk.
    pub fn preview(&self, model: &ClassModel) -> (Vec<PreviewFile>, Vec<Diagnostic>) {
        let (rendered, diagnostics) = self.build(model);
        let files = rendered
            .into_iter()
            .map(|r| PreviewFile {
                path: r.root.join(&r.relative),
                content: r.content,
            })
            .collect();
        (files, diagnostics)
    }

    /// Render and write every artifact for one entity.
    pub fn scaffold(&self, model: &ClassModel) -> ScaffoldResult {
        let (rendered, diagnostics) = self.build(model);
        let mut result = ScaffoldResult {
            diagnostics,
            ..Default::default()
        };
        let overwrite = if self.force {
            Overwrite::Always
        } else {
            Overwrite::IfMissing
        };

        for r in rendered {
            let target = r.root.join(&r.relative);
            let artifact = Artifact::new(&r.relative, r.content).with_overwrite(overwrite);
            match artifact.write(&r.root) {
                Ok(WriteResult::Written) => result.written.push(target),
                Ok(WriteResult::Skipped) => result.skipped.push(target),
                Err(e) => result.diagnostics.push(
                    Diagnostic::error("write", e.to_string()).on(target.display().to_string()),
                ),
            }
        }
        result
    }

    fn build(&self, model: &ClassModel) -> (Vec<Rendered>, Vec<Diagnostic>) {
        let (fragments, effects, mut diagnostics) = entity_fragments(model);
        let plural = pluralize(&model.name);
        let mut rendered = Vec::new();

        for kind in &self.plan.artifacts {
            let template_path = kind.template_path(&model.name, &plural);
            let relative = kind.relative_path(&model.name, &plural);
            // templates may derive a namespace segment from the target folder
            let mut scoped = fragments.clone();
            scoped.insert("folderNamespace", folder_namespace(&relative));
            match self.templates.find(&template_path, &model.name) {
                Ok(template) => rendered.push(Rendered {
                    root: kind.output_root(&self.plan.output).to_path_buf(),
                    relative,
                    content: render(&template, &scoped),
                }),
                Err(TemplateError::Missing { .. }) => {
                    debug!(entity = %model.name, kind = kind.describe(), "no template, skipping");
                    diagnostics.push(
                        Diagnostic::warning(
                            "render",
                            format!("no template for {}; artifact skipped", kind.describe()),
                        )
                        .on(&model.name),
                    );
                }
                Err(e) => diagnostics
                    .push(Diagnostic::error("render", e.to_string()).on(&model.name)),
            }
        }

        for effect in &effects {
            match self.apply_effect(model, effect) {
                Ok(r) => rendered.push(r),
                Err(diag) => diagnostics.push(*diag),
            }
        }

        (rendered, diagnostics)
    }

    /// Materialize one queued side effect as an extra rendered artifact.
    fn apply_effect(
        &self,
        model: &ClassModel,
        effect: &SideEffect,
    ) -> Result<Rendered, Box<Diagnostic>> {
        let linking = effect.linking_table();
        let linking_plural = pluralize(linking);

        let mut fragments = Fragments::new();
        fragments.insert("name", linking);
        fragments.insert("namePlural", &linking_plural);
        fragments.insert("namespace", &model.namespace);

        let (template_path, relative): (PathBuf, PathBuf) = match effect {
            SideEffect::EmitLinkingEntityConfig {
                left_foreign_key,
                right_foreign_key,
                ..
            } => {
                fragments.insert(
                    "relationshipConfigurations",
                    format!(
                        "        builder.HasKey(x => new {{ x.{left_foreign_key}, x.{right_foreign_key} }});"
                    ),
                );
                (
                    ArtifactKind::EntityConfig.template_path(linking, &linking_plural),
                    ArtifactKind::EntityConfig.relative_path(linking, &linking_plural),
                )
            }
            SideEffect::RegisterDbSet { .. } => (
                Path::new("Data").join(format!("Context/AppDbContext.{linking}.cs")),
                PathBuf::from(format!("Context/AppDbContext.{linking}.cs")),
            ),
        };

        match self.templates.find(&template_path, linking) {
            Ok(template) => Ok(Rendered {
                root: self.plan.output.data.clone(),
                relative,
                content: render(&template, &fragments),
            }),
            Err(TemplateError::Missing { .. }) => Err(Box::new(
                Diagnostic::warning(
                    "render",
                    format!("no template for linking entity '{linking}'; artifact skipped"),
                )
                .on(&model.name),
            )),
            Err(e) => Err(Box::new(
                Diagnostic::error("render", e.to_string()).on(&model.name),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chisel_parser::parse_str;
    use tempfile::TempDir;

    use super::*;
    use crate::TemplateStore;

    const PRODUCT: &str = r#"
namespace Shop.Domain;

public class Product
{
    [Scaffold(Identifier)]
    public int Id { get; set; }

    [Required]
    public string Name { get; set; } = string.Empty;

    [Scaffold(Relationship, ManyToMany, inverseProperty: "Products", linkingTable: "ProductTag")]
    public List<Tag> Tags { get; set; } = new();
}
"#;

    fn seed_templates(root: &Path) {
        let app = root.join("Application/__Names__");
        fs::create_dir_all(&app).unwrap();
        fs::write(
            app.join("__Name__Dto.cs"),
            "namespace {{namespace}};\n\npublic class {{name}}Dto\n{\n{{dtoFields}}\n}\n",
        )
        .unwrap();

        let data = root.join("Data/Configurations");
        fs::create_dir_all(&data).unwrap();
        fs::write(
            data.join("__Name__Config.cs"),
            "public class {{name}}Config\n{\n{{relationshipConfigurations}}\n}\n",
        )
        .unwrap();

        let ctx = root.join("Data/Context");
        fs::create_dir_all(&ctx).unwrap();
        fs::write(
            ctx.join("AppDbContext.__Name__.cs"),
            "public partial class AppDbContext\n{\n    public DbSet<{{name}}> {{namePlural}} => Set<{{name}}>();\n}\n",
        )
        .unwrap();
    }

    fn setup() -> (TempDir, TempDir) {
        let templates = TempDir::new().unwrap();
        seed_templates(templates.path());
        let output = TempDir::new().unwrap();
        (templates, output)
    }

    fn product() -> ClassModel {
        parse_str(PRODUCT).unwrap().remove(0)
    }

    #[test]
    fn test_scaffold_writes_artifacts_and_reports_missing_templates() {
        let (templates, output) = setup();
        let store = TemplateStore::new(templates.path());
        let plan = ScaffoldPlan::full(OutputLayout::under(output.path()));

        let result = Scaffolder::new(&store, &plan).scaffold(&product());

        // Dto + EntityConfig + linking config + context registration
        assert_eq!(result.written.len(), 4);
        assert!(output.path().join("Application/Products/ProductDto.cs").is_file());
        assert!(output.path().join("Data/Configurations/ProductConfig.cs").is_file());
        assert!(output.path().join("Data/Configurations/ProductTagConfig.cs").is_file());
        assert!(output.path().join("Data/Context/AppDbContext.ProductTag.cs").is_file());

        // the six artifact kinds without templates are diagnostics, not failures
        let missing = result
            .diagnostics
            .iter()
            .filter(|d| d.message.contains("no template"))
            .count();
        assert_eq!(missing, 6);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_rendered_dto_contains_fragments() {
        let (templates, output) = setup();
        let store = TemplateStore::new(templates.path());
        let plan = ScaffoldPlan::full(OutputLayout::under(output.path()));

        Scaffolder::new(&store, &plan).scaffold(&product());

        let dto =
            fs::read_to_string(output.path().join("Application/Products/ProductDto.cs")).unwrap();
        assert!(dto.contains("namespace Shop.Domain;"));
        assert!(dto.contains("public class ProductDto"));
        assert!(dto.contains("public string Name { get; set; } = string.Empty;"));
    }

    #[test]
    fn test_linking_config_keys_both_sides() {
        let (templates, output) = setup();
        let store = TemplateStore::new(templates.path());
        let plan = ScaffoldPlan::full(OutputLayout::under(output.path()));

        Scaffolder::new(&store, &plan).scaffold(&product());

        let config =
            fs::read_to_string(output.path().join("Data/Configurations/ProductTagConfig.cs"))
                .unwrap();
        assert!(config.contains("builder.HasKey(x => new { x.TagId, x.ProductId });"));

        let context =
            fs::read_to_string(output.path().join("Data/Context/AppDbContext.ProductTag.cs"))
                .unwrap();
        assert!(context.contains("public DbSet<ProductTag> ProductTags => Set<ProductTag>();"));
    }

    #[test]
    fn test_existing_targets_are_skipped_unless_forced() {
        let (templates, output) = setup();
        let store = TemplateStore::new(templates.path());
        let plan = ScaffoldPlan::full(OutputLayout::under(output.path()));
        let model = product();

        let first = Scaffolder::new(&store, &plan).scaffold(&model);
        assert_eq!(first.skipped.len(), 0);

        let second = Scaffolder::new(&store, &plan).scaffold(&model);
        assert_eq!(second.written.len(), 0);
        assert_eq!(second.skipped.len(), 4);

        let forced = Scaffolder::new(&store, &plan).with_force(true).scaffold(&model);
        assert_eq!(forced.written.len(), 4);
        assert_eq!(forced.skipped.len(), 0);
    }

    #[test]
    fn test_folder_namespace() {
        assert_eq!(
            folder_namespace(Path::new("Pages/Products/ProductForm.razor")),
            "Pages.Products"
        );
        assert_eq!(folder_namespace(Path::new("ProductDto.cs")), "");
    }

    #[test]
    fn test_preview_does_not_write() {
        let (templates, output) = setup();
        let store = TemplateStore::new(templates.path());
        let plan = ScaffoldPlan::full(OutputLayout::under(output.path()));

        let (files, _) = Scaffolder::new(&store, &plan).preview(&product());
        assert_eq!(files.len(), 4);
        assert!(!output.path().join("Application/Products/ProductDto.cs").exists());
    }
}
