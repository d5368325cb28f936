use std::path::PathBuf;

use chisel_core::{Artifact, WriteResult};
use clap::Args;
use eyre::Result;

#[derive(Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

const CHISEL_TOML: &str = r#"[project]
source_dir = "Domain/Entities"
template_dir = "templates"
output_root = "."
"#;

const DTO_TEMPLATE: &str = r#"using System.ComponentModel;

namespace {{namespace}}.Dtos;

public class {{name}}Dto
{
{{dtoFields}}
}
"#;

const VALIDATOR_TEMPLATE: &str = r#"using FluentValidation;

namespace {{namespace}}.Validators;

public class {{name}}Validator : AbstractValidator<{{name}}Dto>
{
    public {{name}}Validator()
    {
{{validationRules}}
    }
}
"#;

const CONFIG_TEMPLATE: &str = r#"using Microsoft.EntityFrameworkCore;
using Microsoft.EntityFrameworkCore.Metadata.Builders;

namespace {{namespace}}.Configurations;

public class {{name}}Config : IEntityTypeConfiguration<{{name}}>
{
    public void Configure(EntityTypeBuilder<{{name}}> builder)
    {
{{relationshipConfigurations}}
    }
}
"#;

const CONTEXT_TEMPLATE: &str = r#"using Microsoft.EntityFrameworkCore;

namespace {{namespace}}.Context;

public partial class AppDbContext
{
    public DbSet<{{name}}> {{namePlural}} => Set<{{name}}>();
}
"#;

const IMPORT_MAP_TEMPLATE: &str = r#"using System.Data;

namespace {{namespace}}.Ports;

public static class {{name}}ImportMap
{
    public static {{name}} FromRow(DataRow row)
    {
        var item = new {{name}}();
{{importMappings}}
        return item;
    }

    public static void ToRow({{name}} item, DataRow row)
    {
{{exportMappings}}
    }
}
"#;

const EVENTS_TEMPLATE: &str = r#"namespace {{namespace}}.Events;

public record {{name}}CreatedEvent({{name}} Item);

public record {{name}}UpdatedEvent({{name}} Item);

public record {{name}}DeletedEvent(int Id);
"#;

const CONTROLLER_TEMPLATE: &str = r#"using Microsoft.AspNetCore.Mvc;

namespace {{namespace}}.Controllers;

[ApiController]
[Route("api/{{namePluralCamel}}")]
public class {{namePlural}}Controller : ControllerBase
{
    [HttpGet]
    public Task<List<{{name}}Dto>> GetAll() => throw new NotImplementedException();

    [HttpGet("{id}")]
    public Task<{{name}}Dto> Get(int id) => throw new NotImplementedException();

    [HttpPost]
    public Task<int> Create({{name}}Dto dto) => throw new NotImplementedException();

    [HttpPut("{id}")]
    public Task Update(int id, {{name}}Dto dto) => throw new NotImplementedException();

    [HttpDelete("{id}")]
    public Task Delete(int id) => throw new NotImplementedException();
}
"#;

const FORM_PAGE_TEMPLATE: &str = r#"@page "/{{namePluralCamel}}/edit"

<MudForm Model="Model">
{{formFields}}
</MudForm>
"#;

const LIST_PAGE_TEMPLATE: &str = r#"@page "/{{namePluralCamel}}"

<MudTable T="{{name}}Dto" Items="Items" Filter="Filter">
    <HeaderContent>
{{listHeaders}}
    </HeaderContent>
    <RowTemplate>
{{listCells}}
    </RowTemplate>
</MudTable>

@code {
    private string Search { get; set; } = string.Empty;

    private bool Filter({{name}}Dto item) =>
        {{searchPredicate}};
}
"#;

/// Starter template tree, one file per artifact kind.
const TEMPLATES: &[(&str, &str)] = &[
    ("templates/Application/__Names__/__Name__Dto.cs", DTO_TEMPLATE),
    ("templates/Application/__Names__/__Name__Validator.cs", VALIDATOR_TEMPLATE),
    ("templates/Application/__Names__/__Name__ImportMap.cs", IMPORT_MAP_TEMPLATE),
    ("templates/Application/__Names__/Events/__Name__Events.cs", EVENTS_TEMPLATE),
    ("templates/Data/Configurations/__Name__Config.cs", CONFIG_TEMPLATE),
    ("templates/Data/Context/AppDbContext.__Name__.cs", CONTEXT_TEMPLATE),
    ("templates/Api/Controllers/__Names__Controller.cs", CONTROLLER_TEMPLATE),
    ("templates/Ui/Pages/__Names__/__Name__Form.razor", FORM_PAGE_TEMPLATE),
    ("templates/Ui/Pages/__Names__/__Names__List.razor", LIST_PAGE_TEMPLATE),
];

impl InitCommand {
    /// Write the starter configuration and template tree. Existing files
    /// are left untouched.
    pub fn run(&self) -> Result<()> {
        let mut written = 0usize;

        for (relative, content) in std::iter::once(&("chisel.toml", CHISEL_TOML))
            .chain(TEMPLATES.iter())
        {
            let artifact = Artifact::new(*relative, *content);
            match artifact.write(&self.path)? {
                WriteResult::Written => {
                    println!("  + {relative}");
                    written += 1;
                }
                WriteResult::Skipped => println!("  = {relative} (exists)"),
            }
        }

        if written > 0 {
            println!("\nInitialized. Annotate entity classes under Domain/Entities,");
            println!("then run 'chisel list' and 'chisel generate <Entity>'.");
        } else {
            println!("\nNothing to do, everything already exists.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_init_writes_config_and_templates() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand {
            path: temp.path().to_path_buf(),
        };
        cmd.run().unwrap();

        assert!(temp.path().join("chisel.toml").is_file());
        assert!(temp
            .path()
            .join("templates/Application/__Names__/__Name__Dto.cs")
            .is_file());
        assert!(temp
            .path()
            .join("templates/Ui/Pages/__Names__/__Names__List.razor")
            .is_file());
    }

    #[test]
    fn test_init_never_overwrites() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("chisel.toml"), "# customized").unwrap();

        let cmd = InitCommand {
            path: temp.path().to_path_buf(),
        };
        cmd.run().unwrap();

        let content = std::fs::read_to_string(temp.path().join("chisel.toml")).unwrap();
        assert_eq!(content, "# customized");
    }
}
