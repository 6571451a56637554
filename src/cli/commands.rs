//! Command execution handlers

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use console::style;
use serde::Serialize;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::analyzer::{AnalysisReport, ProjectAnalyzer};
use crate::assembler::{digest, InpAssembler};
use crate::config::Config;
use crate::error::{Result, SwmmingError};
use crate::models::*;
use crate::project::{Project, SectionCount};

use super::{
    AnalyzeArgs, AssembleArgs, ConfigArgs, ConfigCommands, InfoArgs, OutputFormat, TemplateArgs,
};

const PROJECT_EXTENSIONS: &[&str] = &["toml", "json"];

fn to_toml<T: Serialize>(value: &T) -> Result<String> {
    toml::to_string_pretty(value).map_err(|e| SwmmingError::Other(e.to_string()))
}

fn print_formatted<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Toml => println!("{}", to_toml(value)?),
        OutputFormat::Pretty => {}
    }
    Ok(())
}

fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            PROJECT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Expand the command line inputs into project files
///
/// Directories are searched recursively; explicit files are kept whatever
/// their extension so that loading reports unsupported formats.
pub fn collect_projects(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut projects = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(input).follow_links(true) {
                let entry = entry?;
                if entry.file_type().is_file() && is_project_file(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            found.sort();
            debug!("Found {} project(s) in {}", found.len(), input.display());
            projects.extend(found);
        } else if input.exists() {
            projects.push(input.clone());
        } else {
            return Err(SwmmingError::file_not_found(input));
        }
    }

    projects.dedup();
    Ok(projects)
}

/// Destination of the `.inp` assembled from `project`
pub fn output_path(project: &Path, output_dir: &Path) -> PathBuf {
    let stem = project
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());
    output_dir.join(format!("{}.inp", stem))
}

/// Pair every project with its output, refusing two projects that would
/// write the same file
pub fn plan_outputs(projects: Vec<PathBuf>, output_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(projects.len());

    for project in projects {
        let out = output_path(&project, output_dir);
        if let Some(first) = claimed.get(&out) {
            return Err(SwmmingError::Other(format!(
                "{} and {} would both be assembled into {}",
                first.display(),
                project.display(),
                out.display()
            )));
        }
        claimed.insert(out.clone(), project.clone());
        jobs.push((project, out));
    }

    Ok(jobs)
}

/// Load and analyze a project, refusing one with errors unless `force`
fn checked_project(path: &Path, force: bool) -> Result<Project> {
    let project = Project::load(path)?;
    let report = ProjectAnalyzer::new(&project).analyze()?;

    if !report.is_ok() {
        for problem in &report.errors {
            error!("{}: {}", path.display(), problem);
        }
        if !force {
            return Err(SwmmingError::Analysis(report.errors.len()));
        }
    }

    Ok(project)
}

/// Execute the assemble command
pub fn execute_assemble(args: &AssembleArgs, config: &Config) -> Result<()> {
    use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let projects = collect_projects(&args.input)?;
    if projects.is_empty() {
        return Err(SwmmingError::Other("No project files found".into()));
    }

    let force = args.force || config.assembly.force;

    if args.stdout {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for path in &projects {
            let project = checked_project(path, force)?;
            InpAssembler::new(&project).write_to(&mut handle)?;
        }
        handle.flush()?;
        return Ok(());
    }

    let output_dir = args.output.clone().unwrap_or_else(|| config.output_dir());
    let mut jobs = plan_outputs(projects, &output_dir)?;

    let existing = jobs.iter().filter(|(_, out)| out.exists()).count();
    if existing > 0 && !(args.yes || config.general.auto_yes) {
        let overwrite = dialoguer::Confirm::new()
            .with_prompt(format!("Overwrite {} existing file(s)?", existing))
            .default(false)
            .interact()
            .map_err(|e| SwmmingError::Other(e.to_string()))?;
        if !overwrite {
            jobs.retain(|(_, out)| !out.exists());
            info!("Keeping {} existing file(s)", existing);
        }
    }

    let bar_style = ProgressStyle::with_template(
        "{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map_err(|e| SwmmingError::Other(e.to_string()))?
    .progress_chars("█▓▒░ ");
    let pb = ProgressBar::new(jobs.len() as u64)
        .with_style(bar_style)
        .with_prefix("assemble");

    let results: Vec<(PathBuf, Result<String>)> = jobs
        .par_iter()
        .progress_with(pb.clone())
        .map(|(input, output)| {
            let result = checked_project(input, force)
                .and_then(|project| InpAssembler::new(&project).write_file(output));
            (output.clone(), result)
        })
        .collect();
    pb.finish_with_message("done");

    let mut failed = 0;
    for (output, result) in &results {
        match result {
            Ok(digest) => println!(
                "{} {} {}",
                style("✓").green(),
                output.display(),
                style(&digest[..12]).dim()
            ),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", style("✗").red(), output.display(), e);
            }
        }
    }

    if failed > 0 {
        return Err(SwmmingError::Other(format!(
            "{} of {} project(s) failed",
            failed,
            results.len()
        )));
    }

    Ok(())
}

/// Execute the analyze command
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<()> {
    let project = Project::load(&args.input)?;
    let report = ProjectAnalyzer::new(&project).analyze()?;

    match args.format {
        OutputFormat::Pretty => print_report(&args.input, &report),
        format => print_formatted(&report, format)?,
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(SwmmingError::Analysis(report.errors.len()))
    }
}

fn print_report(path: &Path, report: &AnalysisReport) {
    println!("{}", style("Project Analysis Report").bold().underlined());
    println!();

    println!("{}", style("Summary").bold());
    println!("  Project: {}", path.display());
    println!("  Nodes: {}", report.node_count);
    println!("  Links: {}", report.link_count);
    println!();

    if !report.warnings.is_empty() {
        println!("{}", style("⚠ Warnings").yellow().bold());
        for warning in &report.warnings {
            println!("  • {}", warning);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("{}", style("✗ Errors").red().bold());
        for error in &report.errors {
            println!("  • {}", error);
        }
        println!();
    }

    if report.is_ok() {
        println!("{}", style("✓ Ready to assemble").green().bold());
    }
}

/// Overview printed by the info command
#[derive(Debug, Serialize)]
pub struct ProjectInfo {
    /// Title header
    pub title: String,
    /// Flow units
    pub flow_units: String,
    /// Routing method
    pub flow_routing: String,
    /// Nodes of every kind
    pub nodes: usize,
    /// Links of every kind
    pub links: usize,
    /// SHA-256 of the assembled text
    pub digest: String,
    /// Records per non-empty section
    pub sections: Vec<SectionCount>,
}

impl ProjectInfo {
    /// Describe `project`, assembling it to compute the digest
    pub fn new(project: &Project) -> Result<Self> {
        let text = InpAssembler::new(project).to_string()?;
        Ok(Self {
            title: project.title.header.clone(),
            flow_units: project.options.flow_units.to_string(),
            flow_routing: project.options.flow_routing.to_string(),
            nodes: project.node_count(),
            links: project.link_count(),
            digest: digest(&text),
            sections: project.summary(),
        })
    }
}

/// Execute the info command
pub fn execute_info(args: &InfoArgs) -> Result<()> {
    let project = Project::load(&args.input)?;
    let info = ProjectInfo::new(&project)?;

    match args.format {
        OutputFormat::Pretty => {
            println!("Project Information");
            println!("═══════════════════════════════════════");
            println!("Title:       {}", info.title);
            println!("Flow units:  {}", info.flow_units);
            println!("Routing:     {}", info.flow_routing);
            println!("Nodes:       {}", info.nodes);
            println!("Links:       {}", info.links);
            println!("SHA-256:     {}", info.digest);

            if !info.sections.is_empty() {
                println!("\nSections:");
                for section in &info.sections {
                    println!("  {:<16} {}", section.section, section.count);
                }
            }
        }
        format => print_formatted(&info, format)?,
    }

    Ok(())
}

/// Starter project: one conduit draining a junction into an outfall
pub fn starter_project(title: Title, options: Options) -> Project {
    let j1 = Junction::new("J1", 10.0);
    let out1 = Outfall::new("OUT1", 9.0);
    let c1 = Conduit::new("C1", &j1, &out1, 100.0, 0.013);

    Project {
        title,
        options,
        xsections: vec![XSection::new(&c1, Shape::Circular { diameter: 1.0 })],
        coordinates: vec![
            Coordinate::new(&j1, 0.0, 0.0),
            Coordinate::new(&out1, 100.0, 0.0),
        ],
        map: Some(Map::new([-10.0, -10.0, 110.0, 10.0], MapUnits::None)),
        junctions: vec![j1],
        outfalls: vec![out1],
        conduits: vec![c1],
        ..Project::default()
    }
}

/// Execute the template command
pub fn execute_template(args: &TemplateArgs, config: &Config) -> Result<()> {
    let mut title = Title::default();
    if let Some(header) = args.title.as_ref().or(config.assembly.title.as_ref()) {
        title.header = header.clone();
    }
    let options = Options {
        flow_units: args
            .flow_units
            .unwrap_or(config.assembly.default_flow_units),
        ..Options::default()
    };

    if args.project {
        let content = starter_project(title, options).to_toml()?;
        match &args.output {
            Some(path) => {
                std::fs::write(path, content)?;
                info!("Wrote project description {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let project = Project {
        title,
        options,
        ..Project::default()
    };
    let assembler = InpAssembler::new(&project);
    match &args.output {
        Some(path) => {
            assembler.write_file(path)?;
        }
        None => print!("{}", assembler.to_string()?),
    }

    Ok(())
}

/// Execute the import command
#[cfg(feature = "gis")]
pub fn execute_import(args: &super::ImportArgs, config: &Config) -> Result<()> {
    use crate::gis::GeoImporter;

    let mut project = if args.output.exists() && !args.replace {
        Project::load(&args.output)?
    } else {
        Project::default()
    };

    let importer = GeoImporter::new(config.gis.clone());
    for path in &args.input {
        let summary = importer.import_file(path, &mut project)?;
        println!(
            "{} {}: {} node(s), {} conduit(s), {} subcatchment(s), {} polygon(s)",
            style("✓").green(),
            path.display(),
            summary.junctions + summary.outfalls,
            summary.conduits,
            summary.subcatchments,
            summary.polygons
        );
    }

    let content = match args.output.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::to_string_pretty(&project)?,
        _ => project.to_toml()?,
    };
    std::fs::write(&args.output, content)?;
    info!("Wrote project description {}", args.output.display());

    Ok(())
}

/// Execute the config command
pub fn execute_config(args: &ConfigArgs, path: Option<&Path>) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let config = Config::load(path)?;
            println!("{}", to_toml(&config)?);
        }
        ConfigCommands::Path => {
            let resolved = match path {
                Some(path) => path.to_path_buf(),
                None => Config::config_path()?,
            };
            println!("{}", resolved.display());
        }
        ConfigCommands::Reset => {
            Config::reset(path)?;
            println!("Configuration reset to defaults");
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(path)?;
            config.set(key, value)?;
            config.save(path)?;
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(path)?;
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else if Config::KEYS.contains(&key.as_str()) {
                println!("{} is not set", key);
            } else {
                return Err(SwmmingError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )));
            }
        }
        ConfigCommands::Init { force } => {
            Config::init(path, *force)?;
            println!("Configuration initialized");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_projects() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        for name in ["b.toml", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::write(nested.join("c.TOML"), "").unwrap();

        let found = collect_projects(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.toml", "c.TOML"]);

        assert!(matches!(
            collect_projects(&[dir.path().join("missing.toml")]),
            Err(SwmmingError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("models/street.toml"), Path::new("out")),
            PathBuf::from("out/street.inp")
        );
    }

    #[test]
    fn test_assemble_rejects_shared_stems() {
        let dir = TempDir::new().unwrap();
        let project = starter_project(Title::default(), Options::default());
        for sub in ["a", "b"] {
            let folder = dir.path().join("models").join(sub);
            std::fs::create_dir_all(&folder).unwrap();
            std::fs::write(folder.join("net.toml"), project.to_toml().unwrap()).unwrap();
        }

        let out = dir.path().join("out");
        let args = AssembleArgs {
            input: vec![dir.path().join("models")],
            output: Some(out.clone()),
            force: false,
            yes: true,
            stdout: false,
        };
        let err = execute_assemble(&args, &Config::default()).unwrap_err();

        assert!(err.to_string().contains("net.inp"));
        assert!(!out.exists());

        let jobs = plan_outputs(
            vec![PathBuf::from("a/net.toml"), PathBuf::from("b/other.json")],
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(jobs[1].1, PathBuf::from("out/other.inp"));
    }

    #[test]
    fn test_starter_project_is_clean() {
        let project = starter_project(Title::default(), Options::default());
        let report = ProjectAnalyzer::new(&project).analyze().unwrap();
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);

        let reloaded = Project::from_toml(&project.to_toml().unwrap()).unwrap();
        assert_eq!(reloaded, project);
    }

    #[test]
    fn test_assemble_writes_files() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("starter.toml");
        let project = starter_project(Title::default(), Options::default());
        std::fs::write(&input, project.to_toml().unwrap()).unwrap();

        let out = dir.path().join("out");
        let args = AssembleArgs {
            input: vec![input],
            output: Some(out.clone()),
            force: false,
            yes: true,
            stdout: false,
        };
        execute_assemble(&args, &Config::default()).unwrap();

        let written = std::fs::read_to_string(out.join("starter.inp")).unwrap();
        assert_eq!(written, InpAssembler::new(&project).to_string().unwrap());
    }

    #[test]
    fn test_assemble_refuses_broken_project() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.toml");
        let mut project = starter_project(Title::default(), Options::default());
        project.conduits[0].to_node = "OUT2".to_string();
        std::fs::write(&input, project.to_toml().unwrap()).unwrap();

        assert!(matches!(
            checked_project(&input, false),
            Err(SwmmingError::Analysis(_))
        ));
        assert!(checked_project(&input, true).is_ok());
    }

    #[test]
    fn test_project_info() {
        let project = starter_project(Title::default(), Options::default());
        let info = ProjectInfo::new(&project).unwrap();
        assert_eq!(info.nodes, 2);
        assert_eq!(info.links, 1);
        assert_eq!(info.flow_units, "CFS");
        assert_eq!(info.digest.len(), 64);
    }
}
