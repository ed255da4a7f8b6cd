use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::info;

use lstitch_layer::{LayerData, MemoryLayer};
use lstitch_merge::{StitchConfig, Stitcher};
use lstitch_types::{SpecPath, Value};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Stitch(args) => cmd_stitch(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_stitch(args: StitchArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let stitched = stitch_files(&args.inputs, &args.out, config)?;
    println!(
        "{} Stitched {} layers into {} ({} specs)",
        "✓".green().bold(),
        args.inputs.len(),
        args.out.display().to_string().bold(),
        stitched.spec_count()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let layer = MemoryLayer::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    println!("Layer {}", layer.identifier().yellow().bold());
    print!("{}", render_tree(&layer)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StitchConfig> {
    let Some(path) = path else {
        return Ok(StitchConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: StitchConfig = toml::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Stitch `inputs` (strongest first) and save the result to `out`.
///
/// The output starts as a copy of the first input; every later input is
/// stitched in as the weak layer, in order.
fn stitch_files(inputs: &[PathBuf], out: &Path, config: StitchConfig) -> anyhow::Result<MemoryLayer> {
    if inputs.iter().any(|input| same_file(input, out)) {
        bail!("output {} is also an input layer", out.display());
    }
    let Some((first, rest)) = inputs.split_first() else {
        bail!("no input layers given");
    };

    let mut stitched = MemoryLayer::open(first)
        .with_context(|| format!("failed to open {}", first.display()))?;
    stitched.set_identifier(out.display().to_string());

    let stitcher = Stitcher::new(config);
    for input in rest {
        let weak = MemoryLayer::open(input)
            .with_context(|| format!("failed to open {}", input.display()))?;
        stitcher
            .stitch_layers(&mut stitched, &weak)
            .with_context(|| format!("failed to stitch {}", input.display()))?;
        info!(layer = %input.display(), "stitched layer");
    }

    stitched
        .save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    Ok(stitched)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Render a layer's spec tree, one spec or field per line.
fn render_tree(layer: &dyn LayerData) -> anyhow::Result<String> {
    let mut out = String::new();
    render_spec(layer, &SpecPath::absolute_root(), &mut out)?;
    Ok(out)
}

fn render_spec(layer: &dyn LayerData, path: &SpecPath, out: &mut String) -> anyhow::Result<()> {
    let indent = "  ".repeat(path.depth());
    let spec_type = layer.spec_type(path)?;
    let name = if path.is_absolute_root() {
        "/".to_string()
    } else if spec_type.is_property() {
        format!(".{}", path.name())
    } else {
        path.name().to_string()
    };
    writeln!(out, "{indent}{name} [{spec_type}]")?;

    for field in layer.list_fields(path)? {
        if let Some(value) = layer.field(path, &field)? {
            writeln!(out, "{indent}  - {field}: {}", describe(value))?;
        }
    }
    for child in layer.children(path)? {
        render_spec(layer, &child, out)?;
    }
    Ok(())
}

fn describe(value: &Value) -> String {
    match value {
        Value::Dictionary(dict) => format!("dictionary ({} keys)", dict.len()),
        Value::TimeSamples(samples) => format!("timeSamples ({} samples)", samples.len()),
        Value::Array(items) => format!("array ({} items)", items.len()),
        other => other.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lstitch_types::keys;

    fn write_layer(dir: &Path, name: &str, build: impl FnOnce(&mut MemoryLayer)) -> PathBuf {
        let mut layer = MemoryLayer::new(name);
        build(&mut layer);
        let file = dir.join(name);
        layer.save(&file).unwrap();
        file
    }

    fn root() -> SpecPath {
        SpecPath::absolute_root()
    }

    #[test]
    fn stitch_files_strongest_first() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_layer(dir.path(), "a.json", |l| {
            l.set_field(&root(), keys::START_TIME_CODE, Value::Int(10)).unwrap();
            l.set_field(&root(), keys::FRAMES_PER_SECOND, Value::Double(24.0)).unwrap();
        });
        let b = write_layer(dir.path(), "b.json", |l| {
            l.set_field(&root(), keys::START_TIME_CODE, Value::Int(5)).unwrap();
            l.set_field(&root(), keys::FRAMES_PER_SECOND, Value::Double(30.0)).unwrap();
            l.define_prim("/Anim").unwrap();
        });
        let c = write_layer(dir.path(), "c.json", |l| {
            l.set_field(&root(), keys::END_TIME_CODE, Value::Int(99)).unwrap();
            l.define_prim("/Set").unwrap();
        });
        let out = dir.path().join("out.json");

        let stitched = stitch_files(&[a, b, c], &out, StitchConfig::default()).unwrap();
        let reopened = MemoryLayer::open(&out).unwrap();
        assert_eq!(reopened, stitched);

        assert_eq!(
            reopened.field(&root(), &keys::START_TIME_CODE).unwrap(),
            Some(&Value::Int(5))
        );
        assert_eq!(
            reopened.field(&root(), &keys::FRAMES_PER_SECOND).unwrap(),
            Some(&Value::Double(24.0))
        );
        assert_eq!(
            reopened.field(&root(), &keys::END_TIME_CODE).unwrap(),
            Some(&Value::Int(99))
        );
        assert_eq!(
            reopened.children(&root()).unwrap(),
            vec![
                SpecPath::parse("/Anim").unwrap(),
                SpecPath::parse("/Set").unwrap()
            ]
        );
    }

    #[test]
    fn output_cannot_be_an_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_layer(dir.path(), "a.json", |_| {});
        let b = write_layer(dir.path(), "b.json", |_| {});
        let err = stitch_files(&[a, b.clone()], &b, StitchConfig::default()).unwrap_err();
        assert!(err.to_string().contains("also an input"));
    }

    #[test]
    fn missing_input_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = stitch_files(&[missing], &dir.path().join("out.json"), StitchConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn config_file_overrides_frame_fields() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("stitch.toml");
        std::fs::write(&file, "start_time_field = \"startFrame\"\n").unwrap();

        let config = load_config(Some(&file)).unwrap();
        assert_eq!(config.start_time_field.as_str(), "startFrame");
        assert_eq!(config.end_time_field, keys::END_TIME_CODE);
        assert_eq!(load_config(None).unwrap(), StitchConfig::default());
    }

    #[test]
    fn render_tree_lists_specs_and_fields() {
        let mut layer = MemoryLayer::new("shot");
        layer.set_field(&root(), keys::END_TIME_CODE, Value::Int(48)).unwrap();
        layer.define_attribute("/World.size").unwrap();

        let rendered = render_tree(&layer).unwrap();
        assert_eq!(
            rendered,
            "/ [pseudoRoot]\n  - endTimeCode: int\n  World [prim]\n    .size [attribute]\n"
        );
    }
}
