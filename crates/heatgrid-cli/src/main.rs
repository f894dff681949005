use futures::executor::block_on;
use heatgrid::render::raster::{self, RasterError, RasterOptions};
use heatgrid::render::{
    HeadlessError, HoverTarget, RenderError, SvgRenderOptions, layout_heatmap, render_dataset_svg,
    render_html_page,
};
use heatgrid::config::override_at;
use heatgrid::{DataSource, FileSource, HeatmapConfig, HttpSource, MonthIndex, StaticSource};
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    InvalidHover(String),
    Io(std::io::Error),
    Data(heatgrid::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::InvalidHover(raw) => write!(
                f,
                "invalid --hover value {raw:?} (expected <year>-<month>, month 1..=12)"
            ),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Data(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<heatgrid::Error> for CliError {
    fn from(value: heatgrid::Error) -> Self {
        Self::Data(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Render(value.into())
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Parse,
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Html,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }

    fn is_raster(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg | Self::Pdf)
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" => Ok(Self::Html),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    url: Option<String>,
    config: Option<String>,
    title: Option<String>,
    hover: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    svg_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "heatgrid-cli\n\
\n\
USAGE:\n\
  heatgrid-cli parse [--pretty] [--url <url> | <path>|-]\n\
  heatgrid-cli layout [--pretty] [--config <file>] [--url <url> | <path>|-]\n\
  heatgrid-cli [render] [--format svg|html|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--config <file>] [--title <text>] [--hover <year>-<month>] [--id <svg-id>] [--out <path>] [--url <url> | <path>|-]\n\
\n\
NOTES:\n\
  - With no <path> and no --url, the document is fetched from the configured sourceUrl.\n\
  - '-' reads the document from stdin.\n\
  - parse prints the normalized dataset (zero-based months) as JSON.\n\
  - --hover takes a one-based month (1753-1 is January 1753) and renders the tooltip shown.\n\
  - render prints SVG/HTML to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./heatmap.<ext>).\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--url" => args.url = Some(next_value(&mut it)?.clone()),
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--title" => args.title = Some(next_value(&mut it)?.clone()),
            "--hover" => args.hover = Some(next_value(&mut it)?.clone()),
            "--id" => args.svg_id = Some(next_value(&mut it)?.clone()),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                args.render_scale = next_value(&mut it)?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.input.is_some() && args.url.is_some() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

/// `<year>-<month>` with a one-based month, as in the source document.
fn parse_hover(raw: &str) -> Result<HoverTarget, CliError> {
    let invalid = || CliError::InvalidHover(raw.to_string());
    let (year, month) = raw.trim().rsplit_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month
        .parse::<i64>()
        .ok()
        .and_then(MonthIndex::from_one_based)
        .ok_or_else(invalid)?;
    Ok(HoverTarget { year, month })
}

fn load_config(args: &Args) -> Result<HeatmapConfig, CliError> {
    let config = match args.config.as_deref() {
        Some(path) => HeatmapConfig::from_path(path)?,
        None => HeatmapConfig::default(),
    };
    match &args.title {
        Some(title) => Ok(config.merged(&override_at("title", title.as_str().into()))?),
        None => Ok(config),
    }
}

fn build_source(args: &Args, config: &HeatmapConfig) -> Result<Box<dyn DataSource>, CliError> {
    Ok(match (args.input.as_deref(), args.url.as_deref()) {
        (Some("-"), _) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Box::new(StaticSource::new("<stdin>", buf))
        }
        (Some(path), _) => Box::new(FileSource::new(path)),
        (None, Some(url)) => Box::new(HttpSource::new(url)),
        (None, None) => Box::new(heatgrid::source_for_config(config)),
    })
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_bytes(bytes: &[u8], out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            std::io::stdout().lock().write_all(bytes)?;
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, bytes)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> String {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path)
            .with_extension(ext)
            .to_string_lossy()
            .to_string(),
        _ => format!("heatmap.{ext}"),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let hover = args.hover.as_deref().map(parse_hover).transpose()?;
    let source = build_source(&args, &config)?;
    tracing::info!(source = %source.describe(), "loading temperature document");
    let dataset = block_on(heatgrid::load_dataset(source.as_ref()))?;

    match args.command {
        Command::Parse => write_json(&dataset, args.pretty),
        Command::Layout => {
            let layout = layout_heatmap(&dataset, &config)?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let format = args.render_format;
            let svg_options = SvgRenderOptions {
                svg_id: args.svg_id.clone(),
                include_script: !format.is_raster(),
                hover,
            };
            let svg = render_dataset_svg(&dataset, &config, &svg_options)?;
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };

            let bytes = match format {
                RenderFormat::Svg => svg.into_bytes(),
                RenderFormat::Html => render_html_page(&svg, config.title.as_deref()).into_bytes(),
                RenderFormat::Png => raster::svg_to_png(&svg, &raster_options)?,
                RenderFormat::Jpeg => raster::svg_to_jpeg(&svg, &raster_options)?,
                RenderFormat::Pdf => raster::svg_to_pdf(&svg)?,
            };

            let out = match (&args.out, format.is_raster()) {
                (Some(out), _) => Some(out.clone()),
                (None, true) => Some(default_raster_out_path(
                    args.input.as_deref(),
                    format.extension(),
                )),
                (None, false) => None,
            };
            tracing::debug!(format = format.extension(), bytes = bytes.len(), "rendered heatmap");
            write_bytes(&bytes, out.as_deref())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::InvalidHover(_)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
