//! CLI definitions and command dispatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use font_axes::{FileParser, read_axis_table};
use varfont_core::{Action, AssetSync, AxisEdit, Block, Color, Options, State, Style, StyleEdit};

use crate::io::{FontFile, SettingsFile, TableParser};

#[derive(Parser)]
#[command(name = "varfont-styles", version)]
#[command(about = "Manage named styles of a variable font outside a host editor")]
pub struct Cli {
    /// Settings document standing in for the host settings store
    #[arg(short, long, default_value = "varfont-settings.json", global = true)]
    pub settings: PathBuf,

    /// Accept .woff2 assets
    #[arg(long, global = true)]
    pub woff2: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct AssetArgs {
    /// Font file attached as the asset
    pub font: PathBuf,
    /// Asset id (default: the font path)
    #[arg(long)]
    pub asset_id: Option<String>,
    /// Font family name used in CSS (default: the file stem)
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a font's variation axes
    Axes { font: PathBuf },
    /// Attach a font and reconcile styles with its axes
    Load {
        #[command(flatten)]
        asset: AssetArgs,
        /// Read axes from a JSON axis table instead of the font binary
        #[arg(long)]
        axes: Option<PathBuf>,
    },
    /// Add a style seeded from the current axes
    Add,
    /// Delete a style
    Delete { id: String },
    /// Edit a style's name, description or example text
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Edit one axis of a style
    Axis {
        id: String,
        tag: String,
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        default: Option<f64>,
        /// Expose a range instead of a single value
        #[arg(long, conflicts_with = "single")]
        range: bool,
        /// Back to a single value
        #[arg(long)]
        single: bool,
    },
    /// Add, remove or select a style colour
    Color {
        id: String,
        name: String,
        /// RGB as R,G,B
        #[arg(long, value_parser = parse_rgb)]
        rgb: Option<(u8, u8, u8)>,
        /// Remove colours with this name
        #[arg(long, conflicts_with = "select")]
        remove: bool,
        /// Also make it the style's current colour
        #[arg(long)]
        select: bool,
    },
    /// List styles and their axes
    List,
    /// Print the preview stylesheet
    Css {
        /// Font file for the @font-face rule
        font: Option<PathBuf>,
        #[arg(long, requires = "font")]
        asset_id: Option<String>,
        #[arg(long, requires = "font")]
        title: Option<String>,
    },
}

fn parse_rgb(s: &str) -> Result<(u8, u8, u8), String> {
    let parts: Vec<u8> = s
        .split(',')
        .map(|p| p.trim().parse::<u8>().map_err(|e| format!("{p}: {e}")))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [r, g, b] => Ok((*r, *g, *b)),
        _ => Err(format!("expected R,G,B: {s}")),
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Commands::Axes { font } = &self.command {
            return show_axes(font);
        }

        let settings = SettingsFile::new(self.settings);
        settings.validate()?;
        let options = Options::new().accept_woff2(self.woff2);
        self.command.run(Block::open(settings, options))
    }
}

impl Commands {
    pub fn run(self, mut block: Block<SettingsFile>) -> Result<()> {
        match self {
            Commands::Axes { font } => show_axes(&font)?,
            Commands::Load { asset, axes } => {
                let font = FontFile::new(&asset.font);
                let attached = font.asset(asset.asset_id.as_deref(), asset.title.as_deref());
                let outcome = match axes {
                    Some(path) => block.sync_asset(Some(&attached), &TableParser::from_file(&path)?),
                    None => block.sync_asset(Some(&attached), &FileParser),
                }?;
                match outcome {
                    AssetSync::Rejected => {
                        let message = block.error_message().unwrap_or_default();
                        bail!("{}: {message}", font.path().display());
                    }
                    outcome => println!("{}: {outcome:?}", attached.id),
                }
            }
            Commands::Add => {
                if let Some(id) = block.dispatch(Action::Add)? {
                    println!("{id}");
                }
            }
            Commands::Delete { id } => {
                require_style(block.state(), &id)?;
                block.dispatch(Action::Delete { id })?;
            }
            Commands::Edit { id, name, description, text } => {
                require_style(block.state(), &id)?;
                let partial = StyleEdit {
                    name,
                    font_description: description,
                    example_text: text,
                    ..StyleEdit::default()
                };
                block.dispatch(Action::Edit { id, partial })?;
            }
            Commands::Axis { id, tag, value, min, max, default, range, single } => {
                require_style(block.state(), &id)?
                    .dimensions
                    .get(&tag)
                    .with_context(|| format!("Style {id} has no axis {tag}"))?;

                let mode = (range || single).then_some(range);
                let partial = AxisEdit {
                    value,
                    editor_min_value: min,
                    editor_max_value: max,
                    editor_default: default,
                    is_value_range: mode,
                };
                if partial.is_empty() {
                    bail!("Nothing to change; pass --value, --min, --max, --default, --range or --single");
                }
                // Mode switches first so explicit values land in the new mode.
                if mode.is_some() {
                    block.dispatch(Action::EditDimensions {
                        id: id.clone(),
                        tag: tag.clone(),
                        partial: AxisEdit::range_mode(range),
                    })?;
                }
                let values = AxisEdit { is_value_range: None, ..partial };
                if !values.is_empty() {
                    block.dispatch(Action::EditDimensions { id: id.clone(), tag: tag.clone(), partial: values })?;
                }

                if let Some(axis) = block.state().style(&id).and_then(|s| s.dimensions.get(&tag)) {
                    println!("{tag}: {}", axis.display_value());
                }
            }
            Commands::Color { id, name, rgb, remove, select } => {
                require_style(block.state(), &id)?;
                let (red, green, blue) = rgb.unwrap_or_default();
                let color = Color::rgb(&name, red, green, blue);
                if remove && rgb.is_some() {
                    log::warn!("--rgb is ignored when removing");
                }
                if !remove && rgb.is_none() {
                    bail!("--rgb is required when adding a colour");
                }
                block.dispatch(Action::EditAllowedColors {
                    id: id.clone(),
                    is_added: !remove,
                    color: color.clone(),
                })?;
                if select {
                    let partial = StyleEdit { current_color: Some(Some(color)), ..StyleEdit::default() };
                    block.dispatch(Action::Edit { id, partial })?;
                }
            }
            Commands::List => print_styles(block.state()),
            Commands::Css { font, asset_id, title } => {
                let attached = font
                    .map(|path| FontFile::new(path).asset(asset_id.as_deref(), title.as_deref()));
                print!("{}", block.stylesheet(attached.as_ref()));
            }
        }
        Ok(())
    }
}

fn require_style<'a>(state: &'a State, id: &str) -> Result<&'a Style> {
    state.style(id).with_context(|| format!("No style with id {id}"))
}

fn show_axes(path: &Path) -> Result<()> {
    let data = FontFile::new(path).read()?;
    let Some(table) = read_axis_table(&data)
        .with_context(|| format!("Failed to parse font: {}", path.display()))?
    else {
        println!("Not a variable font");
        return Ok(());
    };

    println!("Variable font axes:");
    for axis in table.iter() {
        println!(
            "  {:4}  {:6.0} .. {:6.0} (default: {:6.0})",
            axis.tag.as_deref().unwrap_or("????"),
            axis.min_value.unwrap_or(f64::NAN),
            axis.max_value.unwrap_or(f64::NAN),
            axis.default_value.unwrap_or(f64::NAN),
        );
    }
    Ok(())
}

fn print_styles(state: &State) {
    if !state.has_styles() {
        println!("No styles");
        return;
    }
    for style in state.styles() {
        println!("{}  {}", style.id, style.name);
        if !style.example_text.is_empty() {
            println!("    \"{}\"", style.example_text);
        }
        for axis in style.dimensions.values() {
            let mode = if axis.is_value_range { "range" } else { "value" };
            println!("    {:4}  {mode:5}  {}", axis.tag, axis.display_value());
        }
    }
}
