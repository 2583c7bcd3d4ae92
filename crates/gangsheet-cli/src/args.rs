//! Command-line definition and the style-cursor fold.
//!
//! Most options apply only to the pictures named after them, so parsing has
//! to know how options and filenames interleave on the command line. clap's
//! derive API cannot express that; this module uses the builder API and
//! recovers the interleaving from [`ArgMatches::indices_of`], then folds the
//! events into one immutable [`PictureStyle`] snapshot per picture.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use gangsheet_core::picture::{FitMode, PictureStyle};

use crate::units::parse_dimension;

/// Fully parsed invocation: page geometry plus one style snapshot per
/// picture.
#[derive(Debug)]
pub struct Cli {
    /// Physical page size, in mm.
    pub page_width: f64,
    pub page_height: f64,
    /// Margin between the page edge and all pictures, in mm.
    pub margin: f64,
    pub output: PathBuf,
    pub layout_json: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: u8,
    pub progress: bool,
    pub pictures: Vec<(PathBuf, PictureStyle)>,
}

pub fn command() -> Command {
    Command::new("gangsheet")
        .about(
            "Automatically arrange multiple, variously-sized photographs, \
             fitting as many as possible per page",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("page-dimensions")
                .long("page-dimensions")
                .short('p')
                .num_args(2)
                .value_names(["WIDTH", "HEIGHT"])
                .help(
                    "The page dimensions. Defaults to A4 (210mm 297mm). \
                     Must appear before picture filenames",
                ),
        )
        .arg(
            Arg::new("margin")
                .long("margin")
                .short('m')
                .num_args(1)
                .value_name("SIZE")
                .help(
                    "The margin between the page edge and all pictures. \
                     Defaults to 5mm. Must appear before picture filenames",
                ),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .num_args(1)
                .value_name("FILENAME")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("out.pdf")
                .help("The output filename"),
        )
        .arg(
            Arg::new("layout-json")
                .long("layout-json")
                .num_args(1)
                .value_name("FILENAME")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Also export the computed layout as JSON"),
        )
        .arg(
            Arg::new("picture-dimensions")
                .long("picture-dimensions")
                .short('d')
                .num_args(2)
                .value_names(["WIDTH", "HEIGHT"])
                .action(ArgAction::Append)
                .help(
                    "The picture dimensions (defaults to 3\" 4\"). \
                     Applies only to pictures following it",
                ),
        )
        .arg(
            Arg::new("crop")
                .long("crop")
                .short('c')
                .action(ArgAction::Count)
                .help(
                    "Scale and crop pictures to fill the picture dimensions \
                     exactly (default; see --scale). Applies only to pictures \
                     following it",
                ),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .short('s')
                .action(ArgAction::Count)
                .help(
                    "Scale pictures to the largest size which fits entirely \
                     within the picture dimensions, keeping the original \
                     aspect ratio (see --crop). Applies only to pictures \
                     following it",
                ),
        )
        .arg(
            Arg::new("alignment")
                .long("alignment")
                .short('a')
                .num_args(2)
                .value_names(["X-ALIGNMENT", "Y-ALIGNMENT"])
                .action(ArgAction::Append)
                .help(
                    "Which part of the picture to keep when cropping, each \
                     0.0 to 1.0 (default 0.5 0.5, the center). Applies only \
                     to pictures following it",
                ),
        )
        .arg(
            Arg::new("rotate-for-best-fit")
                .long("rotate-for-best-fit")
                .short('r')
                .action(ArgAction::Count)
                .help(
                    "Allow pictures to be rotated to better fit the picture \
                     dimensions (default; see --no-rotate-for-best-fit). \
                     Applies only to pictures following it",
                ),
        )
        .arg(
            Arg::new("no-rotate-for-best-fit")
                .long("no-rotate-for-best-fit")
                .short('R')
                .action(ArgAction::Count)
                .help(
                    "Do not rotate pictures to better fit the picture \
                     dimensions. Applies only to pictures following it",
                ),
        )
        .arg(
            Arg::new("max-dpi")
                .long("max-dpi")
                .short('D')
                .num_args(1)
                .value_name("DPI")
                .action(ArgAction::Append)
                .help(
                    "Maximum resolution for the images in the output PDF, in \
                     dots per inch. Defaults to 300; 0 keeps the original \
                     resolution. Applies only to pictures following it",
                ),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Quiet mode (overrides verbose)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase verbosity (-v, -vv)"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .action(ArgAction::SetTrue)
                .help("Disable the progress bar"),
        )
        .arg(
            Arg::new("pictures")
                .num_args(0..)
                .value_name("FILENAME")
                .value_parser(clap::value_parser!(PathBuf))
                .help("The filenames of the pictures to be printed"),
        )
}

/// One occurrence of a positional-sensitive option or filename, tagged with
/// its command-line index.
enum Event {
    Dimensions(f64, f64),
    Crop,
    Scale,
    Alignment(f64, f64),
    Rotate,
    NoRotate,
    MaxDpi(Option<f64>),
    File(PathBuf),
}

pub fn parse(matches: &ArgMatches) -> Result<Cli> {
    let first_picture = matches.indices_of("pictures").and_then(|idx| idx.min());
    for id in ["page-dimensions", "margin"] {
        if let (Some(mut idx), Some(first)) = (matches.indices_of(id), first_picture) {
            if idx.any(|i| i > first) {
                bail!("--{id} must appear before picture filenames");
            }
        }
    }

    let (page_width, page_height) = match matches.get_many::<String>("page-dimensions") {
        Some(values) => {
            let values: Vec<&String> = values.collect();
            (
                parse_dimension(values[0]).context("invalid page width")?,
                parse_dimension(values[1]).context("invalid page height")?,
            )
        }
        None => (210.0, 297.0),
    };
    let margin = match matches.get_one::<String>("margin") {
        Some(value) => parse_dimension(value).context("invalid margin")?,
        None => 5.0,
    };

    let mut events = style_events(matches)?;
    if let (Some(paths), Some(indices)) = (
        matches.get_many::<PathBuf>("pictures"),
        matches.indices_of("pictures"),
    ) {
        for (path, index) in paths.zip(indices) {
            events.push((index, Event::File(path.clone())));
        }
    }
    events.sort_by_key(|(index, _)| *index);

    let mut cursor = PictureStyle::default();
    let mut pictures = Vec::new();
    for (_, event) in events {
        match event {
            Event::Dimensions(width, height) => {
                cursor.desired_width = width;
                cursor.desired_height = height;
            }
            Event::Crop => cursor.fit_mode = FitMode::Crop,
            Event::Scale => cursor.fit_mode = FitMode::Scale,
            Event::Alignment(x, y) => {
                cursor.x_alignment = x;
                cursor.y_alignment = y;
            }
            Event::Rotate => cursor.rotate_for_best_fit = true,
            Event::NoRotate => cursor.rotate_for_best_fit = false,
            Event::MaxDpi(pixels_per_mm) => cursor.pixels_per_mm = pixels_per_mm,
            Event::File(path) => pictures.push((path, cursor.clone())),
        }
    }

    Ok(Cli {
        page_width,
        page_height,
        margin,
        output: matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("out.pdf")),
        layout_json: matches.get_one::<PathBuf>("layout-json").cloned(),
        quiet: matches.get_flag("quiet"),
        verbose: matches.get_count("verbose"),
        progress: !matches.get_flag("no-progress"),
        pictures,
    })
}

/// Collect every style-cursor option occurrence with its index.
fn style_events(matches: &ArgMatches) -> Result<Vec<(usize, Event)>> {
    let mut events: Vec<(usize, Event)> = Vec::new();

    if let (Some(values), Some(indices)) = (
        matches.get_many::<String>("picture-dimensions"),
        matches.indices_of("picture-dimensions"),
    ) {
        let values: Vec<&String> = values.collect();
        let indices: Vec<usize> = indices.collect();
        for (pair, index) in values.chunks(2).zip(indices.chunks(2)) {
            let width = parse_dimension(pair[0]).context("invalid picture width")?;
            let height = parse_dimension(pair[1]).context("invalid picture height")?;
            events.push((index[0], Event::Dimensions(width, height)));
        }
    }

    if let (Some(values), Some(indices)) = (
        matches.get_many::<String>("alignment"),
        matches.indices_of("alignment"),
    ) {
        let values: Vec<&String> = values.collect();
        let indices: Vec<usize> = indices.collect();
        for (pair, index) in values.chunks(2).zip(indices.chunks(2)) {
            let x: f64 = pair[0].parse().context("invalid alignment")?;
            let y: f64 = pair[1].parse().context("invalid alignment")?;
            if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
                bail!("alignment not in range 0.0 to 1.0");
            }
            events.push((index[0], Event::Alignment(x, y)));
        }
    }

    if let (Some(values), Some(indices)) = (
        matches.get_many::<String>("max-dpi"),
        matches.indices_of("max-dpi"),
    ) {
        for (value, index) in values.zip(indices) {
            let dpi: f64 = value.parse().context("invalid DPI")?;
            if !dpi.is_finite() || dpi < 0.0 {
                bail!("invalid DPI {dpi}");
            }
            let pixels_per_mm = (dpi > 0.0).then_some(dpi / 25.4);
            events.push((index, Event::MaxDpi(pixels_per_mm)));
        }
    }

    for id in ["crop", "scale", "rotate-for-best-fit", "no-rotate-for-best-fit"] {
        // Count flags default to 0 when absent; only command-line
        // occurrences carry meaningful indices.
        if matches.value_source(id) != Some(clap::parser::ValueSource::CommandLine) {
            continue;
        }
        if let Some(indices) = matches.indices_of(id) {
            for index in indices {
                let event = match id {
                    "crop" => Event::Crop,
                    "scale" => Event::Scale,
                    "rotate-for-best-fit" => Event::Rotate,
                    _ => Event::NoRotate,
                };
                events.push((index, event));
            }
        }
    }

    Ok(events)
}
