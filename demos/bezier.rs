//! Render cubic bezier curve defined by four control points into an image
#![deny(warnings)]

use bezier_canvas::*;
use std::{
    env,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Bmp,
    Ppm,
    Png,
}

impl Format {
    fn from_path(path: &str) -> Result<Self, Error> {
        if path == "-" {
            return Ok(Format::Bmp);
        }
        let ext = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("bmp") => Ok(Format::Bmp),
            Some("ppm") => Ok(Format::Ppm),
            Some("png") => Ok(Format::Png),
            _ => Err(format!("unsupported output format: {}", path).into()),
        }
    }
}

#[derive(Debug)]
struct Args {
    points: Vec<Point>,
    output_file: String,
    options: RenderOptions,
    markers: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            points: Vec::new(),
            output_file: String::new(),
            options: RenderOptions::default(),
            markers: false,
        };
        let mut step = None;
        let mut bg = None;
        let mut help = false;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "bezier".to_string());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    help = true;
                    break;
                }
                "-c" => {
                    let path = args.next().ok_or("-c requires argument")?;
                    result.options = RenderOptions::from_json(File::open(path)?)?;
                }
                "-s" => {
                    let value: Scalar = args.next().ok_or("-s requires argument")?.parse()?;
                    step.replace(value);
                }
                "-bg" => {
                    let color: Rgb = args
                        .next()
                        .ok_or("-bg requires color #rrggbb argument")?
                        .parse()?;
                    bg.replace(color);
                }
                "-m" => {
                    result.markers = true;
                }
                _ if result.points.len() < CONTROL_POINTS_COUNT => {
                    result.points.push(arg.parse()?);
                }
                _ if result.output_file.is_empty() => {
                    result.output_file = arg;
                }
                _ => return Err("unexpected positional argument".into()),
            }
        }
        // command line flags override configuration file
        if let Some(step) = step {
            result.options.step = step;
        }
        if let Some(bg) = bg {
            result.options.background = bg;
        }
        if help || result.points.len() < CONTROL_POINTS_COUNT || result.output_file.is_empty() {
            eprintln!("Render cubic bezier curve with naive and anti-aliased rasterizers");
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-c <options.json>] [-s <step>] [-bg <color>] [-m] <x,y> <x,y> <x,y> <x,y> <out>",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -c <options.json>  render options in JSON format");
            eprintln!(
                "    -s <step>          curve parameter step (default: {})",
                DEFAULT_STEP
            );
            eprintln!("    -bg <color>        background color");
            eprintln!("    -m                 mark control points");
            eprintln!("    <x,y>              control point");
            eprintln!("    <out>              output image (.bmp, .ppm, .png, '-' means BMP to stdout)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

fn save(canvas: &Canvas, output_file: &str) -> Result<(), Error> {
    let format = Format::from_path(output_file)?;
    let out: Box<dyn Write> = if output_file == "-" {
        Box::new(std::io::stdout())
    } else {
        Box::new(BufWriter::new(File::create(output_file)?))
    };
    match format {
        Format::Bmp => canvas.write_bmp(out)?,
        Format::Ppm => canvas.write_ppm(out)?,
        #[cfg(feature = "png")]
        Format::Png => canvas.write_png(out)?,
        #[cfg(not(feature = "png"))]
        Format::Png => return Err("PNG output requires `png` feature".into()),
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let mut session = RenderSession::new(args.options)?;
    for point in args.points {
        session.push_point(point)?;
    }
    if args.markers {
        session.mark_control_points();
    }
    session.render()?;

    tracing::debug_span!("[save]", file = args.output_file.as_str())
        .in_scope(|| save(session.canvas(), &args.output_file))?;
    Ok(())
}
