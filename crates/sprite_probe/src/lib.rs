use std::io::Write;
use std::path::{Path, PathBuf};

use engine::{find_content_bounds, Rect, RgbRange, Texture};

/// Probed when no image is given, relative to the project root.
pub const DEFAULT_IMAGE: &str = "assets/graphics/elevator.png";
/// Where the first idle pose sits on the elevator sheet, with slack.
pub const DEFAULT_REGION: Rect = Rect::new(0, 80, 240, 160);
/// The sheet's green backdrop, loosely.
pub const DEFAULT_BACKGROUND: RgbRange = RgbRange {
    min: [20, 70, 40],
    max: [35, 90, 60],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub image: PathBuf,
    pub region: Rect,
    pub background: RgbRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeCommand {
    Help,
    Probe(ProbeOptions),
}

pub fn parse_args(args: &[String]) -> Result<ProbeCommand, String> {
    if args.first().is_some_and(|arg| arg == "-h" || arg == "--help") {
        return Ok(ProbeCommand::Help);
    }

    let mut image: Option<PathBuf> = None;
    let mut region = DEFAULT_REGION;
    let mut background = DEFAULT_BACKGROUND;
    let mut index = 0usize;
    while index < args.len() {
        let arg = args[index].as_str();
        match arg {
            "--region" | "--bg-min" | "--bg-max" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| format!("missing value for {arg}"))?;
                match arg {
                    "--region" => region = parse_region(value)?,
                    "--bg-min" => background.min = parse_rgb(arg, value)?,
                    _ => background.max = parse_rgb(arg, value)?,
                }
                index += 2;
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{flag}'"));
            }
            path => {
                if image.is_some() {
                    return Err(format!("unexpected extra argument '{path}'"));
                }
                image = Some(PathBuf::from(path));
                index += 1;
            }
        }
    }

    let image = image.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE));
    if (0..3).any(|channel| background.min[channel] > background.max[channel]) {
        return Err("--bg-min must not exceed --bg-max in any channel".to_string());
    }
    Ok(ProbeCommand::Probe(ProbeOptions {
        image,
        region,
        background,
    }))
}

pub fn parse_region(raw: &str) -> Result<Rect, String> {
    let parts = split_fields(raw, 4)
        .ok_or_else(|| format!("invalid --region value '{raw}' (expected x,y,w,h)"))?;
    let x = parts[0]
        .parse::<i32>()
        .map_err(|_| format!("invalid --region x '{}'", parts[0]))?;
    let y = parts[1]
        .parse::<i32>()
        .map_err(|_| format!("invalid --region y '{}'", parts[1]))?;
    let w = parts[2]
        .parse::<u32>()
        .map_err(|_| format!("invalid --region width '{}'", parts[2]))?;
    let h = parts[3]
        .parse::<u32>()
        .map_err(|_| format!("invalid --region height '{}'", parts[3]))?;
    if w == 0 || h == 0 {
        return Err(format!("--region '{raw}' is empty"));
    }
    Ok(Rect::new(x, y, w, h))
}

pub fn parse_rgb(flag: &str, raw: &str) -> Result<[u8; 3], String> {
    let parts = split_fields(raw, 3)
        .ok_or_else(|| format!("invalid {flag} value '{raw}' (expected r,g,b)"))?;
    let mut rgb = [0u8; 3];
    for (channel, part) in rgb.iter_mut().zip(parts) {
        *channel = part
            .parse::<u8>()
            .map_err(|_| format!("invalid {flag} channel '{part}' (expected 0-255)"))?;
    }
    Ok(rgb)
}

fn split_fields(raw: &str, count: usize) -> Option<Vec<&str>> {
    let parts = raw.split(',').map(str::trim).collect::<Vec<_>>();
    (parts.len() == count).then_some(parts)
}

pub fn load_image(path: &Path) -> Result<Texture, String> {
    Texture::load_path(path).map_err(|error| error.to_string())
}

pub fn format_report(image: &Texture, region: Rect, bounds: Rect) -> String {
    [
        format!(
            "// {} ({}x{}), region Rect::new({}, {}, {}, {})",
            image.key(),
            image.width(),
            image.height(),
            region.x,
            region.y,
            region.w,
            region.h
        ),
        format!(
            "Rect::new({}, {}, {}, {})",
            bounds.x, bounds.y, bounds.w, bounds.h
        ),
        format!(
            "top_left: ({}, {}) bottom_right: ({}, {})",
            bounds.x,
            bounds.y,
            bounds.right() - 1,
            bounds.bottom() - 1
        ),
    ]
    .join("\n")
}

pub fn run<W: Write>(options: &ProbeOptions, stdout: &mut W) -> Result<(), String> {
    let image = load_image(&options.image)?;
    let bounds = find_content_bounds(&image, options.region, options.background)
        .ok_or_else(|| "no non-background content found in search region".to_string())?;
    writeln!(stdout, "{}", format_report(&image, options.region, bounds))
        .map_err(|error| format!("write report: {error}"))
}

pub fn usage_text() -> String {
    [
        "sprite_probe - find sprite bounds on a sheet",
        "",
        "Usage:",
        "  sprite_probe [<image>] [--region x,y,w,h] [--bg-min r,g,b] [--bg-max r,g,b]",
        "",
        "Defaults:",
        "  <image> assets/graphics/elevator.png",
        "  --region 0,80,240,160",
        "  --bg-min 20,70,40",
        "  --bg-max 35,90,60",
    ]
    .join("\n")
}
