use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{Rgb, RgbImage, RgbaImage};
use log::{info, warn};
use pixel_hull::{
    AlphaStats, ColliderKind, ColliderSettings, ColliderSpec, DEFAULT_SWEEP_THRESHOLDS,
    ExtractionReport, Point2f, Rect, SpriteGeometry, analyze_sprite, generate_collider,
    threshold_sweep,
};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "ph_gallery")]
#[command(about = "Run the pixel-hull collider pipeline on sprite images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "collider")]
    Collider(ColliderArgs),
    #[command(name = "analyze")]
    Analyze(CommonArgs),
    #[command(name = "thresholds")]
    Thresholds(ThresholdArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Sprite pixels per local unit.
    #[arg(long, default_value_t = 100.0)]
    ppu: f32,
    /// Sprite rect inside the image as `x,y,w,h`, rows counted from the bottom.
    #[arg(long, value_delimiter = ',')]
    rect: Option<Vec<usize>>,
    /// Pivot as `x,y` in pixels from the rect's bottom-left corner.
    #[arg(long, value_delimiter = ',')]
    pivot: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Precise,
    Fast,
    Debug,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Polygon,
    EdgeLoop,
}

#[derive(Args, Debug, Clone)]
struct ColliderArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// JSON file with collider settings; missing fields take defaults.
    #[arg(long, conflicts_with = "preset")]
    settings: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,
    #[arg(long)]
    threshold: Option<u8>,
    #[arg(long)]
    tolerance: Option<f32>,
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
}

#[derive(Args, Debug, Clone)]
struct ThresholdArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, value_delimiter = ',')]
    thresholds: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize)]
struct ColliderDto {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<Vec<[f32; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    half_extents: Option<[f32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct ReportDto {
    sampled: Option<[usize; 2]>,
    occupied: usize,
    edge_cells: usize,
    traced: usize,
    closed: bool,
    unvisited: usize,
    after_corners: Option<usize>,
    after_simplify: Option<usize>,
    final_points: usize,
    fallback: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaCollider {
    image_size: [usize; 2],
    rect: [usize; 4],
    pivot: [f32; 2],
    pixels_per_unit: f32,
    settings: ColliderSettings,
    report: ReportDto,
}

#[derive(Debug, Clone, Serialize)]
struct AlphaStatsDto {
    min: u8,
    max: u8,
    mean: f32,
    transparent: usize,
    semi_transparent: usize,
    opaque: usize,
}

#[derive(Debug, Clone, Serialize)]
struct AnalysisDto {
    width: usize,
    height: usize,
    alpha: AlphaStatsDto,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli.cmd {
        Command::Collider(args) => run_collider(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Thresholds(args) => run_thresholds(args),
    }
}

fn run_collider(args: ColliderArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let (case_dir, img) = prepare_case(&args.common, "collider")?;
    let geom = sprite_geometry(&args.common, &img)?;

    let outcome = generate_collider(&img, &geom, &settings);
    if let Some(reason) = outcome.report.fallback {
        warn!("emitted fallback box: {reason}");
    }
    info!(
        "{} collider: {} edge cells, {} traced, {} final points",
        outcome.spec.kind_name(),
        outcome.report.edge_cells,
        outcome.report.traced,
        outcome.report.final_points
    );

    write_json(case_dir.join("collider.json"), &collider_dto(&outcome.spec))?;

    let rect = geom.rect();
    let pivot = geom.pivot();
    write_json(
        case_dir.join("meta.json"),
        &MetaCollider {
            image_size: [img.width() as usize, img.height() as usize],
            rect: [rect.x, rect.y, rect.width, rect.height],
            pivot: [pivot.x, pivot.y],
            pixels_per_unit: geom.pixels_per_unit(),
            settings,
            report: report_dto(&outcome.report),
        },
    )?;

    let overlay = render_collider_overlay(&img, &geom, &outcome.spec);
    overlay
        .save(case_dir.join("overlay.png"))
        .context("writing collider overlay.png")?;

    Ok(())
}

fn run_analyze(args: CommonArgs) -> Result<()> {
    let (case_dir, img) = prepare_case(&args, "analyze")?;
    let geom = sprite_geometry(&args, &img)?;

    let Some(analysis) = analyze_sprite(&img, &geom) else {
        bail!("could not read sprite pixels from {}", args.input.display());
    };
    info!(
        "{}x{} sprite: alpha {}..{} (mean {:.1}), {} transparent / {} semi / {} opaque",
        analysis.width,
        analysis.height,
        analysis.stats.min,
        analysis.stats.max,
        analysis.stats.mean,
        analysis.stats.transparent,
        analysis.stats.semi_transparent,
        analysis.stats.opaque
    );

    write_json(
        case_dir.join("analysis.json"),
        &AnalysisDto {
            width: analysis.width,
            height: analysis.height,
            alpha: alpha_stats_dto(&analysis.stats),
        },
    )?;

    Ok(())
}

fn run_thresholds(args: ThresholdArgs) -> Result<()> {
    let (case_dir, img) = prepare_case(&args.common, "thresholds")?;
    let geom = sprite_geometry(&args.common, &img)?;
    let thresholds = args
        .thresholds
        .unwrap_or_else(|| DEFAULT_SWEEP_THRESHOLDS.to_vec());

    let Some(steps) = threshold_sweep(&img, &geom, &thresholds) else {
        bail!("could not read sprite pixels from {}", args.common.input.display());
    };
    for p in &steps {
        info!(
            "threshold {:>3}: {} edge cells, {} points{}",
            p.threshold,
            p.edge_cells,
            p.points,
            if p.closed { "" } else { " (open)" }
        );
    }

    let rows: Vec<(u8, usize)> = steps.iter().map(|p| (p.threshold, p.points)).collect();
    write_csv(case_dir.join("thresholds.csv"), &rows)?;

    Ok(())
}

fn resolve_settings(args: &ColliderArgs) -> Result<ColliderSettings> {
    let mut settings = match &args.settings {
        Some(path) => {
            ensure_file_exists(path, "settings")?;
            read_json(path)
                .with_context(|| format!("reading collider settings at {}", path.display()))?
        }
        None => match args.preset {
            Preset::Default => ColliderSettings::default(),
            Preset::Precise => ColliderSettings::precise(),
            Preset::Fast => ColliderSettings::fast(),
            Preset::Debug => ColliderSettings::debug(),
        },
    };

    if let Some(threshold) = args.threshold {
        settings.alpha_threshold = threshold;
    }
    if let Some(tolerance) = args.tolerance {
        if !tolerance.is_finite() || tolerance < 0.0 {
            bail!("tolerance must be a non-negative number, got {tolerance}.");
        }
        settings.simplification_tolerance = tolerance;
    }
    if let Some(kind) = args.kind {
        settings.kind = match kind {
            KindArg::Polygon => ColliderKind::Polygon,
            KindArg::EdgeLoop => ColliderKind::EdgeLoop,
        };
    }

    Ok(settings)
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<(PathBuf, RgbaImage)> {
    ensure_file_exists(&common.input, "input")?;
    let img = image::open(&common.input)
        .with_context(|| format!("opening input image {}", common.input.display()))?
        .to_rgba8();

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    fs::copy(&common.input, case_dir.join("input.png")).with_context(|| {
        format!(
            "copying input {} -> {}",
            common.input.display(),
            case_dir.join("input.png").display()
        )
    })?;

    Ok((case_dir, img))
}

fn sprite_geometry(common: &CommonArgs, img: &RgbaImage) -> Result<SpriteGeometry> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let rect = match common.rect.as_deref() {
        Some(&[x, y, rw, rh]) => Rect::new(x, y, rw, rh),
        Some(other) => bail!("rect needs 4 values x,y,w,h, got {}.", other.len()),
        None => Rect::from_size(w, h),
    };
    if !rect.fits_within(w, h) {
        bail!("rect {rect:?} does not fit inside the {w}x{h} input image.");
    }

    let pivot = match common.pivot.as_deref() {
        Some(&[px, py]) => Point2f::new(px, py),
        Some(other) => bail!("pivot needs 2 values x,y, got {}.", other.len()),
        None => Point2f::new(rect.width as f32 * 0.5, rect.height as f32 * 0.5),
    };

    SpriteGeometry::new(rect, pivot, common.ppu)
        .with_context(|| format!("invalid --ppu {}", common.ppu))
}

fn collider_dto(spec: &ColliderSpec) -> ColliderDto {
    match spec {
        ColliderSpec::Polygon { points } | ColliderSpec::EdgeLoop { points } => ColliderDto {
            kind: spec.kind_name(),
            points: Some(points.iter().map(|p| [p.x, p.y]).collect()),
            half_extents: None,
        },
        ColliderSpec::Box { half_extents } => ColliderDto {
            kind: spec.kind_name(),
            points: None,
            half_extents: Some([half_extents.x, half_extents.y]),
        },
    }
}

fn report_dto(report: &ExtractionReport) -> ReportDto {
    ReportDto {
        sampled: report.sampled.map(|(w, h)| [w, h]),
        occupied: report.occupied,
        edge_cells: report.edge_cells,
        traced: report.traced,
        closed: report.closed,
        unvisited: report.unvisited,
        after_corners: report.after_corners,
        after_simplify: report.after_simplify,
        final_points: report.final_points,
        fallback: report.fallback.map(|r| r.to_string()),
    }
}

fn alpha_stats_dto(stats: &AlphaStats) -> AlphaStatsDto {
    AlphaStatsDto {
        min: stats.min,
        max: stats.max,
        mean: stats.mean,
        transparent: stats.transparent,
        semi_transparent: stats.semi_transparent,
        opaque: stats.opaque,
    }
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn write_csv(path: PathBuf, rows: &[(u8, usize)]) -> Result<()> {
    let mut file =
        fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "threshold,points").context("writing csv header")?;
    for (threshold, points) in rows {
        writeln!(file, "{threshold},{points}").context("writing csv row")?;
    }
    Ok(())
}

/// Sprite composited over dark grey with the collider outline on top.
fn render_collider_overlay(
    input: &RgbaImage,
    geom: &SpriteGeometry,
    spec: &ColliderSpec,
) -> RgbImage {
    let mut rgb = RgbImage::new(input.width(), input.height());
    for (x, y, p) in input.enumerate_pixels() {
        let a = p.0[3] as f32 / 255.0;
        let mix = |c: u8| (c as f32 * a + 48.0 * (1.0 - a)).round() as u8;
        rgb.put_pixel(x, y, Rgb([mix(p.0[0]), mix(p.0[1]), mix(p.0[2])]));
    }

    let outline: Vec<Point2f> = match spec {
        ColliderSpec::Polygon { points } | ColliderSpec::EdgeLoop { points } => points.clone(),
        ColliderSpec::Box { half_extents } => {
            let (hx, hy) = (half_extents.x, half_extents.y);
            vec![
                Point2f::new(-hx, -hy),
                Point2f::new(hx, -hy),
                Point2f::new(hx, hy),
                Point2f::new(-hx, hy),
            ]
        }
    };
    let color = if spec.is_box() {
        Rgb([255, 200, 64])
    } else {
        Rgb([64, 255, 96])
    };

    let image_pts: Vec<(f32, f32)> = outline
        .iter()
        .map(|&p| local_to_image(p, geom, input.height()))
        .collect();
    for (i, &a) in image_pts.iter().enumerate() {
        let b = image_pts[(i + 1) % image_pts.len()];
        draw_segment(&mut rgb, a, b, color);
    }
    for &(x, y) in &image_pts {
        draw_dot(&mut rgb, x, y, Rgb([255, 64, 64]));
    }

    rgb
}

/// Sprite-local units back to image pixels; image rows run top-down.
fn local_to_image(p: Point2f, geom: &SpriteGeometry, image_height: u32) -> (f32, f32) {
    let rect = geom.rect();
    let pivot = geom.pivot();
    let ppu = geom.pixels_per_unit();
    let gx = p.x * ppu + pivot.x + rect.x as f32;
    let gy = p.y * ppu + pivot.y + rect.y as f32;
    (gx, (image_height as f32 - 1.0) - gy)
}

fn draw_segment(img: &mut RgbImage, a: (f32, f32), b: (f32, f32), color: Rgb<u8>) {
    let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (a.0 + (b.0 - a.0) * t).round() as i32;
        let y = (a.1 + (b.1 - a.1) * t).round() as i32;
        put_checked(img, x, y, color);
    }
}

fn draw_dot(img: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    let xi = x.round() as i32;
    let yi = y.round() as i32;

    for dy in -1..=1 {
        for dx in -1..=1 {
            put_checked(img, xi + dx, yi + dy, color);
        }
    }
}

fn put_checked(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= img.width() || uy >= img.height() {
        return;
    }
    img.put_pixel(ux, uy, color);
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
