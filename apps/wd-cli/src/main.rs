use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;
use wd_app::pages::{GeneralView, TopsDstsView, WellLogsView};
use wd_app::{
    AppResult, AxisScale, CrossPlotInput, Dashboard, LoadOutcome, MapInput, PageInput,
    PageOutcome, PageView, TopsDstsInput, config_service, inline_message,
};
use wd_core::{DatasetKind, Table, UploadKind, UploadRequest};
use wd_session::{SessionRegistry, SessionStore};

#[derive(Parser)]
#[command(name = "wd-cli")]
#[command(about = "WellDash CLI - exploration block, well and well-log viewer", long_about = None)]
struct Cli {
    /// Dashboard configuration file (YAML, or JSON by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print the page model as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    ValidateConfig {
        /// Path to the configuration file
        path: PathBuf,
    },
    /// Basemap of blocks with the selected wells
    Map {
        #[command(flatten)]
        maps: MapArgs,
    },
    /// Attribute table of the selected wells
    Wells {
        #[command(flatten)]
        maps: MapArgs,
    },
    /// Formation tops strip of a well
    Tops {
        #[command(flatten)]
        workbook: WorkbookArgs,
    },
    /// Drill-stem test strip of a well
    Dsts {
        #[command(flatten)]
        workbook: WorkbookArgs,
    },
    /// Cross-plot of two LAS curves
    Crossplot {
        /// LAS file
        las: PathBuf,
        /// X-axis curve (defaults to the depth curve)
        #[arg(short)]
        x: Option<String>,
        /// Y-axis curve (defaults to the depth curve)
        #[arg(short)]
        y: Option<String>,
        /// Curve used to color the points
        #[arg(long)]
        color: Option<String>,
        /// Logarithmic X axis
        #[arg(long)]
        log_x: bool,
        /// Logarithmic Y axis
        #[arg(long)]
        log_y: bool,
    },
    /// Header sections of a LAS file
    LasInfo {
        /// LAS file
        las: PathBuf,
    },
}

#[derive(clap::Args)]
struct MapArgs {
    /// Block shapefile: the .shp path, or every component of the set
    #[arg(long, num_args = 1.., required = true)]
    blocks: Vec<PathBuf>,
    /// Well shapefile: the .shp path, or every component of the set
    #[arg(long, num_args = 1.., required = true)]
    wells: Vec<PathBuf>,
    /// Block to highlight
    #[arg(long)]
    block: Option<String>,
    /// Well to show; repeat for several
    #[arg(long = "well")]
    selected: Vec<String>,
}

#[derive(clap::Args)]
struct WorkbookArgs {
    /// Excel workbook with well_top and well_dst sheets
    workbook: PathBuf,
    /// Well to plot (defaults to the first well in the sheet)
    #[arg(long)]
    well: Option<String>,
    /// Top of the depth window, metres MD
    #[arg(long)]
    start: Option<f64>,
    /// Bottom of the depth window, metres MD
    #[arg(long)]
    stop: Option<f64>,
}

impl WorkbookArgs {
    fn range(&self, dash: &Dashboard) -> Option<(f64, f64)> {
        let defaults = &dash.config().depth_plot;
        match (self.start, self.stop) {
            (None, None) => None,
            (start, stop) => Some((
                start.unwrap_or(defaults.start_md_m),
                stop.unwrap_or(defaults.stop_md_m),
            )),
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Commands::ValidateConfig { path } = &cli.command {
        return cmd_validate_config(path);
    }

    let config = config_service::load_config(cli.config.as_deref())?;
    let dash = Dashboard::with_default_parsers(config);

    match cli.command {
        Commands::ValidateConfig { .. } => Ok(()),
        Commands::Map { maps } => {
            let page = run_map_page(&dash, &maps)?;
            emit(&page, cli.json, |view| {
                if let PageView::General(view) = view {
                    print_map(view);
                }
            })
        }
        Commands::Wells { maps } => {
            let page = run_map_page(&dash, &maps)?;
            emit(&page, cli.json, |view| {
                if let PageView::General(view) = view {
                    print_wells(view);
                }
            })
        }
        Commands::Tops { workbook } => {
            let input = PageInput::TopsDsts(TopsDstsInput {
                top_well: workbook.well.clone(),
                top_range: workbook.range(&dash),
                ..Default::default()
            });
            let page = run_workbook_page(&dash, &workbook.workbook, input)?;
            emit(&page, cli.json, |view| {
                if let PageView::TopsDsts(view) = view {
                    print_tops(view);
                }
            })
        }
        Commands::Dsts { workbook } => {
            let input = PageInput::TopsDsts(TopsDstsInput {
                dst_well: workbook.well.clone(),
                dst_range: workbook.range(&dash),
                ..Default::default()
            });
            let page = run_workbook_page(&dash, &workbook.workbook, input)?;
            emit(&page, cli.json, |view| {
                if let PageView::TopsDsts(view) = view {
                    print_dsts(view);
                }
            })
        }
        Commands::Crossplot {
            las,
            x,
            y,
            color,
            log_x,
            log_y,
        } => {
            let scale = |log: bool| if log { AxisScale::Log } else { AxisScale::Linear };
            let input = PageInput::WellLogs(CrossPlotInput {
                x,
                y,
                color,
                x_scale: scale(log_x),
                y_scale: scale(log_y),
            });
            let page = run_las_page(&dash, &las, input)?;
            emit(&page, cli.json, |view| {
                if let PageView::WellLogs(view) = view {
                    print_crossplot(view);
                }
            })
        }
        Commands::LasInfo { las } => {
            let input = PageInput::WellLogs(CrossPlotInput::default());
            let page = run_las_page(&dash, &las, input)?;
            emit(&page, cli.json, |view| {
                if let PageView::WellLogs(view) = view {
                    print_las_info(view);
                }
            })
        }
    }
}

fn cmd_validate_config(path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", path.display());
    let config = config_service::load_config(Some(path))?;
    config_service::validate(&config)?;
    println!("✓ Configuration is valid");
    Ok(())
}

/// Runs the uploads of one session, then renders the page.
fn run_session(
    dash: &Dashboard,
    uploads: Vec<(DatasetKind, Vec<UploadRequest>)>,
    input: PageInput,
) -> AppResult<PageOutcome<PageView>> {
    let mut registry = SessionRegistry::new();
    let id = registry.open();
    let page = render_session(dash, &mut registry.get_mut(id)?.store, uploads, &input);
    registry.close(id)?;
    Ok(page)
}

fn render_session(
    dash: &Dashboard,
    store: &mut SessionStore,
    uploads: Vec<(DatasetKind, Vec<UploadRequest>)>,
    input: &PageInput,
) -> PageOutcome<PageView> {
    for (dataset, files) in uploads {
        match dash.load(store, dataset, &files) {
            Ok(LoadOutcome::Loaded(report)) => println!(
                "✓ Loaded {} from {} ({} rows{})",
                report.dataset,
                report.display_name,
                report.rows,
                if report.from_cache { ", cached" } else { "" }
            ),
            Ok(LoadOutcome::Skipped) => println!("  No {} files selected", dataset),
            Err(err) => eprintln!("✗ {}", inline_message(&err)),
        }
    }
    dash.render(store, input)
}

fn run_map_page(dash: &Dashboard, args: &MapArgs) -> AppResult<PageOutcome<PageView>> {
    let uploads = vec![
        (DatasetKind::Blocks, read_shapefile(&args.blocks)?),
        (DatasetKind::Wells, read_shapefile(&args.wells)?),
    ];
    let input = PageInput::General(MapInput {
        block: args.block.clone(),
        wells: args.selected.clone(),
    });
    run_session(dash, uploads, input)
}

fn run_workbook_page(
    dash: &Dashboard,
    path: &Path,
    input: PageInput,
) -> AppResult<PageOutcome<PageView>> {
    let files = read_uploads(&[path.to_path_buf()], UploadKind::Spreadsheet)?;
    run_session(dash, vec![(DatasetKind::WellData, files)], input)
}

fn run_las_page(dash: &Dashboard, path: &Path, input: PageInput) -> AppResult<PageOutcome<PageView>> {
    let files = read_uploads(&[path.to_path_buf()], UploadKind::WellLog)?;
    run_session(dash, vec![(DatasetKind::WellLog, files)], input)
}

/// Reads the given files. Paths that do not exist are skipped, the same as a
/// cancelled file picker.
fn read_uploads(paths: &[PathBuf], kind: UploadKind) -> AppResult<Vec<UploadRequest>> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.exists() {
            warn!(path = %path.display(), "File not found, skipping");
            continue;
        }
        let bytes = std::fs::read(path)?;
        uploads.push(UploadRequest::new(path.display().to_string(), kind, bytes));
    }
    Ok(uploads)
}

/// A single `.shp` path pulls in its `.shx`, `.dbf` and `.prj` siblings.
fn read_shapefile(paths: &[PathBuf]) -> AppResult<Vec<UploadRequest>> {
    let is_shp = |p: &PathBuf| {
        p.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"))
    };
    let paths = match paths {
        [shp] if is_shp(shp) => {
            let mut set = vec![shp.clone()];
            for ext in ["shx", "dbf", "prj"] {
                let sibling = shp.with_extension(ext);
                if sibling.exists() {
                    set.push(sibling);
                }
            }
            set
        }
        _ => paths.to_vec(),
    };
    read_uploads(&paths, UploadKind::ShapefileComponent)
}

fn emit(
    page: &PageOutcome<PageView>,
    json: bool,
    print: impl FnOnce(&PageView),
) -> AppResult<()> {
    if json {
        let text = serde_json::to_string_pretty(page).map_err(std::io::Error::from)?;
        println!("{}", text);
        return Ok(());
    }
    match page {
        PageOutcome::Prompt(msg) => println!("{}", msg),
        PageOutcome::Failed(msg) => eprintln!("✗ {}", msg),
        PageOutcome::Ready(view) => print(view),
    }
    Ok(())
}

fn print_table(table: &Table) {
    if table.is_empty() {
        println!("  (no rows)");
        return;
    }
    println!("  {}", table.columns().join("\t"));
    for row in table.rows() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("  {}", cells.join("\t"));
    }
}

fn print_map(view: &GeneralView) {
    println!("Working files: {} and {}", view.block_source, view.well_source);
    println!(
        "Map center {:.4}, {:.4} at zoom {}",
        view.map.center.lat, view.map.center.lon, view.map.zoom
    );
    println!("{} blocks", view.map.blocks.len());
    if let Some(block) = &view.map.highlighted {
        println!(
            "  Selected block {} (label at {:.4}, {:.4})",
            block.name, block.label_at.lat, block.label_at.lon
        );
    }
    println!(
        "{} of {} wells in the block selected",
        view.wells.len(),
        view.wells_in_block.len()
    );
    for marker in &view.map.markers {
        println!(
            "  {} at {:.5}, {:.5}",
            marker.name, marker.position.lat, marker.position.lon
        );
        for field in &marker.popup {
            println!("    {}: {}", field.name, field.value);
        }
    }
}

fn print_wells(view: &GeneralView) {
    println!(
        "Block {}: {} wells found",
        view.block.as_deref().unwrap_or("-"),
        view.wells_in_block.len()
    );
    print_table(&view.well_table);
}

fn print_tops(view: &TopsDstsView) {
    println!("Workbook: {}", view.source);
    let Some(tops) = &view.tops else {
        println!("No wells with tops");
        return;
    };
    println!(
        "Tops of {} from {} to {} m",
        tops.well, tops.range.start, tops.range.stop
    );
    for marker in &tops.markers {
        println!("  {:>8.1}  {}", marker.depth_md_m, marker.name);
    }
    print_table(&tops.table);
}

fn print_dsts(view: &TopsDstsView) {
    println!("Workbook: {}", view.source);
    let Some(dsts) = &view.dsts else {
        println!("No wells with DSTs");
        return;
    };
    println!(
        "DSTs of {} from {} to {} m",
        dsts.well, dsts.range.start, dsts.range.stop
    );
    for interval in &dsts.intervals {
        println!(
            "  {:<6} {:>8.1} - {:>8.1}",
            interval.label, interval.top_md_m, interval.base_md_m
        );
    }
    print_table(&dsts.table);
}

fn print_crossplot(view: &WellLogsView) {
    let plot = &view.plot;
    println!("{} ({})", plot.well_name, view.source);
    println!(
        "{} ({:?}) vs {} ({:?}), colored by {}",
        plot.x_column, plot.x_scale, plot.y_column, plot.y_scale, plot.color_column
    );
    println!(
        "✓ {} points plotted, {} dropped",
        plot.points.len(),
        plot.dropped
    );
}

fn print_las_info(view: &WellLogsView) {
    println!("{} ({})", view.plot.well_name, view.source);
    println!("Curves: {}", view.columns.join(", "));
    for (title, table) in [
        ("Well information", &view.headers.well),
        ("Curve information", &view.headers.curves),
        ("Parameter information", &view.headers.parameters),
        ("Other information", &view.headers.other),
    ] {
        println!("{}:", title);
        print_table(table);
    }
    for issue in &view.issues {
        println!("✗ {} section unreadable: {}", issue.section.label(), issue.message);
    }
}
