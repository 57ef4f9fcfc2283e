use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use flipbook_core::{
    Bitmap, DocumentInput, DocumentLoader, DocumentSource, Flipbook, FlipbookOptions, FlipbookView,
    NullPresenter, Outcome, Presenter, ThumbnailSet, Tier, Transition,
};
use flipbook_pdfium::{PdfiumLoader, PdfiumSource};
use flipbook_runtime::logger::AppLogger;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod script;

#[derive(Parser)]
#[command(name = "flipbook", about = "3D flipbook PDF viewer CLI", version)]
struct Cli {
    /// Viewer options as JSON
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count of a document
    Info {
        /// PDF file or http(s) URL (defaults to the configured source)
        input: Option<String>,
    },

    /// Write a PNG thumbnail per page
    Thumbnails {
        /// PDF file or http(s) URL (defaults to the configured source)
        input: Option<String>,

        /// Output directory
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Render scale (defaults to the configured thumbnail scale)
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Turn to a page, zoom, and write the best available rendering as PNG
    Render {
        /// PDF file or http(s) URL (defaults to the configured source)
        input: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Zoom level (1.0 = fit)
        #[arg(short, long)]
        zoom: Option<f32>,

        /// Output PNG file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Run a scripted reading session and print the viewer state after each step
    Navigate {
        /// PDF file or http(s) URL (defaults to the configured source)
        input: Option<String>,

        /// Steps: next, prev, goto:N, zoom-in, zoom-out, zoom:L, reset, toggle,
        /// pan:DX:DY, resize:WxH
        #[arg(short, long)]
        script: String,

        /// Page turn duration in milliseconds (defaults to the configured one)
        #[arg(long)]
        duration_ms: Option<u64>,
    },
}

/// Prints page turns and renders as they happen
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn state_changed(&mut self, _view: &FlipbookView) {}

    fn transition_started(&mut self, transition: &Transition) {
        println!(
            "  turning {} -> {} ({:?}, {} ms)",
            transition.from,
            transition.to,
            transition.direction,
            transition.duration.as_millis()
        );
    }

    fn page_rendered(&mut self, page: usize, tier: Tier, bitmap: &Arc<Bitmap>) {
        println!(
            "  rendered page {} ({}) {}x{}",
            page, tier, bitmap.width, bitmap.height
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    AppLogger::new(1000)
        .with_level(level)
        .echo_to_stderr(true)
        .init()?;

    let options = match &cli.config {
        Some(path) => FlipbookOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FlipbookOptions::default(),
    };

    match cli.command {
        Commands::Info { input } => {
            let source = load(input, &options).await?;
            println!("Pages: {}", source.page_count());
            println!("Size: {} bytes", source.byte_len());
        }

        Commands::Thumbnails {
            input,
            out_dir,
            scale,
        } => {
            let source = load(input, &options).await?;
            let scale = scale.unwrap_or(options.thumbnail_scale);
            if !scale.is_finite() || scale <= 0.0 {
                bail!("Scale must be a positive number, got {}", scale);
            }

            let thumbnails = ThumbnailSet::render(&source, scale).await?;
            tokio::fs::create_dir_all(&out_dir).await?;
            for thumbnail in thumbnails.iter() {
                let path = out_dir.join(format!("page-{:04}.png", thumbnail.page));
                save_png(&thumbnail.bitmap, &path)?;
            }
            println!(
                "Wrote {} thumbnails at {:.2}x → {}",
                thumbnails.len(),
                scale,
                out_dir.display()
            );
        }

        Commands::Render {
            input,
            page,
            zoom,
            out,
        } => {
            let source = load(input, &options).await?;
            if page == 0 || page > source.page_count() {
                bail!("Page {} is outside 1..={}", page, source.page_count());
            }

            // Nobody watches the animation here
            let options = FlipbookOptions {
                flip_duration_ms: 0,
                ..options
            };
            let mut book = Flipbook::open(source, NullPresenter, options).await?;
            book.go_to_page_and_settle(page).await?;
            if let Some(level) = zoom {
                book.set_zoom(level).await?;
            }

            let bitmap = book
                .best_bitmap(page)
                .with_context(|| format!("Page {} was not rendered", page))?;
            save_png(bitmap, &out)?;
            println!(
                "Page {} at {}% ({}x{}) → {}",
                page,
                book.state().zoom().percent(),
                bitmap.width,
                bitmap.height,
                out.display()
            );
        }

        Commands::Navigate {
            input,
            script,
            duration_ms,
        } => {
            let steps = script::parse_script(&script)?;
            let source = load(input, &options).await?;
            let options = FlipbookOptions {
                flip_duration_ms: duration_ms.unwrap_or(options.flip_duration_ms),
                ..options
            };

            let mut book = Flipbook::open(source, ConsolePresenter, options).await?;
            print_view("open", &book.view());

            for step in steps {
                let outcome = book.dispatch(step.intent).await?;
                match outcome {
                    Outcome::TransitionStarted(_) => {
                        book.settle().await?;
                    }
                    Outcome::CloseRequested => {
                        println!("{}: closed", step.label);
                        return Ok(());
                    }
                    Outcome::Ignored => println!("  ignored"),
                    _ => {}
                }
                print_view(&step.label, &book.view());
            }
        }
    }

    Ok(())
}

/// Load the document named on the command line, or the configured one
async fn load(input: Option<String>, options: &FlipbookOptions) -> Result<PdfiumSource> {
    let input = match (input, &options.source) {
        (Some(location), _) => DocumentInput::parse(&location),
        (None, Some(source)) => source.clone(),
        (None, None) => bail!("No input given and no source configured"),
    };

    let description = input.describe();
    let source = PdfiumLoader::new()
        .load(input)
        .await
        .with_context(|| format!("Failed to open {}", description))?;
    Ok(source)
}

fn print_view(label: &str, view: &FlipbookView) {
    println!(
        "{}: page {}/{}, zoom {}%, pan ({:.0}, {:.0}){}{}{}",
        label,
        view.current_page,
        view.total_pages,
        view.zoom_percent,
        view.pan.x,
        view.pan.y,
        if view.busy { ", turning" } else { "" },
        if view.can_go_previous { ", prev" } else { "" },
        if view.can_go_next { ", next" } else { "" },
    );
    for placement in &view.pages {
        println!(
            "    page {} {:?} z={} {}",
            placement.page,
            placement.slot,
            placement.transform.z_index,
            placement.transform.to_css()
        );
    }
}

fn save_png(bitmap: &Bitmap, path: &Path) -> Result<()> {
    let image = image::RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.rgba_data.clone())
        .context("Bitmap size does not match its pixel data")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
