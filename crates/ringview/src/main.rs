use clap::{Parser, Subcommand};
use ringview::config::{self, ConfigDataSource};
use ringview::geometry::{DEFAULT_START_ANGLE, Point, RingLayout};
use ringview::{Delegate, RingView, SOCKET_PATH};
use std::cell::Cell;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "ringview", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct RingArgs {
    /// Number of items on the ring
    #[arg(short = 'n', long)]
    count: usize,

    /// Ring radius
    #[arg(short = 'r', long, default_value_t = 120.0)]
    radius: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    cx: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    cy: f64,

    /// Angle of the first item in degrees, clockwise from 3 o'clock
    #[arg(long, allow_negative_numbers = true)]
    start_angle: Option<f64>,
}

impl RingArgs {
    fn layout(&self) -> RingLayout {
        let start = self
            .start_angle
            .map_or(DEFAULT_START_ANGLE, f64::to_radians);
        RingLayout::new(Point::new(self.cx, self.cy), self.radius).with_start_angle(start)
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print item geometry as JSON
    Layout {
        #[command(flatten)]
        ring: RingArgs,
    },
    /// Print the index of the item under a point
    Hit {
        #[command(flatten)]
        ring: RingArgs,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Tap a point on the configured ring, centered at the origin
    Tap {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Configuration file (defaults to the user config)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration file
    InitConfig,
    /// Ask a running ring host to reload its items
    Reload,
    /// Ask a running ring host to cancel the current interaction
    Cancel,
}

#[derive(Default)]
struct LastSelection(Cell<Option<usize>>);

impl Delegate for LastSelection {
    fn did_select_item(&self, index: usize) {
        self.0.set(Some(index));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { ring } => {
            let mut layout = ring.layout();
            let geometries = layout.geometries(ring.count);
            println!("{}", serde_json::to_string_pretty(geometries)?);
            Ok(())
        }
        Commands::Hit { ring, x, y } => {
            let mut layout = ring.layout();
            match geometry_hit(&mut layout, ring.count, Point::new(x, y)) {
                Some(i) => println!("{}", i),
                None => println!("none"),
            }
            Ok(())
        }
        Commands::Tap { x, y, config } => tap(Point::new(x, y), config),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Reload => send_command("reload"),
        Commands::Cancel => send_command("cancel"),
    }
}

fn geometry_hit(layout: &mut RingLayout, count: usize, point: Point) -> Option<usize> {
    ringview::selection::hit_test(layout.geometries(count), point)
}

fn tap(point: Point, path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = config::load_or_default(path.as_deref());
    let source = Rc::new(ConfigDataSource::from_config(&config));
    let delegate = Rc::new(LastSelection::default());

    let mut view = RingView::from_config(&config);
    view.set_data_source(&source);
    view.set_delegate(&delegate);

    if view.number_of_items() == 0 {
        anyhow::bail!("The configured ring has no items");
    }

    view.begin_interaction(point);
    view.end_interaction(point);

    match delegate.0.get() {
        Some(index) => {
            let title = view
                .item(index)
                .map(|item| item.title.to_string())
                .unwrap_or_default();
            println!("{} {}", index, title);
        }
        None => match view.hit_test(point) {
            Some(i) => println!("none (item {} is disabled)", i),
            None => println!("none"),
        },
    }
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to ring host at {}: {}. Is ringview-gtk running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
