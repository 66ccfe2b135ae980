use clap::Parser;
use relm4::prelude::*;
use ringview::config;
use ringview_gtk::gui::app::AppModel;
use ringview_gtk::gui::ring::RingState;
use ringview_gtk::sys::{runtime, watcher};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ringview-gtk", version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to the user config)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = config::load_or_default(args.config.as_deref());
    let state = RingState::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    let watch_path = args
        .config
        .clone()
        .or_else(|| config::get_config_path().ok())
        .map(|p| watcher::resolve_watch_path(&p));
    runtime::start_background_services(tx, watch_path);

    let app = RelmApp::new("org.ringview.Ring");

    app.run::<AppModel>((state, args.config, rx));
}
