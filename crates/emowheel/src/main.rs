use emowheel::config;
use emowheel::gui::app::AppModel;
use emowheel::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let wheel = config::load_or_default()?;

    let (tx, rx) = async_channel::bounded(32);

    // live reload of config and emotion data
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.plutchik.emowheel");

    app.run::<AppModel>((wheel, rx));
    Ok(())
}
