mod command;
mod logging;
mod util;

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    command::run()
}
