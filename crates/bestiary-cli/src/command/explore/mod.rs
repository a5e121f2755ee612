use std::path::PathBuf;

use bestiary_analysis::dashboard::Dashboard;
use bestiary_runtime::{Runtime, ScreenStack};

use crate::{command::selection::SelectionArg, util};

use self::screens::DashboardScreen;

mod screens;
mod widgets;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExploreArg {
    /// Monster CSV file path
    monsters_file: PathBuf,
    #[clap(flatten)]
    selection: SelectionArg,
}

pub(crate) fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let ExploreArg {
        monsters_file,
        selection,
    } = arg;

    let bestiary = util::read_monsters_file(monsters_file)?;
    let mut dashboard = Dashboard::new(bestiary.into_monsters());
    selection.apply_to(&mut dashboard)?;

    let mut app = ScreenStack::new(Box::new(DashboardScreen::new(dashboard)));
    Runtime::new().run(&mut app)?;
    Ok(())
}
