pub(crate) use self::{dashboard::DashboardScreen, help::HelpScreen};

mod dashboard;
mod help;
