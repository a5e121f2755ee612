//! Filtering, aggregation, and shared selection state for the monster
//! dashboard.
//!
//! Every view is a pure function of the working set and a
//! [`SelectionState`](selection::SelectionState). The
//! [`Dashboard`](dashboard::Dashboard) controller owns both and recomputes
//! views on demand; nothing is cached between calls.
//!
//! # Views
//!
//! - **Bar chart** ([`group::aggregate`]): one metric per group of the chosen
//!   dimension
//! - **Scatter** ([`scatter::scatter`]): a stat against challenge rating with
//!   correlation and a least squares trend line
//! - **Defense heatmap** ([`defense::aggregate`]): share of each group having
//!   each damage resistance, immunity, or vulnerability
//! - **Environment comparison** ([`comparison::compare`]) and
//!   **type composition** ([`composition::composition`])
//!
//! A view with nothing to show returns [`View::NoData`](view::View::NoData)
//! with a reason the renderer can display.
//!
//! # Example
//!
//! ```
//! use bestiary_analysis::{dashboard::Dashboard, selection::SelectionEvent};
//! use bestiary_data::{field::Dimension, loader::Bestiary};
//!
//! let csv = "name,type,environment,cr\nWolf,beast,Forest,1/4\nBear,beast,Forest,1\nBat,beast,Cave,0\n";
//! let monsters = Bestiary::from_reader(csv.as_bytes()).unwrap().into_monsters();
//! let mut dashboard = Dashboard::new(monsters);
//!
//! let chart = dashboard.bar_chart().into_data().unwrap();
//! assert_eq!(chart.groups[0].key, "Forest");
//!
//! dashboard.apply(SelectionEvent::ToggleGroup("Forest".into()));
//! dashboard.apply(SelectionEvent::SetDimension(Dimension::Type));
//! assert_eq!(dashboard.state().selected_group(), None);
//! ```

pub mod comparison;
pub mod composition;
pub mod dashboard;
pub mod defense;
pub mod filter;
pub mod group;
pub mod metric;
pub mod scatter;
pub mod selection;
pub mod view;
