//! Dashboard rendering.
//!
//! [`render`] is a pure function from the catalog and the user's input to a
//! [`Page`] tree. It runs from the top on every interaction. [`html`] turns
//! the tree into markup and [`chart`] draws the scatter plot as SVG.

pub mod chart;
pub mod html;

use serde::Deserialize;
use thiserror::Error;

use crate::error::KeplerError;
use crate::kepler::{compute_ratios, select_by_host};
use crate::models::{Catalog, LawCheckResult, PlanetRecord, Selection, COLUMNS};

pub const TITLE: &str = "Checking Kepler's Third Law with the NASA Exoplanet Archive";

const INTRO: &str = "Kepler's third law states that the square of a planet's orbital period \
is proportional to the cube of the semi-major axis of its orbit. This page checks the law \
against the planets catalogued by the NASA Exoplanet Archive.";

/// Name of the host star text input, also the query parameter it submits.
pub const HOST_INPUT: &str = "host";

/// What is plotted against period² on the horizontal axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartAxis {
    /// Period³, so the period is plotted against itself rather than the
    /// semi-major axis. Kept as the default for compatibility.
    #[default]
    #[value(name = "period")]
    PeriodCubed,
    /// Semi-major axis³, the pairing Kepler's law is actually about.
    #[value(name = "semi-major-axis")]
    SemiMajorAxisCubed,
}

impl ChartAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PeriodCubed => "period",
            Self::SemiMajorAxisCubed => "semi-major-axis",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "period" => Some(Self::PeriodCubed),
            "semi-major-axis" => Some(Self::SemiMajorAxisCubed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PeriodCubed => "Orbital Period³ [days³]",
            Self::SemiMajorAxisCubed => "Semi-Major Axis³ [au³]",
        }
    }
}

/// Options fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub chart_axis: ChartAxis,
}

impl RenderOptions {
    /// Load options from `KEPLER_CHART_AXIS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let chart_axis = match std::env::var("KEPLER_CHART_AXIS") {
            Ok(value) => ChartAxis::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown KEPLER_CHART_AXIS value: {}", value);
                ChartAxis::default()
            }),
            Err(_) => ChartAxis::default(),
        };
        Self { chart_axis }
    }
}

/// Everything the user can change between interactions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardState {
    /// The typed host star name. `None` means the input was never touched.
    pub host: Option<String>,
}

/// A rendered dashboard page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub title: String,
    pub sidebar: Vec<Block>,
    pub main: Vec<Block>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sidebar.iter().chain(self.main.iter())
    }

    pub fn errors(&self) -> Vec<&str> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Error(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&Table> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }

    pub fn charts(&self) -> Vec<&ScatterChart> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Chart(chart) => Some(chart),
                _ => None,
            })
            .collect()
    }
}

/// One widget on the page.
#[derive(Debug, Clone)]
pub enum Block {
    Header(String),
    Info(String),
    Caption(String),
    Table(Table),
    TextInput {
        name: String,
        label: String,
        value: String,
    },
    Success(String),
    Error(String),
    Chart(ScatterChart),
}

/// A table with a zero-based row index column.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records(records: &[PlanetRecord]) -> Self {
        Self {
            headers: COLUMNS.iter().map(|c| c.label.to_string()).collect(),
            rows: records.iter().map(|r| r.cells().to_vec()).collect(),
        }
    }
}

/// A scatter chart with one series per planet.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl ScatterChart {
    /// Period² against the configured axis for every planet of the selection.
    ///
    /// Planets missing either coordinate are left out.
    pub fn kepler(selection: &Selection, axis: ChartAxis) -> Self {
        let series = selection
            .records
            .iter()
            .filter_map(|record| {
                let period = record.orbital_period?;
                let x = match axis {
                    ChartAxis::PeriodCubed => period.powi(3),
                    ChartAxis::SemiMajorAxisCubed => record.semi_major_axis?.powi(3),
                };
                Some(ScatterSeries {
                    name: record.planet_name.clone(),
                    points: vec![(x, period.powi(2))],
                })
            })
            .collect();

        Self {
            title: format!("Kepler's third law: {}", selection.host_name),
            x_label: axis.label().to_string(),
            y_label: "Orbital Period² [days²]".to_string(),
            series,
        }
    }
}

/// A render pass that stopped partway.
///
/// `page` holds every block drawn before the failure, followed by an error
/// banner, so the catalog table and the host input remain usable.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct RenderAborted {
    pub page: Box<Page>,
    pub source: KeplerError,
}

impl RenderAborted {
    fn new(mut page: Page, source: KeplerError) -> Self {
        page.main.push(Block::Error(format!(
            "The check could not be completed: {}",
            source
        )));
        Self {
            page: Box::new(page),
            source,
        }
    }
}

/// Render the dashboard for the current input.
///
/// An unknown host is shown as an error banner and the page stops after it.
/// Any other failure aborts the pass, keeping what was drawn so far.
pub fn render(
    catalog: &Catalog,
    state: &DashboardState,
    options: &RenderOptions,
) -> Result<Page, RenderAborted> {
    let mut page = Page::new(TITLE);
    page.main.push(Block::Info(INTRO.to_string()));
    page.main.push(Block::Header("Exoplanet Catalog".to_string()));
    page.main.push(Block::Caption(format!(
        "{} planets around {} host stars, fetched {}",
        catalog.len(),
        catalog.host_names().len(),
        catalog.fetched_at.format("%Y-%m-%d %H:%M UTC"),
    )));
    page.main.push(Block::Table(Table::from_records(catalog.records())));

    let host = match &state.host {
        Some(host) => host.clone(),
        None => catalog.default_host().unwrap_or_default().to_string(),
    };
    page.sidebar.push(Block::TextInput {
        name: HOST_INPUT.to_string(),
        label: "Host star name".to_string(),
        value: host.clone(),
    });

    let selection = match select_by_host(catalog, &host) {
        Ok(selection) => selection,
        Err(KeplerError::UnknownHost(name)) => {
            tracing::debug!("Host star not in catalog: {}", name);
            page.main.push(Block::Error(
                "The host star name you entered is not in the catalog".to_string(),
            ));
            return Ok(page);
        }
        Err(e) => return Err(RenderAborted::new(page, e)),
    };

    page.main.push(Block::Header(format!("Planets in the {} system", host)));
    page.main.push(Block::Table(Table::from_records(&selection.records)));

    let ratios = match compute_ratios(&selection) {
        Ok(ratios) => ratios,
        Err(e) => return Err(RenderAborted::new(page, e)),
    };
    for result in ratios {
        page.main.push(Block::Success(ratio_message(&result)));
    }

    let chart = ScatterChart::kepler(&selection, options.chart_axis);
    page.main.push(Block::Chart(chart));

    Ok(page)
}

/// The success line shown for one planet.
pub fn ratio_message(result: &LawCheckResult) -> String {
    match result.ratio {
        Some(ratio) => format!(
            "Planet {}: orbital period² / semi-major axis³ = {}",
            result.planet_name, ratio
        ),
        None => format!(
            "Planet {}: orbital period² / semi-major axis³ is not available",
            result.planet_name
        ),
    }
}
