// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: run one theme pass over a venue snapshot.
//!
//! Reads the provider's venue export and a theme, classifies and styles every
//! entity into a fresh state table, and writes the resulting visual states
//! (plus the pass report, and optionally planned labels) as JSON.
//!
//! Usage:
//!   wayfind-theme <venue.json> [options]

mod config;

use std::collections::BTreeMap;
use std::fs;

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use wayfind_theming::{
    apply_theme, plan_labels, ApplyReport, Category, LabelSpec, StateTable, ThemeConfig,
    VenueSnapshot, VisualState,
};

use config::{Config, THEME_ENV};

#[derive(Serialize)]
struct PassOutput<'a> {
    report: &'a ApplyReport,
    states: BTreeMap<String, &'a VisualState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<LabelSpec>>,
}

fn print_usage() {
    println!("Usage: wayfind-theme <venue.json> [options]");
    println!();
    println!("Options:");
    println!("  --theme <path>    Theme JSON (default: ${THEME_ENV}, then built-in honeycrisp)");
    println!("  --output <path>   Write pass output here instead of stdout");
    println!("  --labels          Include planned room and connection labels");
    println!("  --quiet           Skip the per-floor summary");
    println!("  -h, --help        Show this help");
}

fn load_theme(config: &Config) -> anyhow::Result<ThemeConfig> {
    match &config.theme_path {
        Some(path) => ThemeConfig::from_path(path)
            .with_context(|| format!("cannot load theme '{}'", path.display())),
        None => Ok(ThemeConfig::honeycrisp()),
    }
}

fn print_summary(venue: &VenueSnapshot, report: &ApplyReport) {
    eprintln!("=== Theme pass ===");
    for floor in venue.floors_by_elevation() {
        let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
        for space in venue.spaces_on_floor(&floor.id) {
            if let Some(category) = report.spaces.get(&space.id) {
                *counts.entry(*category).or_default() += 1;
            }
        }
        let breakdown: Vec<String> = counts
            .iter()
            .map(|(category, count)| format!("{category}={count}"))
            .collect();
        eprintln!("  {:<12} {}", floor.display_name(), breakdown.join(" "));
    }
    eprintln!(
        "  spaces={} objects={} groups={} failures={}",
        report.spaces_styled(),
        report.objects_styled,
        report.groups_styled,
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!("  ! {}: {}", failure.entity, failure.message);
    }
}

fn main() -> anyhow::Result<()> {
    let Some(config) = Config::from_args(std::env::args().skip(1))? else {
        print_usage();
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let venue = VenueSnapshot::from_path(&config.venue_path)
        .with_context(|| format!("cannot load venue '{}'", config.venue_path.display()))?;
    let theme = load_theme(&config)?;

    tracing::info!(
        venue = %config.venue_path.display(),
        theme = theme.name.as_deref().unwrap_or("unnamed"),
        floors = venue.floors.len(),
        spaces = venue.spaces.len(),
        connections = venue.connections.len(),
        objects = venue.objects.len(),
        "Applying theme"
    );

    let mut states = StateTable::new();
    let report = apply_theme(&mut states, &venue, &theme);

    if !config.quiet {
        print_summary(&venue, &report);
    }

    let output = PassOutput {
        report: &report,
        states: states.to_sorted_map(),
        labels: config.labels.then(|| plan_labels(&venue, &theme)),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match &config.output_path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("cannot write '{}'", path.display()))?;
            tracing::info!(output = %path.display(), states = states.len(), "Wrote theme states");
        }
        None => println!("{json}"),
    }

    Ok(())
}
