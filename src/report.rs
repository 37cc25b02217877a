use crate::scheduler::{Generation, IntervalExtreme};
use std::fmt::Write;

/// Permet de customiser le rendu d'une génération (texte, HTML, etc.).
pub trait ReportRenderer {
    fn render(&self, generation: &Generation) -> String;
}

/// Rendu texte : tableau aligné puis plus long / plus court intervalle.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

const DATE_WIDTH: usize = 12;

impl ReportRenderer for TextReport {
    fn render(&self, generation: &Generation) -> String {
        let name_width = generation
            .schedule
            .iter()
            .map(|w| w.first_priority.as_str().chars().count())
            .chain(std::iter::once("first_priority".len()))
            .max()
            .unwrap_or_default()
            + 2;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<DATE_WIDTH$}{:<name_width$}second_priority",
            "week", "first_priority"
        );
        for week in &generation.schedule {
            let _ = writeln!(
                out,
                "{:<DATE_WIDTH$}{:<name_width$}{}",
                week.date.format("%Y-%m-%d").to_string(),
                week.first_priority.as_str(),
                week.second_priority.as_str()
            );
        }

        let summary = generation.summary();
        out.push('\n');
        let _ = writeln!(out, "longest interval: {}", extreme(summary.longest.as_ref()));
        let _ = writeln!(out, "shortest interval: {}", extreme(summary.shortest.as_ref()));
        out
    }
}

fn extreme(value: Option<&IntervalExtreme>) -> String {
    match value {
        Some(e) => format!("{} ({} days)", e.person, e.days),
        None => "n/a".to_string(),
    }
}
