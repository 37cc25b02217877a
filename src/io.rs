use crate::model::{Person, PersonId, Roster, Schedule};
use crate::scheduler::{Generation, IntervalHistory, IntervalSummary};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Import du roster depuis CSV: header `name,is_new`
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let path = path.as_ref();
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_people(rdr)
}

/// Même format que [`import_people_csv`], depuis un lecteur quelconque.
pub fn read_people_csv<R: std::io::Read>(reader: R) -> anyhow::Result<Roster> {
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_people(rdr)
}

fn read_people<R: std::io::Read>(mut rdr: csv::Reader<R>) -> anyhow::Result<Roster> {
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?;
        if name.is_empty() {
            bail!("invalid people row {} (empty name)", line + 1);
        }
        let is_new = match rec.get(1) {
            Some(flag) if !flag.is_empty() => parse_bool(flag)
                .with_context(|| format!("invalid is_new value for {name}"))?,
            _ => false,
        };
        out.push(Person {
            id: PersonId::new(name),
            is_new,
        });
    }
    Ok(Roster::new(out))
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export CSV du tableau: header `week,date,first_priority,second_priority`
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["week", "date", "first_priority", "second_priority"])?;
    let mut week_buf = itoa::Buffer::new();
    for week in schedule {
        let date = week.date.format("%Y-%m-%d").to_string();
        w.write_record([
            week_buf.format(week.week + 1),
            date.as_str(),
            week.first_priority.as_str(),
            week.second_priority.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des intervalles: header `name,intervals` (jours séparés par `;`)
pub fn export_intervals_csv<P: AsRef<Path>>(
    path: P,
    history: &IntervalHistory,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["name", "intervals"])?;
    let mut buf = itoa::Buffer::new();
    for (person, intervals) in history.iter() {
        let joined = intervals
            .iter()
            .map(|days| buf.format(*days).to_owned())
            .collect::<Vec<_>>()
            .join(";");
        w.write_record([person.as_str(), joined.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct GenerationReport<'a> {
    #[serde(flatten)]
    generation: &'a Generation,
    summary: IntervalSummary,
}

/// Export JSON de la génération et de sa synthèse, écrit de manière atomique.
pub fn export_generation_json<P: AsRef<Path>>(
    path: P,
    generation: &Generation,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let report = GenerationReport {
        generation,
        summary: generation.summary(),
    };
    let json = serde_json::to_vec_pretty(&report)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
