//! Terminal output of the query subcommands.
//!
//! Every writer takes an `impl Write` so output can be captured in tests.

use nat_data::format::{format_mean, group_thousands};
use nat_data::Dashboard;
use nat_db::DatasetKind;
use std::io::Write;

/// One row per dataset: label, records, nationalities, year span.
pub fn write_summary(dashboard: &Dashboard, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{:<20} {:>10} {:>14}  {}",
        "Dataset", "Records", "Nationalities", "Years"
    )?;
    for kind in DatasetKind::ALL {
        let summary = dashboard.database().query_summary(kind)?;
        let years = match (&summary.first_year, &summary.last_year) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "-".to_string(),
        };
        writeln!(
            out,
            "{:<20} {:>10} {:>14}  {}",
            summary.label,
            group_thousands(summary.records),
            summary.nationalities,
            years
        )?;
    }
    Ok(())
}

/// Dropdown options of `kind`, marking the default selection with `*`.
pub fn write_nationalities(
    dashboard: &Dashboard,
    kind: DatasetKind,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let dropdown = dashboard.dropdown(kind)?;
    writeln!(out, "{}: {} nationalities", kind.label(), dropdown.options.len())?;
    for option in &dropdown.options {
        let mark = if dropdown.selected.contains(option) { '*' } else { ' ' };
        writeln!(out, "{} {}", mark, option)?;
    }
    Ok(())
}

pub fn write_top(
    dashboard: &Dashboard,
    kind: DatasetKind,
    n: u32,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if json {
        let figure = dashboard.top_figure(kind, n)?;
        writeln!(out, "{}", serde_json::to_string_pretty(&figure)?)?;
        return Ok(());
    }

    let ranking = dashboard.top_ranking(kind, n)?;
    writeln!(out, "{} - Top {}", kind.label(), n.max(1))?;
    writeln!(out, "{:>4}  {:<30} {:>12} {:>6}", "#", "Nationality", "Mean", "Years")?;
    for (rank, row) in ranking.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<30} {:>12} {:>6}",
            rank + 1,
            row.nationality,
            format_mean(row.mean),
            row.years
        )?;
    }
    Ok(())
}

pub fn write_selected(
    dashboard: &Dashboard,
    kind: DatasetKind,
    nationalities: &[String],
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let figure = dashboard.selected_figure(kind, nationalities)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&figure)?)?;
        return Ok(());
    }

    writeln!(out, "{}", figure.title)?;
    for series in &figure.series {
        let total: u64 = series.points.iter().map(|p| p.value).sum();
        writeln!(
            out,
            "  {:<30} {:>3} years  total {:>12}",
            series.name,
            series.points.len(),
            group_thousands(total)
        )?;
    }
    if figure.is_empty() {
        writeln!(out, "  (no data)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nat_db::Database;

    fn sample_dashboard() -> Dashboard {
        let csv = "nationalite,annee,iterations\n\
                   Belge,2015,1000\nBelge,2016,2000\n\
                   Suisse,2015,10\nSuisse,2016,20\n\
                   Italienne,2015,500\n";
        let db = Database::from_sources(DatasetKind::ALL.map(|k| (k, csv))).unwrap();
        Dashboard::new(db)
    }

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_lists_every_dataset() {
        let dashboard = sample_dashboard();
        let out = capture(|buf| write_summary(&dashboard, buf));
        assert!(out.contains("Auto-entrepreneurs"));
        assert!(out.contains("Sociétés"));
        assert!(out.contains("Tout confondu"));
        assert!(out.contains("2015-2016"));
    }

    #[test]
    fn test_nationalities_marks_default_selection() {
        let dashboard = sample_dashboard();
        let out = capture(|buf| write_nationalities(&dashboard, DatasetKind::Auto, buf));
        assert!(out.contains("3 nationalities"));
        assert!(out.contains("* Belge"));
        assert!(out.contains("* Suisse"));
    }

    #[test]
    fn test_top_table_is_ranked() {
        let dashboard = sample_dashboard();
        let out = capture(|buf| write_top(&dashboard, DatasetKind::Tout, 2, false, buf));
        let belge = out.find("Belge").unwrap();
        let italienne = out.find("Italienne").unwrap();
        assert!(belge < italienne);
        assert!(out.contains("1,500.0"));
        assert!(!out.contains("Suisse"));
    }

    #[test]
    fn test_top_json_is_figure() {
        let dashboard = sample_dashboard();
        let out = capture(|buf| write_top(&dashboard, DatasetKind::Societe, 1, true, buf));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value["title"],
            "Sociétés - Top 1 des nationalités par nombre d'itérations"
        );
        assert_eq!(value["series"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_selected_unknown_name_has_no_data() {
        let dashboard = sample_dashboard();
        let names = vec!["Atlantide".to_string()];
        let out = capture(|buf| write_selected(&dashboard, DatasetKind::Auto, &names, false, buf));
        assert!(out.contains("Évolution des 1 nationalités sélectionnées"));
        assert!(out.contains("(no data)"));
    }
}
