//! URL and time-axis inspection.

use dm_core::config::DashboardConfig;
use dm_core::time_selector::TimeSelector;
use dm_core::viewport::{MapView, MemoryAddressBar, Viewport, ViewportSync};
use std::io::Write;

/// Stands in for the map camera; remembers where it was sent.
#[derive(Default)]
struct DetachedMap {
    viewport: Viewport,
}

impl MapView for DetachedMap {
    fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    fn center(&self) -> [f64; 2] {
        self.viewport.center
    }

    fn jump_to(&mut self, viewport: &Viewport, _duration_ms: u32) {
        self.viewport = *viewport;
    }
}

/// Print the viewport a page load would use and the rewritten query.
pub fn resolve_url<W: Write>(query: &str, out: &mut W) -> anyhow::Result<()> {
    let mut bar = MemoryAddressBar::from_query(query);
    let mut map = DetachedMap::default();
    let viewport = ViewportSync::new().load(&mut bar, &mut map);
    writeln!(out, "zoom:   {}", viewport.zoom)?;
    writeln!(out, "center: {},{}", viewport.center[0], viewport.center[1])?;
    writeln!(out, "url:    ?{}", bar.query_string())?;
    Ok(())
}

/// Print `YYYY-MM-DD<TAB>available|unpublished` for each selectable period.
pub fn periods<W: Write>(config: &DashboardConfig, year: Option<i32>, out: &mut W) -> anyhow::Result<()> {
    let mut selector = TimeSelector::new(config.granularity, config.coverage()?);
    let years = match year {
        Some(y) if y < selector.min_year() || y > selector.max_year() => {
            anyhow::bail!(
                "{y} is outside {}..={}",
                selector.min_year(),
                selector.max_year()
            )
        }
        Some(y) => y..=y,
        None => selector.min_year()..=selector.max_year(),
    };
    for y in years {
        selector.set_year(y);
        for index in selector.period_bounds(y) {
            selector.set_period_index(index);
            let status = if selector.data_available() {
                "available"
            } else {
                "unpublished"
            };
            writeln!(out, "{}\t{}", selector.canonical_time(), status)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_url_falls_back_and_rewrites() {
        let mut out = Vec::new();
        resolve_url("zoom=abc&center=10,200", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("zoom:   1.3\n"));
        assert!(text.contains("url:    ?zoom=1.3&center=-40,40"));
    }

    #[test]
    fn periods_of_last_year_stop_at_coverage_end() {
        let mut config = DashboardConfig::default();
        config.max_available_date = Some("2024-04-30".to_string());
        let mut out = Vec::new();
        periods(&config, Some(2024), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "2024-01-01\tavailable");
        assert_eq!(lines[3], "2024-04-01\tavailable");
        assert_eq!(lines[5], "2024-06-01\tunpublished");

        assert!(periods(&config, Some(1999), &mut Vec::new()).is_err());
    }
}
