//! Plain-text reports, one item per line

use crate::cli::{Mode, VmsFormat};
use crate::error::Result;
use crate::filter::Inventory;
use std::io::{self, Write};

/// Separator printed after each builder in the legacy vms layout
pub const LEGACY_SEPARATOR: &str = "---------------";

/// A fully computed report, ready to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Masters in first-seen order
    Masters(Vec<String>),
    /// Sorted builders of one master
    Builders(Vec<String>),
    /// Sorted hostnames backing one master's builders
    Hostnames(Vec<String>),
    /// Legacy vms layout: each builder with its hostname list
    BuilderHosts(Vec<(String, Vec<String>)>),
}

impl Report {
    /// Run the queries for `mode`. Nothing is printed here, so a failed
    /// lookup never leaves partial output behind.
    pub fn build(inventory: &Inventory, mode: &Mode, vms_format: VmsFormat) -> Result<Self> {
        let report = match mode {
            Mode::ListMasters => {
                let groups = inventory.relevant_bots_by_master()?;
                Report::Masters(groups.masters().map(str::to_string).collect())
            }
            Mode::ListBuilders(master) => Report::Builders(inventory.builders_for_master(master)?),
            Mode::ListVms(master) => {
                let builders = inventory.builders_for_master(master)?;
                match vms_format {
                    VmsFormat::Sorted => {
                        Report::Hostnames(inventory.hostnames_for_builders(master, &builders)?)
                    }
                    VmsFormat::Legacy => {
                        Report::BuilderHosts(inventory.builder_hosts(master, &builders)?)
                    }
                }
            }
        };
        Ok(report)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Report::Masters(lines) | Report::Builders(lines) | Report::Hostnames(lines) => {
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            }
            Report::BuilderHosts(rows) => {
                for (builder, hostnames) in rows {
                    writeln!(out, "{}", builder)?;
                    writeln!(out, "{}", serde_json::to_string(hostnames)?)?;
                    writeln!(out, "{}", LEGACY_SEPARATOR)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocklist::Blocklist;
    use crate::snapshot::parse_records;

    fn inventory() -> Inventory {
        Inventory::new(
            parse_records(
                r#"[
                    {"os": "mac", "mastername": "master.foo", "builder": ["b1", "ios-b2"]},
                    {"os": "mac", "mastername": "master.bar", "builder": ["b9"]}
                ]"#,
            )
            .unwrap(),
            parse_records(
                r#"[{"mastername": "master.foo", "builder": "b1", "hostname": ["h2", "h1"]}]"#,
            )
            .unwrap(),
            Blocklist::default(),
        )
    }

    fn render(report: &Report) -> String {
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_masters_report() {
        let report = Report::build(&inventory(), &Mode::ListMasters, VmsFormat::Sorted).unwrap();
        assert_eq!(render(&report), "master.foo\nmaster.bar\n");
    }

    #[test]
    fn test_builders_report() {
        let mode = Mode::ListBuilders("master.foo".to_string());
        let report = Report::build(&inventory(), &mode, VmsFormat::Sorted).unwrap();
        assert_eq!(report, Report::Builders(vec!["b1".to_string()]));
        assert_eq!(render(&report), "b1\n");
    }

    #[test]
    fn test_vms_report_sorted() {
        let mode = Mode::ListVms("master.foo".to_string());
        let report = Report::build(&inventory(), &mode, VmsFormat::Sorted).unwrap();
        assert_eq!(render(&report), "h1\nh2\n");
    }

    #[test]
    fn test_vms_report_legacy() {
        let mode = Mode::ListVms("master.foo".to_string());
        let report = Report::build(&inventory(), &mode, VmsFormat::Legacy).unwrap();
        assert_eq!(render(&report), "b1\n[\"h2\",\"h1\"]\n---------------\n");
    }

    #[test]
    fn test_vms_report_unknown_builder_fails() {
        // master.bar has a relevant builder but no builder snapshot entry
        let mode = Mode::ListVms("master.bar".to_string());
        assert!(Report::build(&inventory(), &mode, VmsFormat::Sorted).is_err());
    }

    #[test]
    fn test_empty_report_prints_nothing() {
        assert_eq!(render(&Report::Masters(Vec::new())), "");
    }
}
